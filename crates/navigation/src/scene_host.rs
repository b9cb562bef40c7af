use std::cell::{Ref, RefCell};
use std::rc::Rc;

use foundation::math::Vec3;
use scene::World;
use scene::components::{Material, Tooltip};
use scene::entity::EntityId;
use scene::picking::{PickOptions, Ray, pick_ray};
use scene::prefabs::{HotspotPlane, spawn_hotspot_plane, spawn_photo_dome};

use crate::error::AssetLoadFailure;
use crate::host::{ButtonHandle, Panorama, Renderer, SwapTicket, UiHost};
use crate::session::{Session, TextureOutcome};
use crate::style::{ButtonStyleSet, ButtonVariant};

/// Banner shown through [`UiHost::show_info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoNotice {
    pub message: String,
    pub duration_ms: u32,
    pub delay_ms: u32,
}

/// Texture request still waiting for its completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTexture {
    pub ticket: SwapTicket,
    pub asset_path: String,
}

#[derive(Debug, Default)]
struct SceneState {
    world: World,
    loading: bool,
    loading_shown: usize,
    notices: Vec<InfoNotice>,
    pending: Vec<PendingTexture>,
}

/// Headless host: the dome and every button live as entities in a [`World`].
///
/// Clones share the same world, so a caller can keep one clone for
/// inspection while the session owns another.
#[derive(Debug, Clone, Default)]
pub struct SceneHost {
    state: Rc<RefCell<SceneState>>,
}

impl SceneHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world(&self) -> Ref<'_, World> {
        Ref::map(self.state.borrow(), |state| &state.world)
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// How many times the loading screen was raised.
    pub fn loading_shown(&self) -> usize {
        self.state.borrow().loading_shown
    }

    pub fn notices(&self) -> Vec<InfoNotice> {
        self.state.borrow().notices.clone()
    }

    /// Live hotspot buttons; the dome itself is never pickable.
    pub fn button_count(&self) -> usize {
        self.state.borrow().world.pickables().len()
    }

    /// Nearest visible button along `ray`.
    pub fn pick(&self, ray: Ray) -> Option<EntityId> {
        pick_ray(&self.state.borrow().world, ray, PickOptions::default()).map(|hit| hit.entity)
    }

    pub fn take_pending_textures(&self) -> Vec<PendingTexture> {
        std::mem::take(&mut self.state.borrow_mut().pending)
    }

    /// Removes the request tagged `ticket`, dropping every older one with it.
    pub fn take_pending_texture(&self, ticket: SwapTicket) -> Option<PendingTexture> {
        let mut state = self.state.borrow_mut();
        let found = state
            .pending
            .iter()
            .position(|texture| texture.ticket == ticket)
            .map(|index| state.pending.remove(index));
        state
            .pending
            .retain(|texture| texture.ticket.generation > ticket.generation);
        found
    }
}

impl Renderer for SceneHost {
    type Panorama = ScenePanorama;

    fn create_panorama(&mut self, asset_path: &str, diameter: f64) -> ScenePanorama {
        let entity = spawn_photo_dome(&mut self.state.borrow_mut().world, asset_path, diameter);
        ScenePanorama {
            state: Rc::clone(&self.state),
            entity,
        }
    }
}

impl UiHost for SceneHost {
    type Button = SceneButton;

    fn create_button(&mut self, anchor: Vec3, label: &str, style: &ButtonStyleSet) -> SceneButton {
        let tooltip = Tooltip::caption(label, style.caption_size, style.tooltip_offset_y);
        let entity = spawn_hotspot_plane(
            &mut self.state.borrow_mut().world,
            HotspotPlane {
                position: anchor,
                size: style.size,
                texture: &style.default_texture,
                tooltip,
            },
        );
        SceneButton {
            state: Rc::clone(&self.state),
            entity,
            style: style.clone(),
        }
    }

    fn show_info(&mut self, message: &str, duration_ms: u32, delay_ms: u32) {
        self.state.borrow_mut().notices.push(InfoNotice {
            message: message.to_string(),
            duration_ms,
            delay_ms,
        });
    }

    fn show_loading(&mut self) {
        let mut state = self.state.borrow_mut();
        state.loading = true;
        state.loading_shown += 1;
    }

    fn hide_loading(&mut self) {
        self.state.borrow_mut().loading = false;
    }
}

#[derive(Debug)]
pub struct ScenePanorama {
    state: Rc<RefCell<SceneState>>,
    entity: EntityId,
}

impl ScenePanorama {
    pub fn entity(&self) -> EntityId {
        self.entity
    }
}

impl Panorama for ScenePanorama {
    fn set_texture(&mut self, asset_path: &str, ticket: SwapTicket) {
        let mut state = self.state.borrow_mut();
        state
            .world
            .set_material(self.entity, Material::textured(asset_path));
        state.pending.push(PendingTexture {
            ticket,
            asset_path: asset_path.to_string(),
        });
    }

    fn dispose(&mut self) {
        self.state.borrow_mut().world.despawn(self.entity);
    }
}

#[derive(Debug)]
pub struct SceneButton {
    state: Rc<RefCell<SceneState>>,
    entity: EntityId,
    style: ButtonStyleSet,
}

impl SceneButton {
    pub fn entity(&self) -> EntityId {
        self.entity
    }
}

impl ButtonHandle for SceneButton {
    fn set_variant(&mut self, variant: ButtonVariant) {
        let texture = self.style.texture_for(variant);
        self.state
            .borrow_mut()
            .world
            .set_material(self.entity, Material::textured(texture));
    }

    fn set_tooltip_visible(&mut self, visible: bool) {
        if let Some(tooltip) = self.state.borrow_mut().world.tooltip_mut(self.entity) {
            tooltip.visible = visible;
        }
    }

    fn dispose(&mut self) {
        self.state.borrow_mut().world.despawn(self.entity);
    }
}

impl Session<SceneHost> {
    /// Settles every outstanding texture request, asking `load` for each result.
    pub fn complete_pending_textures(
        &mut self,
        mut load: impl FnMut(&str) -> Result<(), AssetLoadFailure>,
    ) -> Vec<TextureOutcome> {
        let pending = self.host().take_pending_textures();
        pending
            .into_iter()
            .map(|texture| {
                let result = load(&texture.asset_path);
                self.texture_loaded(texture.ticket, result)
            })
            .collect()
    }

    /// Index of the button hit by `ray`.
    pub fn pick_button(&self, ray: Ray) -> Option<usize> {
        let entity = self.host().pick(ray)?;
        self.find_button(|button| button.entity() == entity)
    }
}
