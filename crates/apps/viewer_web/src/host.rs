use foundation::math::Vec3;
use navigation::{
    ButtonHandle, ButtonStyleSet, ButtonVariant, Panorama, Renderer, SceneButton, SceneHost,
    ScenePanorama, SwapTicket, UiHost,
};
use scene::components::Tooltip;
use scene::entity::EntityId;
use scene::picking::Ray;
use wasm_bindgen::prelude::*;

use crate::loading::LoadingScreen;

// Rendering lives in the page script; it exposes a global `domeHost` object.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = domeHost, js_name = createDome)]
    fn js_create_dome(url: &str, diameter: f64);
    #[wasm_bindgen(js_namespace = domeHost, js_name = setDomeTexture)]
    fn js_set_dome_texture(url: &str, generation: f64);
    #[wasm_bindgen(js_namespace = domeHost, js_name = disposeDome)]
    fn js_dispose_dome();
    #[wasm_bindgen(js_namespace = domeHost, js_name = createButton)]
    fn js_create_button(
        id: u32,
        x: f64,
        y: f64,
        z: f64,
        size: f64,
        texture: &str,
        label: &str,
        tooltip_width: f64,
        tooltip_offset_y: f64,
    );
    #[wasm_bindgen(js_namespace = domeHost, js_name = setButtonTexture)]
    fn js_set_button_texture(id: u32, texture: &str);
    #[wasm_bindgen(js_namespace = domeHost, js_name = setTooltipVisible)]
    fn js_set_tooltip_visible(id: u32, visible: bool);
    #[wasm_bindgen(js_namespace = domeHost, js_name = disposeButton)]
    fn js_dispose_button(id: u32);
    #[wasm_bindgen(js_namespace = domeHost, js_name = showInfo)]
    fn js_show_info(message: &str, duration_ms: u32, delay_ms: u32);
}

/// Browser host: forwards every call to `domeHost` and mirrors the scene in
/// a [`SceneHost`] so pointer rays can be picked on the Rust side.
#[derive(Debug)]
pub struct WebHost {
    scene: SceneHost,
    loading: LoadingScreen,
    next_button: u32,
}

impl WebHost {
    pub fn new(loading: LoadingScreen) -> Self {
        Self {
            scene: SceneHost::new(),
            loading,
            next_button: 0,
        }
    }

    pub fn pick(&self, ray: Ray) -> Option<EntityId> {
        self.scene.pick(ray)
    }

    /// Asset requested by the swap tagged `ticket`. Completions arrive from the
    /// page, so the mirror only keeps the path until the swap settles.
    pub fn settle_swap(&self, ticket: SwapTicket) -> Option<String> {
        self.scene
            .take_pending_texture(ticket)
            .map(|texture| texture.asset_path)
    }
}

impl Renderer for WebHost {
    type Panorama = WebPanorama;

    fn create_panorama(&mut self, asset_path: &str, diameter: f64) -> WebPanorama {
        js_create_dome(asset_path, diameter);
        WebPanorama {
            mirror: self.scene.create_panorama(asset_path, diameter),
        }
    }
}

impl UiHost for WebHost {
    type Button = WebButton;

    fn create_button(&mut self, anchor: Vec3, label: &str, style: &ButtonStyleSet) -> WebButton {
        self.next_button = self.next_button.wrapping_add(1);
        let id = self.next_button;
        let tooltip = Tooltip::caption(label, style.caption_size, style.tooltip_offset_y);
        js_create_button(
            id,
            anchor.x,
            anchor.y,
            anchor.z,
            style.size,
            &style.default_texture,
            label,
            tooltip.width_px,
            tooltip.offset_y_px,
        );
        WebButton {
            id,
            mirror: self.scene.create_button(anchor, label, style),
            style: style.clone(),
        }
    }

    fn show_info(&mut self, message: &str, duration_ms: u32, delay_ms: u32) {
        js_show_info(message, duration_ms, delay_ms);
    }

    fn show_loading(&mut self) {
        self.loading.show();
    }

    fn hide_loading(&mut self) {
        self.loading.hide();
    }
}

#[derive(Debug)]
pub struct WebPanorama {
    mirror: ScenePanorama,
}

impl Panorama for WebPanorama {
    fn set_texture(&mut self, asset_path: &str, ticket: SwapTicket) {
        js_set_dome_texture(asset_path, ticket.generation.0 as f64);
        self.mirror.set_texture(asset_path, ticket);
    }

    fn dispose(&mut self) {
        js_dispose_dome();
        self.mirror.dispose();
    }
}

#[derive(Debug)]
pub struct WebButton {
    id: u32,
    mirror: SceneButton,
    style: ButtonStyleSet,
}

impl WebButton {
    pub fn entity(&self) -> EntityId {
        self.mirror.entity()
    }
}

impl ButtonHandle for WebButton {
    fn set_variant(&mut self, variant: ButtonVariant) {
        js_set_button_texture(self.id, self.style.texture_for(variant));
        self.mirror.set_variant(variant);
    }

    fn set_tooltip_visible(&mut self, visible: bool) {
        js_set_tooltip_visible(self.id, visible);
        self.mirror.set_tooltip_visible(visible);
    }

    fn dispose(&mut self) {
        js_dispose_button(self.id);
        self.mirror.dispose();
    }
}
