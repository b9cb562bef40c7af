use crate::components::{ComponentBounds, Drawable3D, Material, Tooltip, Transform, Visibility};
use crate::entity::EntityId;
use foundation::handles::HandleAllocator;

/// Slot-indexed component storage.
///
/// Components of a despawned entity are cleared, and setters/getters ignore
/// stale ids, so a released handle can never touch the slot's next occupant.
#[derive(Debug, Default)]
pub struct World {
    handles: HandleAllocator,
    transforms: Vec<Option<Transform>>,
    bounds: Vec<Option<ComponentBounds>>,
    visibility: Vec<Option<Visibility>>,
    drawables_3d: Vec<Option<Drawable3D>>,
    materials: Vec<Option<Material>>,
    tooltips: Vec<Option<Tooltip>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(self.handles.allocate());
        self.ensure_capacity(id.index() as usize);
        id
    }

    /// Removes `entity` and all of its components.
    ///
    /// Returns `false` if the entity was already despawned.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.handles.release(entity.0) {
            return false;
        }
        let idx = entity.index() as usize;
        self.transforms[idx] = None;
        self.bounds[idx] = None;
        self.visibility[idx] = None;
        self.drawables_3d[idx] = None;
        self.materials[idx] = None;
        self.tooltips[idx] = None;
        true
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.handles.is_live(entity.0)
    }

    pub fn entity_count(&self) -> usize {
        self.handles.live_count()
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        if let Some(idx) = self.live_index(entity) {
            self.transforms[idx] = Some(transform);
        }
    }

    pub fn set_bounds(&mut self, entity: EntityId, bounds: ComponentBounds) {
        if let Some(idx) = self.live_index(entity) {
            self.bounds[idx] = Some(bounds);
        }
    }

    pub fn set_visibility(&mut self, entity: EntityId, visibility: Visibility) {
        if let Some(idx) = self.live_index(entity) {
            self.visibility[idx] = Some(visibility);
        }
    }

    pub fn set_drawable_3d(&mut self, entity: EntityId, drawable: Drawable3D) {
        if let Some(idx) = self.live_index(entity) {
            self.drawables_3d[idx] = Some(drawable);
        }
    }

    pub fn set_material(&mut self, entity: EntityId, material: Material) {
        if let Some(idx) = self.live_index(entity) {
            self.materials[idx] = Some(material);
        }
    }

    pub fn set_tooltip(&mut self, entity: EntityId, tooltip: Tooltip) {
        if let Some(idx) = self.live_index(entity) {
            self.tooltips[idx] = Some(tooltip);
        }
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.live_index(entity).and_then(|idx| self.transforms[idx])
    }

    pub fn bounds(&self, entity: EntityId) -> Option<ComponentBounds> {
        self.live_index(entity).and_then(|idx| self.bounds[idx])
    }

    pub fn visibility(&self, entity: EntityId) -> Option<Visibility> {
        self.live_index(entity).and_then(|idx| self.visibility[idx])
    }

    pub fn drawable_3d(&self, entity: EntityId) -> Option<Drawable3D> {
        self.live_index(entity).and_then(|idx| self.drawables_3d[idx])
    }

    pub fn material(&self, entity: EntityId) -> Option<&Material> {
        self.live_index(entity)
            .and_then(|idx| self.materials[idx].as_ref())
    }

    pub fn tooltip(&self, entity: EntityId) -> Option<&Tooltip> {
        self.live_index(entity).and_then(|idx| self.tooltips[idx].as_ref())
    }

    pub fn tooltip_mut(&mut self, entity: EntityId) -> Option<&mut Tooltip> {
        let idx = self.live_index(entity)?;
        self.tooltips[idx].as_mut()
    }

    /// Visible drawables in ascending index order.
    pub fn drawables_3d(&self) -> Vec<(EntityId, Transform, Drawable3D)> {
        let mut out = Vec::new();
        for (idx, drawable) in self.drawables_3d.iter().enumerate() {
            let Some(drawable) = drawable else { continue };
            let Some(transform) = self.transforms.get(idx).and_then(|t| *t) else {
                continue;
            };
            if !self.is_visible_at(idx) {
                continue;
            }
            out.push((self.entity_at(idx), transform, *drawable));
        }
        out
    }

    /// Visible, pickable entities with explicit bounds, in ascending index order.
    pub fn pickables(&self) -> Vec<(EntityId, ComponentBounds)> {
        let mut out = Vec::new();
        for (idx, bounds) in self.bounds.iter().enumerate() {
            let Some(bounds) = bounds else { continue };
            let pickable = self
                .visibility
                .get(idx)
                .and_then(|v| *v)
                .is_some_and(|v| v.visible && v.pickable);
            if !pickable {
                continue;
            }
            out.push((self.entity_at(idx), *bounds));
        }
        out
    }

    fn is_visible_at(&self, idx: usize) -> bool {
        self.visibility
            .get(idx)
            .and_then(|v| *v)
            .map(|v| v.visible)
            .unwrap_or(true)
    }

    fn entity_at(&self, idx: usize) -> EntityId {
        // Occupied component slots always belong to a live handle.
        let handle = self
            .handles
            .live_handle_at(idx as u32)
            .unwrap_or_else(|| foundation::handles::Handle::new(idx as u32, 0));
        EntityId(handle)
    }

    fn live_index(&self, entity: EntityId) -> Option<usize> {
        self.handles
            .is_live(entity.0)
            .then_some(entity.index() as usize)
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.transforms.len() <= idx {
            let new_len = idx + 1;
            self.transforms.resize(new_len, None);
            self.bounds.resize(new_len, None);
            self.visibility.resize(new_len, None);
            self.drawables_3d.resize(new_len, None);
            self.materials.resize(new_len, None);
            self.tooltips.resize(new_len, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::World;
    use crate::components::{Drawable3D, Material, Transform, Visibility};

    #[test]
    fn spawn_and_collect_drawables() {
        let mut world = World::new();
        let entity = world.spawn();
        world.set_transform(entity, Transform::identity());
        world.set_drawable_3d(entity, Drawable3D::dome(10.0));

        let drawables = world.drawables_3d();
        assert_eq!(drawables.len(), 1);
        assert_eq!(drawables[0].0, entity);
    }

    #[test]
    fn hidden_entities_are_filtered() {
        let mut world = World::new();
        let entity = world.spawn();
        world.set_transform(entity, Transform::identity());
        world.set_drawable_3d(entity, Drawable3D::billboard(1.0));
        world.set_visibility(entity, Visibility::hidden());

        assert!(world.drawables_3d().is_empty());
    }

    #[test]
    fn despawn_clears_components_and_ignores_stale_ids() {
        let mut world = World::new();
        let old = world.spawn();
        world.set_material(old, Material::textured("a.png"));
        assert!(world.despawn(old));
        assert!(!world.despawn(old));
        assert!(!world.is_alive(old));

        let reused = world.spawn();
        assert_eq!(reused.index(), old.index());
        assert!(world.material(reused).is_none());

        world.set_material(old, Material::textured("stale.png"));
        assert!(world.material(reused).is_none());
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn collected_ids_carry_current_generation() {
        let mut world = World::new();
        let first = world.spawn();
        world.despawn(first);
        let second = world.spawn();
        world.set_transform(second, Transform::identity());
        world.set_drawable_3d(second, Drawable3D::billboard(1.0));

        let drawables = world.drawables_3d();
        assert_eq!(drawables[0].0, second);
        assert_eq!(second.generation(), 1);
    }
}
