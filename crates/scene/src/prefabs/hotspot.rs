use foundation::math::Vec3;

use crate::World;
use crate::components::{
    ComponentBounds, Drawable3D, Material, Tooltip, Transform, Visibility,
};
use crate::entity::EntityId;

/// Description of an interactive hotspot plane.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotPlane<'a> {
    pub position: Vec3,
    pub size: f64,
    pub texture: &'a str,
    pub tooltip: Tooltip,
}

/// Spawns a pickable billboard with a hidden caption tooltip.
pub fn spawn_hotspot_plane(world: &mut World, plane: HotspotPlane<'_>) -> EntityId {
    let entity = world.spawn();
    world.set_transform(entity, Transform::translate(plane.position));
    world.set_drawable_3d(entity, Drawable3D::billboard(plane.size));
    world.set_material(entity, Material::textured(plane.texture));
    world.set_visibility(entity, Visibility::interactive());
    world.set_bounds(entity, ComponentBounds::cube(plane.position, plane.size));
    world.set_tooltip(entity, plane.tooltip);
    entity
}
