use foundation::math::Vec3;

use crate::World;
use crate::components::{ComponentBounds, Drawable3D, Material, Transform, Visibility};
use crate::entity::EntityId;

/// Spawns the panorama sphere around the viewer.
pub fn spawn_photo_dome(world: &mut World, texture: &str, diameter: f64) -> EntityId {
    let r = diameter * 0.5;
    let entity = world.spawn();
    world.set_transform(entity, Transform::identity());
    world.set_drawable_3d(entity, Drawable3D::dome(diameter));
    world.set_material(entity, Material::textured(texture));
    world.set_visibility(entity, Visibility::visible());
    world.set_bounds(
        entity,
        ComponentBounds::new(Vec3::new(-r, -r, -r), Vec3::new(r, r, r)),
    );
    entity
}

#[cfg(test)]
mod tests {
    use super::spawn_photo_dome;
    use crate::World;
    use crate::components::{Drawable3D, Shape3D};

    #[test]
    fn spawns_dome_drawable() {
        let mut world = World::new();
        let entity = spawn_photo_dome(&mut world, "textures/corridor.webp", 1000.0);

        let drawables = world.drawables_3d();
        assert_eq!(drawables.len(), 1);
        assert_eq!(drawables[0].0, entity);

        let Drawable3D { shape } = drawables[0].2;
        assert!(matches!(shape, Shape3D::Dome { .. }));
        assert_eq!(
            world.material(entity).map(|m| m.texture.as_str()),
            Some("textures/corridor.webp")
        );
    }

    #[test]
    fn dome_is_not_pickable() {
        let mut world = World::new();
        spawn_photo_dome(&mut world, "a.webp", 10.0);
        assert!(world.pickables().is_empty());
    }
}
