use foundation::math::Vec3;

use crate::World;
use crate::components::ComponentBounds;
use crate::entity::EntityId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub entity: EntityId,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
        }
    }
}

/// Deterministic ray picking over pickable entities.
///
/// Ordering contract:
/// - If multiple entities are hit at the same distance, the lower `EntityId::index()` wins.
/// - Otherwise, the closest hit along the (normalized) ray wins.
///
/// Notes:
/// - Only visible entities marked pickable with explicit bounds take part.
pub fn pick_ray(world: &World, ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let dir = ray.dir.normalized()?;
    let origin = ray.origin.as_array();
    let dir_a = dir.as_array();

    let mut best: Option<(f64, EntityId)> = None;
    for (entity, bounds) in world.pickables() {
        let Some(t) = ray_aabb_hit_t(origin, dir_a, bounds, 0.0, opts.max_distance) else {
            continue;
        };

        best = match best {
            None => Some((t, entity)),
            Some((bt, be)) => {
                let ord = t
                    .total_cmp(&bt)
                    .then_with(|| entity.index().cmp(&be.index()));
                if ord.is_lt() {
                    Some((t, entity))
                } else {
                    Some((bt, be))
                }
            }
        };
    }

    let (t, entity) = best?;
    Some(PickHit {
        entity,
        distance: t,
        point: ray.origin + dir * t,
    })
}

/// Screen picking wrapper.
///
/// The caller supplies a deterministic screen->ray mapping via `make_ray`.
pub fn pick_screen<F>(
    world: &World,
    x_px: f64,
    y_px: f64,
    mut make_ray: F,
    opts: PickOptions,
) -> Option<PickHit>
where
    F: FnMut(f64, f64) -> Option<Ray>,
{
    let ray = make_ray(x_px, y_px)?;
    pick_ray(world, ray, opts)
}

fn ray_aabb_hit_t(
    origin: [f64; 3],
    dir: [f64; 3],
    bounds: ComponentBounds,
    mut t_min: f64,
    mut t_max: f64,
) -> Option<f64> {
    // Slabs intersection; returns entry distance.
    let min = bounds.min.as_array();
    let max = bounds.max.as_array();
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];

        if d.abs() < 1e-12 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (min[axis] - o) * inv;
        let mut t2 = (max[axis] - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_max < t_min {
            return None;
        }
    }

    Some(t_min.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::{PickOptions, Ray, pick_ray};
    use crate::World;
    use crate::components::{ComponentBounds, Visibility};
    use crate::entity::EntityId;
    use foundation::math::Vec3;

    fn spawn_target(world: &mut World, center: Vec3) -> EntityId {
        let e = world.spawn();
        world.set_bounds(e, ComponentBounds::cube(center, 2.0));
        world.set_visibility(e, Visibility::interactive());
        e
    }

    #[test]
    fn ray_picks_nearest_hit() {
        let mut world = World::new();
        let a = spawn_target(&mut world, Vec3::new(5.0, 0.0, 0.0));
        let _b = spawn_target(&mut world, Vec3::new(10.0, 0.0, 0.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let hit = pick_ray(&world, ray, PickOptions::default()).expect("hit");
        assert_eq!(hit.entity, a);
        assert!(hit.distance >= 4.0 && hit.distance <= 6.0);
    }

    #[test]
    fn tie_breaks_by_entity_index() {
        let mut world = World::new();
        let first = spawn_target(&mut world, Vec3::new(5.0, 0.0, 0.0));
        let _second = spawn_target(&mut world, Vec3::new(5.0, 0.0, 0.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let hit = pick_ray(&world, ray, PickOptions::default()).expect("hit");
        assert_eq!(hit.entity, first);
    }

    #[test]
    fn non_pickable_and_despawned_entities_are_ignored() {
        let mut world = World::new();
        let shown_only = world.spawn();
        world.set_bounds(shown_only, ComponentBounds::cube(Vec3::new(5.0, 0.0, 0.0), 2.0));
        world.set_visibility(shown_only, Visibility::visible());
        let gone = spawn_target(&mut world, Vec3::new(7.0, 0.0, 0.0));
        world.despawn(gone);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        assert!(pick_ray(&world, ray, PickOptions::default()).is_none());
    }

    #[test]
    fn zero_direction_never_hits() {
        let mut world = World::new();
        spawn_target(&mut world, Vec3::ZERO);
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(pick_ray(&world, ray, PickOptions::default()).is_none());
    }
}
