//! Property tests for AABB raycasts.

use glam::Vec3;
use pickplace_core::Layer;
use pickplace_physics::{Aabb, ColliderProxy, CollisionWorld, Ray, RaycastQuery};
use proptest::prelude::*;

fn vec3(range: std::ops::Range<f32>) -> impl Strategy<Value = Vec3> {
    (range.clone(), range.clone(), range).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn hits_never_exceed_reach(
        center in vec3(-10.0..10.0),
        size in vec3(0.2..3.0),
        dir in vec3(-1.0..1.0),
        reach in 0.1f32..20.0,
    ) {
        prop_assume!(dir.length() > 0.1);
        let mut world = CollisionWorld::new();
        world.insert(ColliderProxy {
            id: 0u8,
            bounds: Aabb::from_center_size(center, size),
            layer: Layer::Default,
            is_trigger: false,
        });
        let ray = Ray::new(Vec3::ZERO, dir);
        if let Some(hit) = world.raycast(&ray, &RaycastQuery::with_max_distance(reach)) {
            prop_assert!(hit.distance >= 0.0);
            prop_assert!(hit.distance <= reach);
        }
    }

    #[test]
    fn hit_point_lies_on_box_surface(
        center in vec3(-10.0..10.0),
        size in vec3(0.2..3.0),
        dir in vec3(-1.0..1.0),
    ) {
        prop_assume!(dir.length() > 0.1);
        let bounds = Aabb::from_center_size(center, size);
        prop_assume!(!bounds.contains_point(Vec3::ZERO));
        let ray = Ray::new(Vec3::ZERO, dir);
        if let Some((t, normal)) = bounds.ray_intersection(&ray) {
            let point = ray.at(t);
            let grown = Aabb::from_center_size(center, size + Vec3::splat(1e-3));
            prop_assert!(grown.contains_point(point));
            // The reported face faces back towards the ray.
            prop_assert!(normal.dot(ray.direction) <= 1e-6);
        }
    }

    #[test]
    fn boxes_containing_the_origin_never_hit(
        offset in vec3(-0.5..0.5),
        size in vec3(1.2..4.0),
        dir in vec3(-1.0..1.0),
    ) {
        prop_assume!(dir.length() > 0.1);
        let mut world = CollisionWorld::new();
        world.insert(ColliderProxy {
            id: 0u8,
            bounds: Aabb::from_center_size(offset, size),
            layer: Layer::Default,
            is_trigger: false,
        });
        let ray = Ray::new(Vec3::ZERO, dir);
        prop_assert!(world.raycast(&ray, &RaycastQuery::with_max_distance(20.0)).is_none());
    }
}
