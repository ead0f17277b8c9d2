//! Flat collision world: a list of collider proxies rebuilt every frame.

use crate::{Aabb, Ray};
use glam::Vec3;
use pickplace_core::{Layer, LayerMask};

/// World-space collider snapshot identified by `id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderProxy<T> {
    /// Owner of the collider.
    pub id: T,
    /// World-space bounds.
    pub bounds: Aabb,
    /// Layer the owner lives on.
    pub layer: Layer,
    /// Trigger colliders only report hits when the query asks for them.
    pub is_trigger: bool,
}

/// Parameters of a single raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastQuery {
    /// Hits further than this are ignored.
    pub max_distance: f32,
    /// Layers the ray can hit.
    pub mask: LayerMask,
    /// Whether trigger colliders are hit.
    pub hit_triggers: bool,
}

impl Default for RaycastQuery {
    fn default() -> Self {
        Self {
            max_distance: 5.0,
            mask: LayerMask::GAZE,
            hit_triggers: true,
        }
    }
}

impl RaycastQuery {
    /// Default query with a different reach.
    pub fn with_max_distance(max_distance: f32) -> Self {
        Self {
            max_distance,
            ..Self::default()
        }
    }
}

/// Nearest hit of a raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit<T> {
    /// Collider owner that was hit.
    pub id: T,
    /// Distance along the ray.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Outward normal of the face that was hit.
    pub normal: Vec3,
}

/// Set of colliders queried by raycasts.
#[derive(Debug, Clone)]
pub struct CollisionWorld<T> {
    proxies: Vec<ColliderProxy<T>>,
}

impl<T> Default for CollisionWorld<T> {
    fn default() -> Self {
        Self {
            proxies: Vec::new(),
        }
    }
}

impl<T: Copy> CollisionWorld<T> {
    /// Empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every proxy.
    pub fn clear(&mut self) {
        self.proxies.clear();
    }

    /// Add a proxy.
    pub fn insert(&mut self, proxy: ColliderProxy<T>) {
        self.proxies.push(proxy);
    }

    /// Number of proxies.
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// True when no proxies are registered.
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Iterate the registered proxies.
    pub fn proxies(&self) -> impl Iterator<Item = &ColliderProxy<T>> {
        self.proxies.iter()
    }

    /// Nearest hit passing `query`.
    pub fn raycast(&self, ray: &Ray, query: &RaycastQuery) -> Option<RaycastHit<T>> {
        self.raycast_filtered(ray, query, |_| true)
    }

    /// Nearest hit passing `query` and `filter`. Ties go to the earliest proxy.
    ///
    /// Colliders that contain the ray origin are never reported.
    pub fn raycast_filtered<F>(
        &self,
        ray: &Ray,
        query: &RaycastQuery,
        mut filter: F,
    ) -> Option<RaycastHit<T>>
    where
        F: FnMut(&T) -> bool,
    {
        if query.max_distance <= 0.0 || ray.direction == Vec3::ZERO {
            return None;
        }

        let mut best: Option<RaycastHit<T>> = None;
        for proxy in &self.proxies {
            if !query.mask.contains_layer(proxy.layer) {
                continue;
            }
            if proxy.is_trigger && !query.hit_triggers {
                continue;
            }
            if !filter(&proxy.id) {
                continue;
            }
            if proxy.bounds.contains_point(ray.origin) {
                continue;
            }
            let Some((distance, normal)) = proxy.bounds.ray_intersection(ray) else {
                continue;
            };
            if distance > query.max_distance {
                continue;
            }
            if best.as_ref().map_or(true, |hit| distance < hit.distance) {
                best = Some(RaycastHit {
                    id: proxy.id,
                    distance,
                    point: ray.at(distance),
                    normal,
                });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxy(id: u32, center: Vec3, layer: Layer) -> ColliderProxy<u32> {
        ColliderProxy {
            id,
            bounds: Aabb::from_center_size(center, Vec3::ONE),
            layer,
            is_trigger: false,
        }
    }

    fn forward() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::X)
    }

    #[test]
    fn nearest_hit_wins() {
        let mut world = CollisionWorld::new();
        world.insert(proxy(1, Vec3::new(4.0, 0.0, 0.0), Layer::Default));
        world.insert(proxy(2, Vec3::new(2.0, 0.0, 0.0), Layer::Default));

        let hit = world.raycast(&forward(), &RaycastQuery::default()).unwrap();
        assert_eq!(hit.id, 2);
        assert!((hit.distance - 1.5).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::NEG_X);
    }

    #[test]
    fn masked_layers_are_skipped() {
        let mut world = CollisionWorld::new();
        world.insert(proxy(1, Vec3::new(2.0, 0.0, 0.0), Layer::Overlay));
        world.insert(proxy(2, Vec3::new(3.0, 0.0, 0.0), Layer::IgnoreRaycast));
        world.insert(proxy(3, Vec3::new(4.0, 0.0, 0.0), Layer::Stencil));

        let hit = world.raycast(&forward(), &RaycastQuery::default()).unwrap();
        assert_eq!(hit.id, 3);
    }

    #[test]
    fn reach_limits_hits() {
        let mut world = CollisionWorld::new();
        world.insert(proxy(1, Vec3::new(8.0, 0.0, 0.0), Layer::Default));
        assert!(world.raycast(&forward(), &RaycastQuery::default()).is_none());
        assert!(world
            .raycast(&forward(), &RaycastQuery::with_max_distance(10.0))
            .is_some());
        assert!(world
            .raycast(&forward(), &RaycastQuery::with_max_distance(0.0))
            .is_none());
    }

    #[test]
    fn triggers_respect_query_flag() {
        let mut world = CollisionWorld::new();
        let mut trigger = proxy(1, Vec3::new(2.0, 0.0, 0.0), Layer::Default);
        trigger.is_trigger = true;
        world.insert(trigger);

        assert!(world.raycast(&forward(), &RaycastQuery::default()).is_some());
        let solid_only = RaycastQuery {
            hit_triggers: false,
            ..RaycastQuery::default()
        };
        assert!(world.raycast(&forward(), &solid_only).is_none());
    }

    #[test]
    fn filter_excludes_ids() {
        let mut world = CollisionWorld::new();
        world.insert(proxy(1, Vec3::new(2.0, 0.0, 0.0), Layer::Default));
        world.insert(proxy(2, Vec3::new(4.0, 0.0, 0.0), Layer::Default));
        let hit = world
            .raycast_filtered(&forward(), &RaycastQuery::default(), |id| *id != 1)
            .unwrap();
        assert_eq!(hit.id, 2);
    }

    #[test]
    fn colliders_around_the_origin_are_skipped() {
        let mut world = CollisionWorld::new();
        let mut volume = proxy(1, Vec3::ZERO, Layer::Default);
        volume.bounds = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        volume.is_trigger = true;
        world.insert(volume);
        assert!(world.raycast(&forward(), &RaycastQuery::default()).is_none());

        world.insert(proxy(2, Vec3::new(3.0, 0.0, 0.0), Layer::Default));
        let hit = world.raycast(&forward(), &RaycastQuery::default()).unwrap();
        assert_eq!(hit.id, 2);
    }

    #[test]
    fn equal_distances_resolve_to_first_inserted() {
        let mut world = CollisionWorld::new();
        world.insert(proxy(7, Vec3::new(2.0, 0.0, 0.0), Layer::Default));
        world.insert(proxy(3, Vec3::new(2.0, 0.0, 0.0), Layer::Default));
        let hit = world.raycast(&forward(), &RaycastQuery::default()).unwrap();
        assert_eq!(hit.id, 7);
    }
}
