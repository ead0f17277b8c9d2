#![warn(missing_docs)]
//! Collision primitives (rays, AABBs) and layer-filtered raycasts.

mod world;

use glam::Vec3;

pub use world::{ColliderProxy, CollisionWorld, RaycastHit, RaycastQuery};

/// Half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point in world space.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized (a zero direction stays zero).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box used for collisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all());
        Self { min, max }
    }

    /// Box of `size` centred on `center`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Centre point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half the size on each axis.
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Same box moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Tests intersection with another AABB.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Whether `point` lies inside or on the box.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.min.cmple(point).all() && self.max.cmpge(point).all()
    }

    /// Slab test against `ray`.
    ///
    /// Returns the distance to the first surface crossing and the outward face
    /// normal there. A ray starting inside the box reports where it leaves.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_normal = Vec3::ZERO;
        let mut exit_normal = Vec3::ZERO;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (min, max) = (self.min[axis], self.max[axis]);

            if dir.abs() < f32::EPSILON {
                // Parallel to this slab: must already be between its planes.
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (min - origin) * inv;
            let mut t1 = (max - origin) * inv;
            let mut n0 = -axis_unit(axis);
            let mut n1 = axis_unit(axis);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
                std::mem::swap(&mut n0, &mut n1);
            }

            if t0 > t_enter {
                t_enter = t0;
                enter_normal = n0;
            }
            if t1 < t_exit {
                t_exit = t1;
                exit_normal = n1;
            }
            if t_enter > t_exit {
                return None;
            }
        }

        // Entire box behind the origin.
        if t_exit < 0.0 {
            return None;
        }

        if t_enter < 0.0 {
            Some((t_exit, exit_normal))
        } else {
            Some((t_enter, enter_normal))
        }
    }
}

fn axis_unit(axis: usize) -> Vec3 {
    match axis {
        0 => Vec3::X,
        1 => Vec3::Y,
        _ => Vec3::Z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_direction_is_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert!((ray.at(5.0) - Vec3::new(3.0, 0.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn aabb_ray_intersection_front_face() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z);
        let (t, normal) = aabb.ray_intersection(&ray).expect("hit");
        assert!((t - 1.5).abs() < 1e-5);
        assert_eq!(normal, Vec3::Z);
    }

    #[test]
    fn aabb_ray_misses_offset_box() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        let ray = Ray::new(Vec3::new(2.0, 0.0, 2.0), Vec3::NEG_Z);
        assert!(aabb.ray_intersection(&ray).is_none());
    }

    #[test]
    fn aabb_behind_origin_is_missed() {
        let aabb = Aabb::from_center_size(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(aabb.ray_intersection(&ray).is_none());
    }

    #[test]
    fn ray_from_inside_reports_exit() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let (t, normal) = aabb.ray_intersection(&ray).expect("hit");
        assert!((t - 1.0).abs() < 1e-5);
        assert_eq!(normal, Vec3::X);
    }

    #[test]
    fn downward_ray_hits_top_face() {
        let floor = Aabb::new(Vec3::new(-5.0, -1.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
        let ray = Ray::new(Vec3::new(1.0, 2.0, 1.0), Vec3::NEG_Y);
        let (t, normal) = floor.ray_intersection(&ray).expect("hit");
        assert!((t - 2.0).abs() < 1e-5);
        assert_eq!(normal, Vec3::Y);
    }

    #[test]
    fn aabb_overlap() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_center_size(Vec3::new(0.9, 0.0, 0.0), Vec3::ONE);
        let c = Aabb::from_center_size(Vec3::new(3.0, 0.0, 0.0), Vec3::ONE);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains_point(Vec3::splat(0.5)));
    }
}
