#![warn(missing_docs)]
//! First-person camera and screen-space picking rays.

use glam::{Mat4, Vec2, Vec3};
use pickplace_physics::Ray;

/// First-person camera with position, orientation, and projection.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Horizontal rotation in radians (around Y axis).
    pub yaw: f32,
    /// Vertical rotation in radians (around local X axis).
    pub pitch: f32,

    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            fov: std::f32::consts::FRAC_PI_3, // 60 degrees
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Create a new camera with the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Get the forward direction vector (where camera is looking).
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Get the right direction vector (camera's local X axis).
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Get the up direction vector (camera's local Y axis).
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// Compute the view matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Compute the projection matrix (camera space -> clip space).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Move the camera along its forward vector.
    pub fn move_forward(&mut self, distance: f32) {
        let forward = self.forward();
        self.position += forward * distance;
    }

    /// Move the camera along its right vector.
    pub fn move_right(&mut self, distance: f32) {
        let right = self.right();
        self.position += right * distance;
    }

    /// Move the camera along world Y.
    pub fn move_up(&mut self, distance: f32) {
        self.position.y += distance;
    }

    /// Rotate the camera (add to yaw and pitch).
    ///
    /// # Arguments
    /// * `delta_yaw` - Horizontal rotation delta in radians
    /// * `delta_pitch` - Vertical rotation delta in radians
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;

        // Clamp pitch to avoid gimbal lock
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        // Normalize yaw to [0, 2π]
        self.yaw = self.yaw.rem_euclid(std::f32::consts::TAU);
    }

    /// Turn the camera to face `target`. No-op when `target` is the camera position.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        self.pitch = dir.y.clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = dir.z.atan2(dir.x).rem_euclid(std::f32::consts::TAU);
    }

    /// Update the aspect ratio (call when window resizes).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// World-space ray through a pixel.
    ///
    /// `screen` is in pixels with the origin at the top-left corner.
    pub fn screen_point_to_ray(&self, screen: Vec2, viewport: (u32, u32)) -> Ray {
        let width = viewport.0.max(1) as f32;
        let height = viewport.1.max(1) as f32;

        // Normalized device coordinates (-1 to 1), Y flipped.
        let x = (2.0 * screen.x) / width - 1.0;
        let y = 1.0 - (2.0 * screen.y) / height;

        let inv = self.view_projection_matrix().inverse();
        let near = inv.project_point3(Vec3::new(x, y, 0.0));
        let far = inv.project_point3(Vec3::new(x, y, 1.0));

        Ray::new(self.position, far - near)
    }

    /// Ray through the centre of the viewport.
    pub fn center_ray(&self, viewport: (u32, u32)) -> Ray {
        let center = Vec2::new(viewport.0 as f32 * 0.5, viewport.1 as f32 * 0.5);
        self.screen_point_to_ray(center, viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_default_initialization() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 1.6, 0.0));
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
    }

    #[test]
    fn camera_forward_direction() {
        let camera = Camera::default();
        let forward = camera.forward();
        // Default yaw=0, pitch=0 should point in +X direction
        assert!((forward.x - 1.0).abs() < 0.01);
        assert!(forward.y.abs() < 0.01);
        assert!(forward.z.abs() < 0.01);
    }

    #[test]
    fn basis_is_orthonormal() {
        let mut camera = Camera::default();
        camera.rotate(0.7, 0.3);
        let (f, r, u) = (camera.forward(), camera.right(), camera.up());
        assert!(f.dot(r).abs() < 1e-5);
        assert!(f.dot(u).abs() < 1e-5);
        assert!(r.dot(u).abs() < 1e-5);
        assert!(u.y > 0.0);
    }

    #[test]
    fn camera_rotation_clamps_pitch() {
        let mut camera = Camera::default();

        // Try to rotate way beyond vertical limit
        camera.rotate(0.0, 10.0);

        // Pitch should be clamped below 90 degrees
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn center_ray_matches_forward() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        camera.rotate(1.1, -0.4);
        let ray = camera.center_ray((1280, 720));
        assert_eq!(ray.origin, camera.position);
        assert!((ray.direction - camera.forward()).length() < 1e-3);
    }

    #[test]
    fn corner_rays_diverge_from_center() {
        let camera = Camera::default();
        let viewport = (800, 600);
        let center = camera.center_ray(viewport);
        let top_left = camera.screen_point_to_ray(Vec2::ZERO, viewport);
        assert!(center.direction.dot(top_left.direction) < 0.99);
        // Top of the screen looks up, left looks towards -right.
        assert!(top_left.direction.y > 0.0);
        assert!(top_left.direction.dot(camera.right()) < 0.0);
    }

    #[test]
    fn look_at_faces_target() {
        let mut camera = Camera::new(Vec3::ZERO);
        let target = Vec3::new(-2.0, 1.0, 3.0);
        camera.look_at(target);
        let expected = target.normalize();
        assert!((camera.forward() - expected).length() < 1e-3);
    }
}
