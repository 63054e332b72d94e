use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use crate::core::error::{EngineError, EngineResult};
use crate::systems::raycast::Ray;

/// Projection result from world space to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Viewport position in pixels (origin top-left, Y down).
    pub pos: Vec2,
    /// Distance in front of the camera along its view axis.
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub scale: f32,
}

/// Perspective camera that always aims at `target`.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}


impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 30.0, 80.0),
            target: Vec3::ZERO,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
        }
    }
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            near,
            far,
            ..Default::default()
        }
    }

    pub fn aspect(&self) -> f32 {
        self.viewport_width / self.viewport_height
    }

    /// Resize the viewport (e.g. on window resize). Aspect and projection follow.
    pub fn resize(&mut self, width: f32, height: f32) -> EngineResult<()> {
        EngineError::check_viewport(width, height)?;
        self.viewport_width = width;
        self.viewport_height = height;
        Ok(())
    }

    /// Up vector for look-at; falls back to +Z when looking straight along Y.
    fn up(&self) -> Vec3 {
        let forward = (self.target - self.position).normalize_or_zero();
        if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up())
    }

    /// Right-handed perspective, depth mapped to [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to the viewport. `None` when it is behind the near plane.
    pub fn project(&self, world: Vec3) -> Option<Projection> {
        self.project_with(&self.view_projection(), world)
    }

    /// Same as `project` with a precomputed view-projection (hot loops).
    pub fn project_with(&self, view_projection: &Mat4, world: Vec3) -> Option<Projection> {
        let clip = *view_projection * world.extend(1.0);
        if clip.w <= self.near {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let half_fov_tan = (self.fov_y_degrees.to_radians() * 0.5).tan();
        Some(Projection {
            pos: Vec2::new(
                (ndc.x + 1.0) * 0.5 * self.viewport_width,
                (1.0 - ndc.y) * 0.5 * self.viewport_height,
            ),
            depth: clip.w,
            scale: (self.viewport_height * 0.5) / (half_fov_tan * clip.w),
        })
    }

    /// Viewport pixels to normalized device coordinates (Y up, [-1, 1]).
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            (screen.x / self.viewport_width) * 2.0 - 1.0,
            -(screen.y / self.viewport_height) * 2.0 + 1.0,
        )
    }

    /// Ray from the camera through an NDC position.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let far_point = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far_point - self.position)
    }

    /// Ray from the camera through a viewport pixel.
    pub fn ray_from_screen(&self, screen: Vec2) -> Ray {
        self.ray_from_ndc(self.screen_to_ndc(screen))
    }

    /// Rotate the camera position about the target by an incremental
    /// XYZ-Euler rotation of `(dy, dx, 0) * sensitivity`, then re-aim.
    pub fn orbit(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        let rotation = Quat::from_euler(EulerRot::XYZ, dy * sensitivity, dx * sensitivity, 0.0);
        self.position = self.target + rotation * (self.position - self.target);
    }

    /// Translate along the position's direction from the world origin.
    /// Positive moves outward, negative inward. A camera at the origin stays put.
    pub fn dolly(&mut self, step: f32) {
        let direction = self.position.normalize_or_zero();
        self.position += direction * step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_projects_to_viewport_center() {
        let cam = PerspectiveCamera::default();
        let proj = cam.project(Vec3::ZERO).unwrap();
        assert!((proj.pos.x - 400.0).abs() < 1e-3);
        assert!((proj.pos.y - 300.0).abs() < 1e-3);
        let expected_depth = cam.position.length();
        assert!((proj.depth - expected_depth).abs() < 1e-3);
    }

    #[test]
    fn point_behind_camera_is_culled() {
        let cam = PerspectiveCamera::default();
        assert!(cam.project(Vec3::new(0.0, 60.0, 160.0)).is_none());
    }

    #[test]
    fn closer_points_scale_larger() {
        let cam = PerspectiveCamera::default();
        let near = cam.project(Vec3::new(0.0, 0.0, 40.0)).unwrap();
        let far = cam.project(Vec3::new(0.0, 0.0, -40.0)).unwrap();
        assert!(near.scale > far.scale);
    }

    #[test]
    fn resize_updates_aspect_and_rejects_zero() {
        let mut cam = PerspectiveCamera::default();
        cam.resize(1920.0, 1080.0).unwrap();
        assert!((cam.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
        assert!(cam.resize(0.0, 1080.0).is_err());
        assert_eq!(cam.viewport_width, 1920.0);
    }

    #[test]
    fn screen_to_ndc_corners() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.screen_to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(cam.screen_to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(cam.screen_to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = PerspectiveCamera::default();
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        let expected = (cam.target - cam.position).normalize();
        assert!((ray.direction - expected).length() < 1e-3);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn ray_passes_through_projected_point() {
        let cam = PerspectiveCamera::default();
        let world = Vec3::new(15.0, 0.0, 0.0);
        let screen = cam.project(world).unwrap().pos;
        let ray = cam.ray_from_screen(screen);
        let to_point = world - ray.origin;
        let along = to_point.dot(ray.direction);
        let miss = (to_point - ray.direction * along).length();
        assert!(miss < 1e-2, "miss = {miss}");
    }

    #[test]
    fn orbit_preserves_distance_to_target() {
        let mut cam = PerspectiveCamera::default();
        let before = cam.position.length();
        cam.orbit(40.0, -25.0, 0.01);
        assert!((cam.position.length() - before).abs() < 1e-3);
        assert_ne!(cam.position, Vec3::new(0.0, 30.0, 80.0));
    }

    #[test]
    fn horizontal_drag_is_yaw() {
        let mut cam = PerspectiveCamera::default();
        cam.orbit(100.0, 0.0, 0.01);
        // Pure yaw keeps height
        assert!((cam.position.y - 30.0).abs() < 1e-4);
    }

    #[test]
    fn dolly_moves_along_origin_ray() {
        let mut cam = PerspectiveCamera::default();
        let dir = cam.position.normalize();
        let before = cam.position.length();
        cam.dolly(-0.5);
        assert!((cam.position.length() - (before - 0.5)).abs() < 1e-4);
        assert!((cam.position.normalize() - dir).length() < 1e-5);
    }

    #[test]
    fn dolly_at_origin_is_noop() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::ZERO;
        cam.dolly(0.5);
        assert_eq!(cam.position, Vec3::ZERO);
    }
}
