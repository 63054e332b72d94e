/// Point light system for the sphere shader.
///
/// Lights live in world space and are persistent: they stay until removed.
/// Each frame the runner projects them through the camera and writes the
/// screen-space wire format for the renderer's lighting pass.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::Rgb;
use crate::renderer::camera::PerspectiveCamera;

/// A world-space point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Rgb,
    pub intensity: f32,
    /// Falloff distance in world units. 0.0 = no falloff.
    pub range: f32,
}

impl PointLight {
    pub fn new(position: Vec3, color: Rgb, intensity: f32, range: f32) -> Self {
        Self {
            position,
            color,
            intensity,
            range,
        }
    }
}

/// Projected light as written to the shared buffer.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, depth, r, g, b, intensity, range]`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LightInstance {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Range in pixels at the light's depth.
    pub range: f32,
}

impl LightInstance {
    pub const FLOATS: usize = 8;
}

/// Manages active lights and ambient color for the scene.
///
/// The ambient color defaults to white, which produces unlit output
/// when no lights are present.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: Rgb,
    packed: Vec<LightInstance>,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(4)
    }

    /// Create a LightState with a specific light capacity.
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: Rgb::WHITE,
            packed: Vec::with_capacity(max_lights),
        }
    }

    /// Add a point light to the scene.
    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Remove all lights.
    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    /// Number of active lights.
    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Set the ambient light color.
    /// For a dark scene with point lights, use low values like (0.1, 0.1, 0.15).
    pub fn set_ambient(&mut self, ambient: Rgb) {
        self.ambient = ambient;
    }

    pub fn ambient(&self) -> Rgb {
        self.ambient
    }

    /// Project lights for this frame. Lights behind the near plane are skipped.
    pub fn pack(&mut self, camera: &PerspectiveCamera, max_lights: usize) {
        self.packed.clear();
        let view_projection = camera.view_projection();
        for light in self.lights.iter().take(max_lights) {
            let Some(proj) = camera.project_with(&view_projection, light.position) else {
                continue;
            };
            self.packed.push(LightInstance {
                x: proj.pos.x,
                y: proj.pos.y,
                depth: proj.depth,
                r: light.color.r,
                g: light.color.g,
                b: light.color.b,
                intensity: light.intensity,
                range: light.range * proj.scale,
            });
        }
    }

    /// Number of lights packed by the last `pack`.
    pub fn packed_count(&self) -> usize {
        self.packed.len()
    }

    pub fn packed(&self) -> &[LightInstance] {
        &self.packed
    }

    /// Pointer to the packed light data for shared-buffer reads.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.packed.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
