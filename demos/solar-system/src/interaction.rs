/// Pointer interaction: camera orbit/zoom and hover hit-testing.

use glam::Vec2;
use serde::Serialize;
use orrery_engine::{pick_nearest, PerspectiveCamera, Ray, SceneGraph};

use crate::builder::SceneHandles;
use crate::state::Orrery;

/// Radians of camera rotation per pixel of drag.
pub const DRAG_SENSITIVITY: f32 = 0.01;
/// Camera travel per wheel notch, scene units.
pub const WHEEL_STEP: f32 = 0.5;
/// Tooltip offset from the pointer, pixels.
pub const TOOLTIP_OFFSET: Vec2 = Vec2::new(10.0, -10.0);

// ── Drag tracking ────────────────────────────────────────────────────

/// Pointer drag state with explicit start/update/end transitions.
#[derive(Debug, Clone, Default)]
pub struct OrbitDrag {
    last: Option<Vec2>,
}

impl OrbitDrag {
    pub fn start(&mut self, pos: Vec2) {
        self.last = Some(pos);
    }

    /// Movement since the previous sample, or `None` when not dragging.
    pub fn update(&mut self, pos: Vec2) -> Option<Vec2> {
        let last = self.last.as_mut()?;
        let delta = pos - *last;
        *last = pos;
        Some(delta)
    }

    pub fn end(&mut self) {
        self.last = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }
}

/// Camera manipulation constants bundled with the operations that use them.
#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    pub sensitivity: f32,
    pub wheel_step: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            sensitivity: DRAG_SENSITIVITY,
            wheel_step: WHEEL_STEP,
        }
    }
}

impl CameraRig {
    /// Orbit the camera about its target: horizontal drag yaws, vertical drag pitches.
    pub fn drag(&self, camera: &mut PerspectiveCamera, delta: Vec2) {
        camera.orbit(delta.x, delta.y, self.sensitivity);
    }

    /// Slide along the origin ray: scrolling down moves out, anything else moves in.
    pub fn wheel(&self, camera: &mut PerspectiveCamera, delta_y: f32) {
        let step = if delta_y > 0.0 { self.wheel_step } else { -self.wheel_step };
        camera.dolly(step);
    }
}

// ── Hit-testing ──────────────────────────────────────────────────────

/// Registry index of the nearest planet under the ray. The sun, orbit
/// paths and stars are never candidates.
pub fn pick_body(scene: &SceneGraph, handles: &SceneHandles, ray: &Ray) -> Option<usize> {
    pick_nearest(scene, handles.planets.iter().copied(), ray).and_then(|hit| hit.state_index)
}

/// Tooltip payload for a hovered body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub index: usize,
    pub name: &'static str,
    pub distance: f32,
    pub speed: f32,
    pub radius: f32,
    /// Screen position of the tooltip's top-left corner, pixels.
    pub anchor: [f32; 2],
}

impl Tooltip {
    /// Snapshot of body `index`. Descriptor fields come from the registry,
    /// speed is the live value.
    pub fn for_body(orrery: &Orrery, index: usize, pointer: Vec2) -> Option<Self> {
        let descriptor = orrery.registry().get(index)?;
        let state = orrery.body(index)?;
        Some(Self {
            index,
            name: descriptor.name,
            distance: descriptor.distance,
            speed: state.current_angular_speed,
            radius: descriptor.radius,
            anchor: anchor_for(pointer).to_array(),
        })
    }

    /// Display lines, first line is the title.
    pub fn lines(&self) -> [String; 4] {
        [
            self.name.to_string(),
            format!("Distance: {} AU", self.distance),
            format!("Speed: {:.1}x", self.speed),
            format!("Radius: {} units", self.radius),
        ]
    }
}

pub fn anchor_for(pointer: Vec2) -> Vec2 {
    pointer + TOOLTIP_OFFSET
}

/// Outcome of one hover sample.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverChange {
    /// A new body is under the pointer; content must be rewritten.
    Entered(Tooltip),
    /// Same body as before; only the position follows the pointer.
    Moved(Vec2),
    /// Nothing under the pointer any more.
    Left,
    /// Nothing hovered before or now.
    Unchanged,
}

/// Remembers the hovered body so tooltip content is only rebuilt on change.
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    hovered: Option<usize>,
}

impl HoverTracker {
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn update(&mut self, hit: Option<usize>, pointer: Vec2, orrery: &Orrery) -> HoverChange {
        match (self.hovered, hit) {
            (Some(prev), Some(now)) if prev == now => HoverChange::Moved(anchor_for(pointer)),
            (_, Some(now)) => match Tooltip::for_body(orrery, now, pointer) {
                Some(tooltip) => {
                    self.hovered = Some(now);
                    HoverChange::Entered(tooltip)
                }
                None => self.clear(),
            },
            (Some(_), None) => self.clear(),
            (None, None) => HoverChange::Unchanged,
        }
    }

    fn clear(&mut self) -> HoverChange {
        match self.hovered.take() {
            Some(_) => HoverChange::Left,
            None => HoverChange::Unchanged,
        }
    }
}
