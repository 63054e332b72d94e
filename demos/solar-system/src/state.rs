/// Mutable simulation model: per-body state, global flags, and the
/// control operations the UI calls into.

use serde::Serialize;
use orrery_engine::Rgb;

use crate::bodies::BodyDescriptor;

pub const DARK_BACKGROUND: u32 = 0x000511;
pub const LIGHT_BACKGROUND: u32 = 0x87ceeb;

/// Live state of one body. Index-aligned with the registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyState {
    pub current_angular_speed: f32,
    /// Radians in `[0, 2π)`.
    pub orbit_angle: f32,
    /// Radians in `[0, 2π)`.
    pub self_rotation_angle: f32,
}

impl BodyState {
    pub fn from_descriptor(descriptor: &BodyDescriptor) -> Self {
        Self {
            current_angular_speed: descriptor.base_angular_speed,
            orbit_angle: 0.0,
            self_rotation_angle: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Scene clear color for this theme.
    pub fn background(self) -> Rgb {
        match self {
            Theme::Dark => Rgb::from_hex(DARK_BACKGROUND),
            Theme::Light => Rgb::from_hex(LIGHT_BACKGROUND),
        }
    }
}

/// Process-wide simulation flags and the angles not owned by a body.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub running: bool,
    /// Clamped dt of the most recent frame, seconds.
    pub elapsed_since_last_frame: f32,
    pub theme: Theme,
    pub sun_angle: f32,
    pub starfield_angle: f32,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            running: true,
            elapsed_since_last_frame: 0.0,
            theme: Theme::Dark,
            sun_angle: 0.0,
            starfield_angle: 0.0,
        }
    }
}

/// Registry plus live state. `bodies[i]` always describes `registry[i]`.
pub struct Orrery {
    registry: &'static [BodyDescriptor],
    bodies: Vec<BodyState>,
    pub sim: SimulationState,
}

impl Orrery {
    /// Fresh state for every body in the registry.
    pub fn new(registry: &'static [BodyDescriptor]) -> Self {
        let bodies = registry.iter().map(BodyState::from_descriptor).collect();
        Self::from_parts(registry, bodies)
    }

    /// Adopt the state array produced by the scene builder.
    /// A mismatched array is rebuilt from the registry.
    pub fn from_parts(registry: &'static [BodyDescriptor], bodies: Vec<BodyState>) -> Self {
        let bodies = if bodies.len() == registry.len() {
            bodies
        } else {
            log::warn!(
                "body state count {} does not match registry {}; rebuilding",
                bodies.len(),
                registry.len()
            );
            registry.iter().map(BodyState::from_descriptor).collect()
        };
        Self {
            registry,
            bodies,
            sim: SimulationState::default(),
        }
    }

    pub fn registry(&self) -> &'static [BodyDescriptor] {
        self.registry
    }

    pub fn bodies(&self) -> &[BodyState] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [BodyState] {
        &mut self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&BodyState> {
        self.bodies.get(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.sim.running
    }

    pub fn theme(&self) -> Theme {
        self.sim.theme
    }

    // ── Control operations ───────────────────────────────────────────

    /// Set a body's orbit speed. Negative values clamp to 0; non-finite
    /// values and unknown indices are rejected. Returns the stored speed.
    pub fn set_speed(&mut self, index: usize, value: f32) -> Option<f32> {
        if !value.is_finite() {
            log::warn!("set_speed({}, {}) rejected: not a number", index, value);
            return None;
        }
        let Some(body) = self.bodies.get_mut(index) else {
            log::warn!("set_speed: no body at index {}", index);
            return None;
        };
        body.current_angular_speed = value.max(0.0);
        log::debug!("{} speed -> {}", self.registry[index].name, body.current_angular_speed);
        Some(body.current_angular_speed)
    }

    /// Flip running/paused. Returns the new running flag.
    pub fn toggle_running(&mut self) -> bool {
        self.sim.running = !self.sim.running;
        log::debug!("running -> {}", self.sim.running);
        self.sim.running
    }

    /// Restore base speeds and zero both angles of every body.
    /// The running flag is left alone.
    pub fn reset(&mut self) {
        for (state, descriptor) in self.bodies.iter_mut().zip(self.registry) {
            *state = BodyState::from_descriptor(descriptor);
        }
        log::debug!("bodies reset");
    }

    /// Flip the theme. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.sim.theme = self.sim.theme.toggled();
        log::debug!("theme -> {:?}", self.sim.theme);
        self.sim.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{BODIES, EARTH, NEPTUNE};

    #[test]
    fn new_state_mirrors_registry() {
        let orrery = Orrery::new(&BODIES);
        assert_eq!(orrery.len(), BODIES.len());
        for (state, body) in orrery.bodies().iter().zip(BODIES.iter()) {
            assert_eq!(state.current_angular_speed, body.base_angular_speed);
            assert_eq!(state.orbit_angle, 0.0);
            assert_eq!(state.self_rotation_angle, 0.0);
        }
        assert!(orrery.is_running());
        assert_eq!(orrery.theme(), Theme::Dark);
    }

    #[test]
    fn set_speed_clamps_and_rejects() {
        let mut orrery = Orrery::new(&BODIES);
        assert_eq!(orrery.set_speed(EARTH, 7.5), Some(7.5));
        assert_eq!(orrery.body(EARTH).unwrap().current_angular_speed, 7.5);

        assert_eq!(orrery.set_speed(EARTH, -3.0), Some(0.0));
        assert_eq!(orrery.set_speed(EARTH, f32::NAN), None);
        assert_eq!(orrery.body(EARTH).unwrap().current_angular_speed, 0.0);

        assert_eq!(orrery.set_speed(99, 1.0), None);
    }

    #[test]
    fn speeds_above_slider_range_are_kept() {
        let mut orrery = Orrery::new(&BODIES);
        assert_eq!(orrery.set_speed(NEPTUNE, 25.0), Some(25.0));
    }

    #[test]
    fn reset_restores_base_and_keeps_running_flag() {
        let mut orrery = Orrery::new(&BODIES);
        for i in 0..orrery.len() {
            orrery.set_speed(i, 9.9);
            let body = &mut orrery.bodies_mut()[i];
            body.orbit_angle = 1.0;
            body.self_rotation_angle = 2.0;
        }
        orrery.toggle_running();

        orrery.reset();

        assert!(!orrery.is_running());
        for (state, body) in orrery.bodies().iter().zip(BODIES.iter()) {
            assert_eq!(*state, BodyState::from_descriptor(body));
        }
    }

    #[test]
    fn toggle_running_flips() {
        let mut orrery = Orrery::new(&BODIES);
        assert!(!orrery.toggle_running());
        assert!(orrery.toggle_running());
    }

    #[test]
    fn theme_double_toggle_is_identity() {
        let mut orrery = Orrery::new(&BODIES);
        let original = orrery.theme().background();
        assert_eq!(orrery.toggle_theme(), Theme::Light);
        assert_eq!(orrery.theme().background().to_hex(), LIGHT_BACKGROUND);
        orrery.toggle_theme();
        assert_eq!(orrery.theme().background(), original);
        assert_eq!(original.to_hex(), DARK_BACKGROUND);
    }

    #[test]
    fn mismatched_state_is_rebuilt() {
        let orrery = Orrery::from_parts(&BODIES, Vec::new());
        assert_eq!(orrery.len(), BODIES.len());
    }
}
