/// Body registry: the sun and the eight planets.
///
/// Sizes and distances are scene units chosen for readability, not to scale.
/// Registry order is the index used everywhere else (scene nodes, body state,
/// control rows, tooltips).

use orrery_engine::Rgb;

/// Planet index constants.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const BODY_COUNT: usize = 8;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 4.0;
pub const SUN_COLOR: u32 = 0xffff00;
/// The sun is drawn unlit.
pub const SUN_EMISSIVE: f32 = 1.0;

// ── Planets ──────────────────────────────────────────────────────────

/// Immutable description of one orbiting body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDescriptor {
    pub name: &'static str,
    /// Sphere radius in scene units.
    pub radius: f32,
    /// Orbital radius from the origin in scene units.
    pub distance: f32,
    /// Orbit rate multiplier restored on reset.
    pub base_angular_speed: f32,
    /// Packed `0xRRGGBB`.
    pub color: u32,
}

impl BodyDescriptor {
    pub fn rgb(&self) -> Rgb {
        Rgb::from_hex(self.color)
    }
}

pub const BODIES: [BodyDescriptor; BODY_COUNT] = [
    BodyDescriptor { name: "Mercury", radius: 0.8, distance: 8.0,  base_angular_speed: 4.74, color: 0x8c7853 },
    BodyDescriptor { name: "Venus",   radius: 1.2, distance: 11.0, base_angular_speed: 3.5,  color: 0xffc649 },
    BodyDescriptor { name: "Earth",   radius: 1.3, distance: 15.0, base_angular_speed: 2.98, color: 0x6b93d6 },
    BodyDescriptor { name: "Mars",    radius: 1.0, distance: 20.0, base_angular_speed: 2.41, color: 0xc1440e },
    BodyDescriptor { name: "Jupiter", radius: 3.5, distance: 28.0, base_angular_speed: 1.31, color: 0xd8ca9d },
    BodyDescriptor { name: "Saturn",  radius: 3.0, distance: 38.0, base_angular_speed: 0.97, color: 0xfad5a5 },
    BodyDescriptor { name: "Uranus",  radius: 2.0, distance: 48.0, base_angular_speed: 0.68, color: 0x4fd0e7 },
    BodyDescriptor { name: "Neptune", radius: 1.9, distance: 58.0, base_angular_speed: 0.54, color: 0x4b70dd },
];

/// Look up a body by display name.
pub fn find(name: &str) -> Option<usize> {
    BODIES.iter().position(|b| b.name == name)
}
