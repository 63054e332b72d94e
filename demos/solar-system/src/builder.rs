/// Scene graph construction. Runs once at init.

use glam::Vec3;
use orrery_engine::{
    LightState, MeshComponent, Node, NodeId, NodeKind, PointLight, Rgb, Rgba, Rng, SceneGraph,
};

use crate::bodies::{self, BodyDescriptor};
use crate::config::OrreryConfig;
use crate::state::BodyState;

// ── Cosmetics ────────────────────────────────────────────────────────

const ORBIT_COLOR: u32 = 0x444444;
const ORBIT_ALPHA: f32 = 0.3;
/// Orbit stroke width in pixels.
const ORBIT_LINE_WIDTH: f32 = 1.0;
const STAR_SIZE: f32 = 0.5;

// ── Lighting ─────────────────────────────────────────────────────────

const AMBIENT_COLOR: u32 = 0x404040;
const AMBIENT_INTENSITY: f32 = 0.1;
const SUN_LIGHT_INTENSITY: f32 = 2.0;

/// Node ids of everything the update loop and hit-testing touch.
/// `pivots[i]`, `planets[i]` and `orbits[i]` all belong to registry entry `i`.
#[derive(Debug, Clone)]
pub struct SceneHandles {
    pub sun: NodeId,
    pub pivots: Vec<NodeId>,
    pub planets: Vec<NodeId>,
    pub orbits: Vec<NodeId>,
    pub starfield: NodeId,
}

/// Build the sun, one pivot + planet + orbit path per body, and the starfield.
/// Returns the node handles and the index-aligned body state array.
pub fn build_scene(
    scene: &mut SceneGraph,
    registry: &[BodyDescriptor],
    config: &OrreryConfig,
) -> (SceneHandles, Vec<BodyState>) {
    let sun = scene.spawn(
        Node::sphere(
            MeshComponent::sphere(bodies::SUN_RADIUS, Rgb::from_hex(bodies::SUN_COLOR))
                .with_emissive(bodies::SUN_EMISSIVE),
        )
        .with_tag("sun"),
    );

    let mut pivots = Vec::with_capacity(registry.len());
    let mut planets = Vec::with_capacity(registry.len());
    let mut orbits = Vec::with_capacity(registry.len());
    let mut states = Vec::with_capacity(registry.len());

    for (i, body) in registry.iter().enumerate() {
        let pivot = scene.spawn(Node::group().with_tag(format!("{}-pivot", body.name)));
        let planet = scene.spawn(
            Node::sphere(MeshComponent::sphere(body.radius, body.rgb()))
                .with_tag(body.name)
                .with_parent(pivot)
                .with_position(Vec3::new(body.distance, 0.0, 0.0))
                .with_state_index(i),
        );
        let orbit = scene.spawn(
            Node::new(NodeKind::Polyline {
                points: orbit_path(body.distance, config.orbit_segments),
                color: Rgb::from_hex(ORBIT_COLOR).with_alpha(ORBIT_ALPHA),
                width: ORBIT_LINE_WIDTH,
            })
            .with_tag(format!("{}-orbit", body.name)),
        );

        pivots.push(pivot);
        planets.push(planet);
        orbits.push(orbit);
        states.push(BodyState::from_descriptor(body));
    }

    let mut rng = Rng::new(config.star_seed);
    let starfield = scene.spawn(
        Node::new(NodeKind::Points {
            points: star_positions(&mut rng, config.star_count, config.star_half_extent),
            color: Rgba::new(1.0, 1.0, 1.0, 1.0),
            size: STAR_SIZE,
        })
        .with_tag("starfield"),
    );

    log::debug!(
        "scene built: {} bodies, {} stars, {} nodes",
        registry.len(),
        config.star_count,
        scene.len()
    );

    let handles = SceneHandles {
        sun,
        pivots,
        planets,
        orbits,
        starfield,
    };
    (handles, states)
}

/// Dim ambient fill plus a white point light at the sun.
pub fn install_lights(lights: &mut LightState) {
    lights.clear();
    lights.set_ambient(Rgb::from_hex(AMBIENT_COLOR).scaled(AMBIENT_INTENSITY));
    lights.add(PointLight::new(Vec3::ZERO, Rgb::WHITE, SUN_LIGHT_INTENSITY, 0.0));
}

/// Closed circle of `segments` segments in the XZ plane; the first point is repeated at the end.
pub fn orbit_path(radius: f32, segments: usize) -> Vec<Vec3> {
    (0..=segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect()
}

fn star_positions(rng: &mut Rng, count: usize, half_extent: f32) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.range(-half_extent, half_extent),
                rng.range(-half_extent, half_extent),
                rng.range(-half_extent, half_extent),
            )
        })
        .collect()
}
