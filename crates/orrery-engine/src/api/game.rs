use crate::api::types::GameEvent;
use crate::bridge::protocol::DEFAULT_MAX_LIGHTS;
use crate::components::mesh::Rgb;
use crate::core::error::EngineResult;
use crate::core::scene::SceneGraph;
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::systems::lighting::LightState;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Largest frame delta handed to `Game::update`, in seconds (default: 0.1).
    pub max_frame_dt: f32,
    /// Maximum number of SDF instances per frame (default: 2304).
    pub max_sdf_instances: usize,
    /// Maximum number of vector vertices per frame (default: 65536).
    pub max_vector_vertices: usize,
    /// Maximum number of game events per frame (default: 64).
    pub max_events: usize,
    /// Maximum number of point lights (default: 4).
    pub max_lights: usize,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_frame_dt: 0.1,
            max_sdf_instances: 2304,
            max_vector_vertices: 65536,
            max_events: 64,
            max_lights: DEFAULT_MAX_LIGHTS,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once at init, after `load_config`.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Apply a JSON configuration document. Called before init.
    fn load_config(&mut self, _json: &str) -> EngineResult<()> {
        Ok(())
    }

    /// Build the scene and set up initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The per-frame tick. `dt` is already clamped by the runner.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: SceneGraph,
    pub camera: PerspectiveCamera,
    pub lights: LightState,
    #[cfg(feature = "vectors")]
    pub vectors: VectorState,
    pub events: Vec<GameEvent>,
    /// Clear color for the render surface.
    pub background: Rgb,
    max_events: usize,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Create an EngineContext sized by the given config.
    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            scene: SceneGraph::new(),
            camera: PerspectiveCamera::new(config.fov_y_degrees, config.near, config.far),
            lights: LightState::with_capacity(config.max_lights),
            #[cfg(feature = "vectors")]
            vectors: VectorState::with_capacity(config.max_vector_vertices),
            events: Vec::with_capacity(config.max_events),
            background: Rgb::new(0.0, 0.0, 0.0),
            max_events: config.max_events,
        }
    }

    /// Emit a game event to be forwarded to TypeScript.
    /// Events beyond the per-frame capacity are dropped. Returns whether the event was queued.
    pub fn emit_event(&mut self, event: GameEvent) -> bool {
        if self.events.len() >= self.max_events {
            log::warn!("event queue full, dropping event kind {}", event.kind);
            return false;
        }
        self.events.push(event);
        true
    }

    pub fn set_background(&mut self, color: Rgb) {
        self.background = color;
    }

    /// Clear per-frame transient data (events, vector geometry).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        #[cfg(feature = "vectors")]
        self.vectors.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_takes_camera_settings_from_config() {
        let config = GameConfig {
            fov_y_degrees: 60.0,
            near: 1.0,
            far: 500.0,
            ..Default::default()
        };
        let ctx = EngineContext::with_config(&config);
        assert_eq!(ctx.camera.fov_y_degrees, 60.0);
        assert_eq!(ctx.camera.near, 1.0);
        assert_eq!(ctx.camera.far, 500.0);
    }

    #[test]
    fn events_are_capped_per_frame() {
        let config = GameConfig {
            max_events: 2,
            ..Default::default()
        };
        let mut ctx = EngineContext::with_config(&config);
        let queued: Vec<bool> = (0..5)
            .map(|i| ctx.emit_event(GameEvent::new(i as f32, 0.0, 0.0, 0.0)))
            .collect();
        assert_eq!(queued, [true, true, false, false, false]);
        assert_eq!(ctx.events.len(), 2);
        assert_eq!(ctx.events[1].kind, 1.0);

        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn set_background() {
        let mut ctx = EngineContext::new();
        ctx.set_background(Rgb::from_hex(0x87ceeb));
        assert_eq!(ctx.background.to_hex(), 0x87ceeb);
    }
}
