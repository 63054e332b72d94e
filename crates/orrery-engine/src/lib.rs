pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{NodeId, GameEvent};
pub use components::mesh::{MeshComponent, Rgb, Rgba};
pub use components::node::{Node, NodeKind};
pub use core::error::{EngineError, EngineResult};
pub use core::rng::Rng;
pub use core::scene::SceneGraph;
pub use core::time::{FrameClock, TickSource, FixedTicks};
pub use renderer::camera::{PerspectiveCamera, Projection};
pub use renderer::sdf_instance::{SDFInstance, SDFBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::{ProtocolLayout, LIGHT_FLOATS, DEFAULT_MAX_LIGHTS};
pub use systems::lighting::{PointLight, LightInstance, LightState};
pub use systems::raycast::{Ray, Hit, ray_sphere, pick_nearest};
pub use systems::sdf_render::build_sdf_buffer;

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex, draw_polylines};
