pub mod runner;

pub use runner::GameRunner;
pub use orrery_engine::InputEvent;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers, data accessors)
///
/// The runner is created on first use, so `game_load_config` may be called
/// before `game_init`. Calls made before the runner exists return `default`.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// orrery_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `orrery_engine::Game`
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn ensure_runner() {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                if borrow.is_none() {
                    console_error_panic_hook::set_once();
                    // Errs when a logger is already installed; the existing one keeps working
                    let _ = console_log::init_with_level(log::Level::Info);
                    *borrow = Some($crate::GameRunner::new(<$game_type>::new()));
                }
            });
        }

        fn with_runner<R>(default: R, f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => f(runner),
                None => {
                    log::warn!("{}: call game_init() first", $game_name);
                    default
                }
            })
        }

        #[wasm_bindgen]
        pub fn game_load_config(json: &str) -> Result<(), JsValue> {
            ensure_runner();
            with_runner(Ok(()), |r| r.load_config(json))
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }

        #[wasm_bindgen]
        pub fn game_init(width: f32, height: f32) -> Result<(), JsValue> {
            ensure_runner();
            match with_runner(Ok(()), |r| r.init(width, height)) {
                Ok(()) => {
                    log::info!("{}: initialized at {}x{}", $game_name, width, height);
                    Ok(())
                }
                Err(e) => {
                    log::error!("{}: startup failed: {}", $game_name, e);
                    Err(JsValue::from_str(&e.to_string()))
                }
            }
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner((), |r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner((), |r| r.push_input($crate::InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner((), |r| r.push_input($crate::InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner((), |r| r.push_input($crate::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta_y: f32) {
            with_runner((), |r| r.push_input($crate::InputEvent::Wheel { delta_y }));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner((), |r| r.push_input($crate::InputEvent::Resize { width, height }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner((), |r| r.push_input($crate::InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_sdf_instances_ptr() -> *const f32 {
            with_runner(std::ptr::null(), |r| r.sdf_instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sdf_instance_count() -> u32 {
            with_runner(0, |r| r.sdf_instance_count())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(std::ptr::null(), |r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(0, |r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_viewport_width() -> f32 {
            with_runner(0.0, |r| r.viewport_width())
        }

        #[wasm_bindgen]
        pub fn get_viewport_height() -> f32 {
            with_runner(0.0, |r| r.viewport_height())
        }

        #[wasm_bindgen]
        pub fn get_background_r() -> f32 {
            with_runner(0.0, |r| r.background_r())
        }

        #[wasm_bindgen]
        pub fn get_background_g() -> f32 {
            with_runner(0.0, |r| r.background_g())
        }

        #[wasm_bindgen]
        pub fn get_background_b() -> f32 {
            with_runner(0.0, |r| r.background_b())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_sdf_instances() -> u32 {
            with_runner(0, |r| r.max_sdf_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(0, |r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(0, |r| r.buffer_total_floats())
        }

        // ---- Lighting accessors ----

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(std::ptr::null(), |r| r.lights_ptr())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(0, |r| r.light_count())
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(0, |r| r.max_lights())
        }

        #[wasm_bindgen]
        pub fn get_ambient_r() -> f32 {
            with_runner(0.0, |r| r.ambient_r())
        }

        #[wasm_bindgen]
        pub fn get_ambient_g() -> f32 {
            with_runner(0.0, |r| r.ambient_g())
        }

        #[wasm_bindgen]
        pub fn get_ambient_b() -> f32 {
            with_runner(0.0, |r| r.ambient_b())
        }
    };

    // Variant with vectors feature
    ($game_type:ty, $game_name:literal, vectors) => {
        $crate::export_game!($game_type, $game_name);

        // ---- Vector accessors (only when vectors feature is enabled) ----

        #[wasm_bindgen]
        pub fn get_vector_vertices_ptr() -> *const f32 {
            with_runner(std::ptr::null(), |r| r.vector_vertices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_vector_vertex_count() -> u32 {
            with_runner(0, |r| r.vector_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_max_vector_vertices() -> u32 {
            with_runner(0, |r| r.max_vector_vertices())
        }
    };
}
