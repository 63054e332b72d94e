use wasm_bindgen::prelude::*;

pub mod bodies;
pub mod builder;
pub mod config;
pub mod controls;
pub mod game;
pub mod interaction;
pub mod state;
pub mod update;

use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system", vectors);

// ---- Control panel ----

#[wasm_bindgen]
pub fn set_body_speed(index: u32, value: f32) -> bool {
    with_runner(false, |r| r.game_mut().set_speed(index as usize, value).is_some())
}

/// Returns the new running flag.
#[wasm_bindgen]
pub fn toggle_pause() -> bool {
    with_runner(false, |r| r.game_mut().toggle_running())
}

#[wasm_bindgen]
pub fn reset_bodies() {
    with_runner((), |r| r.game_mut().reset());
}

/// Returns true when the new theme is dark.
#[wasm_bindgen]
pub fn toggle_theme() -> bool {
    with_runner(true, |r| r.game_mut().toggle_theme().is_dark())
}

#[wasm_bindgen]
pub fn get_controls_json() -> String {
    with_runner(String::from("null"), |r| r.game().controls_json())
}

#[wasm_bindgen]
pub fn get_bodies_json() -> String {
    with_runner(String::from("[]"), |r| r.game().bodies_json())
}

#[wasm_bindgen]
pub fn get_tooltip_json() -> String {
    with_runner(String::from("null"), |r| r.game().tooltip_json())
}
