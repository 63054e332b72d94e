/// Solar System: a sun, eight planets on circular orbits, a starfield,
/// and a control panel for speeds, pause, reset and theme.
///
/// Camera: drag to orbit, wheel to move in and out. Hovering a planet
/// raises a tooltip.

use glam::{Vec2, Vec3};
use orrery_engine::{
    EngineContext, EngineResult, Game, GameConfig, GameEvent, InputEvent, InputQueue,
};

use crate::bodies::{self, BODIES};
use crate::builder::{self, SceneHandles};
use crate::config::OrreryConfig;
use crate::controls::{self, ControlSnapshot};
use crate::interaction::{self, CameraRig, HoverChange, HoverTracker, OrbitDrag, Tooltip};
use crate::state::{Orrery, Theme};
use crate::update;

// ── Custom event kinds from the UI ───────────────────────────────────

/// a = body index, b = speed.
pub const CUSTOM_SET_SPEED: u32 = 1;
pub const CUSTOM_TOGGLE_PAUSE: u32 = 2;
pub const CUSTOM_RESET: u32 = 3;
pub const CUSTOM_TOGGLE_THEME: u32 = 4;

// ── Game event kinds to the UI ───────────────────────────────────────

/// a = body index, b/c = tooltip anchor.
pub const EVENT_TOOLTIP_SHOW: f32 = 1.0;
/// a = body index, b/c = tooltip anchor.
pub const EVENT_TOOLTIP_MOVE: f32 = 2.0;
pub const EVENT_TOOLTIP_HIDE: f32 = 3.0;
/// a = running (0/1), b = dark theme (0/1). Panel should re-read `controls_json`.
pub const EVENT_CONTROLS_CHANGED: f32 = 4.0;

/// Body index carried in an event float. Rejects negatives, fractions and NaN.
fn index_from(value: f32) -> Option<usize> {
    (value >= 0.0 && value.fract() == 0.0).then(|| value as usize)
}

// ── Game struct ──────────────────────────────────────────────────────

pub struct SolarSystem {
    config: OrreryConfig,
    orrery: Orrery,
    /// Set at init.
    handles: Option<SceneHandles>,
    drag: OrbitDrag,
    rig: CameraRig,
    hover: HoverTracker,
    /// Last pointer position, viewport pixels.
    pointer: Vec2,
    /// Latest tooltip anchor over the same body this frame, sent once after input.
    pending_move: Option<Vec2>,
    /// A control changed and the UI has not been told yet.
    controls_dirty: bool,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            config: OrreryConfig::default(),
            orrery: Orrery::new(&BODIES),
            handles: None,
            drag: OrbitDrag::default(),
            rig: CameraRig::default(),
            hover: HoverTracker::default(),
            pointer: Vec2::ZERO,
            pending_move: None,
            controls_dirty: false,
        }
    }

    pub fn orrery(&self) -> &Orrery {
        &self.orrery
    }

    pub fn handles(&self) -> Option<&SceneHandles> {
        self.handles.as_ref()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover.hovered()
    }

    // ── Control surface ──────────────────────────────────────────────

    pub fn set_speed(&mut self, index: usize, value: f32) -> Option<f32> {
        let stored = self.orrery.set_speed(index, value);
        self.controls_dirty |= stored.is_some();
        stored
    }

    pub fn toggle_running(&mut self) -> bool {
        self.controls_dirty = true;
        self.orrery.toggle_running()
    }

    pub fn reset(&mut self) {
        self.controls_dirty = true;
        self.orrery.reset();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.controls_dirty = true;
        self.orrery.toggle_theme()
    }

    pub fn controls(&self) -> ControlSnapshot {
        ControlSnapshot::capture(&self.orrery)
    }

    /// Live tooltip for the hovered body, if any. Speed is read at call time.
    pub fn tooltip(&self) -> Option<Tooltip> {
        let index = self.hover.hovered()?;
        Tooltip::for_body(&self.orrery, index, self.pointer)
    }

    pub fn controls_json(&self) -> String {
        to_json(&self.controls())
    }

    pub fn bodies_json(&self) -> String {
        to_json(&controls::registry_entries(&self.orrery))
    }

    /// `null` when nothing is hovered.
    pub fn tooltip_json(&self) -> String {
        to_json(&self.tooltip())
    }

    // ── Input ────────────────────────────────────────────────────────

    fn handle_custom(&mut self, kind: u32, a: f32, b: f32) {
        match kind {
            CUSTOM_SET_SPEED => match index_from(a) {
                Some(index) => {
                    self.set_speed(index, b);
                }
                None => log::warn!("set speed: bad body index {}", a),
            },
            CUSTOM_TOGGLE_PAUSE => {
                self.toggle_running();
            }
            CUSTOM_RESET => self.reset(),
            CUSTOM_TOGGLE_THEME => {
                self.toggle_theme();
            }
            _ => log::debug!("unhandled custom event kind {}", kind),
        }
    }

    /// Drag first, then hit-test with the camera the drag just moved.
    fn pointer_moved(&mut self, ctx: &mut EngineContext, pos: Vec2) {
        if let Some(delta) = self.drag.update(pos) {
            self.rig.drag(&mut ctx.camera, delta);
        }
        self.pointer = pos;

        let Some(handles) = self.handles.as_ref() else {
            return;
        };
        let ray = ctx.camera.ray_from_screen(pos);
        let hit = interaction::pick_body(&ctx.scene, handles, &ray);

        match self.hover.update(hit, pos, &self.orrery) {
            HoverChange::Entered(tooltip) => {
                log::debug!("hover {}", tooltip.name);
                self.pending_move = None;
                ctx.emit_event(GameEvent::new(
                    EVENT_TOOLTIP_SHOW,
                    tooltip.index as f32,
                    tooltip.anchor[0],
                    tooltip.anchor[1],
                ));
            }
            HoverChange::Moved(anchor) => self.pending_move = Some(anchor),
            HoverChange::Left => {
                self.pending_move = None;
                ctx.emit_event(GameEvent::new(EVENT_TOOLTIP_HIDE, 0.0, 0.0, 0.0));
            }
            HoverChange::Unchanged => {}
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("snapshot serialization failed: {}", e);
        "null".to_string()
    })
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_frame_dt: self.config.max_frame_dt,
            // Sun, planets, and every star
            max_sdf_instances: self.config.star_count.saturating_add(bodies::BODY_COUNT + 1),
            ..GameConfig::default()
        }
    }

    fn load_config(&mut self, json: &str) -> EngineResult<()> {
        self.config = OrreryConfig::from_json(json)?;
        log::debug!("config loaded: {:?}", self.config);
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.scene.clear();
        let (handles, states) = builder::build_scene(&mut ctx.scene, &BODIES, &self.config);
        let sim = self.orrery.sim.clone();
        self.orrery = Orrery::from_parts(&BODIES, states);
        self.orrery.sim = sim;

        builder::install_lights(&mut ctx.lights);

        ctx.camera.position = Vec3::from_array(self.config.camera_position);
        ctx.camera.target = Vec3::ZERO;
        ctx.set_background(self.orrery.theme().background());

        update::apply_transforms(&mut ctx.scene, &handles, &self.orrery);
        self.handles = Some(handles);
        self.drag.end();
        self.hover = HoverTracker::default();
        self.controls_dirty = true;

        log::info!(
            "solar system ready: {} bodies, {} stars, {} scene nodes",
            self.orrery.len(),
            self.config.star_count,
            ctx.scene.len()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        // ── Handle input ─────────────────────────────────────────────
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => {
                    let pos = Vec2::new(x, y);
                    self.pointer = pos;
                    self.drag.start(pos);
                }
                InputEvent::PointerMove { x, y } => self.pointer_moved(ctx, Vec2::new(x, y)),
                InputEvent::PointerUp { .. } => self.drag.end(),
                InputEvent::Wheel { delta_y } => self.rig.wheel(&mut ctx.camera, delta_y),
                InputEvent::Custom { kind, a, b, .. } => self.handle_custom(kind, a, b),
                // Applied to the camera by the runner
                InputEvent::Resize { .. } => {}
            }
        }

        // ── Advance ──────────────────────────────────────────────────
        update::advance(&mut self.orrery, dt);
        if let Some(handles) = self.handles.as_ref() {
            update::apply_transforms(&mut ctx.scene, handles, &self.orrery);
        }

        ctx.set_background(self.orrery.theme().background());

        // ── Notify the UI ────────────────────────────────────────────
        // Stays dirty until the event fits, so a full queue only delays it.
        if self.controls_dirty {
            let queued = ctx.emit_event(GameEvent::new(
                EVENT_CONTROLS_CHANGED,
                if self.orrery.is_running() { 1.0 } else { 0.0 },
                if self.orrery.theme().is_dark() { 1.0 } else { 0.0 },
                0.0,
            ));
            self.controls_dirty = !queued;
        }
        if let Some(anchor) = self.pending_move.take() {
            let index = self.hover.hovered().map_or(-1.0, |i| i as f32);
            ctx.emit_event(GameEvent::new(EVENT_TOOLTIP_MOVE, index, anchor.x, anchor.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{EARTH, MARS};
    use crate::state::{DARK_BACKGROUND, LIGHT_BACKGROUND};
    use orrery_engine::{FixedTicks, NodeKind};
    use orrery_web::GameRunner;

    fn runner() -> GameRunner<SolarSystem> {
        let mut runner = GameRunner::new(SolarSystem::new());
        runner.init(800.0, 600.0).unwrap();
        runner
    }

    fn events_of(runner: &GameRunner<SolarSystem>, kind: f32) -> Vec<GameEvent> {
        runner.context().events.iter().copied().filter(|e| e.kind == kind).collect()
    }

    fn screen_of(runner: &GameRunner<SolarSystem>, index: usize) -> Vec2 {
        let handles = runner.game().handles().unwrap();
        let ctx = runner.context();
        let world = ctx.scene.world_position(handles.planets[index]);
        ctx.camera.project(world).unwrap().pos
    }

    #[test]
    fn init_builds_scene_and_first_frame() {
        let runner = runner();
        let ctx = runner.context();
        assert_eq!(ctx.scene.count_kind(NodeKind::is_sphere), 9);
        assert_eq!(ctx.camera.position, Vec3::new(0.0, 30.0, 80.0));
        assert_eq!(ctx.background.to_hex(), DARK_BACKGROUND);
        assert!(runner.sdf_instance_count() >= 9);
        assert_eq!(runner.light_count(), 1);
        assert!(runner.vector_vertex_count() > 0);
    }

    #[test]
    fn ticks_advance_orbits() {
        let mut runner = runner();
        runner.run(&mut FixedTicks::new(0.016, 100));

        let earth = runner.game().orrery().body(EARTH).unwrap();
        let expected = 0.016 * 100.0 * BODIES[EARTH].base_angular_speed * update::ORBIT_SCALE;
        assert!((earth.orbit_angle - expected).abs() < 1e-4);
    }

    #[test]
    fn oversized_frame_is_clamped() {
        let mut runner = runner();
        runner.tick(5.0);
        assert_eq!(runner.game().orrery().sim.elapsed_since_last_frame, 0.1);
    }

    #[test]
    fn pause_event_freezes_and_notifies() {
        let mut runner = runner();
        runner.tick(0.016);
        runner.push_input(InputEvent::Custom { kind: CUSTOM_TOGGLE_PAUSE, a: 0.0, b: 0.0, c: 0.0 });
        runner.tick(0.016);

        let changed = events_of(&runner, EVENT_CONTROLS_CHANGED);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].a, 0.0);

        let before = runner.game().orrery().bodies().to_vec();
        runner.run(&mut FixedTicks::new(0.016, 30));
        assert_eq!(runner.game().orrery().bodies(), before.as_slice());
        // Rendering continues while paused
        assert_eq!(runner.frame_count(), 32);
        assert!(runner.sdf_instance_count() >= 9);
    }

    #[test]
    fn speed_event_validates_index() {
        let mut runner = runner();
        runner.push_input(InputEvent::Custom { kind: CUSTOM_SET_SPEED, a: MARS as f32, b: 8.5, c: 0.0 });
        runner.push_input(InputEvent::Custom { kind: CUSTOM_SET_SPEED, a: -1.0, b: 3.0, c: 0.0 });
        runner.push_input(InputEvent::Custom { kind: CUSTOM_SET_SPEED, a: 1.5, b: 3.0, c: 0.0 });
        runner.tick(0.016);

        let orrery = runner.game().orrery();
        assert_eq!(orrery.body(MARS).unwrap().current_angular_speed, 8.5);
        assert_eq!(orrery.body(0).unwrap().current_angular_speed, BODIES[0].base_angular_speed);
        assert_eq!(orrery.body(1).unwrap().current_angular_speed, BODIES[1].base_angular_speed);
    }

    #[test]
    fn theme_toggle_swaps_background_only() {
        let mut runner = runner();
        let lights_before = runner.light_count();
        assert_eq!(runner.game_mut().toggle_theme(), Theme::Light);
        runner.tick(0.016);
        assert_eq!(runner.context().background.to_hex(), LIGHT_BACKGROUND);
        assert_eq!(runner.light_count(), lights_before);

        runner.push_input(InputEvent::Custom { kind: CUSTOM_TOGGLE_THEME, a: 0.0, b: 0.0, c: 0.0 });
        runner.tick(0.016);
        assert_eq!(runner.context().background.to_hex(), DARK_BACKGROUND);
    }

    #[test]
    fn hover_shows_moves_and_hides_tooltip() {
        let mut runner = runner();
        let earth = screen_of(&runner, EARTH);

        runner.push_input(InputEvent::PointerMove { x: earth.x, y: earth.y });
        runner.tick(0.0);
        let shown = events_of(&runner, EVENT_TOOLTIP_SHOW);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].a, EARTH as f32);
        assert_eq!((shown[0].b, shown[0].c), (earth.x + 10.0, earth.y - 10.0));
        assert!(runner.game().tooltip_json().contains("\"name\":\"Earth\""));

        runner.push_input(InputEvent::PointerMove { x: earth.x + 0.5, y: earth.y });
        runner.tick(0.0);
        assert!(events_of(&runner, EVENT_TOOLTIP_SHOW).is_empty());
        assert_eq!(events_of(&runner, EVENT_TOOLTIP_MOVE).len(), 1);

        runner.push_input(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        runner.tick(0.0);
        assert_eq!(events_of(&runner, EVENT_TOOLTIP_HIDE).len(), 1);
        assert_eq!(runner.game().hovered(), None);
        assert_eq!(runner.game().tooltip_json(), "null");
    }

    #[test]
    fn pointer_burst_coalesces_moves_and_keeps_control_notice() {
        let mut runner = runner();
        runner.tick(0.016);
        let earth = screen_of(&runner, EARTH);

        // Enter Earth, then settle the hover before the burst
        runner.push_input(InputEvent::PointerMove { x: earth.x, y: earth.y });
        runner.tick(0.0);
        assert_eq!(runner.game().hovered(), Some(EARTH));

        runner.push_input(InputEvent::Custom { kind: CUSTOM_TOGGLE_PAUSE, a: 0.0, b: 0.0, c: 0.0 });
        for i in 0..70 {
            let x = earth.x + (i % 2) as f32 * 0.25;
            runner.push_input(InputEvent::PointerMove { x, y: earth.y });
        }
        runner.tick(0.0);

        assert!(!runner.game().orrery().is_running());
        let changed = events_of(&runner, EVENT_CONTROLS_CHANGED);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].a, 0.0);

        let moves = events_of(&runner, EVENT_TOOLTIP_MOVE);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].a, EARTH as f32);
        // Last sample of the burst: i = 69 is odd
        assert_eq!((moves[0].b, moves[0].c), (earth.x + 0.25 + 10.0, earth.y - 10.0));
    }

    #[test]
    fn control_notice_survives_a_full_event_queue() {
        let mut runner = runner();
        runner.tick(0.016);
        let earth = screen_of(&runner, EARTH);
        let far = Vec2::new(1.0, 1.0);

        // Each enter/leave pair emits a show and a hide: 80 events, past the cap of 64
        runner.push_input(InputEvent::Custom { kind: CUSTOM_TOGGLE_THEME, a: 0.0, b: 0.0, c: 0.0 });
        for _ in 0..40 {
            runner.push_input(InputEvent::PointerMove { x: earth.x, y: earth.y });
            runner.push_input(InputEvent::PointerMove { x: far.x, y: far.y });
        }
        runner.tick(0.0);
        assert_eq!(runner.context().events.len(), runner.max_events() as usize);
        assert!(events_of(&runner, EVENT_CONTROLS_CHANGED).is_empty());

        runner.tick(0.0);
        let changed = events_of(&runner, EVENT_CONTROLS_CHANGED);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].b, 0.0);

        runner.tick(0.0);
        assert!(events_of(&runner, EVENT_CONTROLS_CHANGED).is_empty());
    }

    #[test]
    fn oversized_star_count_is_rejected() {
        let mut runner = GameRunner::new(SolarSystem::new());
        assert!(runner.load_config(r#"{ "star_count": 18446744073709551615 }"#).is_err());
        // Config stays at defaults and stays usable
        assert_eq!(runner.max_sdf_instances(), 2009);
        runner.init(800.0, 600.0).unwrap();
    }

    #[test]
    fn tooltip_speed_is_live() {
        let mut runner = runner();
        let earth = screen_of(&runner, EARTH);
        runner.push_input(InputEvent::PointerMove { x: earth.x, y: earth.y });
        runner.tick(0.0);

        runner.game_mut().set_speed(EARTH, 9.0);
        assert_eq!(runner.game().tooltip().unwrap().speed, 9.0);
    }

    #[test]
    fn wheel_and_drag_move_the_camera() {
        let mut runner = runner();
        let start = runner.context().camera.position;

        runner.push_input(InputEvent::Wheel { delta_y: 100.0 });
        runner.tick(0.016);
        let after_wheel = runner.context().camera.position;
        assert!((after_wheel.length() - (start.length() + 0.5)).abs() < 1e-4);

        runner.push_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        runner.push_input(InputEvent::PointerMove { x: 450.0, y: 300.0 });
        runner.push_input(InputEvent::PointerUp { x: 450.0, y: 300.0 });
        runner.tick(0.016);
        let after_drag = runner.context().camera.position;
        assert!((after_drag - after_wheel).length() > 1e-3);
        assert!((after_drag.length() - after_wheel.length()).abs() < 1e-3);

        // Released: further moves don't orbit
        runner.push_input(InputEvent::PointerMove { x: 500.0, y: 300.0 });
        runner.tick(0.016);
        assert_eq!(runner.context().camera.position, after_drag);
    }

    #[test]
    fn reset_restores_speeds_and_angles() {
        let mut runner = runner();
        runner.game_mut().set_speed(EARTH, 10.0);
        runner.run(&mut FixedTicks::new(0.05, 20));
        runner.game_mut().toggle_running();

        runner.push_input(InputEvent::Custom { kind: CUSTOM_RESET, a: 0.0, b: 0.0, c: 0.0 });
        runner.tick(0.016);

        let orrery = runner.game().orrery();
        assert!(!orrery.is_running());
        let earth = orrery.body(EARTH).unwrap();
        assert_eq!(earth.current_angular_speed, BODIES[EARTH].base_angular_speed);
        assert_eq!(earth.orbit_angle, 0.0);
        assert_eq!(earth.self_rotation_angle, 0.0);
    }

    #[test]
    fn load_config_shapes_the_scene() {
        let mut runner = GameRunner::new(SolarSystem::new());
        assert!(runner.load_config("{ star_count: }").is_err());
        runner.load_config(r#"{ "star_count": 10 }"#).unwrap();
        runner.init(800.0, 600.0).unwrap();

        let game = runner.game();
        let starfield = game.handles().unwrap().starfield;
        let NodeKind::Points { points, .. } = &runner.context().scene.get(starfield).unwrap().kind else {
            panic!("starfield is not a point cloud");
        };
        assert_eq!(points.len(), 10);
        assert_eq!(runner.max_sdf_instances(), 19);
    }

    #[test]
    fn json_snapshots() {
        let runner = runner();
        let controls: serde_json::Value = serde_json::from_str(&runner.game().controls_json()).unwrap();
        assert_eq!(controls["pause_label"], "Pause");
        assert_eq!(controls["rows"].as_array().unwrap().len(), 8);

        let registry: serde_json::Value = serde_json::from_str(&runner.game().bodies_json()).unwrap();
        assert_eq!(registry[EARTH]["name"], "Earth");
        assert_eq!(registry[EARTH]["distance"], 15.0);
    }
}
