/// Control panel data binding: slider ranges, label text, and the
/// serializable snapshots the UI renders from.

use serde::Serialize;

use crate::state::{Orrery, Theme};

// ── Speed slider ─────────────────────────────────────────────────────

pub const SPEED_MIN: f32 = 0.0;
pub const SPEED_MAX: f32 = 10.0;
pub const SPEED_STEP: f32 = 0.1;

/// Slider readout, one decimal place.
pub fn format_speed(speed: f32) -> String {
    format!("{:.1}", speed)
}

/// Text for the pause button: names the action it will perform.
pub fn pause_label(running: bool) -> &'static str {
    if running {
        "Pause"
    } else {
        "Resume"
    }
}

/// Text for the theme button: names the theme it switches to.
pub fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "Light Mode",
        Theme::Light => "Dark Mode",
    }
}

// ── Snapshots ────────────────────────────────────────────────────────

/// One slider row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedRow {
    pub index: usize,
    pub name: &'static str,
    /// Swatch colour, `#rrggbb`.
    pub color: String,
    pub speed: f32,
    pub readout: String,
}

/// Everything the control panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSnapshot {
    pub rows: Vec<SpeedRow>,
    pub running: bool,
    pub pause_label: &'static str,
    pub theme: Theme,
    pub theme_dark: bool,
    pub theme_label: &'static str,
    pub background: String,
    pub speed_min: f32,
    pub speed_max: f32,
    pub speed_step: f32,
}

impl ControlSnapshot {
    pub fn capture(orrery: &Orrery) -> Self {
        let rows = orrery
            .registry()
            .iter()
            .zip(orrery.bodies())
            .enumerate()
            .map(|(index, (descriptor, state))| SpeedRow {
                index,
                name: descriptor.name,
                color: descriptor.rgb().to_hex_string(),
                speed: state.current_angular_speed,
                readout: format_speed(state.current_angular_speed),
            })
            .collect();

        let theme = orrery.theme();
        Self {
            rows,
            running: orrery.is_running(),
            pause_label: pause_label(orrery.is_running()),
            theme,
            theme_dark: theme.is_dark(),
            theme_label: theme_label(theme),
            background: theme.background().to_hex_string(),
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
            speed_step: SPEED_STEP,
        }
    }
}

/// Registry entry as sent to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyEntry {
    pub index: usize,
    pub name: &'static str,
    pub radius: f32,
    pub distance: f32,
    pub base_speed: f32,
    pub color: String,
}

pub fn registry_entries(orrery: &Orrery) -> Vec<BodyEntry> {
    orrery
        .registry()
        .iter()
        .enumerate()
        .map(|(index, d)| BodyEntry {
            index,
            name: d.name,
            radius: d.radius,
            distance: d.distance,
            base_speed: d.base_angular_speed,
            color: d.rgb().to_hex_string(),
        })
        .collect()
}
