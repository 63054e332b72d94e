/// Per-frame angle integration and transform write-back.

use std::f32::consts::TAU;
use orrery_engine::SceneGraph;

use crate::builder::SceneHandles;
use crate::state::Orrery;

/// Orbit angle advanced per second per unit of angular speed.
pub const ORBIT_SCALE: f32 = 0.1;
/// Self-rotation rate, identical for every body.
pub const SELF_SPIN_RATE: f32 = 2.0;
pub const SUN_SPIN_RATE: f32 = 0.5;
pub const STARFIELD_SPIN_RATE: f32 = 0.02;

#[inline]
fn wrap(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

/// Advance every angle by `dt` seconds. Paused: records dt, changes nothing.
/// Returns whether any angle moved.
pub fn advance(orrery: &mut Orrery, dt: f32) -> bool {
    orrery.sim.elapsed_since_last_frame = dt;
    if !orrery.sim.running || dt <= 0.0 {
        return false;
    }

    for body in orrery.bodies_mut() {
        body.orbit_angle = wrap(body.orbit_angle + dt * body.current_angular_speed * ORBIT_SCALE);
        body.self_rotation_angle = wrap(body.self_rotation_angle + dt * SELF_SPIN_RATE);
    }
    orrery.sim.sun_angle = wrap(orrery.sim.sun_angle + dt * SUN_SPIN_RATE);
    orrery.sim.starfield_angle = wrap(orrery.sim.starfield_angle + dt * STARFIELD_SPIN_RATE);
    true
}

/// Write the model's angles into node rotations.
pub fn apply_transforms(scene: &mut SceneGraph, handles: &SceneHandles, orrery: &Orrery) {
    scene.set_rotation(handles.sun, orrery.sim.sun_angle);
    scene.set_rotation(handles.starfield, orrery.sim.starfield_angle);
    for (i, body) in orrery.bodies().iter().enumerate() {
        if let (Some(&pivot), Some(&planet)) = (handles.pivots.get(i), handles.planets.get(i)) {
            scene.set_rotation(pivot, body.orbit_angle);
            scene.set_rotation(planet, body.self_rotation_angle);
        }
    }
}
