/// Per-frame clock.
/// Turns the raw wall-clock delta reported by the host into the dt the game sees.
/// One update runs per display refresh; the delta is clamped so a tab resuming
/// from suspension does not apply one huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Largest dt handed to the game in a single frame.
    max_dt: f32,
    /// Total clamped time seen so far.
    elapsed: f64,
    /// Number of frames advanced.
    frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Consume one raw frame delta. Returns the dt to simulate with.
    pub fn advance(&mut self, raw_dt: f32) -> f32 {
        let dt = if !raw_dt.is_finite() || raw_dt < 0.0 {
            0.0
        } else if raw_dt > self.max_dt {
            log::debug!("frame dt {:.3}s clamped to {:.3}s", raw_dt, self.max_dt);
            self.max_dt
        } else {
            raw_dt
        };
        self.elapsed += dt as f64;
        self.frames += 1;
        dt
    }

    /// The clamp ceiling.
    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }

    /// Total simulated seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Source of frame deltas.
///
/// In the browser `requestAnimationFrame` drives `game_tick(dt)` directly.
/// Tests and headless hosts implement this to feed synthetic deltas.
pub trait TickSource {
    /// Delta for the next frame in seconds, or `None` when the source is exhausted.
    fn next_dt(&mut self) -> Option<f32>;
}

/// Emits the same dt a fixed number of times.
#[derive(Debug, Clone)]
pub struct FixedTicks {
    dt: f32,
    remaining: u32,
}

impl FixedTicks {
    pub fn new(dt: f32, count: u32) -> Self {
        Self { dt, remaining: count }
    }
}

impl TickSource for FixedTicks {
    fn next_dt(&mut self) -> Option<f32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_small_deltas_through() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.advance(1.0 / 60.0), 1.0 / 60.0);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn clamps_large_delta() {
        let mut clock = FrameClock::new(0.1);
        // A tab suspended for 30 s should not jump 30 s
        assert_eq!(clock.advance(30.0), 0.1);
    }

    #[test]
    fn rejects_negative_and_nan() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.advance(-0.5), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.advance(f32::INFINITY), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn fixed_ticks_exhaust() {
        let mut ticks = FixedTicks::new(0.5, 3);
        assert_eq!(ticks.next_dt(), Some(0.5));
        assert_eq!(ticks.next_dt(), Some(0.5));
        assert_eq!(ticks.next_dt(), Some(0.5));
        assert_eq!(ticks.next_dt(), None);
    }
}
