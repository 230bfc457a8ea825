use crate::constants::{FLOAT_AMPLITUDE, FLOAT_HALF_PERIOD_MS};
use crate::ease::Ease;

/// Endless vertical bob around a resting `y`, driven by wall-clock time.
///
/// While running, every write of the element's `y` goes through [`IdleFloat::y`];
/// scroll-driven writes move `base_y` instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleFloat {
    pub base_y: f32,
    started_ms: f64,
}

impl IdleFloat {
    pub fn start(base_y: f32, now_ms: f64) -> Self {
        Self {
            base_y,
            started_ms: now_ms,
        }
    }

    /// Offset from `base_y` at `now_ms`, in `[0, FLOAT_AMPLITUDE]`.
    pub fn offset(&self, now_ms: f64) -> f32 {
        let elapsed = (now_ms - self.started_ms).max(0.0);
        let cycle = elapsed / FLOAT_HALF_PERIOD_MS;
        let within = cycle.fract() as f32;
        // Odd half-periods run backwards.
        let t = if (cycle.floor() as u64) % 2 == 0 {
            within
        } else {
            1.0 - within
        };
        FLOAT_AMPLITUDE * Ease::SineInOut.apply(t)
    }

    pub fn y(&self, now_ms: f64) -> f32 {
        self.base_y + self.offset(now_ms)
    }
}
