use std::f32::consts::PI;

/// Easing curves used by the scroll phases and micro-interactions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// Quadratic out.
    Power1Out,
    /// Cubic out.
    Power2Out,
    /// Cubic in-out.
    Power2InOut,
    SineInOut,
    /// Overshooting out curve; the parameter is the overshoot strength.
    BackOut(f32),
}

impl Ease {
    /// Map `t` in \[0, 1\] through the curve. Input is clamped first.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Ease::BackOut(s) => {
                let p = t - 1.0;
                p * p * ((s + 1.0) * p + s) + 1.0
            }
        }
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
