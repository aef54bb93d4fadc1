//! Easing curves mapping progress in [0, 1] to eased output in [0, 1].

use studydeck_core::config::EasingType;

/// Apply `kind` to a progress value. Input is clamped to [0, 1].
#[inline]
pub fn ease(kind: EasingType, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    match kind {
        // Hard cut: jump to the target at the end of the duration
        EasingType::None => {
            if t < 1.0 {
                0.0
            } else {
                1.0
            }
        }
        EasingType::Linear => t,
        EasingType::Cubic => {
            let inv = 1.0 - t;
            1.0 - inv * inv * inv
        }
        EasingType::Quintic => {
            let inv = 1.0 - t;
            1.0 - inv.powi(5)
        }
        EasingType::EaseOut => {
            if t >= 1.0 {
                1.0
            } else {
                1.0 - (-10.0 * t).exp2()
            }
        }
    }
}
