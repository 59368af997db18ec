// ABOUTME: Easing curves for animated transitions.
// ABOUTME: Maps normalized time to eased progress; quadratic curves match the zoom/restore defaults.

use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized animation progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EasingCurve {
    /// Constant speed
    #[default]
    Linear,
    /// Slow start, accelerates (quadratic)
    InQuad,
    /// Fast start, decelerates (quadratic)
    OutQuad,
    /// Slow start and end (quadratic)
    InOutQuad,
    /// Slow start, accelerates (cubic)
    InCubic,
    /// Fast start, decelerates (cubic)
    OutCubic,
}

impl EasingCurve {
    /// Apply the curve to progress `t` in [0, 1]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingCurve::Linear => t,
            EasingCurve::InQuad => t * t,
            EasingCurve::OutQuad => t * (2.0 - t),
            EasingCurve::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let t1 = t - 1.0;
                    1.0 - 2.0 * t1 * t1
                }
            }
            EasingCurve::InCubic => t * t * t,
            EasingCurve::OutCubic => {
                let t1 = t - 1.0;
                t1 * t1 * t1 + 1.0
            }
        }
    }
}
