// ABOUTME: Rectangle tween advanced by host ticks.
// ABOUTME: Interpolates a rect from start to end over a duration with an easing curve.

use std::time::Duration;

use zg_core::{EasingCurve, Rect};

/// One rectangle interpolation, driven by `tick`. Reaching the duration
/// clamps the value to the exact end rect.
#[derive(Debug, Clone)]
pub struct RectTween {
    start: Rect,
    end: Rect,
    duration: Duration,
    easing: EasingCurve,
    elapsed: Duration,
}

impl RectTween {
    pub fn new(start: Rect, end: Rect, duration: Duration, easing: EasingCurve) -> Self {
        Self {
            start,
            end,
            duration,
            easing,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance by `dt` and return the current value
    pub fn tick(&mut self, dt: Duration) -> Rect {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.current()
    }

    pub fn current(&self) -> Rect {
        if self.is_finished() {
            return self.end;
        }
        let progress = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.start.lerp(&self.end, self.easing.apply(progress))
    }

    pub fn is_finished(&self) -> bool {
        // Zero-duration tweens are complete from the start
        self.elapsed >= self.duration
    }

    pub fn end_value(&self) -> Rect {
        self.end
    }
}
