// ABOUTME: Concurrent batch of rectangle tweens keyed by panel handle.
// ABOUTME: Fires a single completion callback exactly once after the last member finishes.

use std::time::Duration;

use zg_core::{PanelId, Rect};

use crate::RectTween;

/// Result of advancing a batch by one tick.
pub struct BatchTick {
    /// Current value for every member, in insertion order
    pub updates: Vec<(PanelId, Rect)>,
    /// True exactly on the tick that completed the batch
    pub finished: bool,
}

/// A group of independent tweens sharing one completion signal. Owned by
/// the transition that created it and discarded after completion runs.
/// An empty batch completes on its first tick.
pub struct AnimationBatch {
    members: Vec<(PanelId, RectTween)>,
    on_finished: Option<Box<dyn FnOnce() + Send>>,
    started: bool,
    completed: bool,
}

impl AnimationBatch {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            on_finished: None,
            started: false,
            completed: false,
        }
    }

    pub fn add(&mut self, id: PanelId, tween: RectTween) {
        self.members.push((id, tween));
    }

    /// Register the completion callback; invoked exactly once
    pub fn on_finished(&mut self, callback: impl FnOnce() + Send + 'static) {
        self.on_finished = Some(Box::new(callback));
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn is_running(&self) -> bool {
        self.started && !self.completed
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Advance every member. Member completion order is unspecified; the
    /// batch completes only once all of them have reached their end value.
    pub fn tick(&mut self, dt: Duration) -> BatchTick {
        if !self.is_running() {
            return BatchTick {
                updates: Vec::new(),
                finished: false,
            };
        }

        let mut updates = Vec::with_capacity(self.members.len());
        let mut all_done = true;
        for (id, tween) in &mut self.members {
            updates.push((*id, tween.tick(dt)));
            all_done &= tween.is_finished();
        }

        if all_done {
            self.completed = true;
            tracing::debug!("Animation batch finished ({} members)", self.members.len());
            if let Some(callback) = self.on_finished.take() {
                callback();
            }
        }

        BatchTick {
            updates,
            finished: all_done,
        }
    }
}

impl Default for AnimationBatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use zg_core::EasingCurve;

    fn tween(ms: u64) -> RectTween {
        RectTween::new(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(50.0, 50.0, 10.0, 10.0),
            Duration::from_millis(ms),
            EasingCurve::Linear,
        )
    }

    #[test]
    fn empty_batch_completes_on_first_tick() {
        let mut batch = AnimationBatch::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        batch.on_finished(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        batch.start();

        let result = batch.tick(Duration::from_millis(16));
        assert!(result.finished);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!batch.is_running());
    }

    #[test]
    fn completion_fires_exactly_once() {
        let mut batch = AnimationBatch::new();
        batch.add(PanelId(1), tween(100));
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        batch.on_finished(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        batch.start();

        assert!(!batch.tick(Duration::from_millis(50)).finished);
        assert!(batch.tick(Duration::from_millis(60)).finished);
        // Further ticks are inert
        assert!(!batch.tick(Duration::from_millis(16)).finished);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn waits_for_slowest_member() {
        let mut batch = AnimationBatch::new();
        batch.add(PanelId(1), tween(50));
        batch.add(PanelId(2), tween(200));
        batch.start();

        let result = batch.tick(Duration::from_millis(100));
        assert!(!result.finished);
        assert_eq!(result.updates.len(), 2);
        // First member already clamped at its end value
        assert_eq!(result.updates[0].1, Rect::new(50.0, 50.0, 10.0, 10.0));

        assert!(batch.tick(Duration::from_millis(100)).finished);
    }

    #[test]
    fn unstarted_batch_does_not_advance() {
        let mut batch = AnimationBatch::new();
        batch.add(PanelId(1), tween(50));
        let result = batch.tick(Duration::from_millis(100));
        assert!(result.updates.is_empty());
        assert!(!result.finished);
    }
}
