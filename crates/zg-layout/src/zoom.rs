// ABOUTME: Zoom/restore state machine shared by both layout variants.
// ABOUTME: Computes push-out and restore geometries and owns the transition's animation batch.

use std::collections::HashMap;
use std::time::Duration;

use zg_animation::{AnimationBatch, RectTween};
use zg_core::{EasingCurve, PanelId, Rect, SizePolicy};

use crate::PanelRegistry;

/// Focus transition state. `Rearranging` is not a phase here: resize
/// reflow is orthogonal and handled by the layouts, which drop it while a
/// transition is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomPhase {
    #[default]
    Idle,
    ZoomingIn,
    Zoomed,
    ZoomingOut,
}

/// Emitted by `tick` when a transition batch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomEvent {
    ZoomFinished(PanelId),
    RestoreFinished,
}

/// Drives the expand-one/push-others transition and its reverse.
/// Holds handles only; panels removed mid-flight are skipped harmlessly.
#[derive(Default)]
pub struct FocusAnimator {
    phase: ZoomPhase,
    focused: Option<PanelId>,
    saved: HashMap<PanelId, Rect>,
    full_area: Rect,
    batch: Option<AnimationBatch>,
}

impl FocusAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ZoomPhase {
        self.phase
    }

    pub fn is_zoomed(&self) -> bool {
        self.focused.is_some()
    }

    pub fn zoomed_widget(&self) -> Option<PanelId> {
        self.focused
    }

    /// True while a zoom-in or zoom-out batch is running
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, ZoomPhase::ZoomingIn | ZoomPhase::ZoomingOut)
    }

    /// Start the zoom-in transition. No-op unless idle and the target is
    /// registered. Geometries should be stabilized (rearranged) first.
    pub fn begin_zoom(
        &mut self,
        registry: &mut PanelRegistry,
        target: PanelId,
        full_area: Rect,
        push_distance: f32,
        duration: Duration,
        easing: EasingCurve,
    ) -> bool {
        if self.phase != ZoomPhase::Idle {
            tracing::debug!(?target, phase = ?self.phase, "zoom_to ignored: not idle");
            return false;
        }
        if !registry.contains(target) {
            tracing::debug!(?target, "zoom_to ignored: unknown panel");
            return false;
        }

        self.full_area = full_area;
        self.saved.clear();
        let zoom_center = full_area.center();

        let mut batch = AnimationBatch::new();
        for id in registry.ids() {
            let panel = match registry.get(id) {
                Some(panel) => panel,
                None => continue,
            };
            let current = panel.current_geometry;
            self.saved.insert(id, current);

            if id == target {
                batch.add(
                    id,
                    RectTween::new(current, full_area, duration, EasingCurve::OutQuad),
                );
            } else {
                let direction = (current.center() - zoom_center).normalized_or_diagonal();
                let new_center = current.center() + direction.scaled(push_distance);
                let destination = current.with_center(new_center);
                batch.add(id, RectTween::new(current, destination, duration, easing));
            }
        }
        batch.start();

        self.batch = Some(batch);
        self.focused = Some(target);
        self.phase = ZoomPhase::ZoomingIn;
        tracing::info!(?target, "zoom-in started");
        true
    }

    /// Start the restore transition. No-op unless currently zoomed (a
    /// running transition is left alone). Non-focused panels are unhidden
    /// immediately so they are visible during the reverse animation.
    pub fn begin_restore(
        &mut self,
        registry: &mut PanelRegistry,
        duration: Duration,
        easing: EasingCurve,
    ) -> bool {
        if self.phase != ZoomPhase::Zoomed {
            tracing::debug!(phase = ?self.phase, "show_all ignored");
            return false;
        }
        let target = match self.focused {
            Some(id) => id,
            None => return false,
        };

        let mut batch = AnimationBatch::new();
        for id in registry.ids() {
            let panel = match registry.get_mut(id) {
                Some(panel) => panel,
                None => continue,
            };
            panel.visible = true;
            let end = self
                .saved
                .get(&id)
                .copied()
                .unwrap_or(panel.original_geometry);
            let curve = if id == target {
                EasingCurve::InQuad
            } else {
                easing
            };
            batch.add(
                id,
                RectTween::new(panel.current_geometry, end, duration, curve),
            );
        }
        batch.start();

        self.batch = Some(batch);
        self.phase = ZoomPhase::ZoomingOut;
        tracing::info!(?target, "zoom-out started");
        true
    }

    /// Advance the in-flight batch and apply member values to the
    /// registry. Returns an event exactly on the completing tick.
    pub fn tick(&mut self, registry: &mut PanelRegistry, dt: Duration) -> Option<ZoomEvent> {
        let batch = self.batch.as_mut()?;
        let result = batch.tick(dt);
        for (id, rect) in result.updates {
            // Panels removed mid-animation are skipped
            if let Some(panel) = registry.get_mut(id) {
                panel.current_geometry = rect;
            }
        }
        if !result.finished {
            return None;
        }
        self.batch = None;

        match self.phase {
            ZoomPhase::ZoomingIn => self.finish_zoom(registry),
            ZoomPhase::ZoomingOut => self.finish_restore(registry),
            _ => None,
        }
    }

    fn finish_zoom(&mut self, registry: &mut PanelRegistry) -> Option<ZoomEvent> {
        let target = self.focused?;
        if !registry.contains(target) {
            // Focused panel was removed mid-transition: abandon the cycle
            tracing::warn!(?target, "zoom target removed mid-transition, reverting");
            for id in registry.ids() {
                if let Some(panel) = registry.get_mut(id) {
                    panel.visible = true;
                }
            }
            self.focused = None;
            self.saved.clear();
            self.phase = ZoomPhase::Idle;
            return None;
        }

        for id in registry.ids() {
            if let Some(panel) = registry.get_mut(id) {
                if id == target {
                    panel.size_policy = SizePolicy::expanding();
                    panel.current_geometry = self.full_area;
                } else {
                    panel.visible = false;
                }
            }
        }
        self.phase = ZoomPhase::Zoomed;
        tracing::info!(?target, "zoom-in finished");
        Some(ZoomEvent::ZoomFinished(target))
    }

    fn finish_restore(&mut self, registry: &mut PanelRegistry) -> Option<ZoomEvent> {
        if let Some(target) = self.focused {
            if let Some(panel) = registry.get_mut(target) {
                panel.size_policy = panel.original_policy;
            }
        }
        self.focused = None;
        self.saved.clear();
        self.phase = ZoomPhase::Idle;
        tracing::info!("zoom-out finished");
        Some(ZoomEvent::RestoreFinished)
    }

    /// Update a panel's restore target after a resize while zoomed
    pub fn update_saved(&mut self, id: PanelId, rect: Rect) {
        if self.saved.contains_key(&id) {
            self.saved.insert(id, rect);
        }
    }

    /// Drop any record of a removed panel
    pub fn forget_panel(&mut self, id: PanelId) {
        self.saved.remove(&id);
    }

    /// React to a panel's removal. Removing the focused panel while
    /// zoomed (no transition running) abandons the cycle and unhides the
    /// rest; mid-transition removal is left to the completion guards.
    pub fn handle_removal(&mut self, registry: &mut PanelRegistry, id: PanelId) {
        self.saved.remove(&id);
        if self.focused == Some(id) && self.phase == ZoomPhase::Zoomed {
            for other in registry.ids() {
                if let Some(panel) = registry.get_mut(other) {
                    panel.visible = true;
                }
            }
            self.focused = None;
            self.saved.clear();
            self.phase = ZoomPhase::Idle;
            tracing::info!(?id, "zoomed panel removed, zoom state cleared");
        }
    }

    /// Abandon the current zoom cycle, if any
    pub fn reset(&mut self) {
        self.phase = ZoomPhase::Idle;
        self.focused = None;
        self.saved.clear();
        self.batch = None;
    }
}
