// ABOUTME: Sequential row-major grid layout with width-derived column count.
// ABOUTME: Append-only cursor placement, lazy reflow on removal, animated rearrange and zoom.

use std::time::Duration;

use zg_animation::{AnimationBatch, RectTween};
use zg_core::{EasingCurve, LayoutConfig, Margins, PanelId, Rect, SizePolicy};

use crate::cell::{cell_rect, CellAssignment};
use crate::registry::{Panel, PanelRegistry};
use crate::zoom::{FocusAnimator, ZoomEvent};

/// Rearrangement passes settle quickly regardless of the configured
/// zoom duration.
const REARRANGE_DURATION: Duration = Duration::from_millis(50);

/// Grid layout that appends panels at a row-major cursor. The column
/// count is derived from container width on every insertion; removal
/// leaves a gap until `rearrange_widgets` is called.
pub struct AutoGridLayout {
    registry: PanelRegistry,
    animator: FocusAnimator,
    rearrange_batch: Option<AnimationBatch>,
    container: Rect,
    margins: Margins,
    spacing: f32,
    cell_width_threshold: f32,
    duration: Duration,
    easing: EasingCurve,
    cursor_row: i32,
    cursor_col: i32,
    column_count: i32,
}

impl AutoGridLayout {
    pub fn new(container: Rect) -> Self {
        Self::with_config(container, &LayoutConfig::default())
    }

    pub fn with_config(container: Rect, config: &LayoutConfig) -> Self {
        Self {
            registry: PanelRegistry::new(),
            animator: FocusAnimator::new(),
            rearrange_batch: None,
            container,
            margins: config.margins,
            spacing: config.spacing,
            cell_width_threshold: config.cell_width_threshold,
            duration: Duration::from_millis(config.animation_duration_ms),
            easing: config.easing,
            cursor_row: 0,
            cursor_col: 0,
            column_count: 1,
        }
    }

    /// Append a panel at the cursor position, advancing with wraparound.
    pub fn add_widget(&mut self, policy: SizePolicy) -> PanelId {
        self.update_column_count();

        let cell = CellAssignment::new(self.cursor_row, self.cursor_col, 1, 1);
        let target = cell_rect(
            self.content_rect(),
            cell,
            self.column_count,
            self.cursor_row + 1,
            self.spacing,
        );

        let id = self.registry.insert(policy, CellAssignment::AUTO);
        let hidden_by_zoom = self.animator.is_zoomed();
        if let Some(panel) = self.registry.get_mut(id) {
            panel.cell = cell;
            panel.original_geometry = target;
            panel.current_geometry = target;
            // A panel added during a zoom cycle stays hidden until restore
            panel.visible = !hidden_by_zoom;
        }

        self.cursor_col += 1;
        if self.cursor_col >= self.column_count {
            self.cursor_col = 0;
            self.cursor_row += 1;
        }

        tracing::debug!(?id, row = cell.row, col = cell.col, "panel added");
        id
    }

    pub fn add_widget_list(
        &mut self,
        policies: impl IntoIterator<Item = SizePolicy>,
    ) -> Vec<PanelId> {
        policies
            .into_iter()
            .map(|policy| self.add_widget(policy))
            .collect()
    }

    /// Remove a panel's entry. Remaining panels keep their cells until
    /// the next explicit `rearrange_widgets`.
    pub fn remove_widget(&mut self, id: PanelId) {
        if self.registry.remove(id).is_none() {
            tracing::debug!(?id, "remove_widget ignored: unknown panel");
            return;
        }
        self.animator.handle_removal(&mut self.registry, id);
        tracing::debug!(?id, remaining = self.registry.len(), "panel removed");
    }

    /// Drop every panel and reset all placement and zoom state.
    pub fn remove_all(&mut self) {
        self.registry.clear();
        self.animator.reset();
        self.rearrange_batch = None;
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    /// Recompute every cell assignment from scratch and animate panels to
    /// their grid-correct geometries. No-op while zoomed.
    pub fn rearrange_widgets(&mut self) {
        if self.animator.is_zoomed() {
            return;
        }
        if self.animator.is_animating() {
            tracing::debug!("rearrange dropped: zoom transition in flight");
            return;
        }

        let targets = self.assign_cells();
        let mut batch = AnimationBatch::new();
        for (id, target) in targets {
            if let Some(panel) = self.registry.get(id) {
                batch.add(
                    id,
                    RectTween::new(
                        panel.current_geometry,
                        target,
                        REARRANGE_DURATION,
                        self.easing,
                    ),
                );
            }
        }
        batch.start();
        self.rearrange_batch = Some(batch);
    }

    /// Start the zoom-in transition for `id`. No-op if the panel is
    /// unknown, a zoom cycle is active, or a transition is in flight.
    pub fn zoom_to(&mut self, id: PanelId) {
        if !self.registry.contains(id) {
            tracing::debug!(?id, "zoom_to ignored: unknown panel");
            return;
        }
        if self.animator.is_zoomed() || self.animator.is_animating() {
            return;
        }

        // Settle geometries so push directions come from stable positions
        let targets = self.assign_cells();
        for (pid, target) in targets {
            if let Some(panel) = self.registry.get_mut(pid) {
                panel.current_geometry = target;
            }
        }
        self.rearrange_batch = None;

        let full_area = self.content_rect();
        let push_distance = self.container.width / 1.5
            + self.spacing
            + self.margins.left
            + self.margins.right;
        self.animator.begin_zoom(
            &mut self.registry,
            id,
            full_area,
            push_distance,
            self.duration,
            self.easing,
        );
    }

    /// Start the restore transition. No-op unless zoomed.
    pub fn show_all(&mut self) {
        self.animator
            .begin_restore(&mut self.registry, self.duration, self.easing);
    }

    /// Advance in-flight animations by `dt`. Restore completion triggers
    /// one rearrangement pass so the grid ends internally consistent.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(batch) = &mut self.rearrange_batch {
            let result = batch.tick(dt);
            for (id, rect) in result.updates {
                if let Some(panel) = self.registry.get_mut(id) {
                    panel.current_geometry = rect;
                }
            }
            if result.finished {
                self.rearrange_batch = None;
            }
        }

        if let Some(ZoomEvent::RestoreFinished) = self.animator.tick(&mut self.registry, dt) {
            self.rearrange_widgets();
        }
    }

    /// Update the container rectangle. Takes effect on the next
    /// insertion or rearrangement pass.
    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
    }

    pub fn is_zoomed(&self) -> bool {
        self.animator.is_zoomed()
    }

    pub fn zoomed_widget(&self) -> Option<PanelId> {
        self.animator.zoomed_widget()
    }

    pub fn set_animation_duration(&mut self, ms: u64) {
        self.duration = Duration::from_millis(ms);
    }

    pub fn animation_duration(&self) -> u64 {
        self.duration.as_millis() as u64
    }

    pub fn set_easing_curve(&mut self, easing: EasingCurve) {
        self.easing = easing;
    }

    pub fn easing_curve(&self) -> EasingCurve {
        self.easing
    }

    pub fn column_count(&self) -> i32 {
        self.column_count
    }

    /// Rows in use by the cursor (partial rows count)
    pub fn row_count(&self) -> i32 {
        self.cursor_row + if self.cursor_col > 0 { 1 } else { 0 }
    }

    pub fn contains(&self, id: PanelId) -> bool {
        self.registry.contains(id)
    }

    pub fn widget_position(&self, id: PanelId) -> Option<CellAssignment> {
        self.registry.get(id).map(|panel| panel.cell)
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.registry.get(id)
    }

    /// Panel ids in insertion order
    pub fn panels(&self) -> Vec<PanelId> {
        self.registry.ids()
    }

    pub fn panel_count(&self) -> usize {
        self.registry.len()
    }

    fn content_rect(&self) -> Rect {
        self.container.inset(
            self.margins.left,
            self.margins.top,
            self.margins.right,
            self.margins.bottom,
        )
    }

    fn update_column_count(&mut self) {
        self.column_count = ((self.container.width / self.cell_width_threshold).floor() as i32).max(1);
    }

    /// Reset the cursor and walk the registry in insertion order,
    /// assigning cells and recording each panel's grid-correct rect as
    /// its new original geometry.
    fn assign_cells(&mut self) -> Vec<(PanelId, Rect)> {
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.update_column_count();

        let count = self.registry.len() as i32;
        let rows = if count == 0 {
            0
        } else {
            (count + self.column_count - 1) / self.column_count
        };

        let content = self.content_rect();
        let mut targets = Vec::with_capacity(self.registry.len());
        for id in self.registry.ids() {
            let cell = CellAssignment::new(self.cursor_row, self.cursor_col, 1, 1);
            let target = cell_rect(content, cell, self.column_count, rows, self.spacing);
            if let Some(panel) = self.registry.get_mut(id) {
                panel.cell = cell;
                panel.original_geometry = target;
            }
            targets.push((id, target));

            self.cursor_col += 1;
            if self.cursor_col >= self.column_count {
                self.cursor_col = 0;
                self.cursor_row += 1;
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: f32) -> AutoGridLayout {
        let mut config = LayoutConfig::default();
        config.margins = Margins::uniform(0.0);
        config.spacing = 0.0;
        AutoGridLayout::with_config(Rect::new(0.0, 0.0, width, 300.0), &config)
    }

    fn settle(layout: &mut AutoGridLayout) {
        for _ in 0..40 {
            layout.tick(Duration::from_millis(16));
        }
    }

    #[test]
    fn four_panels_at_width_450_wrap_after_three() {
        let mut layout = layout(450.0);
        let ids = layout.add_widget_list(vec![SizePolicy::default(); 4]);
        assert_eq!(layout.column_count(), 3);
        assert_eq!(
            layout.widget_position(ids[3]),
            Some(CellAssignment::new(1, 0, 1, 1))
        );
        assert_eq!(layout.row_count(), 2);
    }

    #[test]
    fn placement_is_row_major_deterministic() {
        let mut layout = layout(600.0);
        let ids = layout.add_widget_list(vec![SizePolicy::default(); 9]);
        let cols = layout.column_count();
        assert_eq!(cols, 4);
        for (i, id) in ids.iter().enumerate() {
            let cell = layout.widget_position(*id).unwrap();
            assert_eq!(cell.row, i as i32 / cols);
            assert_eq!(cell.col, i as i32 % cols);
        }
    }

    #[test]
    fn zero_width_clamps_to_one_column() {
        let mut layout = layout(0.0);
        layout.add_widget(SizePolicy::default());
        assert_eq!(layout.column_count(), 1);
        let mut layout = layout_for_negative();
        layout.add_widget(SizePolicy::default());
        assert_eq!(layout.column_count(), 1);
    }

    fn layout_for_negative() -> AutoGridLayout {
        AutoGridLayout::new(Rect::new(0.0, 0.0, -100.0, 300.0))
    }

    #[test]
    fn rearrange_is_idempotent() {
        let mut layout = layout(450.0);
        let ids = layout.add_widget_list(vec![SizePolicy::default(); 5]);
        layout.rearrange_widgets();
        settle(&mut layout);
        let first: Vec<_> = ids
            .iter()
            .map(|id| layout.widget_position(*id).unwrap())
            .collect();
        layout.rearrange_widgets();
        settle(&mut layout);
        let second: Vec<_> = ids
            .iter()
            .map(|id| layout.widget_position(*id).unwrap())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn removal_leaves_gap_until_rearrange() {
        let mut layout = layout(450.0);
        let ids = layout.add_widget_list(vec![SizePolicy::default(); 4]);
        let before = layout.widget_position(ids[3]).unwrap();
        layout.remove_widget(ids[1]);
        // No automatic reflow
        assert_eq!(layout.widget_position(ids[3]), Some(before));

        layout.rearrange_widgets();
        settle(&mut layout);
        assert_eq!(
            layout.widget_position(ids[3]),
            Some(CellAssignment::new(0, 2, 1, 1))
        );
    }

    #[test]
    fn rearrange_animates_to_grid_rects() {
        let mut layout = layout(450.0);
        let ids = layout.add_widget_list(vec![SizePolicy::default(); 3]);
        // Perturb a current geometry, then rearrange back
        if let Some(panel) = layout.registry.get_mut(ids[0]) {
            panel.current_geometry = Rect::new(999.0, 999.0, 10.0, 10.0);
        }
        layout.rearrange_widgets();
        settle(&mut layout);
        let panel = layout.panel(ids[0]).unwrap();
        assert!(panel.current_geometry.approx_eq(&panel.original_geometry, 1e-3));
    }

    #[test]
    fn zoom_exclusivity() {
        let mut layout = layout(450.0);
        let ids = layout.add_widget_list(vec![SizePolicy::default(); 3]);
        layout.zoom_to(ids[0]);
        settle(&mut layout);
        assert_eq!(layout.zoomed_widget(), Some(ids[0]));

        // Second zoom while zoomed is a no-op
        layout.zoom_to(ids[1]);
        settle(&mut layout);
        assert_eq!(layout.zoomed_widget(), Some(ids[0]));
    }

    #[test]
    fn zoom_then_show_all_round_trips_geometry() {
        let mut layout = layout(450.0);
        let ids = layout.add_widget_list(vec![SizePolicy::default(); 4]);
        layout.rearrange_widgets();
        settle(&mut layout);
        let originals: Vec<_> = ids
            .iter()
            .map(|id| layout.panel(*id).unwrap().current_geometry)
            .collect();

        layout.zoom_to(ids[2]);
        settle(&mut layout);
        assert!(layout.is_zoomed());
        assert!(!layout.panel(ids[0]).unwrap().visible);

        layout.show_all();
        settle(&mut layout);
        assert!(!layout.is_zoomed());
        for (id, original) in ids.iter().zip(originals.iter()) {
            let panel = layout.panel(*id).unwrap();
            assert!(panel.visible);
            assert!(panel.current_geometry.approx_eq(original, 1e-3));
        }
    }

    #[test]
    fn panel_added_while_zoomed_starts_hidden() {
        let mut layout = layout(450.0);
        let ids = layout.add_widget_list(vec![SizePolicy::default(); 2]);
        layout.zoom_to(ids[0]);
        settle(&mut layout);

        let late = layout.add_widget(SizePolicy::default());
        assert!(!layout.panel(late).unwrap().visible);

        layout.show_all();
        settle(&mut layout);
        assert!(layout.panel(late).unwrap().visible);
    }

    #[test]
    fn zoom_unknown_panel_is_noop() {
        let mut layout = layout(450.0);
        layout.add_widget(SizePolicy::default());
        layout.zoom_to(PanelId(999));
        assert!(!layout.is_zoomed());
    }

    #[test]
    fn remove_all_resets_state() {
        let mut layout = layout(450.0);
        let ids = layout.add_widget_list(vec![SizePolicy::default(); 3]);
        layout.zoom_to(ids[0]);
        settle(&mut layout);
        layout.remove_all();
        assert_eq!(layout.panel_count(), 0);
        assert!(!layout.is_zoomed());
        assert_eq!(layout.row_count(), 0);
    }
}
