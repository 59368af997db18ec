// ABOUTME: Occupancy-aware grid layout with explicit-or-auto cell placement.
// ABOUTME: Rejects colliding explicit placements and repopulates from scratch on container resize.

use std::time::Duration;

use zg_core::{EasingCurve, LayoutConfig, Margins, PanelId, Rect, SizePolicy};

use crate::cell::{cell_rect, CellAssignment};
use crate::occupancy::OccupancyGrid;
use crate::registry::{Panel, PanelRegistry};
use crate::zoom::{FocusAnimator, ZoomEvent};

/// Grid layout where each panel carries an explicit cell assignment or
/// the auto sentinel. Auto panels first-fit into the occupancy grid;
/// explicit collisions are rejected outright. A container resize rebuilds
/// every assignment from a blank occupancy grid in a single pass.
pub struct FlowGridLayout {
    registry: PanelRegistry,
    animator: FocusAnimator,
    occupancy: OccupancyGrid,
    container: Rect,
    margins: Margins,
    spacing: f32,
    cell_width_threshold: f32,
    fixed_columns: Option<i32>,
    duration: Duration,
    easing: EasingCurve,
    column_count: i32,
    /// Container rect at the last repopulate; unchanged rect skips the pass
    populated_rect: Option<Rect>,
}

impl FlowGridLayout {
    pub fn new(container: Rect) -> Self {
        Self::with_config(container, &LayoutConfig::default())
    }

    pub fn with_config(container: Rect, config: &LayoutConfig) -> Self {
        let mut layout = Self {
            registry: PanelRegistry::new(),
            animator: FocusAnimator::new(),
            occupancy: OccupancyGrid::new(),
            container,
            margins: config.margins,
            spacing: config.spacing,
            cell_width_threshold: config.cell_width_threshold,
            fixed_columns: None,
            duration: Duration::from_millis(config.animation_duration_ms),
            easing: config.easing,
            column_count: 1,
            populated_rect: None,
        };
        layout.update_column_count();
        layout
    }

    /// Pin the column count instead of deriving it from container width.
    pub fn set_fixed_columns(&mut self, columns: Option<i32>) {
        self.fixed_columns = columns.map(|c| c.max(1));
        self.update_column_count();
    }

    /// Place a panel at the requested cell, or auto-place on the sentinel.
    /// Returns `None` (nothing added, nothing mutated) when an explicit
    /// request collides with an existing reservation or has a non-positive
    /// span.
    pub fn add_widget(&mut self, policy: SizePolicy, requested: CellAssignment) -> Option<PanelId> {
        if requested.row_span <= 0 || requested.col_span <= 0 {
            tracing::warn!(?requested, "placement rejected: non-positive span");
            return None;
        }
        self.update_column_count();

        let effective = if requested.is_auto() {
            let (row, col) = self.occupancy.find_first_fit(
                requested.row_span,
                requested.col_span,
                self.column_count,
            );
            let cell = CellAssignment::new(
                row,
                col,
                requested.row_span,
                requested.col_span.min(self.column_count),
            );
            // First-fit always lands on free cells
            self.occupancy
                .reserve(cell.row, cell.col, cell.row_span, cell.col_span);
            cell
        } else {
            if !self.occupancy.reserve(
                requested.row,
                requested.col,
                requested.row_span,
                requested.col_span,
            ) {
                tracing::warn!(?requested, "placement rejected: cell collision");
                return None;
            }
            requested
        };

        let target = self.cell_target(effective);
        let id = self.registry.insert(policy, requested);
        let hidden_by_zoom = self.animator.is_zoomed();
        if let Some(panel) = self.registry.get_mut(id) {
            panel.cell = effective;
            panel.original_geometry = target;
            panel.current_geometry = target;
            panel.visible = !hidden_by_zoom;
        }
        tracing::debug!(?id, row = effective.row, col = effective.col, "panel placed");
        Some(id)
    }

    /// Auto-place a batch of panels in order.
    pub fn add_widget_list(
        &mut self,
        policies: impl IntoIterator<Item = SizePolicy>,
    ) -> Vec<PanelId> {
        policies
            .into_iter()
            .filter_map(|policy| self.add_widget(policy, CellAssignment::AUTO))
            .collect()
    }

    /// Remove a panel and release its cells. Remaining panels keep their
    /// assignments until the next repopulate.
    pub fn remove_widget(&mut self, id: PanelId) {
        let panel = match self.registry.remove(id) {
            Some(panel) => panel,
            None => {
                tracing::debug!(?id, "remove_widget ignored: unknown panel");
                return;
            }
        };
        let cell = panel.cell;
        if cell.is_valid() {
            self.occupancy
                .release(cell.row, cell.col, cell.row_span, cell.col_span);
        }
        self.animator.handle_removal(&mut self.registry, id);
        tracing::debug!(?id, remaining = self.registry.len(), "panel removed");
    }

    /// Drop every panel and reset placement and zoom state.
    pub fn remove_all(&mut self) {
        self.registry.clear();
        self.occupancy.clear();
        self.animator.reset();
        self.populated_rect = None;
    }

    /// Update the container rectangle, repopulating if it changed.
    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
        self.repopulate();
    }

    /// Rebuild every assignment from a blank occupancy grid in one pass:
    /// explicit panels keep their coordinates while still in bounds,
    /// everything else first-fits in insertion order. Skipped when the
    /// container rect is unchanged or a zoom transition is in flight.
    pub fn repopulate(&mut self) {
        if self.animator.is_animating() {
            tracing::debug!("repopulate dropped: zoom transition in flight");
            return;
        }
        if self.populated_rect == Some(self.container) {
            return;
        }
        self.force_repopulate();
    }

    fn force_repopulate(&mut self) {
        self.occupancy.clear();
        self.update_column_count();

        let ids = self.registry.ids();
        let mut deferred = Vec::new();

        // Pass 1: explicit assignments that still fit keep their cells
        for &id in &ids {
            let requested = match self.registry.get(id) {
                Some(panel) => panel.requested_cell,
                None => continue,
            };
            if requested.is_auto() {
                deferred.push(id);
                continue;
            }
            let in_bounds = requested.col + requested.col_span <= self.column_count;
            if in_bounds
                && self.occupancy.reserve(
                    requested.row,
                    requested.col,
                    requested.row_span,
                    requested.col_span,
                )
            {
                if let Some(panel) = self.registry.get_mut(id) {
                    panel.cell = requested;
                }
            } else {
                tracing::debug!(?id, "explicit cell out of bounds, reflowing");
                deferred.push(id);
            }
        }

        // Pass 2: auto panels and displaced explicit ones, insertion order
        for id in deferred {
            let requested = match self.registry.get(id) {
                Some(panel) => panel.requested_cell,
                None => continue,
            };
            let col_span = requested.col_span.min(self.column_count);
            let (row, col) =
                self.occupancy
                    .find_first_fit(requested.row_span, col_span, self.column_count);
            let cell = CellAssignment::new(row, col, requested.row_span, col_span);
            self.occupancy
                .reserve(cell.row, cell.col, cell.row_span, cell.col_span);
            if let Some(panel) = self.registry.get_mut(id) {
                panel.cell = cell;
            }
        }

        // Apply geometries. While zoomed only the restore targets move;
        // live geometries and visibility belong to the zoom cycle.
        let zoomed = self.animator.is_zoomed();
        for id in self.registry.ids() {
            let cell = match self.registry.get(id) {
                Some(panel) => panel.cell,
                None => continue,
            };
            let target = self.cell_target(cell);
            if let Some(panel) = self.registry.get_mut(id) {
                panel.original_geometry = target;
                if !zoomed {
                    panel.current_geometry = target;
                }
            }
            if zoomed {
                self.animator.update_saved(id, target);
            }
        }

        self.populated_rect = Some(self.container);
        tracing::debug!(
            columns = self.column_count,
            rows = self.occupancy.row_count(),
            "repopulated"
        );
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

        // Stabilize geometries before computing push directions, even if
        // the container rect is unchanged
        self.force_repopulate();

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
    /// one repopulation pass so the grid ends internally consistent.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(ZoomEvent::RestoreFinished) = self.animator.tick(&mut self.registry, dt) {
            self.force_repopulate();
        }
    }

    pub fn is_zoomed(&self) -> bool {
        self.animator.is_zoomed()
    }

    pub fn zoomed_widget(&self) -> Option<PanelId> {
        self.animator.zoomed_widget()
    }

    /// True while a zoom-in or zoom-out batch is running
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
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

    pub fn contains(&self, id: PanelId) -> bool {
        self.registry.contains(id)
    }

    /// The panel's effective cell in the current grid
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

    pub fn column_count(&self) -> i32 {
        self.column_count
    }

    pub fn row_count(&self) -> i32 {
        self.occupancy.row_count()
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
        self.column_count = match self.fixed_columns {
            Some(columns) => columns,
            None => ((self.container.width / self.cell_width_threshold).floor() as i32).max(1),
        };
    }

    fn cell_target(&self, cell: CellAssignment) -> Rect {
        let rows = self.occupancy.row_count().max(cell.row + cell.row_span);
        cell_rect(self.content_rect(), cell, self.column_count, rows, self.spacing)
    }
}
