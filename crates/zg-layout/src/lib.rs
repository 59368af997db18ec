// ABOUTME: Panel grid layout management with animated focus transitions.
// ABOUTME: Implements auto and flow placement plus the zoom/restore state machine.

mod auto_grid;
mod cell;
mod flow_grid;
mod occupancy;
mod registry;
mod zoom;

pub use auto_grid::AutoGridLayout;
pub use cell::{cell_rect, CellAssignment};
pub use flow_grid::FlowGridLayout;
pub use occupancy::OccupancyGrid;
pub use registry::{Panel, PanelRegistry};
pub use zoom::{FocusAnimator, ZoomEvent, ZoomPhase};

pub use zg_core::{EasingCurve, LayoutConfig, Margins, PanelId, Policy, Rect, SizePolicy, Vec2};
