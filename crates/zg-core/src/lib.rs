// ABOUTME: Shared types and configuration for zoomgrid.
// ABOUTME: Defines geometry primitives, easing curves, panel handles, and config file handling.

pub mod config;
pub mod easing;
pub mod geometry;
pub mod policy;

pub use config::{LayoutConfig, Margins};
pub use easing::EasingCurve;
pub use geometry::{Rect, Vec2};
pub use policy::{PanelId, Policy, SizePolicy};
