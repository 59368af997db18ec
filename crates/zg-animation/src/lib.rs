// ABOUTME: Tick-driven animation primitives for zoomgrid.
// ABOUTME: A rectangle tween plus a batch that fires one completion signal when all members finish.

mod batch;
mod tween;

pub use batch::{AnimationBatch, BatchTick};
pub use tween::RectTween;
