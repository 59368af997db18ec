// ABOUTME: Panel identity and size policy types.
// ABOUTME: Handles are stable u64 newtypes; policies are stored and restored verbatim around zoom.

use serde::{Deserialize, Serialize};

/// Stable handle for a managed panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub u64);

/// How a panel wants to grow or shrink along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Never resized from its hint
    Fixed,
    /// Resizable, prefers its hint
    #[default]
    Preferred,
    /// Takes as much space as available
    Expanding,
}

/// Per-axis size policy, treated as opaque by the layout: captured on
/// insertion and restored after a zoom cycle ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SizePolicy {
    pub horizontal: Policy,
    pub vertical: Policy,
}

impl SizePolicy {
    pub const fn new(horizontal: Policy, vertical: Policy) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Policy a zoomed panel is switched to so it fills the container
    pub const fn expanding() -> Self {
        Self::new(Policy::Expanding, Policy::Expanding)
    }
}
