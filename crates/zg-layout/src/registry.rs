// ABOUTME: Arena of managed panel records keyed by stable handles.
// ABOUTME: Preserves insertion order; all other components reference panels by PanelId only.

use std::collections::HashMap;

use zg_core::{PanelId, Rect, SizePolicy};

use crate::CellAssignment;

/// One managed panel. The layout owns the record, not the host's widget;
/// the handle is the only thing shared across component boundaries.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Live size policy, switched to expanding while zoomed
    pub size_policy: SizePolicy,
    /// Policy captured at insertion, restored after un-zoom
    pub original_policy: SizePolicy,
    /// What the caller asked for (auto sentinel or explicit cell)
    pub requested_cell: CellAssignment,
    /// Effective assignment in the current grid
    pub cell: CellAssignment,
    /// Rectangle at the last stable layout, the restore target
    pub original_geometry: Rect,
    /// Live rectangle, mutated by animation ticks
    pub current_geometry: Rect,
    pub visible: bool,
}

/// Contiguous store of panels with stable ids and insertion order.
#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: HashMap<PanelId, Panel>,
    order: Vec<PanelId>,
    next_id: u64,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, policy: SizePolicy, requested: CellAssignment) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        self.panels.insert(
            id,
            Panel {
                size_policy: policy,
                original_policy: policy,
                requested_cell: requested,
                cell: CellAssignment::AUTO,
                original_geometry: Rect::default(),
                current_geometry: Rect::default(),
                visible: true,
            },
        );
        self.order.push(id);
        id
    }

    pub fn remove(&mut self, id: PanelId) -> Option<Panel> {
        let panel = self.panels.remove(&id)?;
        self.order.retain(|&other| other != id);
        Some(panel)
    }

    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(&id)
    }

    pub fn get_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.get_mut(&id)
    }

    pub fn contains(&self, id: PanelId) -> bool {
        self.panels.contains_key(&id)
    }

    /// Panel ids in insertion order
    pub fn ids(&self) -> Vec<PanelId> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.panels.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_assigns_unique_ids_in_order() {
        let mut registry = PanelRegistry::new();
        let a = registry.insert(SizePolicy::default(), CellAssignment::AUTO);
        let b = registry.insert(SizePolicy::default(), CellAssignment::AUTO);
        assert_ne!(a, b);
        assert_eq!(registry.ids(), vec![a, b]);
    }

    #[test]
    fn remove_preserves_order_of_rest() {
        let mut registry = PanelRegistry::new();
        let a = registry.insert(SizePolicy::default(), CellAssignment::AUTO);
        let b = registry.insert(SizePolicy::default(), CellAssignment::AUTO);
        let c = registry.insert(SizePolicy::default(), CellAssignment::AUTO);
        registry.remove(b);
        assert_eq!(registry.ids(), vec![a, c]);
        assert!(!registry.contains(b));
        assert!(registry.remove(b).is_none());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut registry = PanelRegistry::new();
        let a = registry.insert(SizePolicy::default(), CellAssignment::AUTO);
        registry.remove(a);
        let b = registry.insert(SizePolicy::default(), CellAssignment::AUTO);
        assert_ne!(a, b);
    }
}
