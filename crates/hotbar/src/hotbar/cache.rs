use std::collections::HashMap;
use std::rc::Rc;

use crate::hotbar::{SlotCoordinate, SlotView};

/// Per-frame slot cache: at most one view per coordinate, never edited in place
#[derive(Debug, Default)]
pub struct SlotCache {
    slots: HashMap<SlotCoordinate, Rc<SlotView>>,
}

impl SlotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, coord: &SlotCoordinate) -> Option<Rc<SlotView>> {
        self.slots.get(coord).cloned()
    }

    pub fn contains(&self, coord: &SlotCoordinate) -> bool {
        self.slots.contains_key(coord)
    }

    /// Insert unless an entry exists; returns whichever view is now cached
    pub fn insert_if_absent(&mut self, coord: SlotCoordinate, view: SlotView) -> Rc<SlotView> {
        Rc::clone(self.slots.entry(coord).or_insert_with(|| Rc::new(view)))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
