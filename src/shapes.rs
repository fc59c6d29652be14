//! Visual handles for tokens
//!
//! The simulation never looks inside a shape; it only needs to pick one at
//! random on spawn and to know when none are usable yet.

use serde::{Deserialize, Serialize};

/// Opaque handle to a drawable shape, resolved by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u32);

/// Anything that can hand the simulation a set of drawable shapes
pub trait ShapeSource {
    /// Shapes that can be assigned to new tokens (empty = spawning disabled)
    fn usable_shapes(&self) -> &[ShapeId];
}

impl ShapeSource for [ShapeId] {
    fn usable_shapes(&self) -> &[ShapeId] {
        self
    }
}

impl ShapeSource for Vec<ShapeId> {
    fn usable_shapes(&self) -> &[ShapeId] {
        self
    }
}

/// Loading progress of a [`ShapeSet`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    /// Some slots have not reported yet
    Loading { done: usize, total: usize },
    /// Every slot reported and none loaded
    Failed { failed: Vec<String> },
    /// Every slot reported and at least one loaded
    Ready { usable: usize },
}

/// A fixed number of shape slots filled in as an asset loader reports back
#[derive(Debug, Clone, Default)]
pub struct ShapeSet {
    total: usize,
    slots: Vec<Option<ShapeId>>,
    failed: Vec<String>,
    /// Loaded handles, populated only once every slot has reported
    usable: Vec<ShapeId>,
}

impl ShapeSet {
    /// Expect `total` shapes to be reported
    pub fn new(total: usize) -> Self {
        Self {
            total,
            slots: vec![None; total],
            failed: Vec::new(),
            usable: Vec::new(),
        }
    }

    /// A set whose handles are all already available
    pub fn ready(shapes: impl IntoIterator<Item = ShapeId>) -> Self {
        let slots: Vec<_> = shapes.into_iter().map(Some).collect();
        let mut set = Self {
            total: slots.len(),
            usable: Vec::new(),
            failed: Vec::new(),
            slots,
        };
        set.refresh();
        set
    }

    /// Record a successfully loaded shape for `slot`
    pub fn record_loaded(&mut self, slot: usize, shape: ShapeId) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = Some(shape);
            self.refresh();
        } else {
            log::warn!("Shape slot {} out of range (total {})", slot, self.total);
        }
    }

    /// Record a slot whose asset could not be loaded
    pub fn record_failed(&mut self, path: impl Into<String>) {
        let path = path.into();
        log::warn!("Shape failed to load: {}", path);
        self.failed.push(path);
        self.refresh();
    }

    fn done(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count() + self.failed.len()
    }

    fn refresh(&mut self) {
        self.usable.clear();
        if self.done() >= self.total {
            self.usable.extend(self.slots.iter().flatten().copied());
        }
    }

    pub fn status(&self) -> AssetStatus {
        let done = self.done();
        if done < self.total {
            AssetStatus::Loading { done, total: self.total }
        } else if self.usable.is_empty() {
            AssetStatus::Failed { failed: self.failed.clone() }
        } else {
            AssetStatus::Ready { usable: self.usable.len() }
        }
    }

    /// Paths that failed so far (for a loading overlay)
    pub fn failed(&self) -> &[String] {
        &self.failed
    }
}

impl ShapeSource for ShapeSet {
    fn usable_shapes(&self) -> &[ShapeId] {
        &self.usable
    }
}
