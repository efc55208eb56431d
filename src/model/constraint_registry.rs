use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::trace;

use crate::model::{CellId, ConstraintKind, LineConstraint};

/// Active line constraints, grouped by kind in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintRegistry {
    constraints: BTreeMap<ConstraintKind, Vec<LineConstraint>>,
}

impl ConstraintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `constraint`, returning its index within its kind.
    pub fn add(&mut self, constraint: LineConstraint) -> usize {
        let kind = constraint.kind();
        let entries = self.constraints.entry(kind).or_default();
        entries.push(constraint);
        trace!(target: "registry", "Added {} #{}", kind, entries.len() - 1);
        entries.len() - 1
    }

    pub fn get(&self, kind: ConstraintKind) -> &[LineConstraint] {
        self.constraints
            .get(&kind)
            .map(|entries| entries.as_slice())
            .unwrap_or(&[])
    }

    /// The most recently created instance of `kind`, which is the one being drawn.
    pub fn current_mut(&mut self, kind: ConstraintKind) -> Option<&mut LineConstraint> {
        self.constraints
            .get_mut(&kind)
            .and_then(|entries| entries.last_mut())
    }

    /// Extends the line being drawn for `kind`, creating the instance on first use.
    pub fn add_cell_to_current_line(&mut self, kind: ConstraintKind, cell: CellId, size: usize) -> bool {
        match self.current_mut(kind) {
            Some(constraint) => constraint.add_cell_to_line(cell, size),
            None => {
                self.add(LineConstraint::new(kind, cell));
                true
            }
        }
    }

    pub fn remove(&mut self, kind: ConstraintKind, index: usize) -> Option<LineConstraint> {
        let entries = self.constraints.get_mut(&kind)?;
        if index >= entries.len() {
            return None;
        }
        let removed = entries.remove(index);
        if entries.is_empty() {
            self.constraints.remove(&kind);
        }
        Some(removed)
    }

    /// Removes every instance of `kind` with a line through `cell`, as a click on a line does.
    pub fn remove_containing(&mut self, kind: ConstraintKind, cell: CellId) -> usize {
        let Some(entries) = self.constraints.get_mut(&kind) else {
            return 0;
        };
        let before = entries.len();
        entries.retain(|constraint| !constraint.contains_cell(cell));
        let removed = before - entries.len();
        if entries.is_empty() {
            self.constraints.remove(&kind);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.constraints.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.values().all(|entries| entries.is_empty())
    }

    pub fn len(&self) -> usize {
        self.constraints.values().map(|entries| entries.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineConstraint> {
        self.constraints.values().flatten()
    }
}

/// Registry handle for hosts that edit and solve from different threads.
/// Edits take the write lock; solves work from a [`snapshot`](Self::snapshot).
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<ConstraintRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: ConstraintRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn snapshot(&self) -> ConstraintRegistry {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut ConstraintRegistry) -> R) -> R {
        let mut registry = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut registry)
    }
}
