use crate::snapshot::Snapshot;

/// Linear undo history of buffer snapshots.
///
/// One entry corresponds to one completed gesture: the host calls [`tick`]
/// on pointer/touch release, never mid-stroke. `tick` always clears the
/// redo side; undo/redo on empty stacks are no-ops rather than errors so
/// UI wiring stays idempotent.
///
/// [`tick`]: UndoHistory::tick
#[derive(Debug, Clone)]
pub struct UndoHistory {
    past: Vec<Snapshot>,
    current: Snapshot,
    future: Vec<Snapshot>,
}

impl UndoHistory {
    /// Start a history at the document's initial snapshot.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            past: Vec::new(),
            current: initial,
            future: Vec::new(),
        }
    }

    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Record a completed gesture. Discards any redoable snapshots.
    pub fn tick(&mut self, snapshot: Snapshot) {
        let previous = std::mem::replace(&mut self.current, snapshot);
        self.past.push(previous);
        self.future.clear();
    }

    /// Step back one gesture, returning the snapshot to re-render, or
    /// `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let popped = self.past.pop()?;
        let displaced = std::mem::replace(&mut self.current, popped);
        self.future.push(displaced);
        Some(&self.current)
    }

    /// Step forward one gesture, the symmetric inverse of [`undo`].
    ///
    /// [`undo`]: UndoHistory::undo
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let popped = self.future.pop()?;
        let displaced = std::mem::replace(&mut self.current, popped);
        self.past.push(displaced);
        Some(&self.current)
    }
}
