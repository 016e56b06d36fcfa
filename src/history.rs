// Undo history: one snapshot per edit category

use crate::types::FileRecord;
use std::fmt;

/// Edit categories with their own undo slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Remove,
    Add,
    CustomTemplate,
}

impl EditKind {
    pub const ALL: [EditKind; 3] = [EditKind::Remove, EditKind::Add, EditKind::CustomTemplate];

    fn slot(self) -> usize {
        match self {
            EditKind::Remove => 0,
            EditKind::Add => 1,
            EditKind::CustomTemplate => 2,
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditKind::Remove => write!(f, "text removal"),
            EditKind::Add => write!(f, "text addition"),
            EditKind::CustomTemplate => write!(f, "custom template"),
        }
    }
}

/// Last record list seen before each kind of edit.
///
/// Slots are independent: recording or undoing one kind never touches the
/// others, and a new edit of a kind replaces that kind's snapshot.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    slots: [Option<Vec<FileRecord>>; 3],
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: EditKind, snapshot: Vec<FileRecord>) {
        self.slots[kind.slot()] = Some(snapshot);
    }

    // Removes and returns the snapshot for `kind`
    pub fn take(&mut self, kind: EditKind) -> Option<Vec<FileRecord>> {
        self.slots[kind.slot()].take()
    }

    pub fn can_undo(&self, kind: EditKind) -> bool {
        self.slots[kind.slot()].is_some()
    }
}
