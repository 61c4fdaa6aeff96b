// Undo/Redo history
//
// Each applied intent is stored as before/after snapshots of the days it
// touched, so undo and redo are plain restores.

use chrono::NaiveDate;

use crate::models::day::Day;

/// Snapshot pair for one applied intent. `None` means the day did not exist.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardEdit {
    pub description: String,
    pub before: Vec<(NaiveDate, Option<Day>)>,
    pub after: Vec<(NaiveDate, Option<Day>)>,
}

/// Manager for undo/redo stacks
#[derive(Debug)]
pub struct UndoManager {
    /// Edits that can be undone
    undo_stack: Vec<BoardEdit>,
    /// Edits that can be redone
    redo_stack: Vec<BoardEdit>,
    /// Maximum number of edits to keep in history
    max_history: usize,
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoManager {
    pub fn new() -> Self {
        Self::with_capacity(50)
    }

    pub fn with_capacity(max_history: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_history,
        }
    }

    /// Record an edit that has just been applied
    pub fn push(&mut self, edit: BoardEdit) {
        // A new edit invalidates anything that was undone
        self.redo_stack.clear();
        self.undo_stack.push(edit);

        if self.undo_stack.len() > self.max_history {
            let excess = self.undo_stack.len() - self.max_history;
            self.undo_stack.drain(..excess);
        }
    }

    /// Move the latest edit to the redo stack and return it for restoring
    pub fn undo(&mut self) -> Option<&BoardEdit> {
        let edit = self.undo_stack.pop()?;
        self.redo_stack.push(edit);
        self.redo_stack.last()
    }

    /// Move the latest undone edit back and return it for restoring
    pub fn redo(&mut self) -> Option<&BoardEdit> {
        let edit = self.redo_stack.pop()?;
        self.undo_stack.push(edit);
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Description of the next edit to undo (for menu display)
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|edit| edit.description.as_str())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|edit| edit.description.as_str())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
