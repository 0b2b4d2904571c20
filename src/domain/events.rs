//! Structural edits published by a recent-files list.

use super::file_record::FileRecord;
use std::cell::RefCell;
use std::rc::Rc;

/// One structural change, expressed against the list's indices at the
/// moment it happened. Applying the events in order to an empty mirror
/// reproduces the list's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// Loaded from the store and appended at the end.
    Appended(FileRecord),
    Inserted { index: usize, record: FileRecord },
    Removed { index: usize },
    /// Everything after index 0 dropped.
    HistoryCleared,
}

pub trait ListObserver {
    fn on_event(&mut self, event: &ListEvent);
}

/// Event log; handy for asserting order.
impl ListObserver for Vec<ListEvent> {
    fn on_event(&mut self, event: &ListEvent) {
        self.push(event.clone());
    }
}

/// Lets the subscriber keep a handle to an observer the list owns.
impl<T: ListObserver> ListObserver for Rc<RefCell<T>> {
    fn on_event(&mut self, event: &ListEvent) {
        self.borrow_mut().on_event(event);
    }
}
