use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    posted: u64,
    coalesced: u64,
}

/// Single-threaded, latest-wins mailbox.
///
/// Clones share the same slot. Posting while a value is pending replaces it,
/// so a burst of UI events collapses into the most recent request.
#[derive(Debug)]
pub struct Mailbox<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Clone for Mailbox<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                value: None,
                posted: 0,
                coalesced: 0,
            })),
        }
    }
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts `value`, replacing any pending one.
    ///
    /// Returns `true` if a pending value was overwritten.
    pub fn post(&self, value: T) -> bool {
        let mut slot = self.slot.borrow_mut();
        slot.posted += 1;
        let replaced = slot.value.replace(value).is_some();
        if replaced {
            slot.coalesced += 1;
        }
        replaced
    }

    pub fn take(&self) -> Option<T> {
        self.slot.borrow_mut().value.take()
    }

    pub fn is_pending(&self) -> bool {
        self.slot.borrow().value.is_some()
    }

    pub fn posted(&self) -> u64 {
        self.slot.borrow().posted
    }

    /// Number of posts that overwrote a pending value.
    pub fn coalesced(&self) -> u64 {
        self.slot.borrow().coalesced
    }
}
