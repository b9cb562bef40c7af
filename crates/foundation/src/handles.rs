/// Generational handle: `(index, generation)`.
///
/// A slot index may be reused after it is released; the generation tells a
/// stale handle apart from the slot's current occupant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(u32, u32);

impl Handle {
    pub fn new(index: u32, generation: u32) -> Self {
        Handle(index, generation)
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    pub fn generation(&self) -> u32 {
        self.1
    }
}

/// Hands out generational handles and recycles released slots.
///
/// Ordering contract:
/// - Released slots are reused lowest index first.
#[derive(Debug, Default, Clone)]
pub struct HandleAllocator {
    generations: Vec<u32>,
    live: Vec<bool>,
    free: std::collections::BTreeSet<u32>,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Handle {
        if let Some(index) = self.free.pop_first() {
            let slot = index as usize;
            self.live[slot] = true;
            return Handle::new(index, self.generations[slot]);
        }
        let index = self.generations.len() as u32;
        self.generations.push(0);
        self.live.push(true);
        Handle::new(index, 0)
    }

    /// Releases `handle`. Returns `false` if it was already released or stale.
    pub fn release(&mut self, handle: Handle) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        let slot = handle.index() as usize;
        self.live[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free.insert(handle.index());
        true
    }

    pub fn is_live(&self, handle: Handle) -> bool {
        let slot = handle.index() as usize;
        self.live.get(slot).copied().unwrap_or(false)
            && self.generations[slot] == handle.generation()
    }

    /// Current handle of slot `index`, if that slot is occupied.
    pub fn live_handle_at(&self, index: u32) -> Option<Handle> {
        let slot = index as usize;
        if !self.live.get(slot).copied().unwrap_or(false) {
            return None;
        }
        Some(Handle::new(index, self.generations[slot]))
    }

    pub fn live_count(&self) -> usize {
        self.live.iter().filter(|l| **l).count()
    }

    /// Number of slots ever allocated (live or free).
    pub fn capacity(&self) -> usize {
        self.generations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, HandleAllocator};

    #[test]
    fn allocates_sequential_indices() {
        let mut alloc = HandleAllocator::new();
        assert_eq!(alloc.allocate(), Handle::new(0, 0));
        assert_eq!(alloc.allocate(), Handle::new(1, 0));
        assert_eq!(alloc.live_count(), 2);
    }

    #[test]
    fn released_slot_is_reused_with_new_generation() {
        let mut alloc = HandleAllocator::new();
        let a = alloc.allocate();
        let _b = alloc.allocate();
        assert!(alloc.release(a));
        assert!(!alloc.is_live(a));

        let c = alloc.allocate();
        assert_eq!(c.index(), a.index());
        assert_eq!(c.generation(), 1);
        assert!(alloc.is_live(c));
        assert!(!alloc.is_live(a));
        assert_eq!(alloc.live_handle_at(a.index()), Some(c));
    }

    #[test]
    fn double_release_is_rejected() {
        let mut alloc = HandleAllocator::new();
        let a = alloc.allocate();
        assert!(alloc.release(a));
        assert!(!alloc.release(a));
        assert_eq!(alloc.live_count(), 0);
    }
}
