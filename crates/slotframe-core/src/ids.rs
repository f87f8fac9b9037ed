// crates/slotframe-core/src/ids.rs
use std::sync::atomic::{AtomicU64, Ordering};

pub type ElementId = u64;

/// Hands out element ids from a monotonic counter. Ids are never reused.
///
/// Trees create their own allocator; share one through an `Arc` when ids
/// must stay unique across several trees.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Starts counting at `first`. Useful when restoring ids from elsewhere.
    pub const fn starting_at(first: ElementId) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn next_id(&self) -> ElementId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// The id the next call to `next_id` would return.
    pub fn peek(&self) -> ElementId {
        self.next.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_ids_are_monotonic() {
        let ids = IdAllocator::new();
        assert_eq!(ids.next_id(), 0);
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.peek(), 2);
    }

    #[test]
    fn test_shared_allocator() {
        let ids = Arc::new(IdAllocator::starting_at(10));
        let other = Arc::clone(&ids);
        assert_eq!(ids.next_id(), 10);
        assert_eq!(other.next_id(), 11);
    }
}
