//! Id generation for new columns and tasks.

use uuid::Uuid;

use crate::core::models::Id;

/// Source of fresh ids. An id is never issued twice by the same supplier.
pub trait IdSupplier {
    fn next_id(&mut self) -> Id;

    /// Told about every id already on a board the store is seeded with, so issued ids
    /// never collide with loaded ones.
    fn observe(&mut self, _id: &Id) {}
}

/// Issues `1`, `2`, `3`, ... skipping past any numeric id it has observed.
///
/// Once the counter reaches `u64::MAX` it issues UUIDs instead.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    last: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue after `last`.
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }
}

impl IdSupplier for SequentialIds {
    fn next_id(&mut self) -> Id {
        match self.last.checked_add(1) {
            Some(next) => {
                self.last = next;
                Id::from(next)
            }
            None => UuidIds.next_id(),
        }
    }

    fn observe(&mut self, id: &Id) {
        if let Some(n) = id.as_u64() {
            self.last = self.last.max(n);
        }
    }
}

/// Random v4 UUIDs, the same scheme the app uses for persisted entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSupplier for UuidIds {
    fn next_id(&mut self) -> Id {
        Id::new(Uuid::new_v4().to_string())
    }
}
