//! Identifiers and a simple allocator for in-scene entities.

use serde::{Deserialize, Serialize};

/// Handle for one box in the scene. Opaque to hosts; dense and monotonic.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Monotonic allocator for EntityId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_entity: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity = self.next_entity.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_entity(), EntityId(0));
        assert_eq!(alloc.alloc_entity(), EntityId(1));
        alloc.reset();
        assert_eq!(alloc.alloc_entity(), EntityId(0));
    }
}
