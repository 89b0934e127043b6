//! Highlight controller: a single slot-of-interest.
//!
//! At most one slot is active at a time; the latest `set` wins. There is no
//! queue and no ordering beyond call order.

use serde::{Deserialize, Serialize};

/// Emissive colour of an idle slot marker.
pub const SLOT_IDLE_EMISSIVE: u32 = 0x112233;
/// Emissive colour of the highlighted slot marker.
pub const SLOT_ACTIVE_EMISSIVE: u32 = 0x00ffcc;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightController {
    current: Option<String>,
}

impl HighlightController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the highlighted slot. Returns the previously highlighted slot.
    pub fn set(&mut self, id: &str) -> Option<String> {
        self.current.replace(id.to_string())
    }

    /// Drop the highlight entirely. Returns the slot that was highlighted.
    pub fn clear(&mut self) -> Option<String> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is(&self, id: &str) -> bool {
        self.current.as_deref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_set_wins() {
        let mut h = HighlightController::new();
        assert_eq!(h.set("WH_1-A-1-0"), None);
        assert_eq!(h.set("WH_2-B-1-1").as_deref(), Some("WH_1-A-1-0"));
        assert!(h.is("WH_2-B-1-1"));
        assert!(!h.is("WH_1-A-1-0"));
        // idempotent
        h.set("WH_2-B-1-1");
        assert_eq!(h.current(), Some("WH_2-B-1-1"));
        assert_eq!(h.clear().as_deref(), Some("WH_2-B-1-1"));
        assert_eq!(h.current(), None);
    }
}
