use std::collections::HashSet;

use super::messages::LsaKey;

/// Duplicate suppression for flooded LSAs.
///
/// The seen set only grows; a key is accepted at most once for the life of
/// the router.
#[derive(Debug, Clone, Default)]
pub struct FloodController {
    seen: HashSet<LsaKey>,
}

impl FloodController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time `key` is offered, `false` ever after.
    pub fn should_process(&mut self, key: LsaKey) -> bool {
        self.seen.insert(key)
    }

    pub fn has_seen(&self, key: &LsaKey) -> bool {
        self.seen.contains(key)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
