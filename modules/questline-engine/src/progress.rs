//! Per-user quest progress counters.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::catalog::QuestId;

/// Result of one advance on a (user, quest) counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    StillInProgress { count: u32 },
    JustCompleted,
}

/// Keyed counter storage for ordinary quests.
///
/// `advance` is one logical unit: the read-check-write must be indivisible,
/// so two concurrent advances on the same key can never both observe
/// `target - 1` and both report completion. Completion is derived from
/// `count == target`; there is no separate completed flag, and a counter
/// at target is never incremented again.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn advance(&self, user_id: &str, quest: QuestId, target: u32) -> Result<Advance>;

    /// Current count for a key, 0 if absent. Read-only.
    async fn count(&self, user_id: &str, quest: QuestId) -> Result<u32>;
}

/// In-memory store. Counters are created lazily on first advance, live for
/// the process lifetime, and are never reset.
#[derive(Default)]
pub struct InMemoryProgress {
    counts: Mutex<HashMap<(String, QuestId), u32>>,
}

impl InMemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgress {
    async fn advance(&self, user_id: &str, quest: QuestId, target: u32) -> Result<Advance> {
        // Lock held across the whole read-check-write.
        let mut counts = self.counts.lock().expect("progress lock poisoned");
        let count = counts.entry((user_id.to_string(), quest)).or_insert(0);

        if *count >= target {
            return Ok(Advance::StillInProgress { count: *count });
        }

        *count += 1;
        if *count >= target {
            Ok(Advance::JustCompleted)
        } else {
            Ok(Advance::StillInProgress { count: *count })
        }
    }

    async fn count(&self, user_id: &str, quest: QuestId) -> Result<u32> {
        let counts = self.counts.lock().expect("progress lock poisoned");
        Ok(counts
            .get(&(user_id.to_string(), quest))
            .copied()
            .unwrap_or(0))
    }
}
