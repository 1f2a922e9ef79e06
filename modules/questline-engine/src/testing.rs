// Test mocks for the quest engine.
//
// Two mocks matching the two collaborator seams:
// - MockLedger (RewardsLedger) — records awards and posts, scriptable failures
// - MockChat (ChatPlatform) — fixed bot id + channel directory, records DMs
//
// Plus builders for ActivityEvent fixtures.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::catalog::EventKind;
use crate::event::ActivityEvent;
use crate::traits::{ChatPlatform, RewardsLedger};

// ---------------------------------------------------------------------------
// MockLedger
// ---------------------------------------------------------------------------

/// One recorded call to `award`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardCall {
    pub acting_id: String,
    pub user_id: String,
    pub points: u32,
    pub reason: String,
}

/// In-memory rewards ledger. Builder pattern: `.with_posted()`,
/// `.fail_awards()`, `.fail_checks()`.
#[derive(Default)]
pub struct MockLedger {
    posted: Mutex<HashSet<(String, String)>>,
    awards: Mutex<Vec<AwardCall>>,
    fail_awards: bool,
    fail_checks: bool,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the durable has-posted state.
    pub fn with_posted(self, user_id: &str, channel_id: &str) -> Self {
        self.posted
            .lock()
            .unwrap()
            .insert((user_id.to_string(), channel_id.to_string()));
        self
    }

    /// Every `award` call fails.
    pub fn fail_awards(mut self) -> Self {
        self.fail_awards = true;
        self
    }

    /// Every has-posted / record-post call fails.
    pub fn fail_checks(mut self) -> Self {
        self.fail_checks = true;
        self
    }

    pub fn awards(&self) -> Vec<AwardCall> {
        self.awards.lock().unwrap().clone()
    }

    pub fn recorded_posts(&self) -> Vec<(String, String)> {
        let mut posts: Vec<_> = self.posted.lock().unwrap().iter().cloned().collect();
        posts.sort();
        posts
    }
}

#[async_trait]
impl RewardsLedger for MockLedger {
    async fn award(
        &self,
        acting_id: &str,
        user_id: &str,
        points: u32,
        reason: &str,
    ) -> Result<()> {
        if self.fail_awards {
            bail!("award endpoint unavailable");
        }
        self.awards.lock().unwrap().push(AwardCall {
            acting_id: acting_id.to_string(),
            user_id: user_id.to_string(),
            points,
            reason: reason.to_string(),
        });
        Ok(())
    }

    async fn has_posted_in_channel(&self, user_id: &str, channel_id: &str) -> Result<bool> {
        if self.fail_checks {
            bail!("backend unavailable");
        }
        Ok(self
            .posted
            .lock()
            .unwrap()
            .contains(&(user_id.to_string(), channel_id.to_string())))
    }

    async fn record_post(&self, user_id: &str, channel_id: &str) -> Result<()> {
        if self.fail_checks {
            bail!("backend unavailable");
        }
        self.posted
            .lock()
            .unwrap()
            .insert((user_id.to_string(), channel_id.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockChat
// ---------------------------------------------------------------------------

/// Chat platform with a fixed bot id and a name→id channel directory.
/// Builder pattern: `.on_channel()`, `.without_bot_id()`, `.fail_dms()`.
pub struct MockChat {
    bot_id: Option<String>,
    channels: HashMap<String, String>,
    dms: Mutex<Vec<(String, String)>>,
    fail_dms: bool,
}

impl MockChat {
    pub fn new() -> Self {
        Self {
            bot_id: Some("B0T".to_string()),
            channels: HashMap::new(),
            dms: Mutex::new(Vec::new()),
            fail_dms: false,
        }
    }

    pub fn on_channel(mut self, name: &str, id: &str) -> Self {
        self.channels.insert(name.to_string(), id.to_string());
        self
    }

    /// The platform cannot resolve its own identity.
    pub fn without_bot_id(mut self) -> Self {
        self.bot_id = None;
        self
    }

    pub fn fail_dms(mut self) -> Self {
        self.fail_dms = true;
        self
    }

    /// Sent DMs as (user_id, text).
    pub fn dms(&self) -> Vec<(String, String)> {
        self.dms.lock().unwrap().clone()
    }
}

impl Default for MockChat {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatPlatform for MockChat {
    async fn bot_user_id(&self) -> Result<Option<String>> {
        Ok(self.bot_id.clone())
    }

    async fn channel_id(&self, name: &str) -> Result<Option<String>> {
        Ok(self.channels.get(name).cloned())
    }

    async fn send_dm(&self, user_id: &str, text: &str) -> Result<()> {
        if self.fail_dms {
            bail!("DM delivery failed");
        }
        self.dms
            .lock()
            .unwrap()
            .push((user_id.to_string(), text.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Event fixtures
// ---------------------------------------------------------------------------

/// A reaction_added event by `user`.
pub fn reaction_event(user: &str) -> ActivityEvent {
    ActivityEvent {
        kind: EventKind::ReactionAdded,
        user: Some(user.to_string()),
        ts: "1700000000.000100".to_string(),
        thread_ts: None,
        channel: Some("C_GENERAL".to_string()),
        is_automated: false,
        subtype: None,
    }
}

/// A human top-level message by `user` in `channel`.
pub fn message_event(user: &str, channel: &str, ts: &str) -> ActivityEvent {
    ActivityEvent {
        kind: EventKind::Message,
        user: Some(user.to_string()),
        ts: ts.to_string(),
        thread_ts: None,
        channel: Some(channel.to_string()),
        is_automated: false,
        subtype: None,
    }
}

/// A human reply inside the thread rooted at `root_ts`.
pub fn thread_reply_event(user: &str, root_ts: &str, ts: &str) -> ActivityEvent {
    ActivityEvent {
        kind: EventKind::Message,
        user: Some(user.to_string()),
        ts: ts.to_string(),
        thread_ts: Some(root_ts.to_string()),
        channel: Some("C_GENERAL".to_string()),
        is_automated: false,
        subtype: None,
    }
}
