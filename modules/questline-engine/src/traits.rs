// Trait abstractions for the engine's external collaborators.
//
// RewardsLedger — the points backend: awards, plus the durable
//   first-contact state (has-posted / record-post).
// ChatPlatform — bot identity, channel name resolution, DMs. The real
//   chat client lives outside this repo; only mocks implement it here.
//
// These enable deterministic testing with MockLedger and MockChat:
// no network, no backend. `cargo test` in seconds.

use anyhow::Result;
use async_trait::async_trait;

// ---------------------------------------------------------------------------
// RewardsLedger
// ---------------------------------------------------------------------------

#[async_trait]
pub trait RewardsLedger: Send + Sync {
    /// Credit points to a user, attributed to the acting system identity.
    async fn award(&self, acting_id: &str, user_id: &str, points: u32, reason: &str)
        -> Result<()>;

    /// Durable check: has this user ever posted in this channel?
    /// Owned by the backend, survives process restarts.
    async fn has_posted_in_channel(&self, user_id: &str, channel_id: &str) -> Result<bool>;

    /// Record a user's first post in a channel.
    async fn record_post(&self, user_id: &str, channel_id: &str) -> Result<()>;
}

#[async_trait]
impl RewardsLedger for points_client::PointsClient {
    async fn award(
        &self,
        acting_id: &str,
        user_id: &str,
        points: u32,
        reason: &str,
    ) -> Result<()> {
        Ok(self.system_award(acting_id, user_id, points, reason).await?)
    }

    async fn has_posted_in_channel(&self, user_id: &str, channel_id: &str) -> Result<bool> {
        Ok(self.has_posted_in_channel(user_id, channel_id).await?)
    }

    async fn record_post(&self, user_id: &str, channel_id: &str) -> Result<()> {
        Ok(self.record_channel_post(user_id, channel_id).await?)
    }
}

// ---------------------------------------------------------------------------
// ChatPlatform
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// The bot's own user id, used to authorize system awards.
    /// `Ok(None)` when the platform cannot resolve it.
    async fn bot_user_id(&self) -> Result<Option<String>>;

    /// Resolve a channel name to its id. `Ok(None)` means no such channel,
    /// which callers treat as "no match", not as an error.
    async fn channel_id(&self, name: &str) -> Result<Option<String>>;

    /// Send a direct message to a user.
    async fn send_dm(&self, user_id: &str, text: &str) -> Result<()>;
}
