//! Thin client for the community points backend.
//!
//! Covers the three calls the quest engine needs: privileged point awards,
//! the durable "has this user posted in this channel" check, and recording
//! a first post. The backend is the system of record for all of these.

pub mod error;
pub mod types;

pub use error::{PointsError, Result};
pub use types::{HasPostedResponse, RecordPostRequest, SystemAwardRequest};

use std::time::Duration;

use tracing::debug;

pub struct PointsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    internal_api_key: String,
}

impl PointsClient {
    pub fn new(base_url: &str, api_key: &str, internal_api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            internal_api_key: internal_api_key.to_string(),
        }
    }

    /// Award points to a user on behalf of the system identity.
    /// Requires the internal API key.
    pub async fn system_award(
        &self,
        admin_user_id: &str,
        target_user_id: &str,
        points: u32,
        reason: &str,
    ) -> Result<()> {
        let body = SystemAwardRequest {
            admin_user_id: admin_user_id.to_string(),
            target_user_id: target_user_id.to_string(),
            points,
            reason: reason.to_string(),
        };

        debug!(target_user_id, points, "Requesting system award");

        let resp = self
            .client
            .post(format!("{}/api/points/system-award", self.base_url))
            .header("X-API-Key", &self.internal_api_key)
            .json(&body)
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }

    /// Has this user ever posted in this channel? Durable across restarts;
    /// the backend owns the answer.
    pub async fn has_posted_in_channel(&self, user_id: &str, channel_id: &str) -> Result<bool> {
        let resp = self
            .client
            .get(format!(
                "{}/api/channels/{channel_id}/posts/{user_id}",
                self.base_url
            ))
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        let resp = check_status(resp).await?;
        let parsed: HasPostedResponse = resp.json().await?;
        Ok(parsed.has_posted)
    }

    /// Record that a user has posted in a channel.
    pub async fn record_channel_post(&self, user_id: &str, channel_id: &str) -> Result<()> {
        let body = RecordPostRequest {
            user_id: user_id.to_string(),
        };

        let resp = self
            .client
            .post(format!("{}/api/channels/{channel_id}/posts", self.base_url))
            .header("X-API-Key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(PointsError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp)
}
