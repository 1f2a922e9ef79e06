use serde::{Deserialize, Serialize};

/// Request body for the privileged system-award endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SystemAwardRequest {
    pub admin_user_id: String,
    pub target_user_id: String,
    pub points: u32,
    pub reason: String,
}

/// Response from the channel-post membership check.
#[derive(Debug, Clone, Deserialize)]
pub struct HasPostedResponse {
    pub has_posted: bool,
}

/// Request body for recording a first post in a channel.
#[derive(Debug, Clone, Serialize)]
pub struct RecordPostRequest {
    pub user_id: String,
}
