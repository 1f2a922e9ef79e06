use thiserror::Error;

pub type Result<T> = std::result::Result<T, PointsError>;

#[derive(Debug, Error)]
pub enum PointsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for PointsError {
    fn from(err: reqwest::Error) -> Self {
        PointsError::Network(err.to_string())
    }
}
