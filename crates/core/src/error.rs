use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no video id found in url: {0}")]
    InvalidVideoUrl(String),
    #[error("invalid video id: {0}")]
    InvalidVideoId(String),
}
