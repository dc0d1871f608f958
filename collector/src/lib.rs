pub mod api;
pub mod collect;
pub mod normalize;
pub mod rate_limit;
pub mod types;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("Vacancy API returned status {status} for '{url}': {body}")]
    RequestNotOk {
        url: String,
        status: u16,
        body: String,
    },
    #[error("Malformed response body from '{url}': {reason}")]
    MalformedBody { url: String, reason: String },
    #[error("Requests-per-second limit must be positive, got {0}")]
    InvalidRateLimit(f64),
}
