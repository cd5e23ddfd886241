//! Errors surfaced while assembling the runtime.
//!
//! Routing itself cannot fail; these only come out of construction and
//! configuration.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("deduplication window requires a tokio runtime to schedule releases")]
    NoScheduler(#[source] tokio::runtime::TryCurrentError),

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}
