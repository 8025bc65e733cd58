use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PoolError>;

/// Failure modes the store pool can encounter while decoding inbound gossip.
///
/// Nothing in the public query surface returns a [`PoolError`]; it is used
/// only by the gossip decode path (logged and dropped by the caller) and by
/// a handful of constructor-time checks.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("malformed gossip payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
