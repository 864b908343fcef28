//! Failure kinds for a single invocation.

/// Everything except `NotFound` is fatal for the current run: no retry,
/// propagate and exit with a diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// server document missing or not valid JSON
    #[error("server config unreadable: {0}")]
    ConfigUnreadable(String),

    /// document parsed but doesn't carry the expected inbound shape
    #[error("server config shape: {0}")]
    ConfigShape(String),

    /// external keypair binary missing, failed, or spoke gibberish
    #[error("keychain delegate: {0}")]
    KeychainDelegate(String),

    /// identity lookup transport or body failure
    #[error("identity lookup: {0}")]
    NetworkUnavailable(String),

    /// email lookup miss; a normal outcome, reported and exited clean
    #[error("client not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
