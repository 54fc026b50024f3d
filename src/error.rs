use std::time::Duration;

use thiserror::Error;

/// Failure to obtain the bot credential from the secrets side-channel.
///
/// Fatal: nothing else in an invocation can run without the credential.
#[derive(Debug, Error)]
pub enum SecretRetrievalError {
    #[error("session token variable {0} is not set")]
    MissingSessionToken(String),

    #[error("secrets extension unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("secrets extension returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed secrets envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),

    #[error("malformed secret payload: {0}")]
    MalformedSecret(#[source] serde_json::Error),
}

/// Failure to list the open PRs of one repository.
///
/// Recorded against that repository only; sibling fetches keep running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoFetchError {
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response body: {0}")]
    Malformed(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("worker task failed: {0}")]
    Task(String),
}

impl RepoFetchError {
    /// Whether the failure came from an unparseable upstream body.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Whether GitHub refused the request because of a rate limit.
    ///
    /// GitHub signals this with HTTP 429, or HTTP 403 and a "rate limit"
    /// message (primary and secondary limits).
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::Status { status: 429, .. } => true,
            Self::Status {
                status: 403,
                message,
            } => message.to_lowercase().contains("rate limit"),
            _ => false,
        }
    }
}

impl From<octocrab::Error> for RepoFetchError {
    fn from(error: octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => Self::Status {
                status: source.status_code.as_u16(),
                message: source.message,
            },
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Errors that abort a whole invocation.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("retrieving bot token: {0}")]
    Secret(#[from] SecretRetrievalError),

    #[error("building API client: {0}")]
    Client(String),
}
