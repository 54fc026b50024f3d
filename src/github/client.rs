use std::sync::Arc;

use http::Uri;
use http::header::ACCEPT;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use serde::Deserialize;

use crate::config::types::GitHubConfig;
use crate::engine::PullRequestSource;
use crate::error::{HandlerError, RepoFetchError};
use crate::github::auth::Credential;
use crate::github::types::{RawPullRequest, into_record};
use crate::types::PullRequestRecord;

/// Read-only client for the open-PR listing of repositories under one owner.
///
/// Built once per invocation with the resolved credential, then shared by
/// every worker. Each listing is exactly one request: octocrab's retry layer
/// is disabled.
pub struct GitHubClient {
    octocrab: Arc<Octocrab>,
    owner: String,
    label_suffix: String,
}

impl GitHubClient {
    /// Build a client authenticated with `credential`.
    ///
    /// octocrab already sends `X-GitHub-Api-Version: 2022-11-28` on every
    /// request, so only `Accept` is added here.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &GitHubConfig, credential: &Credential) -> Result<Self, HandlerError> {
        // rustls needs a process-wide CryptoProvider before octocrab builds
        // its connector. An already-installed provider is fine.
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        let base_uri: Uri = config.api_base.parse().map_err(|e| {
            HandlerError::Client(format!("invalid api_base {:?}: {e}", config.api_base))
        })?;

        let octocrab = Octocrab::builder()
            .base_uri(base_uri)
            .map_err(|e| HandlerError::Client(format!("setting base URI: {e}")))?
            .personal_token(credential.expose().to_owned())
            .add_header(ACCEPT, config.accept.clone())
            .add_retry_config(RetryConfig::None)
            .build()
            .map_err(|e| HandlerError::Client(e.to_string()))?;

        Ok(Self {
            octocrab: Arc::new(octocrab),
            owner: config.owner.clone(),
            label_suffix: config.label_suffix.clone(),
        })
    }

    /// `GET /repos/{owner}/{repo}/pulls?state=open`, normalized.
    ///
    /// The status is checked before the body is parsed, so a non-2xx reply
    /// is always `Status` whatever its body looks like.
    pub async fn list_open_pull_requests(
        &self,
        repo_id: &str,
    ) -> Result<Vec<PullRequestRecord>, RepoFetchError> {
        let route = format!("/repos/{}/{repo_id}/pulls?state=open", self.owner);
        let uri = Uri::builder()
            .path_and_query(route)
            .build()
            .map_err(|e| RepoFetchError::Transport(format!("building URI for {repo_id}: {e}")))?;

        let response = self.octocrab._get(uri).await?;
        let status = response.status();
        let body = self.octocrab.body_to_string(response).await?;

        if !status.is_success() {
            return Err(RepoFetchError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let raw: Vec<RawPullRequest> =
            serde_json::from_str(&body).map_err(|e| RepoFetchError::Malformed(e.to_string()))?;

        Ok(raw
            .into_iter()
            .map(|pr| into_record(pr, repo_id, &self.label_suffix))
            .collect())
    }
}

impl PullRequestSource for GitHubClient {
    async fn list_open_pull_requests(
        &self,
        repo_id: &str,
    ) -> Result<Vec<PullRequestRecord>, RepoFetchError> {
        GitHubClient::list_open_pull_requests(self, repo_id).await
    }
}

/// GitHub's JSON error shape; only `message` is used.
#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Pull `message` out of a GitHub error body, or fall back to the raw text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => body.trim().to_owned(),
    }
}
