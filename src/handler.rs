use std::sync::Arc;

use crate::config::types::AppConfig;
use crate::engine::FetchCoordinator;
use crate::error::HandlerError;
use crate::github::auth::SecretsExtension;
use crate::github::client::GitHubClient;
use crate::response::{DataBody, Response, flatten};

/// Run one invocation: resolve the credential, fetch every configured
/// repository and assemble the response.
///
/// Only credential and client setup failures are returned as errors.
/// Per-repository failures end up in the body's `failed` list.
pub async fn handle(
    config: &AppConfig,
    secrets: &SecretsExtension,
) -> Result<Response<DataBody>, HandlerError> {
    tracing::info!("retrieving bot token from secrets extension");
    let credential = secrets.resolve_token().await?;

    let client = Arc::new(GitHubClient::new(&config.github, &credential)?);
    let coordinator = FetchCoordinator::from_config(&config.pool);
    tracing::info!(
        repos = config.github.repos.len(),
        workers = coordinator.workers(),
        "fetching open pull requests"
    );
    let results = coordinator.aggregate(client, &config.github.repos).await;

    let aggregated = flatten(&results);
    tracing::info!(
        prs = aggregated.records.len(),
        failed = aggregated.failed.len(),
        "aggregation complete"
    );
    Ok(aggregated.into_response())
}
