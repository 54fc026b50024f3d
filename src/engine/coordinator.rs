use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::types::PoolConfig;
use crate::error::RepoFetchError;
use crate::types::PullRequestRecord;

use super::interface::{PullRequestSource, RepoResult, RepositoryResultSet};

/// Fans out one fetch per repository over a bounded worker pool.
///
/// Workers only report outcomes; this routine is the sole writer of the
/// returned result set.
#[derive(Debug, Clone)]
pub struct FetchCoordinator {
    workers: usize,
    fetch_timeout: Duration,
}

impl FetchCoordinator {
    /// `workers` is clamped to at least one.
    pub fn new(workers: usize, fetch_timeout: Duration) -> Self {
        Self {
            workers: workers.max(1),
            fetch_timeout,
        }
    }

    pub fn from_config(pool: &PoolConfig) -> Self {
        Self::new(pool.workers, Duration::from_secs(pool.fetch_timeout_secs))
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Fetch every repository in `repo_ids` and collect the outcomes.
    ///
    /// Returns once every dispatched task has reported. Each distinct
    /// repository gets exactly one entry, failed ones included; duplicates
    /// in `repo_ids` are fetched once. Entries appear in completion order.
    pub async fn aggregate<S: PullRequestSource>(
        &self,
        source: Arc<S>,
        repo_ids: &[String],
    ) -> RepositoryResultSet {
        let mut seen = HashSet::with_capacity(repo_ids.len());
        let mut repos: Vec<&String> = Vec::with_capacity(repo_ids.len());
        for repo_id in repo_ids {
            if seen.insert(repo_id.as_str()) {
                repos.push(repo_id);
            }
        }

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        for repo_id in &repos {
            let repo_id = (*repo_id).clone();
            let source = Arc::clone(&source);
            let semaphore = Arc::clone(&semaphore);
            let limit = self.fetch_timeout;
            tasks.spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        tracing::debug!(repo = %repo_id, "fetch: dispatched");
                        fetch_one(source.as_ref(), &repo_id, limit).await
                    }
                    Err(_) => Err(RepoFetchError::Task("worker pool closed".to_owned())),
                };
                (repo_id, outcome)
            });
        }

        let mut results = RepositoryResultSet::with_capacity(repos.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((repo_id, Ok(records))) => {
                    tracing::debug!(repo = %repo_id, count = records.len(), "fetch: recorded");
                    results.record(repo_id, RepoResult::Fetched(records));
                }
                Ok((repo_id, Err(e))) => {
                    if e.is_rate_limited() {
                        tracing::warn!(repo = %repo_id, "fetch rate limited: {e}");
                    } else {
                        tracing::warn!(repo = %repo_id, "fetch failed: {e}");
                    }
                    results.record(repo_id, RepoResult::Failed(e));
                }
                Err(e) => {
                    tracing::error!("fetch: worker task aborted: {e}");
                }
            }
        }

        // A task that panicked never reported its repository.
        for repo_id in repos {
            if !results.contains(repo_id) {
                results.record(
                    repo_id.clone(),
                    RepoResult::Failed(RepoFetchError::Task(
                        "worker ended without reporting".to_owned(),
                    )),
                );
            }
        }

        results
    }
}

async fn fetch_one<S: PullRequestSource>(
    source: &S,
    repo_id: &str,
    limit: Duration,
) -> Result<Vec<PullRequestRecord>, RepoFetchError> {
    match tokio::time::timeout(limit, source.list_open_pull_requests(repo_id)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(RepoFetchError::Timeout(limit)),
    }
}
