use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::RepoFetchError;
use crate::types::PullRequestRecord;

use super::interface::PullRequestSource;

/// Canned reply for one repository.
#[derive(Debug, Clone)]
pub enum StubResponse {
    Records(Vec<PullRequestRecord>),
    Fail(RepoFetchError),
    /// Panic inside the worker, to exercise task-failure handling.
    Panic,
}

/// A source that serves pre-loaded fixture data without any network calls.
///
/// Repositories without a configured response have no open PRs. Tracks how
/// many fetches ran at once so tests can check the pool bound.
#[derive(Debug, Default)]
pub struct StubSource {
    responses: HashMap<String, StubResponse>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, repo_id: &str, response: StubResponse) -> Self {
        self.responses.insert(repo_id.to_owned(), response);
        self
    }

    pub fn with_delay(mut self, repo_id: &str, delay: Duration) -> Self {
        self.delays.insert(repo_id.to_owned(), delay);
        self
    }

    /// Total fetches served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of fetches observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Fixture record with a fixed timestamp and author.
    pub fn record(label: &str, title: &str) -> PullRequestRecord {
        PullRequestRecord {
            repo_label: label.to_owned(),
            title_with_url: format!("{title}@@@https://github.com/canonical/{label}/pull/1"),
            created_at: "2024-05-01 10:00:00 ".to_owned(),
            author: "octocat".to_owned(),
        }
    }
}

impl PullRequestSource for StubSource {
    async fn list_open_pull_requests(
        &self,
        repo_id: &str,
    ) -> Result<Vec<PullRequestRecord>, RepoFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let _guard = InFlightGuard(&self.in_flight);
        if let Some(delay) = self.delays.get(repo_id) {
            tokio::time::sleep(*delay).await;
        }

        match self.responses.get(repo_id) {
            None => Ok(Vec::new()),
            Some(StubResponse::Records(records)) => Ok(records.clone()),
            Some(StubResponse::Fail(e)) => Err(e.clone()),
            Some(StubResponse::Panic) => panic!("stub configured to panic for {repo_id}"),
        }
    }
}

/// Decrements the in-flight counter on drop, including on timeout or panic.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
