use std::future::Future;

use indexmap::IndexMap;

use crate::error::RepoFetchError;
use crate::types::PullRequestRecord;

/// Read-only source of open pull requests, one repository at a time.
///
/// Implemented by the real API client and by `StubSource`. Implementations
/// carry their own credential; the coordinator shares one instance across
/// all workers.
pub trait PullRequestSource: Send + Sync + 'static {
    fn list_open_pull_requests(
        &self,
        repo_id: &str,
    ) -> impl Future<Output = Result<Vec<PullRequestRecord>, RepoFetchError>> + Send;
}

/// Outcome of one repository fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoResult {
    /// Open PRs in upstream order. May be empty.
    Fetched(Vec<PullRequestRecord>),
    /// The fetch failed; the repository contributes no records.
    Failed(RepoFetchError),
}

impl RepoResult {
    pub fn records(&self) -> &[PullRequestRecord] {
        match self {
            Self::Fetched(records) => records,
            Self::Failed(_) => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn error(&self) -> Option<&RepoFetchError> {
        match self {
            Self::Fetched(_) => None,
            Self::Failed(e) => Some(e),
        }
    }
}

/// Per-repository results, iterated in the order entries were recorded.
///
/// Owned by a single caller; the coordinator is its only writer.
#[derive(Debug, Clone, Default)]
pub struct RepositoryResultSet {
    entries: IndexMap<String, RepoResult>,
}

impl RepositoryResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Record the outcome for `repo_id`.
    ///
    /// The first outcome wins: returns `false` and leaves the entry untouched
    /// if `repo_id` was already recorded.
    pub fn record(&mut self, repo_id: impl Into<String>, result: RepoResult) -> bool {
        match self.entries.entry(repo_id.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(result);
                true
            }
        }
    }

    pub fn get(&self, repo_id: &str) -> Option<&RepoResult> {
        self.entries.get(repo_id)
    }

    pub fn contains(&self, repo_id: &str) -> bool {
        self.entries.contains_key(repo_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RepoResult)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Repository identifiers whose fetch failed, in recording order.
    pub fn failed_repos(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, result)| result.is_failed())
            .map(|(repo, _)| repo)
    }
}
