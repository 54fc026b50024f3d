// engine module: concurrent per-repository fetch and accumulation

pub mod coordinator;
mod interface;
pub mod stub;

pub use coordinator::FetchCoordinator;
pub use interface::{PullRequestSource, RepoResult, RepositoryResultSet};
pub use stub::{StubResponse, StubSource};
