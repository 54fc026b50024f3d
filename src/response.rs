use indexmap::IndexMap;
use serde::Serialize;

use crate::engine::RepositoryResultSet;
use crate::types::PullRequestRecord;

/// All records of one invocation, concatenated across repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedResponse {
    /// Records in result-set iteration order, each repository's upstream
    /// order preserved.
    pub records: Vec<PullRequestRecord>,
    /// Repositories whose fetch failed.
    pub failed: Vec<String>,
}

/// Concatenate every repository's records in result-set order.
///
/// No sorting and no de-duplication.
pub fn flatten(results: &RepositoryResultSet) -> AggregatedResponse {
    let total = results.iter().map(|(_, r)| r.records().len()).sum();
    let mut records = Vec::with_capacity(total);
    for (_, result) in results.iter() {
        records.extend_from_slice(result.records());
    }
    AggregatedResponse {
        records,
        failed: results.failed_repos().map(str::to_owned).collect(),
    }
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Invocation result in the shape the transport layer forwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response<B> {
    pub status_code: u16,
    pub body: B,
    pub headers: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataBody {
    pub data: Vec<PullRequestRecord>,
    /// Omitted when every repository was fetched.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn default_headers() -> IndexMap<String, String> {
    IndexMap::from([
        ("Content-Type".to_owned(), "text/json".to_owned()),
        ("Access-Control-Allow-Origin".to_owned(), "*".to_owned()),
    ])
}

impl AggregatedResponse {
    /// Wrap into a `200` envelope with cross-origin reads allowed.
    pub fn into_response(self) -> Response<DataBody> {
        Response {
            status_code: 200,
            body: DataBody {
                data: self.records,
                failed: self.failed,
            },
            headers: default_headers(),
        }
    }
}

impl Response<ErrorBody> {
    /// `500` envelope for a failed invocation.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: ErrorBody {
                error: message.into(),
            },
            headers: default_headers(),
        }
    }
}
