use serde::Deserialize;

use crate::types::{PullRequestRecord, display_timestamp, join_title_url, repo_label};

// ---------------------------------------------------------------------------
// Raw REST shapes (`GET /repos/{owner}/{repo}/pulls`)
// ---------------------------------------------------------------------------

/// One element of the `pulls` listing. Unused fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPullRequest {
    pub title: String,
    pub html_url: String,
    /// ISO-8601, e.g. `2024-05-01T10:00:00Z`.
    pub created_at: String,
    pub user: RawUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub login: String,
}

/// Normalize a raw listing entry into the dashboard record.
pub fn into_record(raw: RawPullRequest, repo_id: &str, label_suffix: &str) -> PullRequestRecord {
    PullRequestRecord {
        repo_label: repo_label(repo_id, label_suffix).to_owned(),
        title_with_url: join_title_url(&raw.title, &raw.html_url),
        created_at: display_timestamp(&raw.created_at),
        author: raw.user.login,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_listing_entry() {
        let raw: RawPullRequest = serde_json::from_value(serde_json::json!({
            "number": 7,
            "title": "Fix bug",
            "html_url": "http://x/1",
            "created_at": "2024-05-01T10:00:00Z",
            "user": { "login": "alice", "id": 1 },
            "draft": false
        }))
        .unwrap();

        let record = into_record(raw, "kafka-operator", "-operator");
        assert_eq!(record.repo_label, "kafka");
        assert_eq!(record.title_with_url, "Fix bug@@@http://x/1");
        assert_eq!(record.created_at, "2024-05-01 10:00:00 ");
        assert_eq!(record.author, "alice");
    }

    #[test]
    fn entry_without_user_is_rejected() {
        let result: Result<RawPullRequest, _> = serde_json::from_value(serde_json::json!({
            "title": "Fix bug",
            "html_url": "http://x/1",
            "created_at": "2024-05-01T10:00:00Z"
        }));
        assert!(result.is_err());
    }
}
