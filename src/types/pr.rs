use serde::{Deserialize, Serialize};

/// Separator placed between a PR title and its URL in `title_with_url`.
///
/// Dashboard consumers split on this literal, so it is part of the wire
/// contract.
pub const TITLE_URL_DELIMITER: &str = "@@@";

// ---------------------------------------------------------------------------
// Normalized PR record
// ---------------------------------------------------------------------------

/// One open pull request in the shape the dashboard consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    /// Repository identifier with the label suffix stripped.
    #[serde(rename = "repo")]
    pub repo_label: String,
    /// `{title}@@@{html_url}`.
    #[serde(rename = "title")]
    pub title_with_url: String,
    /// `created_at` with `T` and `Z` replaced by spaces (trailing space kept).
    #[serde(rename = "created")]
    pub created_at: String,
    /// Login of the PR author.
    #[serde(rename = "user")]
    pub author: String,
}

impl PullRequestRecord {
    /// Split `title_with_url` back into `(title, url)`.
    ///
    /// Splits on the last delimiter occurrence, so a URL never absorbs part
    /// of the title. Returns `None` when the delimiter is missing.
    pub fn title_and_url(&self) -> Option<(&str, &str)> {
        self.title_with_url.rsplit_once(TITLE_URL_DELIMITER)
    }
}

// ---------------------------------------------------------------------------
// Field transforms
// ---------------------------------------------------------------------------

/// Strip `suffix` from the end of `repo_id` when present.
///
/// `"kafka-operator"` → `"kafka"`, `"kafka-bundle"` stays unchanged.
pub fn repo_label<'a>(repo_id: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return repo_id;
    }
    repo_id.strip_suffix(suffix).unwrap_or(repo_id)
}

/// Join a title and URL with [`TITLE_URL_DELIMITER`].
pub fn join_title_url(title: &str, url: &str) -> String {
    let mut out = String::with_capacity(title.len() + TITLE_URL_DELIMITER.len() + url.len());
    out.push_str(title);
    out.push_str(TITLE_URL_DELIMITER);
    out.push_str(url);
    out
}

/// Rewrite an ISO-8601 timestamp into the dashboard's display form.
///
/// Every `T` and every `Z` becomes a single space. The result is not
/// trimmed: `"2024-05-01T10:00:00Z"` → `"2024-05-01 10:00:00 "`.
pub fn display_timestamp(iso: &str) -> String {
    iso.replace('T', " ").replace('Z', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_keeps_trailing_space() {
        assert_eq!(
            display_timestamp("2024-05-01T10:00:00Z"),
            "2024-05-01 10:00:00 "
        );
    }

    #[test]
    fn timestamp_without_markers_is_unchanged() {
        assert_eq!(
            display_timestamp("2024-05-01 10:00:00+02:00"),
            "2024-05-01 10:00:00+02:00"
        );
    }

    #[test]
    fn label_strips_operator_suffix() {
        assert_eq!(repo_label("kafka-operator", "-operator"), "kafka");
        assert_eq!(repo_label("kafka-k8s-operator", "-operator"), "kafka-k8s");
    }

    #[test]
    fn label_keeps_other_repos() {
        assert_eq!(repo_label("kafka-bundle", "-operator"), "kafka-bundle");
        assert_eq!(repo_label("charmed-kafka-snap", "-operator"), "charmed-kafka-snap");
    }

    #[test]
    fn label_only_strips_at_end() {
        assert_eq!(
            repo_label("kafka-operator-tests", "-operator"),
            "kafka-operator-tests"
        );
    }

    #[test]
    fn label_with_empty_suffix() {
        assert_eq!(repo_label("kafka-operator", ""), "kafka-operator");
    }

    #[test]
    fn title_url_splits_back() {
        let record = PullRequestRecord {
            repo_label: "kafka".to_owned(),
            title_with_url: join_title_url("Fix bug", "http://x/1"),
            created_at: String::new(),
            author: "alice".to_owned(),
        };
        assert_eq!(record.title_with_url, "Fix bug@@@http://x/1");
        assert_eq!(record.title_and_url(), Some(("Fix bug", "http://x/1")));
    }

    #[test]
    fn title_url_missing_delimiter() {
        let record = PullRequestRecord {
            repo_label: "kafka".to_owned(),
            title_with_url: "no delimiter".to_owned(),
            created_at: String::new(),
            author: "alice".to_owned(),
        };
        assert_eq!(record.title_and_url(), None);
    }

    #[test]
    fn serializes_with_dashboard_keys() {
        let record = PullRequestRecord {
            repo_label: "kafka".to_owned(),
            title_with_url: "Fix bug@@@http://x/1".to_owned(),
            created_at: "2024-05-01 10:00:00 ".to_owned(),
            author: "alice".to_owned(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "repo": "kafka",
                "title": "Fix bug@@@http://x/1",
                "created": "2024-05-01 10:00:00 ",
                "user": "alice",
            })
        );
    }
}
