use serde::Deserialize;

/// Repositories polled by the reference deployment, in dashboard order.
pub const DEFAULT_REPOS: &[&str] = &[
    "charmed-kafka-snap",
    "charmed-kafka-rock",
    "kafka-bundle",
    "kafka-k8s-bundle",
    "kafka-rock",
    "charmed-karapace-snap",
    "charmed-karapace-rock",
    "charmed-kafka-ui-snap",
    "charmed-kafka-ui-rock",
    "kafka-operator",
    "kafka-k8s-operator",
    "karapace-operator",
    "karapace-k8s-operator",
    "kafka-connect-operator",
    "kafka-connect-k8s-operator",
    "kafka-ui-operator",
    "kafka-ui-k8s-operator",
    "zookeeper-operator",
    "zookeeper-k8s-operator",
];

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level name (`DEBUG`, `INFO`, `WARNING`, ...).
    pub log_level: String,
    pub github: GitHubConfig,
    pub pool: PoolConfig,
    pub secrets: SecretsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_owned(),
            github: GitHubConfig::default(),
            pool: PoolConfig::default(),
            secrets: SecretsConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Code-review API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub api_base: String,
    /// Organisation owning every polled repository.
    pub owner: String,
    pub accept: String,
    /// Suffix stripped from repository names to form the dashboard label.
    pub label_suffix: String,
    pub repos: Vec<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_owned(),
            owner: "canonical".to_owned(),
            accept: "application/vnd.github+json".to_owned(),
            label_suffix: "-operator".to_owned(),
            repos: DEFAULT_REPOS.iter().map(|r| (*r).to_owned()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Worker pool
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub workers: usize,
    pub fetch_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            fetch_timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// Secrets side-channel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    pub endpoint: String,
    pub secret_id: String,
    /// Environment variable holding the session token.
    pub session_token_env: String,
    pub token_header: String,
    /// Upper bound on the whole secret request, connect included.
    pub timeout_secs: u64,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:2773".to_owned(),
            secret_id: "github/bot-token".to_owned(),
            session_token_env: "AWS_SESSION_TOKEN".to_owned(),
            token_header: "X-Aws-Parameters-Secrets-Token".to_owned(),
            timeout_secs: 10,
        }
    }
}
