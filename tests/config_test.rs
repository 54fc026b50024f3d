use std::io::Write;
use std::path::Path;

use open_prs::config::loader::{load_config_from, validate};
use open_prs::config::types::{AppConfig, DEFAULT_REPOS};

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_match_reference_deployment() {
    let config = load_config_from(None, no_env).unwrap();
    assert_eq!(config.log_level, "INFO");
    assert_eq!(config.github.api_base, "https://api.github.com");
    assert_eq!(config.github.owner, "canonical");
    assert_eq!(config.github.label_suffix, "-operator");
    assert_eq!(config.github.repos.len(), 19);
    assert_eq!(config.github.repos[0], DEFAULT_REPOS[0]);
    assert_eq!(config.pool.workers, 4);
    assert_eq!(config.secrets.endpoint, "http://localhost:2773");
    assert_eq!(config.secrets.secret_id, "github/bot-token");
}

#[test]
fn parse_partial_config() {
    let toml = r#"
log_level = "DEBUG"

[github]
repos = ["kafka-operator", "kafka-bundle"]

[pool]
workers = 8
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.log_level, "DEBUG");
    assert_eq!(config.github.repos, ["kafka-operator", "kafka-bundle"]);
    assert_eq!(config.github.owner, "canonical");
    assert_eq!(config.pool.workers, 8);
    assert_eq!(config.pool.fetch_timeout_secs, 30);
}

#[test]
fn parse_unknown_keys_ignored() {
    let toml = r#"
unknown_top_level = "should be ignored"

[pool]
workers = 2
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.pool.workers, 2);
}

#[test]
fn load_from_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[github]\nowner = \"example\"\nrepos = [\"widget-operator\"]").unwrap();

    let config = load_config_from(Some(file.path()), no_env).unwrap();
    assert_eq!(config.github.owner, "example");
    assert_eq!(config.github.repos, ["widget-operator"]);
}

#[test]
fn load_from_env_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[pool]\nworkers = 3").unwrap();
    let path = file.path().to_string_lossy().into_owned();

    let config = load_config_from(None, |key| (key == "OPEN_PRS_CONFIG").then(|| path.clone()))
        .unwrap();
    assert_eq!(config.pool.workers, 3);
}

#[test]
fn log_level_env_overrides_file() {
    let config = load_config_from(None, |key| {
        (key == "LAMBDA_LOG_LEVEL").then(|| "WARNING".to_owned())
    })
    .unwrap();
    assert_eq!(config.log_level, "WARNING");
}

#[test]
fn missing_file_is_an_error() {
    let result = load_config_from(Some(Path::new("/nonexistent/open-prs.toml")), no_env);
    assert!(result.is_err());
}

#[test]
fn invalid_toml_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[pool\nworkers = ").unwrap();
    assert!(load_config_from(Some(file.path()), no_env).is_err());
}

#[test]
fn zero_workers_rejected() {
    let mut config = AppConfig::default();
    config.pool.workers = 0;
    assert!(validate(&config).is_err());
}

#[test]
fn zero_timeout_rejected() {
    let mut config = AppConfig::default();
    config.pool.fetch_timeout_secs = 0;
    assert!(validate(&config).is_err());
}

#[test]
fn zero_secrets_timeout_rejected() {
    let mut config = AppConfig::default();
    config.secrets.timeout_secs = 0;
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("secrets.timeout_secs"));
}

#[test]
fn duplicate_repos_rejected() {
    let mut config = AppConfig::default();
    config.github.repos = vec!["kafka-rock".into(), "kafka-rock".into()];
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("kafka-rock"));
}

#[test]
fn empty_repo_list_is_valid() {
    let mut config = AppConfig::default();
    config.github.repos.clear();
    assert!(validate(&config).is_ok());
}
