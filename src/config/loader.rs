use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};

use crate::config::types::AppConfig;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "OPEN_PRS_CONFIG";

/// Environment variable overriding `log_level`.
pub const LOG_LEVEL_ENV: &str = "LAMBDA_LOG_LEVEL";

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `$OPEN_PRS_CONFIG`
/// 3. built-in defaults
///
/// `$LAMBDA_LOG_LEVEL` then overrides `log_level`, and the result is
/// validated.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    load_config_from(explicit_path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_config_from(
    explicit_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig> {
    let path = explicit_path
        .map(Path::to_path_buf)
        .or_else(|| env(CONFIG_ENV).filter(|p| !p.is_empty()).map(PathBuf::from));

    let mut config = match path {
        Some(path) => read_config_file(&path)?,
        None => AppConfig::default(),
    };

    if let Some(level) = env(LOG_LEVEL_ENV)
        && !level.is_empty()
    {
        config.log_level = level;
    }

    validate(&config)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<AppConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parsing TOML from {}", path.display()))
}

/// Reject configs the coordinator cannot run with.
pub fn validate(config: &AppConfig) -> Result<()> {
    ensure!(config.pool.workers > 0, "pool.workers must be at least 1");
    ensure!(
        config.pool.fetch_timeout_secs > 0,
        "pool.fetch_timeout_secs must be at least 1"
    );
    ensure!(
        config.secrets.timeout_secs > 0,
        "secrets.timeout_secs must be at least 1"
    );

    let mut seen = HashSet::new();
    for repo in &config.github.repos {
        if repo.is_empty() {
            bail!("github.repos contains an empty repository name");
        }
        if !seen.insert(repo.as_str()) {
            bail!("github.repos lists {repo:?} more than once");
        }
    }
    Ok(())
}
