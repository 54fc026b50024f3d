use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::config::types::SecretsConfig;
use crate::error::SecretRetrievalError;

/// Bearer token for the code-review API.
///
/// Held in memory for one invocation only. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Outer envelope returned by the secrets extension.
#[derive(Deserialize)]
struct SecretEnvelope {
    #[serde(rename = "SecretString")]
    secret_string: String,
}

/// JSON document stored inside `SecretString`.
#[derive(Deserialize)]
struct BotSecret {
    #[serde(default)]
    token: Option<String>,
}

/// Client for the same-host secrets extension.
pub struct SecretsExtension {
    http: reqwest::Client,
    endpoint: String,
    secret_id: String,
    token_header: String,
    session_token: String,
    timeout: Duration,
}

impl SecretsExtension {
    pub fn new(config: &SecretsConfig, session_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
            secret_id: config.secret_id.clone(),
            token_header: config.token_header.clone(),
            session_token: session_token.into(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Build from the session token found in the configured environment
    /// variable.
    pub fn from_env(config: &SecretsConfig) -> Result<Self, SecretRetrievalError> {
        match std::env::var(&config.session_token_env) {
            Ok(token) if !token.is_empty() => Ok(Self::new(config, token)),
            _ => Err(SecretRetrievalError::MissingSessionToken(
                config.session_token_env.clone(),
            )),
        }
    }

    /// Resolve the bot token.
    ///
    /// The request is bounded by `secrets.timeout_secs`; running out of time
    /// is a `Transport` error.
    ///
    /// A secret without a `token` field yields an empty credential rather
    /// than an error; a warning is logged in that case.
    pub async fn resolve_token(&self) -> Result<Credential, SecretRetrievalError> {
        let url = format!("{}/secretsmanager/get", self.endpoint);
        let response = self
            .http
            .get(url)
            .query(&[("secretId", self.secret_id.as_str())])
            .header(self.token_header.as_str(), self.session_token.as_str())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(SecretRetrievalError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SecretRetrievalError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(SecretRetrievalError::Transport)?;
        let token = parse_secret(&body)?;
        if token.is_empty() {
            tracing::warn!(secret_id = %self.secret_id, "secret has no token field; using empty credential");
        }
        Ok(token)
    }
}

/// Decode the two-level secret payload into a credential.
fn parse_secret(body: &[u8]) -> Result<Credential, SecretRetrievalError> {
    let envelope: SecretEnvelope =
        serde_json::from_slice(body).map_err(SecretRetrievalError::MalformedEnvelope)?;
    let secret: BotSecret = serde_json::from_str(&envelope.secret_string)
        .map_err(SecretRetrievalError::MalformedSecret)?;
    Ok(Credential::new(secret.token.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_token() {
        let body = br#"{"SecretString": "{\"token\":\"abc\"}", "Name": "github/bot-token"}"#;
        let token = parse_secret(body).unwrap();
        assert_eq!(token.expose(), "abc");
    }

    #[test]
    fn missing_token_defaults_to_empty() {
        let body = br#"{"SecretString": "{\"other\":1}"}"#;
        let token = parse_secret(body).unwrap();
        assert!(token.is_empty());
    }

    #[test]
    fn malformed_envelope_is_rejected() {
        let err = parse_secret(b"<html>").unwrap_err();
        assert!(matches!(err, SecretRetrievalError::MalformedEnvelope(_)));
    }

    #[test]
    fn envelope_without_secret_string_is_rejected() {
        let err = parse_secret(br#"{"Name": "github/bot-token"}"#).unwrap_err();
        assert!(matches!(err, SecretRetrievalError::MalformedEnvelope(_)));
    }

    #[test]
    fn malformed_inner_secret_is_rejected() {
        let err = parse_secret(br#"{"SecretString": "token=abc"}"#).unwrap_err();
        assert!(matches!(err, SecretRetrievalError::MalformedSecret(_)));
    }

    #[test]
    fn debug_redacts_value() {
        let token = Credential::new("super-secret");
        let printed = format!("{token:?}");
        assert!(!printed.contains("super-secret"));
    }
}
