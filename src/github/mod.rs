// github module: secrets side-channel and the code-review REST API

pub mod auth;
pub mod client;
pub mod types;

pub use auth::{Credential, SecretsExtension};
pub use client::GitHubClient;
