//! akeyless-client - Rust client for the Akeyless vault
//!
//! Authentication strategy is chosen once, from the access type tag:
//! 1. `api_key` → shared access key
//! 2. `k8s` → service-account JWT + auth config name
//! 3. `azure_ad` / `aws_iam` / `gcp` → cloud identity

pub mod auth;
mod client;
mod error;
mod models;

pub use auth::{AuthStrategy, Authenticator, CloudIdResolver, CloudProvider, Credentials};
pub use client::{AkeylessApi, AkeylessClient, AkeylessClientBuilder, DEFAULT_API_URL};
pub use error::AkeylessError;
pub use models::{AuthOutput, AuthRequest, CreateSecret, DeleteItem};
