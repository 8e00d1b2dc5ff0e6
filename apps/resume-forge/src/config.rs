use std::str::FromStr;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::workflow::poller::{PollPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};

/// Configuration for `serve`, loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Upstream the proxy forwards to.
    pub upstream_webhook_url: String,
    pub port: u16,
}

/// Configuration for `submit`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Where the submission client posts the resume payload.
    pub generation_endpoint: String,
    /// Public object URL prefix, e.g. `https://<project>.supabase.co/storage/v1/object/public`.
    pub storage_public_base: String,
    pub s3_endpoint: String,
    pub s3_bucket: String,
    pub s3_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub poll_policy: PollPolicy,
}

/// Loads `.env` if present and returns the log level (`RUST_LOG`, default `info`).
pub fn rust_log() -> String {
    dotenvy::dotenv().ok(); // ignore a missing .env
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(ProxyConfig {
            upstream_webhook_url: require(&env, "UPSTREAM_WEBHOOK_URL")?,
            port: parse_or("PORT", env("PORT"), 8080)?,
        })
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let interval_ms: u64 = parse_or(
            "POLL_INTERVAL_MS",
            env("POLL_INTERVAL_MS"),
            DEFAULT_POLL_INTERVAL.as_millis() as u64,
        )?;
        let max_attempts: u32 = parse_or(
            "POLL_MAX_ATTEMPTS",
            env("POLL_MAX_ATTEMPTS"),
            DEFAULT_MAX_ATTEMPTS,
        )?;
        ensure!(interval_ms > 0, "POLL_INTERVAL_MS must be greater than zero");
        ensure!(max_attempts > 0, "POLL_MAX_ATTEMPTS must be greater than zero");

        Ok(ClientConfig {
            generation_endpoint: require(&env, "GENERATION_ENDPOINT")?,
            storage_public_base: require(&env, "STORAGE_PUBLIC_BASE")?,
            s3_endpoint: require(&env, "S3_ENDPOINT")?,
            s3_bucket: env("S3_BUCKET").unwrap_or_else(|| "pdfs".to_string()),
            s3_region: env("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            aws_access_key_id: require(&env, "AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require(&env, "AWS_SECRET_ACCESS_KEY")?,
            poll_policy: PollPolicy {
                interval: Duration::from_millis(interval_ms),
                max_attempts,
            },
        })
    }
}

fn require(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    env(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{value}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
pub fn test_config(upstream_webhook_url: &str) -> ProxyConfig {
    ProxyConfig {
        upstream_webhook_url: upstream_webhook_url.to_string(),
        port: 0,
    }
}
