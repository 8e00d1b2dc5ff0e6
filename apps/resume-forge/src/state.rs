use reqwest::Client as HttpClient;

use crate::config::ProxyConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Outbound client for the upstream webhook. No request timeout is set.
    pub http: HttpClient,
    pub config: ProxyConfig,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Self {
        Self {
            http: HttpClient::new(),
            config,
        }
    }
}
