//! reqwest-backed [`ProductRegistry`].

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};
use url::Url;
use zeroize::Zeroizing;

use crate::domain::error::{EngineError, EngineResult};
use crate::domain::registry::ProductRegistry;
use crate::domain::types::{
    LocationReport, ProductRecord, RegistryConfig, RegistryEnvelope, RegistryErrorBody, ScanCode,
};
use super::url_validation::{lookup_url, track_location_url, validate_registry_url};

pub struct HttpRegistry {
    client: reqwest::Client,
    base: Url,
    auth_token: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for HttpRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRegistry")
            .field("base", &self.base.as_str())
            .field("authenticated", &self.auth_token.is_some())
            .finish()
    }
}

impl HttpRegistry {
    pub fn new(config: &RegistryConfig) -> EngineResult<Self> {
        let base = validate_registry_url(&config.base_url, config.allow_insecure_http)?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| EngineError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base,
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }
}

#[async_trait]
impl ProductRegistry for HttpRegistry {
    async fn lookup(&self, code: &ScanCode) -> EngineResult<Option<ProductRecord>> {
        let url = lookup_url(&self.base, code)?;
        debug!(%url, "GET product");

        let response = self.authorize(self.client.get(url)).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(upstream_error(response).await);
        }

        let envelope: RegistryEnvelope = response.json().await?;
        Ok(envelope.data)
    }

    async fn track_location(&self, report: LocationReport) -> EngineResult<()> {
        let url = track_location_url(&self.base)?;
        debug!(%url, code = %report.barcode_id, "POST location report");

        let response = self.authorize(self.client.post(url)).json(&report).send().await?;
        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }
        Ok(())
    }
}

/// Prefer the registry's own `message`; fall back to the status line.
async fn upstream_error(response: Response) -> EngineError {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        warn!("registry rejected the request as unauthorized; check the configured token");
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<RegistryErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("registry responded with {status}"));
    EngineError::Network(message)
}
