use std::env;
use std::time::Duration;

use tracing::{info, warn};
use zeroize::Zeroizing;

use super::location::PositionOptions;
use crate::domain::error::{EngineError, EngineResult};

/// Centralized defaults for the engine.
/// All opinionated defaults should be defined here for consistency.
pub struct EngineDefaults;

impl EngineDefaults {
    // Security defaults
    pub const ALLOW_INSECURE_HTTP: bool = false; // HTTPS only unless opted in
    pub const HAS_AUTH_TOKEN: Option<Zeroizing<String>> = None;

    // Network defaults
    pub const REQUEST_TIMEOUT: Option<Duration> = None; // Lookups run to completion
    pub const USER_AGENT: &'static str = concat!("prodcheck-engine/", env!("CARGO_PKG_VERSION"));

    // Location defaults
    pub const CAPTURE_LOCATION: bool = true;

    // Display fallbacks for fields the registry may omit
    pub const DEFAULT_WARRANTY: &'static str = "Standard manufacturer warranty";
    pub const DEFAULT_INSTRUCTIONS: &'static str = "Follow manufacturer guidelines";
}

/// Environment variables read by [`RegistryConfig::from_env`].
pub const ENV_REGISTRY_URL: &str = "PRODCHECK_REGISTRY_URL";
pub const ENV_REGISTRY_TOKEN: &str = "PRODCHECK_REGISTRY_TOKEN";
pub const ENV_ALLOW_HTTP: &str = "PRODCHECK_ALLOW_HTTP";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "PRODCHECK_REQUEST_TIMEOUT_SECS";

/// Connection settings for the remote product registry.
#[derive(Clone)]
pub struct RegistryConfig {
    /// Base URL; endpoint paths are joined onto it.
    pub base_url: String,
    /// Bearer token sent on every request when present.
    pub auth_token: Option<Zeroizing<String>>,
    /// Opt-in: allow plain HTTP registries (LAN development backends).
    pub allow_insecure_http: bool,
    /// Optional overall request timeout. None keeps lookups unbounded.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("base_url", &self.base_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("allow_insecure_http", &self.allow_insecure_http)
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl RegistryConfig {
    /// Secure opinionated defaults; caller supplies the base URL.
    pub fn secure_default(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: EngineDefaults::HAS_AUTH_TOKEN,
            allow_insecure_http: EngineDefaults::ALLOW_INSECURE_HTTP,
            request_timeout: EngineDefaults::REQUEST_TIMEOUT,
            user_agent: EngineDefaults::USER_AGENT.to_string(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(Zeroizing::new(token.into()));
        self
    }

    /// Build from `PRODCHECK_*` environment variables. Only the URL is required.
    pub fn from_env() -> EngineResult<Self> {
        let base_url = env::var(ENV_REGISTRY_URL)
            .map_err(|_| EngineError::Config(format!("{ENV_REGISTRY_URL} is not set")))?;
        let mut cfg = Self::secure_default(base_url);

        if let Ok(token) = env::var(ENV_REGISTRY_TOKEN) {
            if !token.trim().is_empty() {
                cfg.auth_token = Some(Zeroizing::new(token.trim().to_string()));
            }
        }

        if let Ok(raw) = env::var(ENV_ALLOW_HTTP) {
            cfg.allow_insecure_http = parse_flag(&raw).ok_or_else(|| {
                warn!("Invalid {ENV_ALLOW_HTTP} value: {raw}");
                EngineError::Config(format!("{ENV_ALLOW_HTTP} must be true or false"))
            })?;
        }

        match env::var(ENV_REQUEST_TIMEOUT_SECS) {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| {
                    warn!("Invalid {ENV_REQUEST_TIMEOUT_SECS} value: {e}");
                    EngineError::Config(format!("{ENV_REQUEST_TIMEOUT_SECS}: {e}"))
                })?;
                cfg.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
            }
            Err(_) => info!("{ENV_REQUEST_TIMEOUT_SECS} not set, registry lookups are unbounded"),
        }

        Ok(cfg)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Pipeline-level settings.
#[derive(Debug, Clone, Copy)]
pub struct VerifierConfig {
    pub capture_location: bool,
    pub position: PositionOptions,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            capture_location: EngineDefaults::CAPTURE_LOCATION,
            position: PositionOptions::default(),
        }
    }
}
