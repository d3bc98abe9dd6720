// crates/engine/src/domain/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("configuration: {0}")]
  Config(String),

  #[error("scan code is empty")]
  InvalidCode,

  /// The registry has no record for the scanned code.
  #[error("Product not found in database")]
  NotFound,

  /// Transport failure, timeout, or non-2xx response. Carries the upstream
  /// message verbatim when the registry provided one.
  #[error("{0}")]
  Network(String),

  #[error("feature not enabled: {0}")]
  Feature(&'static str),

  #[error("internal: {0}")]
  Internal(String),
}

impl EngineError {
  /// Text handed to the display side when a verification attempt fails.
  pub fn user_message(&self) -> String {
    format!("Verification failed: {self}")
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, EngineError::NotFound)
  }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for EngineError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_timeout() {
      EngineError::Network(format!("request timed out: {e}"))
    } else {
      EngineError::Network(e.to_string())
    }
  }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Failures of a single location capture. Never fatal to verification; the
/// pipeline downgrades them to the advisory `locationError` text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocationError {
  #[error("Location permission denied")]
  PermissionDenied,

  #[error("Location information is unavailable")]
  PositionUnavailable,

  #[error("Location request timed out")]
  Timeout,

  #[error("{0}")]
  Other(String),
}

impl LocationError {
  /// Map platform geolocation error codes (1 = denied, 2 = unavailable,
  /// 3 = timeout) onto the taxonomy. Unknown codes keep the raw message.
  pub fn from_platform_code(code: i32, message: impl Into<String>) -> Self {
    match code {
      1 => LocationError::PermissionDenied,
      2 => LocationError::PositionUnavailable,
      3 => LocationError::Timeout,
      _ => LocationError::Other(message.into()),
    }
  }
}
