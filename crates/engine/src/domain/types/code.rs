use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{EngineError, EngineResult};

/// Decoded text payload of a QR/barcode read or a manual entry.
///
/// No format validation beyond "non-empty after trimming" is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanCode(String);

impl ScanCode {
    pub fn parse(raw: &str) -> EngineResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidCode);
        }
        Ok(ScanCode(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScanCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Symbologies the scan capability is configured to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Symbology {
    Qr,
    Ean13,
    Code128,
}

impl Symbology {
    pub fn as_str(self) -> &'static str {
        match self {
            Symbology::Qr => "qr",
            Symbology::Ean13 => "ean-13",
            Symbology::Code128 => "code-128",
        }
    }
}

pub const SUPPORTED_SYMBOLOGIES: [Symbology; 3] =
    [Symbology::Qr, Symbology::Ean13, Symbology::Code128];

/// Closed verdict for a produced result. A failed lookup is not a status:
/// it is the pipeline returning an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Authentic,
    Warning,
}

impl VerificationStatus {
    pub fn from_flags(is_authentic: bool, is_expired: bool, is_suspicious: bool) -> Self {
        if is_authentic && !is_expired && !is_suspicious {
            VerificationStatus::Authentic
        } else {
            VerificationStatus::Warning
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Authentic => "authentic",
            VerificationStatus::Warning => "warning",
        }
    }
}
