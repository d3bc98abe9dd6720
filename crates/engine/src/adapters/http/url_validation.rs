use url::Url;

use crate::domain::error::{EngineError, EngineResult};
use crate::domain::types::ScanCode;
use super::constants::{BARCODE_SEGMENT, PRODUCTS_SEGMENT, TRACK_LOCATION_SEGMENT};

/// Check a registry base URL and normalize it for joining endpoint paths.
pub fn validate_registry_url(url_str: &str, allow_http: bool) -> EngineResult<Url> {
  let url = Url::parse(url_str.trim())
    .map_err(|_| EngineError::Config("invalid registry URL".into()))?;
  match url.scheme() {
    "https" => {}
    "http" => {
      if !allow_http { return Err(EngineError::Config("HTTP URLs are not allowed".into())); }
    }
    _ => return Err(EngineError::Config("unsupported URL scheme".into())),
  }
  if url.host().is_none() {
    return Err(EngineError::Config("URL missing host".into()));
  }
  if !url.username().is_empty() || url.password().is_some() {
    return Err(EngineError::Config("credentials in the registry URL are not allowed; use a token".into()));
  }
  if url.query().is_some() || url.fragment().is_some() {
    return Err(EngineError::Config("registry URL must not carry a query or fragment".into()));
  }
  Ok(url)
}

/// `{base}/products/barcode/{code}`, with the code encoded as one segment.
pub fn lookup_url(base: &Url, code: &ScanCode) -> EngineResult<Url> {
  endpoint(base, &[PRODUCTS_SEGMENT, BARCODE_SEGMENT, code.as_str()])
}

/// `{base}/products/track-location`.
pub fn track_location_url(base: &Url) -> EngineResult<Url> {
  endpoint(base, &[PRODUCTS_SEGMENT, TRACK_LOCATION_SEGMENT])
}

fn endpoint(base: &Url, segments: &[&str]) -> EngineResult<Url> {
  let mut url = base.clone();
  url
    .path_segments_mut()
    .map_err(|_| EngineError::Config("registry URL cannot be a base".into()))?
    .pop_if_empty()
    .extend(segments);
  Ok(url)
}
