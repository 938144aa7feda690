//! # Configuration Validation
//!
//! Custom `validator` rules for platform settings.

use crate::config::PlatformSettings;
use validator::{Validate, ValidationError};

/// Validate raw settings without building a [`crate::PlatformConfig`].
pub fn validate(settings: &PlatformSettings) -> Result<(), validator::ValidationErrors> {
    settings.validate()
}

/// Accepts absolute `http`/`https` URLs with a host.
pub(crate) fn validate_absolute_url(value: &str) -> Result<(), ValidationError> {
    let url = url::Url::parse(value).map_err(|_| ValidationError::new("invalid_url"))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(()),
        _ => Err(ValidationError::new("url_must_be_http"))
    }
}

/// Route templates are absolute paths without query or fragment.
pub(crate) fn validate_route(value: &str) -> Result<(), ValidationError> {
    if !value.starts_with('/') {
        return Err(ValidationError::new("route_must_start_with_slash"));
    }
    if value.contains('?') || value.contains('#') {
        return Err(ValidationError::new("route_must_be_a_path"));
    }
    Ok(())
}
