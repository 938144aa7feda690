//! # Environment Variable Loader
//!
//! Loads platform settings from `LTI_*` environment variables following
//! 12-factor app principles.
//!
//! ## Environment Variables
//! - `LTI_ISSUER`: platform issuer identifier
//! - `LTI_BASE_URL`: public address of browser-facing endpoints
//! - `LTI_SERVICE_BASE_URL`: separate host for service endpoints (optional)
//! - `LTI_TOKEN_LIFETIME_SECONDS`: launch token lifetime (default: 300)
//! - `LTI_ROUTE_DEEP_LINK_RETURN`, `LTI_ROUTE_LINE_ITEMS`,
//!   `LTI_ROUTE_LINE_ITEM`, `LTI_ROUTE_MEMBERSHIPS`: route templates
//! - `LTI_DEEP_LINKING_ACCEPT_TYPES`, `LTI_DEEP_LINKING_ACCEPT_TARGETS`,
//!   `LTI_DEEP_LINKING_ACCEPT_MEDIA_TYPES`: comma-separated lists
//! - `LTI_DEEP_LINKING_ACCEPT_MULTIPLE`, `LTI_DEEP_LINKING_ACCEPT_LINEITEM`,
//!   `LTI_DEEP_LINKING_AUTO_CREATE`: booleans (`true`/`false`/`1`/`0`)

use crate::config::{DeepLinkingDefaults, PlatformSettings, RouteSettings};
use errors::ConfigError;
use std::env;

/// Load settings from environment variables, starting from defaults.
///
/// # M-CANONICAL-DOCS
///
/// ## Usage
/// ```rust,no_run
/// use config::{PlatformConfig, load_from_env};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = PlatformConfig::new(load_from_env()?)?;
///     println!("Issuer: {}", config.issuer());
///     Ok(())
/// }
/// ```
///
/// ## Errors
/// Returns `ConfigError::InvalidEnvValue` when a numeric or boolean variable
/// does not parse. Unset variables keep their defaults.
pub fn load_from_env() -> Result<PlatformSettings, ConfigError> {
    let defaults = PlatformSettings::default();

    Ok(PlatformSettings {
        issuer: env::var("LTI_ISSUER").unwrap_or(defaults.issuer),
        base_url: env::var("LTI_BASE_URL").unwrap_or(defaults.base_url),
        service_base_url: env::var("LTI_SERVICE_BASE_URL").ok().or(defaults.service_base_url),
        token_lifetime_seconds: parse_env("LTI_TOKEN_LIFETIME_SECONDS")?
            .unwrap_or(defaults.token_lifetime_seconds),
        routes: load_routes_from_env(defaults.routes),
        deep_linking: load_deep_linking_from_env(defaults.deep_linking)?
    })
}

fn load_routes_from_env(defaults: RouteSettings) -> RouteSettings {
    RouteSettings {
        deep_link_return: env::var("LTI_ROUTE_DEEP_LINK_RETURN")
            .unwrap_or(defaults.deep_link_return),
        line_items: env::var("LTI_ROUTE_LINE_ITEMS").unwrap_or(defaults.line_items),
        line_item: env::var("LTI_ROUTE_LINE_ITEM").unwrap_or(defaults.line_item),
        memberships: env::var("LTI_ROUTE_MEMBERSHIPS").unwrap_or(defaults.memberships)
    }
}

fn load_deep_linking_from_env(
    defaults: DeepLinkingDefaults,
) -> Result<DeepLinkingDefaults, ConfigError> {
    Ok(DeepLinkingDefaults {
        accept_types: parse_list("LTI_DEEP_LINKING_ACCEPT_TYPES").unwrap_or(defaults.accept_types),
        accept_presentation_document_targets: parse_list("LTI_DEEP_LINKING_ACCEPT_TARGETS")
            .unwrap_or(defaults.accept_presentation_document_targets),
        accept_media_types: parse_list("LTI_DEEP_LINKING_ACCEPT_MEDIA_TYPES")
            .unwrap_or(defaults.accept_media_types),
        accept_multiple: parse_bool("LTI_DEEP_LINKING_ACCEPT_MULTIPLE")?
            .unwrap_or(defaults.accept_multiple),
        accept_lineitem: parse_bool("LTI_DEEP_LINKING_ACCEPT_LINEITEM")?
            .unwrap_or(defaults.accept_lineitem),
        auto_create: parse_bool("LTI_DEEP_LINKING_AUTO_CREATE")?.unwrap_or(defaults.auto_create)
    })
}

fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
{
    match env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvValue {
                variable: key.to_string(),
                value
            }),
        Err(_) => Ok(None)
    }
}

fn parse_bool(key: &str) -> Result<Option<bool>, ConfigError> {
    match env::var(key) {
        Ok(value) => match value.to_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidEnvValue {
                variable: key.to_string(),
                value
            })
        },
        Err(_) => Ok(None)
    }
}

fn parse_list(key: &str) -> Option<Vec<String>> {
    env::var(key).ok().map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
}
