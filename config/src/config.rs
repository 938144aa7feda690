//! # Configuration Structures
//!
//! Platform configuration for the launch core.
//!
//! Two shapes exist:
//! - [`PlatformSettings`]: the raw, serde-friendly shape read from files and
//!   environment variables. Validated with the `validator` crate.
//! - [`PlatformConfig`]: the immutable value the rest of the workspace uses.
//!   It can only be obtained through [`PlatformConfig::new`], which validates
//!   the settings, parses every URL and checks the route templates.

use errors::ConfigError;
use lti_core::claims::{content_item, document_target};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

use crate::validation::{validate_absolute_url, validate_route};

pub const DEPLOYMENT_ID_PLACEHOLDER: &str = "{deployment_id}";
pub const CONTEXT_ID_PLACEHOLDER: &str = "{context_id}";
pub const LINE_ITEM_ID_PLACEHOLDER: &str = "{line_item_id}";

/// Raw platform settings.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Carries everything the launch core needs to know about the platform
/// itself: its issuer identifier, the public addresses it is reachable at,
/// the token lifetime and the service routes it publishes to tools.
///
/// ## Fields
/// - `issuer`: value of the `iss` claim and initiation parameter
/// - `base_url`: public address of the platform's browser-facing endpoints
/// - `service_base_url`: optional separate host for AGS/NRPS service endpoints
/// - `token_lifetime_seconds`: `exp - iat` of issued launches (30-3600)
/// - `routes`: path templates for service endpoints
/// - `deep_linking`: defaults for the deep linking settings claim
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct PlatformSettings {
    #[serde(default = "default_issuer")]
    #[validate(length(min = 1, max = 2048), custom(function = "validate_absolute_url"))]
    pub issuer: String,

    #[serde(default = "default_base_url")]
    #[validate(custom(function = "validate_absolute_url"))]
    pub base_url: String,

    #[serde(default)]
    #[validate(custom(function = "validate_absolute_url"))]
    pub service_base_url: Option<String>,

    #[serde(default = "default_token_lifetime_seconds")]
    #[validate(range(min = 30, max = 3600))]
    pub token_lifetime_seconds: u64,

    #[serde(default)]
    #[validate(nested)]
    pub routes: RouteSettings,

    #[serde(default)]
    #[validate(nested)]
    pub deep_linking: DeepLinkingDefaults
}

fn default_issuer() -> String {
    "https://lms.example.com".to_string()
}

fn default_base_url() -> String {
    "https://lms.example.com".to_string()
}

fn default_token_lifetime_seconds() -> u64 {
    300
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            base_url: default_base_url(),
            service_base_url: None,
            token_lifetime_seconds: default_token_lifetime_seconds(),
            routes: RouteSettings::default(),
            deep_linking: DeepLinkingDefaults::default()
        }
    }
}

/// Path templates for platform endpoints addressed by tools.
///
/// Placeholders: `{deployment_id}`, `{context_id}`, `{line_item_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct RouteSettings {
    #[serde(default = "default_deep_link_return_route")]
    #[validate(custom(function = "validate_route"))]
    pub deep_link_return: String,

    #[serde(default = "default_line_items_route")]
    #[validate(custom(function = "validate_route"))]
    pub line_items: String,

    #[serde(default = "default_line_item_route")]
    #[validate(custom(function = "validate_route"))]
    pub line_item: String,

    #[serde(default = "default_memberships_route")]
    #[validate(custom(function = "validate_route"))]
    pub memberships: String
}

fn default_deep_link_return_route() -> String {
    "/lti/deployments/{deployment_id}/contexts/{context_id}/deep-linking".to_string()
}

fn default_line_items_route() -> String {
    "/lti/deployments/{deployment_id}/contexts/{context_id}/lineitems".to_string()
}

fn default_line_item_route() -> String {
    "/lti/deployments/{deployment_id}/contexts/{context_id}/lineitems/{line_item_id}".to_string()
}

fn default_memberships_route() -> String {
    "/lti/deployments/{deployment_id}/contexts/{context_id}/memberships".to_string()
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            deep_link_return: default_deep_link_return_route(),
            line_items: default_line_items_route(),
            line_item: default_line_item_route(),
            memberships: default_memberships_route()
        }
    }
}

impl RouteSettings {
    fn check_placeholders(&self) -> Result<(), ConfigError> {
        let required: [(&'static str, &str, &[&'static str]); 4] = [
            (
                "deep_link_return",
                &self.deep_link_return,
                &[CONTEXT_ID_PLACEHOLDER]
            ),
            (
                "line_items",
                &self.line_items,
                &[CONTEXT_ID_PLACEHOLDER]
            ),
            (
                "line_item",
                &self.line_item,
                &[CONTEXT_ID_PLACEHOLDER, LINE_ITEM_ID_PLACEHOLDER]
            ),
            (
                "memberships",
                &self.memberships,
                &[CONTEXT_ID_PLACEHOLDER]
            )
        ];

        for (route, template, placeholders) in required {
            for &placeholder in placeholders {
                if !template.contains(placeholder) {
                    return Err(ConfigError::InvalidRouteTemplate { route, placeholder });
                }
            }
        }
        Ok(())
    }
}

/// Platform defaults for the deep linking settings claim, used wherever a
/// launch carries no per-launch override.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct DeepLinkingDefaults {
    #[serde(default = "default_accept_types")]
    #[validate(length(min = 1))]
    pub accept_types: Vec<String>,

    #[serde(default = "default_accept_presentation_document_targets")]
    #[validate(length(min = 1))]
    pub accept_presentation_document_targets: Vec<String>,

    #[serde(default)]
    pub accept_media_types: Vec<String>,

    #[serde(default = "default_true")]
    pub accept_multiple: bool,

    #[serde(default = "default_true")]
    pub accept_lineitem: bool,

    #[serde(default)]
    pub auto_create: bool
}

fn default_accept_types() -> Vec<String> {
    [content_item::LTI_RESOURCE_LINK, content_item::LINK]
        .map(str::to_string)
        .to_vec()
}

fn default_accept_presentation_document_targets() -> Vec<String> {
    [document_target::IFRAME, document_target::WINDOW]
        .map(str::to_string)
        .to_vec()
}

fn default_true() -> bool {
    true
}

impl Default for DeepLinkingDefaults {
    fn default() -> Self {
        Self {
            accept_types: default_accept_types(),
            accept_presentation_document_targets: default_accept_presentation_document_targets(),
            accept_media_types: Vec::new(),
            accept_multiple: true,
            accept_lineitem: true,
            auto_create: false
        }
    }
}

/// Validated, immutable platform configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformConfig {
    issuer: String,
    base_url: Url,
    service_base_url: Option<Url>,
    token_lifetime: Duration,
    routes: RouteSettings,
    deep_linking: DeepLinkingDefaults
}

impl PlatformConfig {
    /// Validates `settings` and freezes them.
    ///
    /// # M-CANONICAL-DOCS
    ///
    /// ## Usage
    /// ```rust
    /// use config::{PlatformConfig, PlatformSettings};
    ///
    /// let config = PlatformConfig::new(PlatformSettings::default()).unwrap();
    /// assert_eq!(config.issuer(), "https://lms.example.com");
    /// ```
    ///
    /// ## Errors
    /// - `ConfigError::Validation` when a `validator` rule fails
    /// - `ConfigError::InvalidUrl` when a URL cannot serve as a base
    /// - `ConfigError::InvalidRouteTemplate` when a route lacks a placeholder
    pub fn new(settings: PlatformSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        settings.routes.check_placeholders()?;

        let base_url = parse_base("base_url", &settings.base_url)?;
        let service_base_url = settings
            .service_base_url
            .as_deref()
            .map(|u| parse_base("service_base_url", u))
            .transpose()?;

        Ok(Self {
            issuer: settings.issuer,
            base_url,
            service_base_url,
            token_lifetime: Duration::from_secs(settings.token_lifetime_seconds),
            routes: settings.routes,
            deep_linking: settings.deep_linking
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn service_base_url(&self) -> Option<&Url> {
        self.service_base_url.as_ref()
    }

    /// Host that service endpoints are published on.
    pub fn effective_service_base_url(&self) -> &Url {
        self.service_base_url.as_ref().unwrap_or(&self.base_url)
    }

    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    pub fn routes(&self) -> &RouteSettings {
        &self.routes
    }

    pub fn deep_linking(&self) -> &DeepLinkingDefaults {
        &self.deep_linking
    }
}

impl TryFrom<PlatformSettings> for PlatformConfig {
    type Error = ConfigError;

    fn try_from(settings: PlatformSettings) -> Result<Self, Self::Error> {
        Self::new(settings)
    }
}

fn parse_base(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        reason: e.to_string()
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            field,
            reason: "URL cannot be used as a base".to_string()
        });
    }
    Ok(url)
}
