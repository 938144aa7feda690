//! # URL Builder
//!
//! Builds the third-party initiation redirect and the service endpoint URLs
//! a launch advertises to the tool.

use std::sync::Arc;

use config::{CONTEXT_ID_PLACEHOLDER, DEPLOYMENT_ID_PLACEHOLDER, LINE_ITEM_ID_PLACEHOLDER, PlatformConfig};
use errors::LaunchError;
use lti_core::{LaunchHint, LoginHint, MessageHint, MessageType, ResourceLink, Tool};
use url::Url;

/// Everything the initiation redirect carries.
#[derive(Debug, Clone)]
pub struct InitiationRequest<'a> {
    pub tool: &'a Tool,
    pub message_type: MessageType,
    pub deployment_id: &'a str,
    pub context_id: Option<&'a str>,
    pub resource_link: Option<&'a ResourceLink>,
    pub login_hint: LoginHint,
    pub launch_hint: Option<LaunchHint>,
    /// Explicit target; defaults per [`default_target_link_uri`].
    pub target_link_uri: Option<&'a str>
}

/// Target link URI used when a launch names none.
///
/// Resource-link launches prefer the link's own URL, deep-linking launches the
/// tool's deep-link URL; both fall back to the tool launch URL.
pub fn default_target_link_uri<'a>(
    message_type: MessageType,
    tool: &'a Tool,
    resource_link: Option<&'a ResourceLink>,
) -> &'a str {
    let preferred = match message_type {
        MessageType::ResourceLinkRequest => resource_link.and_then(|l| l.url.as_deref()),
        MessageType::DeepLinkingRequest => tool.deep_link_url.as_deref()
    };
    preferred.unwrap_or(&tool.launch_url)
}

#[derive(Debug, Clone)]
pub struct UrlBuilder {
    config: Arc<PlatformConfig>
}

impl UrlBuilder {
    pub fn new(config: Arc<PlatformConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Tool OIDC initiation URL with the six launch parameters appended.
    ///
    /// Existing query parameters on the initiation URL are kept ahead of the
    /// appended ones. A launch hint must match the request's message type,
    /// since the tool's echo is decoded by that type.
    pub fn initiation_url(&self, request: &InitiationRequest<'_>) -> Result<Url, LaunchError> {
        if let Some(hint) = &request.launch_hint {
            if hint.message_type() != request.message_type {
                return Err(LaunchError::InvalidScope {
                    reason: format!(
                        "{} launch hint on a {} launch",
                        hint.message_type(),
                        request.message_type
                    )
                });
            }
        }

        let mut url = parse(&request.tool.oidc_initiation_url)?;

        let target_link_uri = request.target_link_uri.unwrap_or_else(|| {
            default_target_link_uri(request.message_type, request.tool, request.resource_link)
        });

        let mut message_hint = MessageHint::new(request.message_type, request.deployment_id);
        if let Some(context_id) = request.context_id {
            message_hint = message_hint.with_context(context_id);
        }
        if let Some(link) = request.resource_link {
            message_hint = message_hint.with_resource_link(link.id.as_str());
        }
        if let Some(launch_hint) = &request.launch_hint {
            message_hint = message_hint.with_launch_hint(launch_hint);
        }

        url.query_pairs_mut()
            .append_pair("iss", self.config.issuer())
            .append_pair("login_hint", &request.login_hint.encode())
            .append_pair("target_link_uri", target_link_uri)
            .append_pair("client_id", &request.tool.client_id)
            .append_pair("lti_message_hint", &message_hint.encode())
            .append_pair("lti_deployment_id", request.deployment_id);

        Ok(url)
    }

    /// Deep-link return endpoint. Always on the browser-facing base URL.
    pub fn deep_link_return_url(&self, deployment_id: &str, context_id: &str) -> Result<Url, LaunchError> {
        let path = fill(
            &self.config.routes().deep_link_return,
            deployment_id,
            context_id,
            None
        );
        join(self.config.base_url(), &path)
    }

    pub fn line_items_url(&self, deployment_id: &str, context_id: &str) -> Result<Url, LaunchError> {
        let path = fill(&self.config.routes().line_items, deployment_id, context_id, None);
        join(self.config.effective_service_base_url(), &path)
    }

    pub fn line_item_url(
        &self,
        deployment_id: &str,
        context_id: &str,
        line_item_id: &str,
    ) -> Result<Url, LaunchError> {
        let path = fill(
            &self.config.routes().line_item,
            deployment_id,
            context_id,
            Some(line_item_id)
        );
        join(self.config.effective_service_base_url(), &path)
    }

    pub fn memberships_url(&self, deployment_id: &str, context_id: &str) -> Result<Url, LaunchError> {
        let path = fill(&self.config.routes().memberships, deployment_id, context_id, None);
        join(self.config.effective_service_base_url(), &path)
    }
}

fn fill(template: &str, deployment_id: &str, context_id: &str, line_item_id: Option<&str>) -> String {
    let mut path = template
        .replace(DEPLOYMENT_ID_PLACEHOLDER, &urlencoding::encode(deployment_id))
        .replace(CONTEXT_ID_PLACEHOLDER, &urlencoding::encode(context_id));
    if let Some(id) = line_item_id {
        path = path.replace(LINE_ITEM_ID_PLACEHOLDER, &urlencoding::encode(id));
    }
    path
}

// Routes are absolute paths, so they replace any path on the base. A base
// mounted under a prefix keeps it by joining relative to the prefix.
fn join(base: &Url, path: &str) -> Result<Url, LaunchError> {
    let prefix = base.path().trim_end_matches('/');
    let mut url = base.clone();
    url.set_path(&format!("{prefix}{path}"));
    url.set_query(None);
    url.set_fragment(None);
    if url.cannot_be_a_base() {
        return Err(LaunchError::InvalidUrl {
            url: url.to_string(),
            reason: "not a hierarchical URL".to_string()
        });
    }
    Ok(url)
}

fn parse(value: &str) -> Result<Url, LaunchError> {
    Url::parse(value).map_err(|e| LaunchError::InvalidUrl {
        url: value.to_string(),
        reason: e.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::PlatformSettings;
    use std::collections::HashMap;
    use testing::fixtures;

    fn builder(settings: PlatformSettings) -> UrlBuilder {
        UrlBuilder::new(Arc::new(PlatformConfig::new(settings).unwrap()))
    }

    #[test]
    fn test_initiation_parameter_order() {
        let tool = fixtures::tool();
        let link = fixtures::resource_link();
        let url = builder(PlatformSettings::default())
            .initiation_url(&InitiationRequest {
                tool: &tool,
                message_type: MessageType::ResourceLinkRequest,
                deployment_id: "dep-1",
                context_id: Some("ctx-1"),
                resource_link: Some(&link),
                login_hint: LoginHint::new("user-1"),
                launch_hint: None,
                target_link_uri: None
            })
            .unwrap();

        let names: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(
            names,
            [
                "iss",
                "login_hint",
                "target_link_uri",
                "client_id",
                "lti_message_hint",
                "lti_deployment_id"
            ]
        );

        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(params["iss"], "https://lms.example.com");
        assert_eq!(params["login_hint"], "user-1||");
        assert_eq!(params["target_link_uri"], tool.launch_url);
        assert_eq!(params["lti_message_hint"], "LtiResourceLinkRequest|dep-1|ctx-1|rl-1|");
        assert_eq!(params["lti_deployment_id"], "dep-1");
    }

    #[test]
    fn test_target_link_uri_defaults() {
        let mut tool = fixtures::tool();
        let mut link = fixtures::resource_link();

        assert_eq!(
            default_target_link_uri(MessageType::ResourceLinkRequest, &tool, Some(&link)),
            "https://tool.example/launch"
        );

        link.url = Some("https://tool.example/other".to_string());
        assert_eq!(
            default_target_link_uri(MessageType::ResourceLinkRequest, &tool, Some(&link)),
            "https://tool.example/other"
        );

        assert_eq!(
            default_target_link_uri(MessageType::DeepLinkingRequest, &tool, None),
            "https://tool.example/launch"
        );
        tool.deep_link_url = Some("https://tool.example/deep".to_string());
        assert_eq!(
            default_target_link_uri(MessageType::DeepLinkingRequest, &tool, None),
            "https://tool.example/deep"
        );
    }

    #[test]
    fn test_service_urls_rehost() {
        let urls = builder(PlatformSettings {
            service_base_url: Some("https://services.example.com".to_string()),
            ..Default::default()
        });

        assert_eq!(
            urls.line_item_url("dep-1", "ctx-1", "li-1").unwrap().as_str(),
            "https://services.example.com/lti/deployments/dep-1/contexts/ctx-1/lineitems/li-1"
        );
        assert_eq!(
            urls.memberships_url("dep-1", "ctx-1").unwrap().as_str(),
            "https://services.example.com/lti/deployments/dep-1/contexts/ctx-1/memberships"
        );
        assert_eq!(
            urls.deep_link_return_url("dep-1", "ctx-1").unwrap().as_str(),
            "https://lms.example.com/lti/deployments/dep-1/contexts/ctx-1/deep-linking"
        );
    }

    #[test]
    fn test_path_values_are_encoded() {
        let urls = builder(PlatformSettings::default());
        assert_eq!(
            urls.line_items_url("dep 1", "ctx/1").unwrap().as_str(),
            "https://lms.example.com/lti/deployments/dep%201/contexts/ctx%2F1/lineitems"
        );
    }

    #[test]
    fn test_base_path_prefix_kept() {
        let urls = builder(PlatformSettings {
            base_url: "https://lms.example.com/campus/".to_string(),
            ..Default::default()
        });
        assert_eq!(
            urls.deep_link_return_url("d", "c").unwrap().as_str(),
            "https://lms.example.com/campus/lti/deployments/d/contexts/c/deep-linking"
        );
    }

    #[test]
    fn test_invalid_initiation_url() {
        let mut tool = fixtures::tool();
        tool.oidc_initiation_url = "not a url".to_string();
        let result = builder(PlatformSettings::default()).initiation_url(&InitiationRequest {
            tool: &tool,
            message_type: MessageType::DeepLinkingRequest,
            deployment_id: "dep-1",
            context_id: None,
            resource_link: None,
            login_hint: LoginHint::new("user-1"),
            launch_hint: None,
            target_link_uri: None
        });
        assert!(matches!(result, Err(LaunchError::InvalidUrl { .. })));
    }

    #[test]
    fn test_launch_hint_of_other_message_type_rejected() {
        let tool = fixtures::tool();
        let link = fixtures::resource_link();
        let result = builder(PlatformSettings::default()).initiation_url(&InitiationRequest {
            tool: &tool,
            message_type: MessageType::ResourceLinkRequest,
            deployment_id: "dep-1",
            context_id: Some("ctx-1"),
            resource_link: Some(&link),
            login_hint: LoginHint::new("user-1"),
            launch_hint: Some(LaunchHint::empty(MessageType::DeepLinkingRequest)),
            target_link_uri: None
        });
        assert!(matches!(result, Err(LaunchError::InvalidScope { .. })));
    }
}
