//! Message scope resolution.
//!
//! Turns the ids carried by a launch (directly, or encoded in the
//! `login_hint` / `lti_message_hint` pair) into a validated [`MessageScope`].

use std::sync::Arc;

use errors::LaunchError;
use lti_core::{LoginHint, LtiDataService, MessageHint, MessageScope, MessageScopeParts, MessageType, Tool};
use tracing::{debug, instrument};

/// Ids of one launch, before any lookup.
#[derive(Debug, Clone)]
pub struct ScopeRequest {
    pub message_type: MessageType,
    pub tool: Tool,
    pub deployment_id: String,
    pub context_id: Option<String>,
    pub resource_link_id: Option<String>,
    pub user_id: String,
    pub is_anonymous: bool,
    pub actual_user_id: Option<String>,
    /// Opaque hint to decode into per-launch overrides.
    pub message_hint: Option<String>
}

/// Resolves launch ids against the data service.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Issues one lookup per present id, all concurrently, and builds the
/// immutable scope every populator reads from.
///
/// ## Errors
/// - `MissingRequiredContext` when the deployment or user cannot be found, a
///   resource-link launch has no resolvable resource link, or a deep-linking
///   launch has no context
/// - `InvalidScope` when the resolved records do not belong together
/// - `UpstreamDataFailure` when any lookup fails; the remaining lookups are
///   dropped
#[derive(Clone)]
pub struct MessageScopeResolver {
    data: Arc<dyn LtiDataService>
}

impl MessageScopeResolver {
    pub fn new(data: Arc<dyn LtiDataService>) -> Self {
        Self { data }
    }

    #[instrument(
        skip(self, request),
        fields(
            message_type = %request.message_type,
            deployment_id = %request.deployment_id,
            tool_id = %request.tool.id
        )
    )]
    pub async fn resolve(&self, request: ScopeRequest) -> Result<MessageScope, LaunchError> {
        let data = self.data.as_ref();
        let message_type = request.message_type;

        let deployment = async {
            data.get_deployment(&request.deployment_id)
                .await
                .map_err(|e| LaunchError::upstream("get_deployment", e))
        };
        let context = async {
            match request.context_id.as_deref() {
                Some(id) => data
                    .get_context(id)
                    .await
                    .map_err(|e| LaunchError::upstream("get_context", e)),
                None => Ok(None)
            }
        };
        let resource_link = async {
            match request.resource_link_id.as_deref() {
                Some(id) => data
                    .get_resource_link(id)
                    .await
                    .map_err(|e| LaunchError::upstream("get_resource_link", e)),
                None => Ok(None)
            }
        };
        let user = async {
            data.get_user(&request.user_id)
                .await
                .map_err(|e| LaunchError::upstream("get_user", e))
        };
        let actual_user = async {
            match request.actual_user_id.as_deref() {
                Some(id) => data
                    .get_user(id)
                    .await
                    .map_err(|e| LaunchError::upstream("get_user", e)),
                None => Ok(None)
            }
        };

        let (deployment, context, resource_link, user, actual_user) =
            tokio::try_join!(deployment, context, resource_link, user, actual_user)?;

        let deployment = deployment.ok_or_else(|| LaunchError::missing("deployment", message_type))?;
        let user = user.ok_or_else(|| LaunchError::missing("user", message_type))?;

        match message_type {
            MessageType::ResourceLinkRequest if resource_link.is_none() => {
                return Err(LaunchError::missing("resource_link", message_type));
            }
            MessageType::DeepLinkingRequest if context.is_none() => {
                return Err(LaunchError::missing("context", message_type));
            }
            _ => {}
        }

        debug!(
            context = context.as_ref().map(|c| c.id.as_str()),
            resource_link = resource_link.as_ref().map(|l| l.id.as_str()),
            impersonated = actual_user.is_some(),
            "Resolved message scope"
        );

        MessageScope::new(MessageScopeParts {
            message_type,
            tool: request.tool,
            deployment,
            context,
            resource_link,
            user,
            actual_user,
            is_anonymous: request.is_anonymous,
            message_hint: request.message_hint
        })
    }

    /// Decodes the hint pair a tool echoes back and resolves the scope they name.
    pub async fn resolve_hints(
        &self,
        tool: Tool,
        login_hint: &str,
        message_hint: &str,
    ) -> Result<MessageScope, LaunchError> {
        let request = scope_request_from_hints(tool, login_hint, message_hint)?;
        self.resolve(request).await
    }
}

/// Builds a [`ScopeRequest`] from the raw hint strings.
///
/// Hint decoding itself is lenient, so malformed hints surface here as the
/// fields they fail to provide.
pub fn scope_request_from_hints(
    tool: Tool,
    login_hint: &str,
    message_hint: &str,
) -> Result<ScopeRequest, LaunchError> {
    let login = LoginHint::decode(login_hint);
    let message = MessageHint::decode(message_hint);

    let message_type = message.message_type().ok_or_else(|| LaunchError::UnsupportedMessageType {
        message_type: message.message_type.clone()
    })?;
    if login.user_id.is_empty() {
        return Err(LaunchError::missing("user", message_type));
    }
    if message.deployment_id.is_empty() {
        return Err(LaunchError::missing("deployment", message_type));
    }

    Ok(ScopeRequest {
        message_type,
        tool,
        deployment_id: message.deployment_id,
        context_id: message.context_id,
        resource_link_id: message.resource_link_id,
        user_id: login.user_id,
        is_anonymous: login.is_anonymous,
        actual_user_id: login.actual_user_id,
        message_hint: message.opaque_hint
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use testing::fixtures;

    #[test]
    fn test_request_from_hints() {
        let login = LoginHint::new("user-1").impersonated_by("admin-1").encode();
        let message = MessageHint::new(MessageType::ResourceLinkRequest, "dep-1")
            .with_context("ctx-1")
            .with_resource_link("rl-1")
            .encode();

        let request = scope_request_from_hints(fixtures::tool(), &login, &message).unwrap();
        assert_eq!(request.user_id, "user-1");
        assert_eq!(request.actual_user_id.as_deref(), Some("admin-1"));
        assert_eq!(request.resource_link_id.as_deref(), Some("rl-1"));
        assert!(request.message_hint.is_none());
    }

    #[test]
    fn test_unknown_message_type() {
        let err = scope_request_from_hints(fixtures::tool(), "user-1||", "LtiSubmissionReview|dep-1|||")
            .unwrap_err();
        assert!(matches!(err, LaunchError::UnsupportedMessageType { .. }));
    }

    #[test]
    fn test_malformed_login_hint_is_missing_user() {
        let message = MessageHint::new(MessageType::DeepLinkingRequest, "dep-1").encode();
        let err = scope_request_from_hints(fixtures::tool(), "onlyonefield", &message).unwrap_err();
        assert!(matches!(
            err,
            LaunchError::MissingRequiredContext { field: "user", .. }
        ));
    }
}
