//! The immutable per-launch aggregate every populator reads from.

use errors::LaunchError;

use crate::hints::{DeepLinkSettingsOverride, LaunchHint, LaunchPresentationOverride};
use crate::types::{Context, CustomVariableMap, Deployment, MessageType, ResourceLink, Tool, User};

/// Everything needed to build a [`MessageScope`].
#[derive(Debug, Clone)]
pub struct MessageScopeParts {
    pub message_type: MessageType,
    pub tool: Tool,
    pub deployment: Deployment,
    pub context: Option<Context>,
    pub resource_link: Option<ResourceLink>,
    pub user: User,
    pub actual_user: Option<User>,
    pub is_anonymous: bool,
    /// Raw opaque hint as echoed back by the tool.
    pub message_hint: Option<String>
}

/// Immutable launch scope. Construction checks that the deployment belongs to
/// the tool and that a resource link belongs to the present context.
#[derive(Debug, Clone)]
pub struct MessageScope {
    message_type: MessageType,
    tool: Tool,
    deployment: Deployment,
    context: Option<Context>,
    resource_link: Option<ResourceLink>,
    user: User,
    actual_user: Option<User>,
    is_anonymous: bool,
    message_hint: Option<String>,
    launch_hint: LaunchHint
}

impl MessageScope {
    pub fn new(parts: MessageScopeParts) -> Result<Self, LaunchError> {
        if parts.deployment.tool_id != parts.tool.id {
            return Err(LaunchError::InvalidScope {
                reason: format!(
                    "deployment {} belongs to tool {}, not {}",
                    parts.deployment.id, parts.deployment.tool_id, parts.tool.id
                )
            });
        }

        if let Some(link) = &parts.resource_link {
            match &parts.context {
                Some(context) if context.id == link.context_id => {}
                Some(context) => {
                    return Err(LaunchError::InvalidScope {
                        reason: format!(
                            "resource link {} belongs to context {}, not {}",
                            link.id, link.context_id, context.id
                        )
                    });
                }
                None => return Err(LaunchError::missing("context", parts.message_type))
            }
        }

        let launch_hint = match parts.message_hint.as_deref() {
            Some(opaque) => LaunchHint::decode(parts.message_type, opaque),
            None => LaunchHint::empty(parts.message_type)
        };

        Ok(Self {
            message_type: parts.message_type,
            tool: parts.tool,
            deployment: parts.deployment,
            context: parts.context,
            resource_link: parts.resource_link,
            user: parts.user,
            actual_user: parts.actual_user,
            is_anonymous: parts.is_anonymous,
            message_hint: parts.message_hint,
            launch_hint
        })
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn resource_link(&self) -> Option<&ResourceLink> {
        self.resource_link.as_ref()
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn actual_user(&self) -> Option<&User> {
        self.actual_user.as_ref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.is_anonymous
    }

    pub fn message_hint(&self) -> Option<&str> {
        self.message_hint.as_deref()
    }

    pub fn launch_hint(&self) -> &LaunchHint {
        &self.launch_hint
    }

    pub fn presentation_override(&self) -> Option<&LaunchPresentationOverride> {
        let presentation = self.launch_hint.presentation();
        (!presentation.is_empty()).then_some(presentation)
    }

    pub fn deep_link_override(&self) -> Option<&DeepLinkSettingsOverride> {
        self.launch_hint.deep_link_settings()
    }

    /// Tool, deployment and resource link custom maps merged in that order.
    pub fn custom_variables(&self) -> CustomVariableMap {
        let empty = CustomVariableMap::new();
        let link = self.resource_link.as_ref().map_or(&empty, |l| &l.custom);
        CustomVariableMap::merged([&self.tool.custom, &self.deployment.custom, link])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::LaunchPresentationOverride;
    use crate::types::{CustomPermissions, UserPermissions};

    fn parts() -> MessageScopeParts {
        MessageScopeParts {
            message_type: MessageType::ResourceLinkRequest,
            tool: Tool {
                id: "tool-1".to_string(),
                client_id: "client-1".to_string(),
                name: "Tool".to_string(),
                launch_url: "https://tool.example/launch".to_string(),
                deep_link_url: None,
                oidc_initiation_url: "https://tool.example/login".to_string(),
                redirect_urls: vec![],
                service_scopes: vec![],
                custom: CustomVariableMap::new().with("x", "$User.id"),
                custom_permissions: CustomPermissions::default(),
                user_permissions: UserPermissions::default()
            },
            deployment: Deployment {
                id: "dep-1".to_string(),
                tool_id: "tool-1".to_string(),
                custom: CustomVariableMap::new().with("x", "$User.username")
            },
            context: Some(Context {
                id: "ctx-1".to_string(),
                deployment_id: "dep-1".to_string(),
                label: None,
                title: None,
                types: vec![]
            }),
            resource_link: Some(ResourceLink {
                id: "rl-1".to_string(),
                context_id: "ctx-1".to_string(),
                url: None,
                title: None,
                text: None,
                custom: CustomVariableMap::new(),
                available_start_date_time: None,
                available_end_date_time: None,
                submission_start_date_time: None,
                submission_end_date_time: None
            }),
            user: User {
                id: "user-1".to_string(),
                ..Default::default()
            },
            actual_user: None,
            is_anonymous: false,
            message_hint: None
        }
    }

    #[test]
    fn test_valid_scope() {
        let scope = MessageScope::new(parts()).unwrap();
        assert_eq!(scope.user().id, "user-1");
        assert!(scope.presentation_override().is_none());
        assert!(scope.deep_link_override().is_none());
    }

    #[test]
    fn test_deployment_of_other_tool_rejected() {
        let mut p = parts();
        p.deployment.tool_id = "tool-2".to_string();
        assert!(matches!(MessageScope::new(p), Err(LaunchError::InvalidScope { .. })));
    }

    #[test]
    fn test_resource_link_of_other_context_rejected() {
        let mut p = parts();
        if let Some(link) = p.resource_link.as_mut() {
            link.context_id = "ctx-2".to_string();
        }
        assert!(matches!(MessageScope::new(p), Err(LaunchError::InvalidScope { .. })));
    }

    #[test]
    fn test_resource_link_without_context_rejected() {
        let mut p = parts();
        p.context = None;
        assert!(matches!(
            MessageScope::new(p),
            Err(LaunchError::MissingRequiredContext { field: "context", .. })
        ));
    }

    #[test]
    fn test_custom_variables_layering() {
        let scope = MessageScope::new(parts()).unwrap();
        assert_eq!(scope.custom_variables().get("x"), Some("$User.username"));
    }

    #[test]
    fn test_presentation_override_decoded() {
        let mut p = parts();
        let hint = LaunchHint::ResourceLink(LaunchPresentationOverride {
            document_target: Some("window".to_string()),
            ..Default::default()
        });
        p.message_hint = hint.encode();
        let scope = MessageScope::new(p).unwrap();
        assert_eq!(
            scope.presentation_override().and_then(|o| o.document_target.as_deref()),
            Some("window")
        );
    }
}
