//! # Launch Hint Codec
//!
//! Carries launch context through the OIDC third-party-initiated login round
//! trip without server-side session state.
//!
//! ## Wire formats
//! - `login_hint`: `"{userId}|{'1' or ''}|{actualUserId or ''}"`
//! - `lti_message_hint`:
//!   `"{messageType}|{deploymentId}|{contextId}|{resourceLinkId}|{opaqueHint}"`
//! - opaque hint, resource link launch: `base64(JSON(LaunchPresentationOverride))`
//! - opaque hint, deep linking launch:
//!   `base64(JSON(DeepLinkSettingsOverride) + "|" + JSON(LaunchPresentationOverride))`
//!
//! These formats are a compatibility contract with tools already in the field
//! and must not change.
//!
//! ## Leniency
//! Decoding never fails. A string with too few fields, invalid base64 or
//! unparsable JSON decodes to the empty value for its type and the caller
//! decides what an empty value means.
//!
//! ## Usage
//! ```rust
//! use lti_core::hints::LoginHint;
//!
//! let hint = LoginHint::new("user-1").impersonated_by("admin-7");
//! let wire = hint.encode();
//! assert_eq!(wire, "user-1||admin-7");
//! assert_eq!(LoginHint::decode(&wire), hint);
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::MessageType;

const SEPARATOR: char = '|';
const ANONYMOUS_FLAG: &str = "1";

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Identifies the launching user across the login redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginHint {
    pub user_id: String,
    pub actual_user_id: Option<String>,
    pub is_anonymous: bool
}

impl LoginHint {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            actual_user_id: None,
            is_anonymous: false
        }
    }

    #[must_use]
    pub fn anonymous(mut self, is_anonymous: bool) -> Self {
        self.is_anonymous = is_anonymous;
        self
    }

    /// Marks the launch as performed by `actual_user_id` on behalf of `user_id`.
    #[must_use]
    pub fn impersonated_by(mut self, actual_user_id: impl Into<String>) -> Self {
        self.actual_user_id = Some(actual_user_id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.user_id.is_empty()
    }

    pub fn encode(&self) -> String {
        format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.user_id,
            if self.is_anonymous { ANONYMOUS_FLAG } else { "" },
            self.actual_user_id.as_deref().unwrap_or_default()
        )
    }

    /// Splits into at most three fields. Fewer than three yields the empty hint.
    pub fn decode(value: &str) -> Self {
        let parts: Vec<&str> = value.splitn(3, SEPARATOR).collect();
        let [user_id, anonymous, actual_user_id] = parts.as_slice() else {
            trace!(fields = parts.len(), "login_hint has wrong field count");
            return Self::default();
        };

        Self {
            user_id: (*user_id).to_string(),
            actual_user_id: non_empty(actual_user_id),
            is_anonymous: *anonymous == ANONYMOUS_FLAG
        }
    }
}

/// Identifies what is being launched across the login redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageHint {
    /// Raw message type; parse with [`MessageHint::message_type`].
    pub message_type: String,
    pub deployment_id: String,
    pub context_id: Option<String>,
    pub resource_link_id: Option<String>,
    pub opaque_hint: Option<String>
}

impl MessageHint {
    pub fn new(message_type: MessageType, deployment_id: impl Into<String>) -> Self {
        Self {
            message_type: message_type.to_string(),
            deployment_id: deployment_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_context(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    #[must_use]
    pub fn with_resource_link(mut self, resource_link_id: impl Into<String>) -> Self {
        self.resource_link_id = Some(resource_link_id.into());
        self
    }

    #[must_use]
    pub fn with_launch_hint(mut self, hint: &LaunchHint) -> Self {
        self.opaque_hint = hint.encode();
        self
    }

    pub fn message_type(&self) -> Option<MessageType> {
        self.message_type.parse().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.message_type.is_empty() && self.deployment_id.is_empty()
    }

    pub fn encode(&self) -> String {
        [
            self.message_type.as_str(),
            self.deployment_id.as_str(),
            self.context_id.as_deref().unwrap_or_default(),
            self.resource_link_id.as_deref().unwrap_or_default(),
            self.opaque_hint.as_deref().unwrap_or_default()
        ]
        .join("|")
    }

    /// Splits into at most five fields. Fewer than five yields the empty hint.
    pub fn decode(value: &str) -> Self {
        let parts: Vec<&str> = value.splitn(5, SEPARATOR).collect();
        let [message_type, deployment_id, context_id, resource_link_id, opaque_hint] =
            parts.as_slice()
        else {
            trace!(fields = parts.len(), "lti_message_hint has wrong field count");
            return Self::default();
        };

        Self {
            message_type: (*message_type).to_string(),
            deployment_id: (*deployment_id).to_string(),
            context_id: non_empty(context_id),
            resource_link_id: non_empty(resource_link_id),
            opaque_hint: non_empty(opaque_hint)
        }
    }

    /// Decodes the opaque payload according to this hint's message type.
    pub fn launch_hint(&self) -> LaunchHint {
        match (self.message_type(), self.opaque_hint.as_deref()) {
            (Some(message_type), Some(opaque)) => LaunchHint::decode(message_type, opaque),
            (Some(message_type), None) => LaunchHint::empty(message_type),
            (None, _) => LaunchHint::ResourceLink(LaunchPresentationOverride::default())
        }
    }
}

/// Per-launch override of the `launch_presentation` claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchPresentationOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>
}

impl LaunchPresentationOverride {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Per-launch override of the deep linking settings, plus free-form values
/// the tool echoes back to the deep linking response handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepLinkSettingsOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_presentation_document_targets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_media_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_multiple: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_line_item: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_create: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>
}

impl DeepLinkSettingsOverride {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// The message-type-specific payload carried in the opaque hint field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchHint {
    ResourceLink(LaunchPresentationOverride),
    DeepLinking {
        settings: DeepLinkSettingsOverride,
        presentation: LaunchPresentationOverride
    }
}

impl LaunchHint {
    pub fn empty(message_type: MessageType) -> Self {
        match message_type {
            MessageType::ResourceLinkRequest => {
                Self::ResourceLink(LaunchPresentationOverride::default())
            }
            MessageType::DeepLinkingRequest => Self::DeepLinking {
                settings: DeepLinkSettingsOverride::default(),
                presentation: LaunchPresentationOverride::default()
            }
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Self::ResourceLink(_) => MessageType::ResourceLinkRequest,
            Self::DeepLinking { .. } => MessageType::DeepLinkingRequest
        }
    }

    pub fn presentation(&self) -> &LaunchPresentationOverride {
        match self {
            Self::ResourceLink(presentation) | Self::DeepLinking { presentation, .. } => {
                presentation
            }
        }
    }

    pub fn deep_link_settings(&self) -> Option<&DeepLinkSettingsOverride> {
        match self {
            Self::ResourceLink(_) => None,
            Self::DeepLinking { settings, .. } => Some(settings)
        }
    }

    /// Encodes the payload, or `None` when a resource link hint carries no override.
    pub fn encode(&self) -> Option<String> {
        match self {
            Self::ResourceLink(presentation) if presentation.is_empty() => None,
            Self::ResourceLink(presentation) => {
                let json = serde_json::to_string(presentation).ok()?;
                Some(STANDARD.encode(json))
            }
            Self::DeepLinking {
                settings,
                presentation
            } => {
                let settings = serde_json::to_string(settings).ok()?;
                let presentation = serde_json::to_string(presentation).ok()?;
                Some(STANDARD.encode(format!("{settings}{SEPARATOR}{presentation}")))
            }
        }
    }

    pub fn decode(message_type: MessageType, opaque: &str) -> Self {
        let Some(text) = STANDARD
            .decode(opaque)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
        else {
            trace!(%message_type, "opaque hint is not base64 UTF-8");
            return Self::empty(message_type);
        };

        match message_type {
            MessageType::ResourceLinkRequest => {
                Self::ResourceLink(serde_json::from_str(&text).unwrap_or_default())
            }
            MessageType::DeepLinkingRequest => {
                let (settings, presentation) = split_deep_linking_payload(&text);
                Self::DeepLinking {
                    settings,
                    presentation
                }
            }
        }
    }
}

/// Splits `settings|presentation`. JSON string values may contain a raw `|`,
/// so every separator position is tried until both halves parse.
fn split_deep_linking_payload(text: &str) -> (DeepLinkSettingsOverride, LaunchPresentationOverride) {
    for (index, _) in text.match_indices(SEPARATOR) {
        let (settings, presentation) = (&text[..index], &text[index + 1..]);
        if let (Ok(settings), Ok(presentation)) =
            (serde_json::from_str(settings), serde_json::from_str(presentation))
        {
            return (settings, presentation);
        }
    }
    trace!("deep linking hint has no parsable settings|presentation split");
    (DeepLinkSettingsOverride::default(), LaunchPresentationOverride::default())
}
