//! Typed shapes of the structured LTI claims.
//!
//! Field names are the wire names; optional members are omitted, never null.

use lti_core::{Context, LaunchPresentationOverride, ResourceLink};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextClaim {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>
}

impl From<&Context> for ContextClaim {
    fn from(context: &Context) -> Self {
        Self {
            id: context.id.clone(),
            label: context.label.clone(),
            title: context.title.clone(),
            types: context.types.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceLinkClaim {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>
}

impl From<&ResourceLink> for ResourceLinkClaim {
    fn from(link: &ResourceLink) -> Self {
        Self {
            id: link.id.clone(),
            title: link.title.clone(),
            description: link.text.clone()
        }
    }
}

/// The claim uses snake_case names where the hint payload uses camelCase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchPresentationClaim {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>
}

impl From<&LaunchPresentationOverride> for LaunchPresentationClaim {
    fn from(presentation: &LaunchPresentationOverride) -> Self {
        Self {
            document_target: presentation.document_target.clone(),
            height: presentation.height,
            width: presentation.width,
            return_url: presentation.return_url.clone(),
            locale: presentation.locale.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeepLinkingSettingsClaim {
    pub deep_link_return_url: String,
    pub accept_types: Vec<String>,
    pub accept_presentation_document_targets: Vec<String>,
    /// Comma-separated MIME types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_media_types: Option<String>,
    pub accept_multiple: bool,
    pub accept_lineitem: bool,
    pub auto_create: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgsEndpointClaim {
    pub scope: Vec<String>,
    pub lineitems: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineitem: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NrpsClaim {
    pub context_memberships_url: String,
    pub service_versions: Vec<String>
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_claim_omits_absent_fields() {
        let claim = ContextClaim {
            id: "ctx-1".to_string(),
            label: None,
            title: Some("Biology".to_string()),
            types: vec![]
        };
        assert_eq!(
            serde_json::to_value(claim).unwrap(),
            json!({"id": "ctx-1", "title": "Biology"})
        );
    }

    #[test]
    fn test_presentation_claim_is_snake_case() {
        let presentation = LaunchPresentationOverride {
            document_target: Some("iframe".to_string()),
            return_url: Some("https://lms.example.com/return".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(LaunchPresentationClaim::from(&presentation)).unwrap(),
            json!({"document_target": "iframe", "return_url": "https://lms.example.com/return"})
        );
    }
}
