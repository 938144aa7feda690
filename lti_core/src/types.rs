//! Data model for tools, deployments, contexts and the records a launch reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

use crate::variables::CustomVariable;

/// The kind of LTI message a launch produces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
pub enum MessageType {
    #[serde(rename = "LtiResourceLinkRequest")]
    #[strum(serialize = "LtiResourceLinkRequest")]
    ResourceLinkRequest,

    #[serde(rename = "LtiDeepLinkingRequest")]
    #[strum(serialize = "LtiDeepLinkingRequest")]
    DeepLinkingRequest
}

impl MessageType {
    pub const ALL: [MessageType; 2] = [Self::ResourceLinkRequest, Self::DeepLinkingRequest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceLinkRequest => "LtiResourceLinkRequest",
            Self::DeepLinkingRequest => "LtiDeepLinkingRequest"
        }
    }
}

/// Ordered map of custom parameter name to literal value or variable token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomVariableMap(BTreeMap<String, String>);

impl CustomVariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges layers in order; a later layer overwrites earlier values for the same name.
    pub fn merged<'a>(layers: impl IntoIterator<Item = &'a CustomVariableMap>) -> Self {
        let mut merged = BTreeMap::new();
        for layer in layers {
            for (name, value) in &layer.0 {
                merged.insert(name.clone(), value.clone());
            }
        }
        Self(merged)
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Values that parse as a known variable token.
    pub fn variables(&self) -> impl Iterator<Item = CustomVariable> + '_ {
        self.0.values().filter_map(|v| CustomVariable::parse(v))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl FromIterator<(String, String)> for CustomVariableMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Per-token permission table. A denied token is removed from the custom claim.
///
/// Defaults to [`CustomPermissions::deny_all`], so a tool record without a
/// table, or with a partial one, only gets the tokens it was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomPermissions {
    pub user_id: bool,
    pub user_image: bool,
    pub user_username: bool,
    pub user_org: bool,
    pub user_scope_mentor: bool,
    pub user_grade_levels_one_roster: bool,
    pub resource_link_available_start_date_time: bool,
    pub resource_link_available_user_start_date_time: bool,
    pub resource_link_available_end_date_time: bool,
    pub resource_link_available_user_end_date_time: bool,
    pub resource_link_submission_start_date_time: bool,
    pub resource_link_submission_user_start_date_time: bool,
    pub resource_link_submission_end_date_time: bool,
    pub resource_link_submission_user_end_date_time: bool,
    pub line_item_release_date_time: bool,
    pub line_item_user_release_date_time: bool
}

impl CustomPermissions {
    pub fn allow_all() -> Self {
        Self {
            user_id: true,
            user_image: true,
            user_username: true,
            user_org: true,
            user_scope_mentor: true,
            user_grade_levels_one_roster: true,
            resource_link_available_start_date_time: true,
            resource_link_available_user_start_date_time: true,
            resource_link_available_end_date_time: true,
            resource_link_available_user_end_date_time: true,
            resource_link_submission_start_date_time: true,
            resource_link_submission_user_start_date_time: true,
            resource_link_submission_end_date_time: true,
            resource_link_submission_user_end_date_time: true,
            line_item_release_date_time: true,
            line_item_user_release_date_time: true
        }
    }

    pub fn deny_all() -> Self {
        Self {
            user_id: false,
            user_image: false,
            user_username: false,
            user_org: false,
            user_scope_mentor: false,
            user_grade_levels_one_roster: false,
            resource_link_available_start_date_time: false,
            resource_link_available_user_start_date_time: false,
            resource_link_available_end_date_time: false,
            resource_link_available_user_end_date_time: false,
            resource_link_submission_start_date_time: false,
            resource_link_submission_user_start_date_time: false,
            resource_link_submission_end_date_time: false,
            resource_link_submission_user_end_date_time: false,
            line_item_release_date_time: false,
            line_item_user_release_date_time: false
        }
    }

    pub fn allows(&self, variable: CustomVariable) -> bool {
        match variable {
            CustomVariable::UserId => self.user_id,
            CustomVariable::UserImage => self.user_image,
            CustomVariable::UserUsername => self.user_username,
            CustomVariable::UserOrg => self.user_org,
            CustomVariable::UserScopeMentor => self.user_scope_mentor,
            CustomVariable::UserGradeLevelsOneRoster => self.user_grade_levels_one_roster,
            CustomVariable::ResourceLinkAvailableStartDateTime => {
                self.resource_link_available_start_date_time
            }
            CustomVariable::ResourceLinkAvailableUserStartDateTime => {
                self.resource_link_available_user_start_date_time
            }
            CustomVariable::ResourceLinkAvailableEndDateTime => {
                self.resource_link_available_end_date_time
            }
            CustomVariable::ResourceLinkAvailableUserEndDateTime => {
                self.resource_link_available_user_end_date_time
            }
            CustomVariable::ResourceLinkSubmissionStartDateTime => {
                self.resource_link_submission_start_date_time
            }
            CustomVariable::ResourceLinkSubmissionUserStartDateTime => {
                self.resource_link_submission_user_start_date_time
            }
            CustomVariable::ResourceLinkSubmissionEndDateTime => {
                self.resource_link_submission_end_date_time
            }
            CustomVariable::ResourceLinkSubmissionUserEndDateTime => {
                self.resource_link_submission_user_end_date_time
            }
            CustomVariable::LineItemReleaseDateTime => self.line_item_release_date_time,
            CustomVariable::LineItemUserReleaseDateTime => self.line_item_user_release_date_time
        }
    }
}

impl Default for CustomPermissions {
    fn default() -> Self {
        Self::deny_all()
    }
}

/// Which identity fields a tool may receive. `sub` is always sent.
///
/// Defaults to [`UserPermissions::deny_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPermissions {
    pub name: bool,
    pub given_name: bool,
    pub family_name: bool,
    pub email: bool,
    pub picture: bool,
    pub locale: bool
}

impl UserPermissions {
    pub fn allow_all() -> Self {
        Self {
            name: true,
            given_name: true,
            family_name: true,
            email: true,
            picture: true,
            locale: true
        }
    }

    pub fn deny_all() -> Self {
        Self {
            name: false,
            given_name: false,
            family_name: false,
            email: false,
            picture: false,
            locale: false
        }
    }
}

impl Default for UserPermissions {
    fn default() -> Self {
        Self::deny_all()
    }
}

/// A registered external tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub launch_url: String,
    #[serde(default)]
    pub deep_link_url: Option<String>,
    pub oidc_initiation_url: String,
    #[serde(default)]
    pub redirect_urls: Vec<String>,
    /// Granted service scopes (AGS, NRPS).
    #[serde(default)]
    pub service_scopes: Vec<String>,
    #[serde(default)]
    pub custom: CustomVariableMap,
    #[serde(default)]
    pub custom_permissions: CustomPermissions,
    #[serde(default)]
    pub user_permissions: UserPermissions
}

impl Tool {
    pub fn has_scope(&self, scope: &str) -> bool {
        self.service_scopes.iter().any(|s| s == scope)
    }

    /// Granted scopes that appear in `relevant`, in `relevant` order.
    pub fn granted_scopes<'a>(&self, relevant: &[&'a str]) -> Vec<&'a str> {
        relevant.iter().copied().filter(|s| self.has_scope(s)).collect()
    }

    pub fn accepts_redirect(&self, redirect_uri: &str) -> bool {
        self.redirect_urls.iter().any(|u| u == redirect_uri)
    }
}

/// An installation of a tool within the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: String,
    pub tool_id: String,
    #[serde(default)]
    pub custom: CustomVariableMap
}

/// A course or other organisational unit a launch happens in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub id: String,
    pub deployment_id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub types: Vec<String>
}

/// A placement of tool content within a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLink {
    pub id: String,
    pub context_id: String,
    /// Overrides the tool launch URL when set.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub custom: CustomVariableMap,
    #[serde(default)]
    pub available_start_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub available_end_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submission_start_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submission_end_date_time: Option<DateTime<Utc>>
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub orgs: Vec<String>,
    #[serde(default)]
    pub grade_levels: Vec<String>
}

/// Platform descriptor published in the `tool_platform` claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub guid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_family_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>
}

/// A user's membership in a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub context_id: String,
    pub user_id: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub mentored_user_ids: Vec<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub context_id: String,
    #[serde(default)]
    pub resource_link_id: Option<String>,
    pub label: String,
    pub score_maximum: f64,
    #[serde(default)]
    pub grades_released_date_time: Option<DateTime<Utc>>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub line_item_id: String,
    pub user_id: String,
    #[serde(default)]
    pub score_given: Option<f64>,
    #[serde(default)]
    pub release_date_time: Option<DateTime<Utc>>
}

/// A user's personal availability and submission windows for a resource link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub resource_link_id: String,
    pub user_id: String,
    #[serde(default)]
    pub available_start_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub available_end_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submission_start_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submission_end_date_time: Option<DateTime<Utc>>
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_strings() {
        assert_eq!(MessageType::ResourceLinkRequest.to_string(), "LtiResourceLinkRequest");
        assert_eq!(
            "LtiDeepLinkingRequest".parse::<MessageType>().unwrap(),
            MessageType::DeepLinkingRequest
        );
        assert!("LtiSubmissionReviewRequest".parse::<MessageType>().is_err());
        assert_eq!(
            serde_json::to_string(&MessageType::DeepLinkingRequest).unwrap(),
            "\"LtiDeepLinkingRequest\""
        );
    }

    #[test]
    fn test_merged_last_layer_wins() {
        let tool = CustomVariableMap::new().with("x", "$User.id").with("a", "1");
        let deployment = CustomVariableMap::new().with("x", "$User.username");
        let link = CustomVariableMap::new();

        let merged = CustomVariableMap::merged([&tool, &deployment, &link]);
        assert_eq!(merged.get("x"), Some("$User.username"));
        assert_eq!(merged.get("a"), Some("1"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_variables_skips_literals() {
        let map = CustomVariableMap::new()
            .with("a", "literal")
            .with("b", "$User.id")
            .with("c", "$Unknown.token");
        let vars: Vec<_> = map.variables().collect();
        assert_eq!(vars, vec![CustomVariable::UserId]);
    }

    #[test]
    fn test_permission_table() {
        let mut perms = CustomPermissions::allow_all();
        assert!(perms.allows(CustomVariable::UserId));
        perms.user_id = false;
        assert!(!perms.allows(CustomVariable::UserId));
        assert!(perms.allows(CustomVariable::UserImage));
        assert!(!CustomPermissions::deny_all().allows(CustomVariable::LineItemReleaseDateTime));
    }

    #[test]
    fn test_granted_scopes_intersection() {
        let tool = Tool {
            id: "t".to_string(),
            client_id: "c".to_string(),
            name: "Tool".to_string(),
            launch_url: "https://tool.example/launch".to_string(),
            deep_link_url: None,
            oidc_initiation_url: "https://tool.example/login".to_string(),
            redirect_urls: vec![],
            service_scopes: vec!["b".to_string(), "z".to_string()],
            custom: CustomVariableMap::new(),
            custom_permissions: CustomPermissions::default(),
            user_permissions: UserPermissions::default()
        };
        assert_eq!(tool.granted_scopes(&["a", "b", "c"]), vec!["b"]);
        assert!(tool.granted_scopes(&["a"]).is_empty());
    }

    #[test]
    fn test_tool_deserializes_with_defaults() {
        let tool: Tool = serde_json::from_str(
            r#"{"id":"t","clientId":"c","name":"T","launchUrl":"https://t/l","oidcInitiationUrl":"https://t/o"}"#
        )
        .unwrap();
        assert!(tool.custom.is_empty());
        assert_eq!(tool.custom_permissions, CustomPermissions::deny_all());
        assert_eq!(tool.user_permissions, UserPermissions::deny_all());
    }

    #[test]
    fn test_partial_permission_tables_grant_only_named_fields() {
        let tool: Tool = serde_json::from_str(
            r#"{"id":"t","clientId":"c","name":"T","launchUrl":"https://t/l","oidcInitiationUrl":"https://t/o",
                "customPermissions":{"userId":true},"userPermissions":{"name":true}}"#
        )
        .unwrap();
        assert!(tool.custom_permissions.allows(CustomVariable::UserId));
        assert!(!tool.custom_permissions.allows(CustomVariable::UserUsername));
        assert!(tool.user_permissions.name);
        assert!(!tool.user_permissions.email);
    }
}
