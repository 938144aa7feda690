use errors::LaunchError;
use lti_core::claims as claim;
use serde_json::Value;

use super::claims::{DeepLinkingSettingsClaim, LaunchPresentationClaim};
use super::{ClaimSet, PopulatorInput, to_claim};
use crate::urls::default_target_link_uri;

/// Core claims of a deep-linking launch.
///
/// Every setting is the per-launch override when the hint carries one, else
/// the configured platform default. Title, text and data exist only as
/// overrides.
pub(super) fn populate(input: PopulatorInput<'_>) -> Result<ClaimSet, LaunchError> {
    let scope = input.scope;
    let context = scope
        .context()
        .ok_or_else(|| LaunchError::missing("context", scope.message_type()))?;

    let defaults = input.urls.config().deep_linking();
    let overrides = scope.deep_link_override().cloned().unwrap_or_default();

    let return_url = input
        .urls
        .deep_link_return_url(&scope.deployment().id, &context.id)?;

    let accept_media_types = overrides
        .accept_media_types
        .unwrap_or_else(|| defaults.accept_media_types.clone());

    let settings = DeepLinkingSettingsClaim {
        deep_link_return_url: return_url.to_string(),
        accept_types: overrides
            .accept_types
            .unwrap_or_else(|| defaults.accept_types.clone()),
        accept_presentation_document_targets: overrides
            .accept_presentation_document_targets
            .unwrap_or_else(|| defaults.accept_presentation_document_targets.clone()),
        accept_media_types: (!accept_media_types.is_empty()).then(|| accept_media_types.join(",")),
        accept_multiple: overrides.accept_multiple.unwrap_or(defaults.accept_multiple),
        accept_lineitem: overrides.accept_line_item.unwrap_or(defaults.accept_lineitem),
        auto_create: overrides.auto_create.unwrap_or(defaults.auto_create),
        title: overrides.title,
        text: overrides.text,
        data: overrides.data
    };

    let target_link_uri = default_target_link_uri(scope.message_type(), scope.tool(), None);

    let mut claims = vec![
        (
            claim::MESSAGE_TYPE,
            Value::String(scope.message_type().as_str().to_string())
        ),
        (claim::VERSION, Value::String(claim::LTI_VERSION.to_string())),
        (
            claim::DEPLOYMENT_ID,
            Value::String(scope.deployment().id.clone())
        ),
        (
            claim::TARGET_LINK_URI,
            Value::String(target_link_uri.to_string())
        ),
        (claim::DEEP_LINKING_SETTINGS, to_claim(settings)?),
    ];

    if let Some(presentation) = scope.presentation_override() {
        claims.push((
            claim::LAUNCH_PRESENTATION,
            to_claim(LaunchPresentationClaim::from(presentation))?
        ));
    }

    Ok(ClaimSet::Claims(claims))
}
