use errors::LaunchError;
use lti_core::claims as claim;
use serde_json::Value;

use super::claims::{LaunchPresentationClaim, ResourceLinkClaim};
use super::{ClaimSet, PopulatorInput, to_claim};
use crate::urls::default_target_link_uri;

/// Core claims of a resource-link launch. The one populator whose absent
/// data fails the whole assembly.
pub(super) fn populate(input: PopulatorInput<'_>) -> Result<ClaimSet, LaunchError> {
    let scope = input.scope;
    let link = scope
        .resource_link()
        .ok_or_else(|| LaunchError::missing("resource_link", scope.message_type()))?;

    let target_link_uri = default_target_link_uri(scope.message_type(), scope.tool(), Some(link));

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
        (claim::RESOURCE_LINK, to_claim(ResourceLinkClaim::from(link))?),
    ];

    if let Some(presentation) = scope.presentation_override() {
        claims.push((
            claim::LAUNCH_PRESENTATION,
            to_claim(LaunchPresentationClaim::from(presentation))?
        ));
    }

    Ok(ClaimSet::Claims(claims))
}
