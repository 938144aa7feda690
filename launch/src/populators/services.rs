//! Service endpoint claims for Assignment and Grade Services and for Names
//! and Role Provisioning Services.
//!
//! Both require a context and at least one granted scope of the service.

use errors::LaunchError;
use lti_core::claims::{self as claim, NRPS_SERVICE_VERSIONS, ags_scope, nrps_scope};
use tracing::debug;

use super::claims::{AgsEndpointClaim, NrpsClaim};
use super::{ClaimSet, PopulatorInput, to_claim};

pub(super) async fn populate_grading(input: PopulatorInput<'_>) -> Result<ClaimSet, LaunchError> {
    let scope = input.scope;
    let granted = scope.tool().granted_scopes(&ags_scope::ALL);
    let Some(context) = scope.context() else {
        return Ok(ClaimSet::Empty);
    };
    if granted.is_empty() {
        return Ok(ClaimSet::Empty);
    }

    let deployment_id = scope.deployment().id.as_str();
    let lineitems = input.urls.line_items_url(deployment_id, &context.id)?;

    let lineitem = match scope.resource_link() {
        Some(link) => {
            let mut line_items = input
                .data
                .get_line_items(&context.id, &link.id)
                .await
                .map_err(|e| LaunchError::upstream("get_line_items", e))?;
            match line_items.pop() {
                Some(item) if line_items.is_empty() => Some(
                    input
                        .urls
                        .line_item_url(deployment_id, &context.id, &item.id)?
                        .to_string()
                ),
                _ => {
                    debug!(resource_link = %link.id, "No single line item for AGS endpoint");
                    None
                }
            }
        }
        None => None
    };

    let endpoint = AgsEndpointClaim {
        scope: granted.into_iter().map(str::to_string).collect(),
        lineitems: lineitems.to_string(),
        lineitem
    };
    Ok(ClaimSet::Claims(vec![(claim::AGS_ENDPOINT, to_claim(endpoint)?)]))
}

pub(super) fn populate_membership(input: PopulatorInput<'_>) -> Result<ClaimSet, LaunchError> {
    let scope = input.scope;
    let Some(context) = scope.context() else {
        return Ok(ClaimSet::Empty);
    };
    if scope.tool().granted_scopes(&nrps_scope::ALL).is_empty() {
        return Ok(ClaimSet::Empty);
    }

    let service = NrpsClaim {
        context_memberships_url: input
            .urls
            .memberships_url(&scope.deployment().id, &context.id)?
            .to_string(),
        service_versions: NRPS_SERVICE_VERSIONS.iter().map(|v| (*v).to_string()).collect()
    };
    Ok(ClaimSet::Claims(vec![(claim::NRPS_SERVICE, to_claim(service)?)]))
}
