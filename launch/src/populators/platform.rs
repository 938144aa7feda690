use errors::LaunchError;
use lti_core::claims as claim;
use tracing::debug;

use super::{ClaimSet, PopulatorInput, to_claim};

/// Platform descriptor presented to the tool's client id. Omitted when the
/// data service has none.
pub(super) async fn populate(input: PopulatorInput<'_>) -> Result<ClaimSet, LaunchError> {
    let client_id = input.scope.tool().client_id.as_str();
    let platform = input
        .data
        .get_platform(client_id)
        .await
        .map_err(|e| LaunchError::upstream("get_platform", e))?;

    match platform {
        Some(platform) => Ok(ClaimSet::Claims(vec![(
            claim::TOOL_PLATFORM,
            to_claim(platform)?
        )])),
        None => {
            debug!(client_id, "No platform descriptor");
            Ok(ClaimSet::Empty)
        }
    }
}
