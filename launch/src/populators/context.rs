use errors::LaunchError;
use lti_core::claims as claim;

use super::claims::ContextClaim;
use super::{ClaimSet, PopulatorInput, to_claim};

pub(super) fn populate(input: PopulatorInput<'_>) -> Result<ClaimSet, LaunchError> {
    let Some(context) = input.scope.context() else {
        return Ok(ClaimSet::Empty);
    };

    Ok(ClaimSet::Claims(vec![(
        claim::CONTEXT,
        to_claim(ContextClaim::from(context))?
    )]))
}
