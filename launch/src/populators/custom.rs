use errors::LaunchError;
use serde_json::{Map, Value};

use super::{ClaimSet, PopulatorInput};

pub(super) async fn populate(input: PopulatorInput<'_>) -> Result<ClaimSet, LaunchError> {
    let substituted = input.substitution.substitute(input.scope).await?;
    if substituted.is_empty() {
        return Ok(ClaimSet::Empty);
    }

    let entries: Map<String, Value> = substituted
        .into_inner()
        .into_iter()
        .map(|(name, value)| (name, Value::String(value)))
        .collect();
    Ok(ClaimSet::CustomMerge(entries))
}
