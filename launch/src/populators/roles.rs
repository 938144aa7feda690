use errors::LaunchError;
use lti_core::claims as claim;
use lti_core::roles::{contains_mentor, expand_context_role};
use serde_json::Value;

use super::{ClaimSet, PopulatorInput};

/// Effective roles of the user in the launch context. Short context role
/// names from the data service are expanded to full URIs. Mentors
/// additionally get the ids of the users they mentor.
pub(super) async fn populate(input: PopulatorInput<'_>) -> Result<ClaimSet, LaunchError> {
    let scope = input.scope;
    let user_id = scope.user().id.as_str();
    let context_id = scope.context().map(|c| c.id.as_str());

    let roles = input
        .data
        .get_roles(user_id, context_id)
        .await
        .map_err(|e| LaunchError::upstream("get_roles", e))?
        .iter()
        .map(|role| expand_context_role(role))
        .collect::<Vec<_>>();

    let is_mentor = contains_mentor(&roles);
    let mut claims = vec![(claim::ROLES, string_array(roles))];
    if is_mentor {
        let mentored = input
            .data
            .get_mentored_user_ids(user_id, context_id)
            .await
            .map_err(|e| LaunchError::upstream("get_mentored_user_ids", e))?;
        if !mentored.is_empty() {
            claims.push((claim::ROLE_SCOPE_MENTOR, string_array(mentored)));
        }
    }

    Ok(ClaimSet::Claims(claims))
}

fn string_array(values: Vec<String>) -> Value {
    Value::Array(values.into_iter().map(Value::String).collect())
}
