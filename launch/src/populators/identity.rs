//! OIDC identity claims of the launching user.

use lti_core::claims as claim;
use serde_json::Value;

use super::{ClaimSet, PopulatorInput};

/// Anonymous launches carry no identity at all, not even `sub`.
pub(super) fn populate(input: PopulatorInput<'_>) -> ClaimSet {
    let scope = input.scope;
    if scope.is_anonymous() {
        return ClaimSet::Empty;
    }

    let user = scope.user();
    let permissions = &scope.tool().user_permissions;

    let gated = [
        (claim::NAME, permissions.name, &user.name),
        (claim::GIVEN_NAME, permissions.given_name, &user.given_name),
        (claim::FAMILY_NAME, permissions.family_name, &user.family_name),
        (claim::EMAIL, permissions.email, &user.email),
        (claim::PICTURE, permissions.picture, &user.image),
        (claim::LOCALE, permissions.locale, &user.locale)
    ];

    let mut claims = vec![(claim::SUB, Value::String(user.id.clone()))];
    claims.extend(gated.into_iter().filter_map(|(key, allowed, value)| {
        let value = value.as_ref().filter(|_| allowed)?;
        Some((key, Value::String(value.clone())))
    }));

    ClaimSet::Claims(claims)
}
