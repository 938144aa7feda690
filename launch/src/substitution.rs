//! # Custom Variable Substitution
//!
//! Resolves `$User.*` and `$ResourceLink.*` tokens in the merged custom
//! parameter map of a launch.
//!
//! Auxiliary records (membership, attempt, line item, grade) are fetched only
//! when a permitted token needs them. The needs are computed up front as a
//! [`Requirements`] set and satisfied by a single concurrent batch.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use errors::LaunchError;
use lti_core::roles::contains_mentor;
use lti_core::{
    Attempt, AuxiliaryData, CustomVariable, CustomVariableMap, Grade, LineItem, LtiDataService,
    Membership, MessageScope, VariableScope
};
use tracing::{debug, instrument};

use crate::telemetry::Telemetry;

/// Auxiliary fetches one launch needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requirements {
    pub membership: bool,
    pub attempt: bool,
    pub line_items: bool,
    pub grade: bool
}

impl Requirements {
    /// Computes the fetches needed by the permitted tokens of `variables`.
    ///
    /// A token whose scope data is absent from the launch (no context, no
    /// resource link) needs nothing: it will be removed regardless.
    pub fn for_scope(variables: &CustomVariableMap, scope: &MessageScope) -> Self {
        let has_context = scope.context().is_some();
        let has_link = has_context && scope.resource_link().is_some();

        let mut requirements = Self::default();
        for variable in variables.variables().filter(|v| is_substitutable(*v, scope)) {
            match variable.auxiliary_data() {
                AuxiliaryData::Membership => requirements.membership |= has_context,
                AuxiliaryData::Attempt => requirements.attempt |= has_link,
                AuxiliaryData::LineItem => requirements.line_items |= has_link,
                AuxiliaryData::Grade => {
                    requirements.line_items |= has_link;
                    requirements.grade |= has_link;
                }
                AuxiliaryData::None => {}
            }
        }
        requirements
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Result of the auxiliary batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedData {
    pub membership: Option<Membership>,
    pub attempt: Option<Attempt>,
    /// Set only when exactly one line item is bound to the resource link.
    pub line_item: Option<LineItem>,
    pub grade: Option<Grade>
}

#[derive(Clone)]
pub struct CustomVariableEngine {
    data: Arc<dyn LtiDataService>
}

impl CustomVariableEngine {
    pub fn new(data: Arc<dyn LtiDataService>) -> Self {
        Self { data }
    }

    /// Merges the custom maps of the scope and substitutes every token.
    ///
    /// Literal values pass through unchanged. A token that is denied by the
    /// tool's permissions, or whose data is unavailable, removes its key.
    #[instrument(skip_all, fields(tool_id = %scope.tool().id))]
    pub async fn substitute(&self, scope: &MessageScope) -> Result<CustomVariableMap, LaunchError> {
        let merged = scope.custom_variables();
        if merged.is_empty() {
            return Ok(merged);
        }

        let requirements = Requirements::for_scope(&merged, scope);
        let fetched = if requirements.is_empty() {
            FetchedData::default()
        } else {
            self.fetch(requirements, scope).await?
        };

        Ok(apply(merged, scope, &fetched))
    }

    /// Runs the auxiliary fetches named by `requirements` as one batch.
    ///
    /// The grade lookup needs the line item id, so it runs after the line
    /// item lookup within the batch.
    pub async fn fetch(
        &self,
        requirements: Requirements,
        scope: &MessageScope,
    ) -> Result<FetchedData, LaunchError> {
        let data = self.data.as_ref();
        let user_id = scope.user().id.as_str();
        let context_id = scope.context().map(|c| c.id.as_str());
        let link_id = scope.resource_link().map(|l| l.id.as_str());

        debug!(?requirements, "Fetching auxiliary launch data");

        let membership = async {
            match (requirements.membership, context_id) {
                (true, Some(context_id)) => data
                    .get_membership(context_id, user_id)
                    .await
                    .map_err(|e| LaunchError::upstream("get_membership", e)),
                _ => Ok(None)
            }
        };

        let attempt = async {
            match (requirements.attempt, link_id) {
                (true, Some(link_id)) => data
                    .get_attempt(link_id, user_id)
                    .await
                    .map_err(|e| LaunchError::upstream("get_attempt", e)),
                _ => Ok(None)
            }
        };

        let grading = async {
            let (true, Some(context_id), Some(link_id)) = (requirements.line_items, context_id, link_id)
            else {
                return Ok::<_, LaunchError>((None, None));
            };

            let mut line_items = data
                .get_line_items(context_id, link_id)
                .await
                .map_err(|e| LaunchError::upstream("get_line_items", e))?;
            let line_item = if line_items.len() == 1 {
                line_items.pop()
            } else {
                debug!(count = line_items.len(), "No single line item for resource link");
                None
            };

            let grade = match (&line_item, requirements.grade) {
                (Some(item), true) => data
                    .get_grade(&item.id, user_id)
                    .await
                    .map_err(|e| LaunchError::upstream("get_grade", e))?,
                _ => None
            };
            Ok((line_item, grade))
        };

        let (membership, attempt, (line_item, grade)) =
            tokio::try_join!(membership, attempt, grading)?;

        Ok(FetchedData {
            membership,
            attempt,
            line_item,
            grade
        })
    }
}

// User tokens would reveal identity on anonymous launches.
fn is_substitutable(variable: CustomVariable, scope: &MessageScope) -> bool {
    if scope.is_anonymous() && variable.scope() == VariableScope::User {
        return false;
    }
    scope.tool().custom_permissions.allows(variable)
}

fn apply(merged: CustomVariableMap, scope: &MessageScope, fetched: &FetchedData) -> CustomVariableMap {
    let mut output = CustomVariableMap::new();
    let mut removed = 0;

    for (name, value) in merged.into_inner() {
        let Some(variable) = CustomVariable::parse(&value) else {
            output.insert(name, value);
            continue;
        };

        let resolved = if is_substitutable(variable, scope) {
            resolve(variable, scope, fetched)
        } else {
            None
        };

        match resolved {
            Some(literal) => output.insert(name, literal),
            None => {
                debug!(custom = %name, token = variable.as_str(), "Removed custom parameter");
                removed += 1;
            }
        }
    }

    Telemetry::record_custom_variables_removed(removed);
    output
}

fn resolve(variable: CustomVariable, scope: &MessageScope, fetched: &FetchedData) -> Option<String> {
    let user = scope.user();
    let link = scope.resource_link();
    let attempt = fetched.attempt.as_ref();

    match variable {
        CustomVariable::UserId => Some(user.id.clone()),
        CustomVariable::UserImage => user.image.clone(),
        CustomVariable::UserUsername => user.username.clone(),
        CustomVariable::UserOrg => Some(user.orgs.join(",")),
        CustomVariable::UserGradeLevelsOneRoster => Some(user.grade_levels.join(",")),
        CustomVariable::UserScopeMentor => fetched
            .membership
            .as_ref()
            .filter(|m| contains_mentor(&m.roles))
            .map(|m| m.mentored_user_ids.join(",")),

        CustomVariable::ResourceLinkAvailableStartDateTime => {
            datetime(link.and_then(|l| l.available_start_date_time))
        }
        CustomVariable::ResourceLinkAvailableEndDateTime => {
            datetime(link.and_then(|l| l.available_end_date_time))
        }
        CustomVariable::ResourceLinkSubmissionStartDateTime => {
            datetime(link.and_then(|l| l.submission_start_date_time))
        }
        CustomVariable::ResourceLinkSubmissionEndDateTime => {
            datetime(link.and_then(|l| l.submission_end_date_time))
        }

        CustomVariable::ResourceLinkAvailableUserStartDateTime => {
            datetime(attempt.and_then(|a| a.available_start_date_time))
        }
        CustomVariable::ResourceLinkAvailableUserEndDateTime => {
            datetime(attempt.and_then(|a| a.available_end_date_time))
        }
        CustomVariable::ResourceLinkSubmissionUserStartDateTime => {
            datetime(attempt.and_then(|a| a.submission_start_date_time))
        }
        CustomVariable::ResourceLinkSubmissionUserEndDateTime => {
            datetime(attempt.and_then(|a| a.submission_end_date_time))
        }

        CustomVariable::LineItemReleaseDateTime => {
            datetime(fetched.line_item.as_ref().and_then(|i| i.grades_released_date_time))
        }
        CustomVariable::LineItemUserReleaseDateTime => {
            datetime(fetched.grade.as_ref().and_then(|g| g.release_date_time))
        }
    }
}

/// Timestamps render as RFC 3339 UTC with milliseconds, e.g.
/// `2024-03-01T09:30:00.000Z`.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn datetime(value: Option<DateTime<Utc>>) -> Option<String> {
    value.as_ref().map(format_datetime)
}
