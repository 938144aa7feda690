//! # Claim Populators
//!
//! Each [`Populator`] owns a fixed, disjoint set of top-level claim keys and
//! computes its share of the launch payload from the [`MessageScope`].
//!
//! The registry maps a message type to the ordered populator list that runs
//! for it. Populators never touch the document: they return a
//! [`Contribution`] and the assembler reduces those in registry order.

pub mod claims;
mod context;
mod custom;
mod deep_linking;
mod identity;
mod platform;
mod resource_link;
mod roles;
mod services;

use errors::LaunchError;
use lti_core::claims as claim;
use lti_core::{LtiDataService, MessageScope, MessageType};
use serde::Serialize;
use serde_json::{Map, Value};
use strum::{Display, EnumIter, IntoStaticStr};

use crate::substitution::CustomVariableEngine;
use crate::urls::UrlBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Populator {
    UserIdentity,
    Context,
    Platform,
    ResourceLink,
    DeepLinking,
    Roles,
    GradingService,
    MembershipService,
    Custom
}

const RESOURCE_LINK_POPULATORS: &[Populator] = &[
    Populator::UserIdentity,
    Populator::Context,
    Populator::Platform,
    Populator::ResourceLink,
    Populator::Roles,
    Populator::GradingService,
    Populator::MembershipService,
    Populator::Custom
];

const DEEP_LINKING_POPULATORS: &[Populator] = &[
    Populator::UserIdentity,
    Populator::Context,
    Populator::Platform,
    Populator::DeepLinking,
    Populator::Roles,
    Populator::GradingService,
    Populator::MembershipService,
    Populator::Custom
];

/// Everything a populator may read.
#[derive(Clone, Copy)]
pub struct PopulatorInput<'a> {
    pub scope: &'a MessageScope,
    pub data: &'a dyn LtiDataService,
    pub urls: &'a UrlBuilder,
    pub substitution: &'a CustomVariableEngine
}

/// The claims one populator produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimSet {
    /// Top-level claims, each key one of the populator's own.
    Claims(Vec<(&'static str, Value)>),
    /// Entries merged into the custom claim; new values win.
    CustomMerge(Map<String, Value>),
    Empty
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub populator: Populator,
    pub claims: ClaimSet
}

impl Populator {
    /// Ordered populator list for a message type.
    pub fn for_message_type(message_type: MessageType) -> &'static [Populator] {
        match message_type {
            MessageType::ResourceLinkRequest => RESOURCE_LINK_POPULATORS,
            MessageType::DeepLinkingRequest => DEEP_LINKING_POPULATORS
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Top-level keys this populator may write.
    pub fn claim_keys(&self) -> &'static [&'static str] {
        match self {
            Self::UserIdentity => &[
                claim::SUB,
                claim::NAME,
                claim::GIVEN_NAME,
                claim::FAMILY_NAME,
                claim::EMAIL,
                claim::PICTURE,
                claim::LOCALE
            ],
            Self::Context => &[claim::CONTEXT],
            Self::Platform => &[claim::TOOL_PLATFORM],
            Self::ResourceLink => &[
                claim::MESSAGE_TYPE,
                claim::VERSION,
                claim::DEPLOYMENT_ID,
                claim::TARGET_LINK_URI,
                claim::RESOURCE_LINK,
                claim::LAUNCH_PRESENTATION
            ],
            Self::DeepLinking => &[
                claim::MESSAGE_TYPE,
                claim::VERSION,
                claim::DEPLOYMENT_ID,
                claim::TARGET_LINK_URI,
                claim::DEEP_LINKING_SETTINGS,
                claim::LAUNCH_PRESENTATION
            ],
            Self::Roles => &[claim::ROLES, claim::ROLE_SCOPE_MENTOR],
            Self::GradingService => &[claim::AGS_ENDPOINT],
            Self::MembershipService => &[claim::NRPS_SERVICE],
            Self::Custom => &[claim::CUSTOM]
        }
    }

    /// Computes this populator's claims.
    ///
    /// Absent optional scope data yields [`ClaimSet::Empty`]. Only the
    /// resource-link populator fails on absent data.
    pub async fn populate(&self, input: PopulatorInput<'_>) -> Result<Contribution, LaunchError> {
        let claims = match self {
            Self::UserIdentity => identity::populate(input),
            Self::Context => context::populate(input)?,
            Self::Platform => platform::populate(input).await?,
            Self::ResourceLink => resource_link::populate(input)?,
            Self::DeepLinking => deep_linking::populate(input)?,
            Self::Roles => roles::populate(input).await?,
            Self::GradingService => services::populate_grading(input).await?,
            Self::MembershipService => services::populate_membership(input)?,
            Self::Custom => custom::populate(input).await?
        };

        Ok(Contribution {
            populator: *self,
            claims
        })
    }
}

pub(crate) fn to_claim<T: Serialize>(value: T) -> Result<Value, LaunchError> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_registry_keys_are_disjoint() {
        for message_type in MessageType::ALL {
            let mut seen = HashSet::new();
            for populator in Populator::for_message_type(message_type) {
                for key in populator.claim_keys() {
                    assert!(
                        seen.insert(*key),
                        "{key} written by more than one populator for {message_type}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_message_type_specific_populators() {
        let resource_link = Populator::for_message_type(MessageType::ResourceLinkRequest);
        let deep_linking = Populator::for_message_type(MessageType::DeepLinkingRequest);

        assert!(resource_link.contains(&Populator::ResourceLink));
        assert!(!resource_link.contains(&Populator::DeepLinking));
        assert!(deep_linking.contains(&Populator::DeepLinking));
        assert!(!deep_linking.contains(&Populator::ResourceLink));
    }

    #[test]
    fn test_every_populator_is_registered() {
        for populator in Populator::iter() {
            assert!(
                MessageType::ALL
                    .iter()
                    .any(|mt| Populator::for_message_type(*mt).contains(&populator)),
                "{populator} is not registered"
            );
        }
    }

    #[test]
    fn test_custom_runs_last() {
        for message_type in MessageType::ALL {
            assert_eq!(
                Populator::for_message_type(message_type).last(),
                Some(&Populator::Custom)
            );
        }
    }
}
