//! The fixed vocabulary of custom-variable tokens.
//!
//! A custom parameter value is either a literal or exactly one of these
//! tokens. Tokens are matched case-sensitively against the whole value.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum CustomVariable {
    #[strum(serialize = "$User.id")]
    UserId,
    #[strum(serialize = "$User.image")]
    UserImage,
    #[strum(serialize = "$User.username")]
    UserUsername,
    #[strum(serialize = "$User.org")]
    UserOrg,
    #[strum(serialize = "$User.scope.mentor")]
    UserScopeMentor,
    #[strum(serialize = "$User.gradeLevels.oneRoster")]
    UserGradeLevelsOneRoster,

    #[strum(serialize = "$ResourceLink.available.startDateTime")]
    ResourceLinkAvailableStartDateTime,
    #[strum(serialize = "$ResourceLink.available.user.startDateTime")]
    ResourceLinkAvailableUserStartDateTime,
    #[strum(serialize = "$ResourceLink.available.endDateTime")]
    ResourceLinkAvailableEndDateTime,
    #[strum(serialize = "$ResourceLink.available.user.endDateTime")]
    ResourceLinkAvailableUserEndDateTime,
    #[strum(serialize = "$ResourceLink.submission.startDateTime")]
    ResourceLinkSubmissionStartDateTime,
    #[strum(serialize = "$ResourceLink.submission.user.startDateTime")]
    ResourceLinkSubmissionUserStartDateTime,
    #[strum(serialize = "$ResourceLink.submission.endDateTime")]
    ResourceLinkSubmissionEndDateTime,
    #[strum(serialize = "$ResourceLink.submission.user.endDateTime")]
    ResourceLinkSubmissionUserEndDateTime,
    #[strum(serialize = "$ResourceLink.lineitem.releaseDateTime")]
    LineItemReleaseDateTime,
    #[strum(serialize = "$ResourceLink.lineitem.user.releaseDateTime")]
    LineItemUserReleaseDateTime
}

/// The vocabulary a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableScope {
    User,
    ResourceLink
}

/// Auxiliary data a token needs beyond the message scope itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxiliaryData {
    None,
    Membership,
    Attempt,
    LineItem,
    Grade
}

impl CustomVariable {
    /// Parses a value as a token; literals yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        value.parse().ok()
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub fn scope(&self) -> VariableScope {
        match self {
            Self::UserId
            | Self::UserImage
            | Self::UserUsername
            | Self::UserOrg
            | Self::UserScopeMentor
            | Self::UserGradeLevelsOneRoster => VariableScope::User,
            _ => VariableScope::ResourceLink
        }
    }

    pub fn auxiliary_data(&self) -> AuxiliaryData {
        match self {
            Self::UserScopeMentor => AuxiliaryData::Membership,
            Self::ResourceLinkAvailableUserStartDateTime
            | Self::ResourceLinkAvailableUserEndDateTime
            | Self::ResourceLinkSubmissionUserStartDateTime
            | Self::ResourceLinkSubmissionUserEndDateTime => AuxiliaryData::Attempt,
            Self::LineItemReleaseDateTime => AuxiliaryData::LineItem,
            Self::LineItemUserReleaseDateTime => AuxiliaryData::Grade,
            _ => AuxiliaryData::None
        }
    }
}
