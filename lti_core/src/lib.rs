//! # LTI Platform Launch Core
//!
//! Shared types, vocabularies and the hint codec for the platform side of an
//! LTI 1.3 launch.
//!
//! This crate provides:
//! - The launch data model and the immutable [`MessageScope`]
//! - The `login_hint` / `lti_message_hint` codec
//! - Claim URI, scope URI and role vocabularies
//! - The custom-variable token vocabulary
//! - The [`LtiDataService`] trait the core reads through

pub mod claims;
pub mod hints;
pub mod roles;
pub mod scope;
pub mod traits;
pub mod types;
pub mod variables;

// Re-export commonly used types for convenience
pub use hints::{
    DeepLinkSettingsOverride, LaunchHint, LaunchPresentationOverride, LoginHint, MessageHint
};
pub use scope::{MessageScope, MessageScopeParts};
pub use traits::{DataResult, LtiDataService};
pub use types::{
    Attempt, Context, CustomPermissions, CustomVariableMap, Deployment, Grade, LineItem,
    Membership, MessageType, Platform, ResourceLink, Tool, User, UserPermissions
};
pub use variables::{AuxiliaryData, CustomVariable, VariableScope};
