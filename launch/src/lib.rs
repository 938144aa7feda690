//! # LTI Launch
//!
//! The asynchronous half of the platform launch core.
//!
//! This crate provides:
//! - [`MessageScopeResolver`]: ids and hints to a validated scope
//! - [`Populator`] registry and [`ClaimsAssembler`]: scope to claims
//! - [`CustomVariableEngine`]: custom parameter substitution
//! - [`UrlBuilder`]: initiation redirect and service endpoint URLs
//! - [`LaunchService`]: the OIDC authorization request flow

pub mod assembler;
pub mod authorization;
pub mod populators;
pub mod scope;
pub mod substitution;
pub mod urls;

mod telemetry;

pub use assembler::{ClaimsAssembler, ClaimsDocument, reduce};
pub use authorization::{AuthorizationRequest, AuthorizedLaunch, LaunchService};
pub use populators::{ClaimSet, Contribution, Populator, PopulatorInput};
pub use scope::{MessageScopeResolver, ScopeRequest, scope_request_from_hints};
pub use substitution::{CustomVariableEngine, FetchedData, Requirements, format_datetime};
pub use urls::{InitiationRequest, UrlBuilder, default_target_link_uri};
