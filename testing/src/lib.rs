//! Shared test support for the launch workspace.
//!
//! - [`InMemoryDataService`]: a `LtiDataService` over hash maps, with
//!   per-method call counters and injectable failures
//! - [`fixtures`]: a small, consistent set of launch records

pub mod fixtures;
mod memory;

pub use memory::InMemoryDataService;
