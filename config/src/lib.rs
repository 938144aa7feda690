//! # Configuration System
//!
//! Platform configuration for the LTI launch core.
//!
//! This crate provides:
//! - Raw settings structures and the validated [`PlatformConfig`]
//! - Environment variable loading (12-factor app principles)
//! - Configuration file loading (TOML/YAML)
//! - Configuration precedence (CLI > env > file > defaults)

pub mod config;
pub mod file_loader;
pub mod loader;
pub mod precedence;
pub mod validation;

pub use config::{
    CONTEXT_ID_PLACEHOLDER, DEPLOYMENT_ID_PLACEHOLDER, DeepLinkingDefaults,
    LINE_ITEM_ID_PLACEHOLDER, PlatformConfig, PlatformSettings, RouteSettings,
};
pub use file_loader::{ConfigFileError, load_from_file, load_from_toml, load_from_yaml};
pub use loader::load_from_env;
pub use precedence::merge_settings;
pub use validation::validate;
pub use validator::Validate;
