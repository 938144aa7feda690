pub mod hints;
pub mod initiation;
pub mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{PlatformSettings, load_from_env, load_from_file, merge_settings};
use lti_core::MessageType;
use std::path::Path;

#[derive(Parser)]
#[command(
    name = "lti",
    author,
    version,
    about = "LTI 1.3 platform launch tools",
    long_about = "Encode and decode launch hints, build tool initiation URLs and check platform \
                  configuration.\n\nConfiguration is read from --config (TOML or YAML) and LTI_* \
                  environment variables, environment winning."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(subcommand, about = "Encode and decode login_hint and lti_message_hint values")]
    Hints(hints::HintsCommand),

    #[command(about = "Build the third-party login initiation URL for a tool")]
    InitiationUrl(initiation::InitiationArgs),

    #[command(subcommand, about = "Inspect platform configuration")]
    Config(settings::ConfigCommand)
}

pub(crate) fn parse_message_type(value: &str) -> Result<MessageType, String> {
    value.parse().map_err(|_| {
        format!("unknown message type {value:?} (expected LtiResourceLinkRequest or LtiDeepLinkingRequest)")
    })
}

/// Defaults, then the optional file, then `LTI_*` variables, then flags.
pub(crate) fn load_settings(path: Option<&Path>, issuer: Option<&str>) -> Result<PlatformSettings> {
    let file_settings = match path {
        Some(path) => load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => PlatformSettings::default()
    };
    let env_settings = load_from_env().context("Invalid LTI_* environment variable")?;
    let cli_settings = issuer.map(|issuer| PlatformSettings {
        issuer: issuer.to_string(),
        ..Default::default()
    });

    Ok(merge_settings(
        PlatformSettings::default(),
        file_settings,
        "file",
        env_settings,
        "env",
        cli_settings,
        "cli"
    ))
}
