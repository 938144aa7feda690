use anyhow::{Context, Result};
use clap::Subcommand;
use config::PlatformConfig;
use std::path::PathBuf;

use super::load_settings;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Validate configuration and print the effective settings")]
    Check {
        #[arg(short, long, help = "Platform configuration file (TOML or YAML)")]
        config: Option<PathBuf>,

        #[arg(long, help = "Output as JSON")]
        json: bool
    }
}

pub fn run(cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Check { config, json } => check(config, json)
    }
}

fn check(path: Option<PathBuf>, json: bool) -> Result<()> {
    let settings = load_settings(path.as_deref(), None)?;
    let platform = PlatformConfig::new(settings.clone()).context("Invalid platform configuration")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    output::header("Platform");
    output::field("issuer", Some(platform.issuer()));
    output::field("base_url", Some(platform.base_url().as_str()));
    output::field("service_base_url", platform.service_base_url().map(|u| u.as_str()));
    output::field("token_lifetime", Some(format!("{}s", platform.token_lifetime().as_secs()).as_str()));

    println!();
    output::header("Routes");
    let routes = platform.routes();
    output::field("deep_link_return", Some(routes.deep_link_return.as_str()));
    output::field("line_items", Some(routes.line_items.as_str()));
    output::field("line_item", Some(routes.line_item.as_str()));
    output::field("memberships", Some(routes.memberships.as_str()));

    println!();
    output::header("Deep linking defaults");
    let deep_linking = platform.deep_linking();
    output::field("accept_types", Some(deep_linking.accept_types.join(", ").as_str()));
    output::field(
        "document_targets",
        Some(deep_linking.accept_presentation_document_targets.join(", ").as_str())
    );
    output::flag("accept_multiple", deep_linking.accept_multiple);
    output::flag("accept_lineitem", deep_linking.accept_lineitem);
    output::flag("auto_create", deep_linking.auto_create);

    println!();
    output::success("Configuration is valid");
    Ok(())
}
