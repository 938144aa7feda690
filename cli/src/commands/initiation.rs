use anyhow::{Context, Result, bail};
use clap::Args;
use config::PlatformConfig;
use launch::{InitiationRequest, UrlBuilder};
use lti_core::{
    DeepLinkSettingsOverride, LaunchHint, LaunchPresentationOverride, LoginHint, MessageType,
    ResourceLink, Tool
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

use super::{load_settings, parse_message_type};
use crate::output;

#[derive(Args)]
pub struct InitiationArgs {
    #[arg(short, long, help = "Platform configuration file (TOML or YAML)")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "LTI_ISSUER", help = "Override the platform issuer")]
    pub issuer: Option<String>,

    #[arg(long, help = "Tool registration as camelCase JSON")]
    pub tool: PathBuf,

    #[arg(long, value_parser = parse_message_type, default_value = "LtiResourceLinkRequest")]
    pub message_type: MessageType,

    #[arg(long)]
    pub deployment_id: String,

    #[arg(long)]
    pub context_id: Option<String>,

    #[arg(long, requires = "context_id")]
    pub resource_link_id: Option<String>,

    #[arg(long, requires = "resource_link_id", help = "Launch URL stored on the resource link")]
    pub resource_link_url: Option<String>,

    #[arg(long)]
    pub user_id: String,

    #[arg(long)]
    pub anonymous: bool,

    #[arg(long)]
    pub actual_user_id: Option<String>,

    #[arg(long, help = "Explicit target_link_uri")]
    pub target_link_uri: Option<String>,

    #[arg(long, help = "Override launch_presentation.document_target")]
    pub document_target: Option<String>,

    #[arg(long, help = "Override launch_presentation.return_url")]
    pub return_url: Option<String>,

    #[arg(long, help = "Output as JSON")]
    pub json: bool
}

pub fn run(args: InitiationArgs) -> Result<()> {
    let settings = load_settings(args.config.as_deref(), args.issuer.as_deref())?;
    let config = PlatformConfig::new(settings).context("Invalid platform configuration")?;
    let urls = UrlBuilder::new(Arc::new(config));

    let tool = read_tool(&args)?;
    let resource_link = resource_link(&args);
    if args.message_type == MessageType::ResourceLinkRequest && resource_link.is_none() {
        bail!("--resource-link-id is required for {}", args.message_type);
    }

    let mut login_hint = LoginHint::new(args.user_id.as_str()).anonymous(args.anonymous);
    if let Some(actual) = &args.actual_user_id {
        login_hint = login_hint.impersonated_by(actual.as_str());
    }

    let request = InitiationRequest {
        tool: &tool,
        message_type: args.message_type,
        deployment_id: &args.deployment_id,
        context_id: args.context_id.as_deref(),
        resource_link: resource_link.as_ref(),
        login_hint,
        launch_hint: launch_hint(&args),
        target_link_uri: args.target_link_uri.as_deref()
    };
    let url = urls.initiation_url(&request)?;

    if args.json {
        let params: serde_json::Map<String, serde_json::Value> = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), json!(value)))
            .collect();
        let output = json!({ "url": url.as_str(), "params": params });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    output::header(&format!("Initiation URL for {}", tool.name));
    for (key, value) in url.query_pairs() {
        output::field(&key, Some(value.as_ref()));
    }
    println!();
    println!("{url}");
    Ok(())
}

fn read_tool(args: &InitiationArgs) -> Result<Tool> {
    let raw = std::fs::read_to_string(&args.tool)
        .with_context(|| format!("Failed to read tool file {}", args.tool.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid tool registration in {}", args.tool.display()))
}

fn resource_link(args: &InitiationArgs) -> Option<ResourceLink> {
    let id = args.resource_link_id.clone()?;
    Some(ResourceLink {
        id,
        context_id: args.context_id.clone().unwrap_or_default(),
        url: args.resource_link_url.clone(),
        title: None,
        text: None,
        custom: Default::default(),
        available_start_date_time: None,
        available_end_date_time: None,
        submission_start_date_time: None,
        submission_end_date_time: None
    })
}

fn launch_hint(args: &InitiationArgs) -> Option<LaunchHint> {
    let presentation = LaunchPresentationOverride {
        document_target: args.document_target.clone(),
        return_url: args.return_url.clone(),
        ..Default::default()
    };

    match args.message_type {
        MessageType::ResourceLinkRequest if presentation.is_empty() => None,
        MessageType::ResourceLinkRequest => Some(LaunchHint::ResourceLink(presentation)),
        MessageType::DeepLinkingRequest => Some(LaunchHint::DeepLinking {
            settings: DeepLinkSettingsOverride::default(),
            presentation
        })
    }
}
