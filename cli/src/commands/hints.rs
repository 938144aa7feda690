use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use lti_core::{
    DeepLinkSettingsOverride, LaunchHint, LaunchPresentationOverride, LoginHint, MessageHint,
    MessageType
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::parse_message_type;
use crate::output;

#[derive(Subcommand)]
pub enum HintsCommand {
    #[command(subcommand, about = "login_hint values")]
    Login(LoginCommand),

    #[command(subcommand, about = "lti_message_hint values")]
    Message(MessageCommand),

    #[command(subcommand, about = "Opaque per-launch payloads carried in lti_message_hint")]
    Opaque(OpaqueCommand)
}

#[derive(Subcommand)]
pub enum LoginCommand {
    #[command(about = "Encode a login_hint")]
    Encode(LoginEncodeArgs),

    #[command(about = "Decode a login_hint")]
    Decode(DecodeArgs)
}

#[derive(Subcommand)]
pub enum MessageCommand {
    #[command(about = "Encode an lti_message_hint")]
    Encode(MessageEncodeArgs),

    #[command(about = "Decode an lti_message_hint, including its opaque payload")]
    Decode(DecodeArgs)
}

#[derive(Subcommand)]
pub enum OpaqueCommand {
    #[command(about = "Encode an opaque payload from JSON overrides")]
    Encode(OpaqueEncodeArgs),

    #[command(about = "Decode an opaque payload")]
    Decode(OpaqueDecodeArgs)
}

#[derive(Args)]
pub struct LoginEncodeArgs {
    #[arg(long, help = "Launching user id")]
    pub user_id: String,

    #[arg(long, help = "Mark the launch anonymous")]
    pub anonymous: bool,

    #[arg(long, help = "Real user id when impersonating")]
    pub actual_user_id: Option<String>
}

#[derive(Args)]
pub struct MessageEncodeArgs {
    #[arg(long, value_parser = parse_message_type, default_value = "LtiResourceLinkRequest")]
    pub message_type: MessageType,

    #[arg(long)]
    pub deployment_id: String,

    #[arg(long)]
    pub context_id: Option<String>,

    #[arg(long)]
    pub resource_link_id: Option<String>,

    #[arg(long, help = "Already-encoded opaque payload")]
    pub opaque_hint: Option<String>
}

#[derive(Args)]
pub struct DecodeArgs {
    #[arg(help = "Encoded hint")]
    pub hint: String,

    #[arg(long, help = "Output as JSON")]
    pub json: bool
}

#[derive(Args)]
pub struct OpaqueEncodeArgs {
    #[arg(long, value_parser = parse_message_type)]
    pub message_type: MessageType,

    #[arg(long, help = "Launch presentation override as camelCase JSON")]
    pub presentation: Option<String>,

    #[arg(long, help = "Deep linking settings override as camelCase JSON")]
    pub settings: Option<String>
}

#[derive(Args)]
pub struct OpaqueDecodeArgs {
    #[arg(help = "Opaque payload")]
    pub opaque: String,

    #[arg(long, value_parser = parse_message_type)]
    pub message_type: MessageType,

    #[arg(long, help = "Output as JSON")]
    pub json: bool
}

pub fn run(cmd: HintsCommand) -> Result<()> {
    match cmd {
        HintsCommand::Login(LoginCommand::Encode(args)) => login_encode(args),
        HintsCommand::Login(LoginCommand::Decode(args)) => login_decode(args),
        HintsCommand::Message(MessageCommand::Encode(args)) => message_encode(args),
        HintsCommand::Message(MessageCommand::Decode(args)) => message_decode(args),
        HintsCommand::Opaque(OpaqueCommand::Encode(args)) => opaque_encode(args),
        HintsCommand::Opaque(OpaqueCommand::Decode(args)) => opaque_decode(args)
    }
}

fn login_encode(args: LoginEncodeArgs) -> Result<()> {
    let mut hint = LoginHint::new(args.user_id).anonymous(args.anonymous);
    if let Some(actual) = args.actual_user_id {
        hint = hint.impersonated_by(actual);
    }
    println!("{}", hint.encode());
    Ok(())
}

fn login_decode(args: DecodeArgs) -> Result<()> {
    let hint = LoginHint::decode(&args.hint);

    if args.json {
        let output = json!({
            "user_id": hint.user_id,
            "actual_user_id": hint.actual_user_id,
            "is_anonymous": hint.is_anonymous
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    output::header("Login hint");
    output::field("user_id", non_empty(&hint.user_id));
    output::field("actual_user_id", hint.actual_user_id.as_deref());
    output::flag("anonymous", hint.is_anonymous);
    if hint.is_empty() {
        println!();
        output::hint("Expected three '|'-separated fields: user|anonymous|actual user");
    }
    Ok(())
}

fn message_encode(args: MessageEncodeArgs) -> Result<()> {
    let hint = MessageHint {
        message_type: args.message_type.as_str().to_string(),
        deployment_id: args.deployment_id,
        context_id: args.context_id,
        resource_link_id: args.resource_link_id,
        opaque_hint: args.opaque_hint
    };
    println!("{}", hint.encode());
    Ok(())
}

fn message_decode(args: DecodeArgs) -> Result<()> {
    let hint = MessageHint::decode(&args.hint);
    let launch_hint = hint.launch_hint();

    if args.json {
        let output = json!({
            "message_type": hint.message_type,
            "deployment_id": hint.deployment_id,
            "context_id": hint.context_id,
            "resource_link_id": hint.resource_link_id,
            "opaque_hint": hint.opaque_hint,
            "launch_hint": launch_hint_json(&launch_hint)?
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    output::header("Message hint");
    output::field("message_type", non_empty(&hint.message_type));
    output::field("deployment_id", non_empty(&hint.deployment_id));
    output::field("context_id", hint.context_id.as_deref());
    output::field("resource_link_id", hint.resource_link_id.as_deref());
    if hint.message_type().is_none() && !hint.message_type.is_empty() {
        println!("  {}", "unsupported message type".yellow());
    }
    println!();
    print_launch_hint(&launch_hint)?;
    Ok(())
}

fn opaque_encode(args: OpaqueEncodeArgs) -> Result<()> {
    let presentation: LaunchPresentationOverride = parse_json(args.presentation.as_deref(), "--presentation")?;

    let hint = match args.message_type {
        MessageType::ResourceLinkRequest => LaunchHint::ResourceLink(presentation),
        MessageType::DeepLinkingRequest => LaunchHint::DeepLinking {
            settings: parse_json::<DeepLinkSettingsOverride>(args.settings.as_deref(), "--settings")?,
            presentation
        }
    };

    match hint.encode() {
        Some(encoded) => println!("{encoded}"),
        None => output::hint("Empty overrides encode to no opaque hint")
    }
    Ok(())
}

fn opaque_decode(args: OpaqueDecodeArgs) -> Result<()> {
    let hint = LaunchHint::decode(args.message_type, &args.opaque);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&launch_hint_json(&hint)?)?);
        return Ok(());
    }

    print_launch_hint(&hint)
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn parse_json<T: Default + DeserializeOwned>(value: Option<&str>, flag: &str) -> Result<T> {
    match value {
        Some(value) => serde_json::from_str(value).with_context(|| format!("Invalid JSON for {flag}")),
        None => Ok(T::default())
    }
}

fn launch_hint_json(hint: &LaunchHint) -> Result<Value> {
    Ok(json!({
        "presentation": serde_json::to_value(hint.presentation())?,
        "deep_link_settings": hint.deep_link_settings().map(serde_json::to_value).transpose()?
    }))
}

fn print_launch_hint(hint: &LaunchHint) -> Result<()> {
    output::header("Launch hint");
    println!("  {:<20} {}", "presentation:", serde_json::to_string(hint.presentation())?);
    if let Some(settings) = hint.deep_link_settings() {
        println!("  {:<20} {}", "deep_link_settings:", serde_json::to_string(settings)?);
    }
    Ok(())
}
