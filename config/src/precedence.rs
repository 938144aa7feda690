//! # Configuration Precedence
//!
//! Merges platform settings from multiple sources.
//!
//! # Precedence Order
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! A field of a higher source only wins when it differs from the default, so
//! a source that leaves a field unset never clobbers a lower source.

use crate::config::{DeepLinkingDefaults, PlatformSettings, RouteSettings};

/// Merge settings sources with precedence.
///
/// # M-CANONICAL-DOCS
///
/// ## Usage
/// ```rust,no_run
/// use config::{PlatformSettings, load_from_env, load_from_file, merge_settings};
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let settings = merge_settings(
///         PlatformSettings::default(),
///         load_from_file(Path::new("platform.toml"))?,
///         "file",
///         load_from_env()?,
///         "env",
///         None,
///         "cli",
///     );
///     println!("Issuer: {}", settings.issuer);
///     Ok(())
/// }
/// ```
pub fn merge_settings(
    defaults: PlatformSettings,
    file_settings: PlatformSettings,
    file_source_name: &str,
    env_settings: PlatformSettings,
    env_source_name: &str,
    cli_settings: Option<PlatformSettings>,
    cli_source_name: &str,
) -> PlatformSettings {
    let mut settings = defaults;

    settings = merge_with_logging(settings, &file_settings, file_source_name);
    settings = merge_with_logging(settings, &env_settings, env_source_name);

    if let Some(cli) = cli_settings {
        settings = merge_with_logging(settings, &cli, cli_source_name);
    }

    settings
}

fn merge_with_logging(
    mut base: PlatformSettings,
    override_settings: &PlatformSettings,
    source_name: &str,
) -> PlatformSettings {
    let defaults = PlatformSettings::default();
    let mut changes = Vec::new();

    if override_settings.issuer != defaults.issuer && override_settings.issuer != base.issuer {
        changes.push(format!("issuer = {}", override_settings.issuer));
        base.issuer.clone_from(&override_settings.issuer);
    }
    if override_settings.base_url != defaults.base_url
        && override_settings.base_url != base.base_url
    {
        changes.push(format!("base_url = {}", override_settings.base_url));
        base.base_url.clone_from(&override_settings.base_url);
    }
    if override_settings.service_base_url.is_some()
        && override_settings.service_base_url != base.service_base_url
    {
        changes.push(format!(
            "service_base_url = {:?}",
            override_settings.service_base_url
        ));
        base.service_base_url.clone_from(&override_settings.service_base_url);
    }
    if override_settings.token_lifetime_seconds != defaults.token_lifetime_seconds
        && override_settings.token_lifetime_seconds != base.token_lifetime_seconds
    {
        changes.push(format!(
            "token_lifetime_seconds = {}",
            override_settings.token_lifetime_seconds
        ));
        base.token_lifetime_seconds = override_settings.token_lifetime_seconds;
    }

    merge_routes(&mut base.routes, &override_settings.routes, &mut changes);
    merge_deep_linking(
        &mut base.deep_linking,
        &override_settings.deep_linking,
        &mut changes,
    );

    if !changes.is_empty() {
        tracing::debug!("Configuration from {}: {:?}", source_name, changes);
    }

    base
}

fn merge_routes(base: &mut RouteSettings, override_routes: &RouteSettings, changes: &mut Vec<String>) {
    let defaults = RouteSettings::default();

    let fields = [
        (
            "routes.deep_link_return",
            &mut base.deep_link_return,
            &override_routes.deep_link_return,
            &defaults.deep_link_return
        ),
        (
            "routes.line_items",
            &mut base.line_items,
            &override_routes.line_items,
            &defaults.line_items
        ),
        (
            "routes.line_item",
            &mut base.line_item,
            &override_routes.line_item,
            &defaults.line_item
        ),
        (
            "routes.memberships",
            &mut base.memberships,
            &override_routes.memberships,
            &defaults.memberships
        )
    ];

    for (name, target, value, default) in fields {
        if value != default && value != target {
            changes.push(format!("{name} = {value}"));
            target.clone_from(value);
        }
    }
}

fn merge_deep_linking(
    base: &mut DeepLinkingDefaults,
    override_defaults: &DeepLinkingDefaults,
    changes: &mut Vec<String>,
) {
    let defaults = DeepLinkingDefaults::default();

    if override_defaults.accept_types != defaults.accept_types
        && override_defaults.accept_types != base.accept_types
    {
        changes.push(format!(
            "deep_linking.accept_types = {:?}",
            override_defaults.accept_types
        ));
        base.accept_types.clone_from(&override_defaults.accept_types);
    }
    if override_defaults.accept_presentation_document_targets
        != defaults.accept_presentation_document_targets
        && override_defaults.accept_presentation_document_targets
            != base.accept_presentation_document_targets
    {
        changes.push(format!(
            "deep_linking.accept_presentation_document_targets = {:?}",
            override_defaults.accept_presentation_document_targets
        ));
        base.accept_presentation_document_targets
            .clone_from(&override_defaults.accept_presentation_document_targets);
    }
    if override_defaults.accept_media_types != defaults.accept_media_types
        && override_defaults.accept_media_types != base.accept_media_types
    {
        changes.push(format!(
            "deep_linking.accept_media_types = {:?}",
            override_defaults.accept_media_types
        ));
        base.accept_media_types.clone_from(&override_defaults.accept_media_types);
    }
    if override_defaults.accept_multiple != defaults.accept_multiple {
        changes.push(format!(
            "deep_linking.accept_multiple = {}",
            override_defaults.accept_multiple
        ));
        base.accept_multiple = override_defaults.accept_multiple;
    }
    if override_defaults.accept_lineitem != defaults.accept_lineitem {
        changes.push(format!(
            "deep_linking.accept_lineitem = {}",
            override_defaults.accept_lineitem
        ));
        base.accept_lineitem = override_defaults.accept_lineitem;
    }
    if override_defaults.auto_create != defaults.auto_create {
        changes.push(format!("deep_linking.auto_create = {}", override_defaults.auto_create));
        base.auto_create = override_defaults.auto_create;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_file() {
        let file = PlatformSettings {
            issuer: "https://file.example".to_string(),
            token_lifetime_seconds: 120,
            ..Default::default()
        };
        let env = PlatformSettings {
            issuer: "https://env.example".to_string(),
            ..Default::default()
        };

        let merged = merge_settings(PlatformSettings::default(), file, "file", env, "env", None, "cli");
        assert_eq!(merged.issuer, "https://env.example");
        assert_eq!(merged.token_lifetime_seconds, 120);
    }

    #[test]
    fn test_cli_wins() {
        let cli = PlatformSettings {
            base_url: "https://cli.example".to_string(),
            ..Default::default()
        };
        let merged = merge_settings(
            PlatformSettings::default(),
            PlatformSettings::default(),
            "file",
            PlatformSettings::default(),
            "env",
            Some(cli),
            "cli"
        );
        assert_eq!(merged.base_url, "https://cli.example");
    }

    #[test]
    fn test_unset_source_does_not_clobber() {
        let mut file = PlatformSettings::default();
        file.routes.memberships = "/nrps/{context_id}".to_string();
        file.deep_linking.accept_multiple = false;

        let merged = merge_settings(
            PlatformSettings::default(),
            file,
            "file",
            PlatformSettings::default(),
            "env",
            None,
            "cli"
        );
        assert_eq!(merged.routes.memberships, "/nrps/{context_id}");
        assert!(!merged.deep_linking.accept_multiple);
    }
}
