//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use serde::Serialize;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config: &CliConfig = &ctx.config;

    ctx.output.info("");
    ctx.output.info("[page]");
    ctx.output.kv("storage_key", &config.page.storage_key);
    ctx.output.kv("ttl_minutes", &config.page.ttl_minutes.to_string());
    ctx.output.kv("ordering", &file_name(&config.page.ordering));
    ctx.output.kv("lookup_base_url", &config.page.lookup_base_url);

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.storage_path().display().to_string());

    ctx.output.info("");
    ctx.output.info("[log]");
    ctx.output.kv("level", &file_name(&config.log.level));
    ctx.output.kv("format", &file_name(&config.log.format));

    Ok(())
}

/// A unit enum spelled the way the config file spells it.
fn file_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(name)) => name,
        Ok(other) => other.to_string(),
        Err(err) => format!("<{}>", err),
    }
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("vitrine.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.check();

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use product_page::ResponseOrdering;
    use vitrine_observability::{LogFormat, LogLevel};

    #[test]
    fn test_file_names_match_config_syntax() {
        assert_eq!(file_name(&LogLevel::Warn), "warn");
        assert_eq!(file_name(&LogFormat::Human), "human");
        assert_eq!(
            file_name(&ResponseOrdering::LastRequestWins),
            "last-request-wins"
        );
    }

    #[test]
    fn test_shown_values_parse_back() {
        let config = CliConfig::default();
        let shown = format!(
            "[log]\nlevel = \"{}\"\nformat = \"{}\"\n",
            file_name(&config.log.level),
            file_name(&config.log.format)
        );
        let parsed: CliConfig = toml::from_str(&shown).unwrap();
        assert_eq!(parsed.log, config.log);
    }
}
