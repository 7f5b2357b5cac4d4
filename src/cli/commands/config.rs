//! `dca config` command - Configuration management
//!
//! Provides commands to view and modify DCA configuration.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::config::{KEYS, PROJECT_DIR};
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., export_dir, default_format)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in global (user) config instead of project config
    #[arg(long, short = 'g')]
    pub global: bool,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, _global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Set(args) => run_set(args),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        let value = config
            .value(key)
            .ok_or_else(|| miette::miette!("Unknown key '{}'. See 'dca config keys'", key))?;
        println!("{}", value);
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in KEYS {
        let value = config.value(key).unwrap_or_default();
        println!("  {}: {}", style(key).cyan(), style(value).yellow());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (DCA_EXPORT_DIR, DCA_DEFAULT_FORMAT, ...)");
    println!("  2. Project config ({}/config.yaml)", PROJECT_DIR);
    println!("  3. Global config (~/.config/dca/config.yaml)");
    Ok(())
}

fn run_set(args: SetArgs) -> Result<()> {
    if !KEYS.iter().any(|(k, _)| *k == args.key) {
        return Err(miette::miette!(
            "Unknown key '{}'. See 'dca config keys'",
            args.key
        ));
    }

    let config_path = if args.global {
        global_config_path()?
    } else {
        project_config_path()
    };

    let mut config_map: serde_yml::Value = if config_path.exists() {
        let content = fs::read_to_string(&config_path).into_diagnostic()?;
        let parsed: serde_yml::Value = serde_yml::from_str(&content)
            .unwrap_or(serde_yml::Value::Mapping(Default::default()));
        if parsed.is_mapping() {
            parsed
        } else {
            serde_yml::Value::Mapping(Default::default())
        }
    } else {
        serde_yml::Value::Mapping(Default::default())
    };

    let value = match args.value.parse::<u64>() {
        Ok(n) => serde_yml::Value::Number(n.into()),
        Err(_) => serde_yml::Value::String(args.value.clone()),
    };
    if let serde_yml::Value::Mapping(map) = &mut config_map {
        map.insert(serde_yml::Value::String(args.key.clone()), value);
    }

    // Reject values the loader would not accept
    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    serde_yml::from_str::<Config>(&yaml)
        .map_err(|e| miette::miette!("Invalid value for '{}': {}", args.key, e))?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    fs::write(&config_path, yaml).into_diagnostic()?;

    let scope = if args.global { "global" } else { "project" };
    println!(
        "{} Set {} {} {} in {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(&args.value).yellow(),
        scope
    );
    Ok(())
}

fn run_path() -> Result<()> {
    let global_path = global_config_path()?;
    let project_path = project_config_path();

    println!("{}", style("Configuration file paths:").bold());
    println!();
    for (label, path) in [("Global:", global_path), ("Project:", project_path)] {
        println!("  {} {}", style(label).cyan(), path.display());
        if path.exists() {
            println!("          {}", style("(exists)").green());
        } else {
            println!("          {}", style("(not created)").dim());
        }
    }
    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in KEYS {
        println!("  {:<27} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'dca config set <key> <value>' to set a value.").dim()
    );
    Ok(())
}

fn global_config_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine the user config directory"))
}

fn project_config_path() -> PathBuf {
    PathBuf::from(PROJECT_DIR).join("config.yaml")
}
