//! Configuration view and validation commands: `bugpilot config`.

use anyhow::{Result, bail};
use bugpilot::config::{BugpilotToml, Config};

use super::super::ConfigCommands;

pub fn cmd_config(config: &Config, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = &config.config_path;

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("BugPilot Configuration");
            println!("======================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No bugpilot.toml found at {}", config_path.display());
                println!("Using default configuration:");
            }
            println!();

            let toml = config.toml();
            println!("[api]");
            println!("  base_url = \"{}\"", toml.api.base_url);
            println!("  timeout_secs = {}", toml.api.timeout_secs);
            println!();
            println!("[board]");
            println!("  show_descriptions = {}", toml.board.show_descriptions);
            println!();

            println!("Effective values (with env/CLI overrides):");
            println!("  base_url = \"{}\"", config.base_url);
            println!("  session_file = \"{}\"", config.session_path.display());
            println!();
        }
        Some(ConfigCommands::Validate) => {
            let warnings = config.validate();
            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in &warnings {
                    println!("  - {}", warning);
                }
            }
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                bail!("bugpilot.toml already exists at {}", config_path.display());
            }
            BugpilotToml::default().save(config_path)?;
            println!("Created {}", config_path.display());
        }
    }
    Ok(())
}
