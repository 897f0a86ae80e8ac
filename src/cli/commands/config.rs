//! Configuration management commands

use anyhow::{bail, Result};
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{print_formatted, print_success, OutputFormat};
use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a config value
    Set {
        /// Config key: api.base_url, api.request_timeout_secs, ui.dark_theme or ui.toast_seconds
        key: String,

        /// Value to set ("none" clears the request timeout)
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format),
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load()?;
            set_config_value(&mut config, &key, &value)?;
            config.save()?;
            print_success(&format!("Set {} = {}", key, value), quiet);
            Ok(())
        }
        ConfigCommands::Path => path(format),
    }
}

fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => println!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key.split('.').collect::<Vec<_>>().as_slice() {
        ["api", "base_url"] => {
            let url = value.trim_end_matches('/');
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("Base URL must start with http:// or https://");
            }
            config.api.base_url = url.to_string();
        }
        ["api", "request_timeout_secs"] => {
            config.api.request_timeout_secs = match value {
                "none" | "" => None,
                secs => Some(secs.parse()?),
            };
        }
        ["ui", "dark_theme"] => config.ui.dark_theme = value.parse()?,
        ["ui", "toast_seconds"] => config.ui.toast_seconds = value.parse()?,
        _ => bail!("Unknown config key: {}", key),
    }
    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;

    let result = ConfigPathResult {
        exists: path.exists(),
        path: path.to_string_lossy().to_string(),
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_config_values() {
        let mut config = Config::default();

        set_config_value(&mut config, "api.base_url", "http://localhost:4000/").unwrap();
        set_config_value(&mut config, "api.request_timeout_secs", "30").unwrap();
        set_config_value(&mut config, "ui.dark_theme", "false").unwrap();

        assert_eq!(config.api.base_url, "http://localhost:4000");
        assert_eq!(config.api.request_timeout_secs, Some(30));
        assert!(!config.ui.dark_theme);

        set_config_value(&mut config, "api.request_timeout_secs", "none").unwrap();
        assert_eq!(config.api.request_timeout_secs, None);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "api.base_url", "localhost").is_err());
        assert!(set_config_value(&mut config, "ui.toast_seconds", "soon").is_err());
        assert!(set_config_value(&mut config, "game.directory", "/tmp").is_err());
    }
}
