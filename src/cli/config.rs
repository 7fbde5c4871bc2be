//! Configuration commands

use clap::{Subcommand, ValueEnum};

use crate::config::settings::{API_KEY_ENV, BACKEND_URL_ENV};
use crate::config::{Settings, TrackerPaths};
use crate::error::TrackerResult;

/// On/off switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,
    /// Point the tracker at a backend project
    SetBackend {
        /// Project URL
        #[arg(long)]
        url: String,
        /// Public API key
        #[arg(long)]
        api_key: String,
    },
    /// Require the biometric prompt after password sign-in
    Biometric {
        #[arg(value_enum)]
        state: Toggle,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &TrackerPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> TrackerResult<()> {
    match cmd {
        ConfigCommands::Show => {
            print!("{}", format_config(paths, settings));
        }

        ConfigCommands::SetBackend { url, api_key } => {
            settings.backend.url = Some(url.trim().trim_end_matches('/').to_string());
            settings.backend.api_key = Some(api_key.trim().to_string());
            settings.save(paths)?;
            println!("Backend set to {}", url.trim());
        }

        ConfigCommands::Biometric { state } => {
            settings.biometric_enabled = state == Toggle::On;
            settings.save(paths)?;
            println!(
                "Biometric sign-in {}",
                if settings.biometric_enabled { "enabled" } else { "disabled" }
            );
        }
    }

    Ok(())
}

fn format_config(paths: &TrackerPaths, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str("Expense Tracker Configuration\n");
    output.push_str("=============================\n");
    output.push_str(&format!("Data directory: {}\n", paths.base_dir().display()));
    output.push_str(&format!("Settings file:  {}\n", paths.settings_file().display()));
    output.push('\n');
    output.push_str("Backend:\n");
    output.push_str(&format!(
        "  URL:          {}\n",
        settings.backend.url.as_deref().unwrap_or("(not set)")
    ));
    output.push_str(&format!(
        "  API key:      {}\n",
        settings
            .backend
            .api_key
            .as_deref()
            .map(mask_key)
            .unwrap_or_else(|| "(not set)".to_string())
    ));
    output.push_str(&format!(
        "  Timeout:      {}s\n",
        settings.backend.request_timeout_secs
    ));
    output.push_str(&format!(
        "  Overrides:    {}, {}\n",
        BACKEND_URL_ENV, API_KEY_ENV
    ));
    output.push('\n');
    output.push_str("Settings:\n");
    output.push_str(&format!("  Currency:     {}\n", settings.currency_symbol));
    output.push_str(&format!("  Date format:  {}\n", settings.date_format));
    output.push_str(&format!("  List limit:   {}\n", settings.list_limit));
    output.push_str(&format!(
        "  Biometric:    {}\n",
        if settings.biometric_enabled { "on" } else { "off" }
    ));

    output
}

/// Show only the last four characters of a key
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
