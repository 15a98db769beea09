//! Settings command handler

use anyhow::Result;
use colored::*;
use log::info;
use std::path::Path;

use super::{SettingsCommands, SettingsSubcommand};
use crate::config::{Config, SettingToggle, Settings};

pub fn handle_settings_command(mut config: Config, path: &Path, args: SettingsCommands) -> Result<()> {
    match args.command {
        SettingsSubcommand::Show => {
            show(&config.settings);
            return Ok(());
        }
        SettingsSubcommand::Toggle { setting } => {
            let enabled = config.settings.toggle(setting);
            let name = match setting {
                SettingToggle::Notifications => "Notifications",
                SettingToggle::DarkMode => "Dark mode",
            };
            println!("{} {}", name, on_off(enabled));
        }
        SettingsSubcommand::SetLanguage { language } => {
            config.settings.set_language(language);
            println!("Language set to {}", language.label().bold());
        }
        SettingsSubcommand::SetCurrency { currency } => {
            config.settings.set_currency(currency);
            println!("Currency set to {}", currency.code().bold());
        }
    }

    config.save_to(path)?;
    info!("Saved settings to {}", path.display());
    Ok(())
}

fn on_off(enabled: bool) -> ColoredString {
    if enabled { "on".green() } else { "off".dimmed() }
}

fn show(settings: &Settings) {
    println!("{}", "Settings".bold().underline());
    println!("  Notifications: {}", on_off(settings.notifications));
    println!("  Dark mode:     {}", on_off(settings.dark_mode));
    println!("  Language:      {}", settings.language.label());
    println!("  Currency:      {}", settings.currency.code());
}
