//! `settings` subcommands

pub mod handler;

use clap::{Args, Subcommand};

use crate::config::{Currency, Language, SettingToggle};

#[derive(Args, Debug)]
pub struct SettingsCommands {
    #[command(subcommand)]
    pub command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SettingsSubcommand {
    /// Print the current preferences
    Show,
    /// Flip a yes/no preference
    Toggle {
        #[arg(value_enum)]
        setting: SettingToggle,
    },
    /// Interface language
    SetLanguage {
        #[arg(value_enum)]
        language: Language,
    },
    /// Currency used to display prices
    SetCurrency {
        #[arg(value_enum)]
        currency: Currency,
    },
}
