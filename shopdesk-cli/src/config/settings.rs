//! Operator preferences

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
}

impl Language {
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
            Language::Fr => "Français",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Rwf,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Rwf => "RWF",
            Currency::Usd => "USD",
        }
    }

    /// `RWF 1500` for whole amounts, `USD 12.50` otherwise
    pub fn format_amount(&self, amount: f64) -> String {
        if amount.fract() == 0.0 {
            format!("{} {:.0}", self.code(), amount)
        } else {
            format!("{} {:.2}", self.code(), amount)
        }
    }
}

/// Boolean preferences that can be flipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SettingToggle {
    Notifications,
    DarkMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub notifications: bool,
    pub dark_mode: bool,
    pub language: Language,
    pub currency: Currency,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            dark_mode: false,
            language: Language::En,
            currency: Currency::Rwf,
        }
    }
}

impl Settings {
    /// Flip a boolean preference, returning its new value
    pub fn toggle(&mut self, setting: SettingToggle) -> bool {
        let value = match setting {
            SettingToggle::Notifications => &mut self.notifications,
            SettingToggle::DarkMode => &mut self.dark_mode,
        };
        *value = !*value;
        *value
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.notifications);
        assert!(!settings.dark_mode);
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.currency, Currency::Rwf);
    }

    #[test]
    fn test_toggle() {
        let mut settings = Settings::default();
        assert!(settings.toggle(SettingToggle::DarkMode));
        assert!(settings.dark_mode);
        assert!(!settings.toggle(SettingToggle::Notifications));
        assert!(!settings.notifications);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(Currency::Rwf.format_amount(1500.0), "RWF 1500");
        assert_eq!(Currency::Usd.format_amount(12.5), "USD 12.50");
    }

    #[test]
    fn test_currency_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
        assert_eq!(serde_json::to_string(&Language::Fr).unwrap(), "\"fr\"");
    }
}
