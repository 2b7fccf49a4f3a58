use crate::i18n::RegistryOptions;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Table source
    pub translations_file: String,

    // Language selection (None = first language in the table)
    pub default_language: Option<String>,

    // Registry behaviour
    pub strict_language_switch: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            translations_file: std::env::var("TRANSLATIONS_FILE")
                .context("TRANSLATIONS_FILE not set")?,

            default_language: std::env::var("DEFAULT_LANGUAGE")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            strict_language_switch: std::env::var("STRICT_LANGUAGE_SWITCH")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(false),
        })
    }

    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            strict_language_switch: self.strict_language_switch,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
