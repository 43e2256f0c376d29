// src/infrastructure/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::application::RunOptions;
use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_ANKI_URL, DEFAULT_BURIED_TAG, DEFAULT_DECK, DEFAULT_FRONT_FIELD,
    DEFAULT_PUSHPLUS_CHANNEL, DEFAULT_PUSHPLUS_TEMPLATE,
};
use crate::domain::DomainError;

/// TOML configuration, read once at startup
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub anki: AnkiConfig,
    pub pushplus: PushPlusConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnkiConfig {
    #[serde(default = "default_anki_url")]
    pub url: String,
    #[serde(default = "default_deck")]
    pub deck: String,
    #[serde(default = "default_front_field")]
    pub front_field: String,
    #[serde(default = "default_buried_tag")]
    pub buried_tag: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PushPlusConfig {
    #[serde(alias = "pushplus_token")]
    pub token: String,
    #[serde(alias = "pushplus_url")]
    pub url: String,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default = "default_channel")]
    pub channel: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_anki_url() -> String { DEFAULT_ANKI_URL.to_string() }
fn default_deck() -> String { DEFAULT_DECK.to_string() }
fn default_front_field() -> String { DEFAULT_FRONT_FIELD.to_string() }
fn default_buried_tag() -> String { DEFAULT_BURIED_TAG.to_string() }
fn default_template() -> String { DEFAULT_PUSHPLUS_TEMPLATE.to_string() }
fn default_channel() -> String { DEFAULT_PUSHPLUS_CHANNEL.to_string() }

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            url: default_anki_url(),
            deck: default_deck(),
            front_field: default_front_field(),
            buried_tag: default_buried_tag(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config {}", path.display()))?;

        config.validate()?;
        debug!(?path, deck = %config.anki.deck, "Loaded config");
        Ok(config)
    }

    /// Resolve the config file: an explicit path wins, then `./config.toml`,
    /// then `<config dir>/ankinotify/config.toml`.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("ankinotify").join(CONFIG_FILE_NAME));
        }

        candidates
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .with_context(|| format!("No config file found, looked in {:?}", candidates))
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.pushplus.token.trim().is_empty() {
            return Err(DomainError::Config("pushplus.token is empty".to_string()));
        }
        if self.pushplus.url.trim().is_empty() {
            return Err(DomainError::Config("pushplus.url is empty".to_string()));
        }
        if self.anki.deck.trim().is_empty() {
            return Err(DomainError::Config("anki.deck is empty".to_string()));
        }
        Ok(())
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            deck: self.anki.deck.clone(),
            front_field: self.anki.front_field.clone(),
            buried_tag: self.anki.buried_tag.clone(),
            token: self.pushplus.token.clone(),
            template: self.pushplus.template.clone(),
            topic: self.pushplus.topic.clone(),
            channel: self.pushplus.channel.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn given_full_toml_when_loading_then_reads_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            r#"
[anki]
url = "http://127.0.0.1:9000"
deck = "Core 2k"
front_field = "Expression"
buried_tag = "skip"
timeout_secs = 5

[pushplus]
token = "abc123"
url = "https://www.pushplus.plus/send"
template = "html"
topic = "jlpt"
channel = "group"
"#,
        );

        let config = Config::load(&path).unwrap();

        assert_eq!(config.anki.url, "http://127.0.0.1:9000");
        assert_eq!(config.anki.deck, "Core 2k");
        assert_eq!(config.anki.front_field, "Expression");
        assert_eq!(config.anki.buried_tag, "skip");
        assert_eq!(config.anki.timeout_secs, Some(5));
        assert_eq!(config.pushplus.token, "abc123");
        assert_eq!(config.pushplus.template, "html");
        assert_eq!(config.pushplus.topic, "jlpt");
        assert_eq!(config.pushplus.channel, "group");
    }

    #[test]
    fn given_only_pushplus_section_when_loading_then_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            r#"
[pushplus]
token = "abc123"
url = "https://www.pushplus.plus/send"
"#,
        );

        let config = Config::load(&path).unwrap();

        assert_eq!(config.anki, AnkiConfig::default());
        assert_eq!(config.anki.url, "http://localhost:8765");
        assert_eq!(config.anki.deck, "0_JLPT");
        assert_eq!(config.pushplus.template, "txt");
        assert_eq!(config.pushplus.topic, "");
        assert_eq!(config.pushplus.channel, "personal");
    }

    #[test]
    fn given_legacy_key_names_when_loading_then_accepts_them() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            r#"
[pushplus]
pushplus_token = "legacy"
pushplus_url = "https://www.pushplus.plus/send"
"#,
        );

        let config = Config::load(&path).unwrap();

        assert_eq!(config.pushplus.token, "legacy");
        assert_eq!(config.pushplus.url, "https://www.pushplus.plus/send");
    }

    #[test]
    fn given_nonexistent_file_when_loading_then_returns_error() {
        let result = Config::load("/nonexistent/path/config.toml");

        assert!(result.is_err());
    }

    #[test]
    fn given_missing_pushplus_section_when_loading_then_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[anki]\ndeck = \"x\"\n");

        let result = Config::load(&path);

        assert!(result.is_err());
    }

    #[test]
    fn given_malformed_toml_when_loading_then_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[pushplus\ntoken = abc\n");

        let result = Config::load(&path);

        assert!(format!("{:#}", result.unwrap_err()).contains("Failed to parse TOML config"));
    }

    #[test]
    fn given_empty_token_when_loading_then_returns_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            "[pushplus]\ntoken = \"  \"\nurl = \"https://www.pushplus.plus/send\"\n",
        );

        let err = Config::load(&path).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Config(_))
        ));
    }

    #[test]
    fn given_explicit_path_when_locating_then_returns_it_unchecked() {
        let path = Config::locate(Some(Path::new("/etc/ankinotify.toml"))).unwrap();

        assert_eq!(path, PathBuf::from("/etc/ankinotify.toml"));
    }

    #[test]
    fn given_config_when_building_run_options_then_copies_fields() {
        let config = Config {
            anki: AnkiConfig::default(),
            pushplus: PushPlusConfig {
                token: "t".to_string(),
                url: "https://example.test/send".to_string(),
                template: default_template(),
                topic: String::new(),
                channel: default_channel(),
                timeout_secs: None,
            },
        };

        let options = config.run_options();

        assert_eq!(options.deck_query(), "deck:0_JLPT");
        assert_eq!(options.token, "t");
        assert_eq!(options.front_field, "Front");
        assert_eq!(options.buried_tag, "1");
    }
}
