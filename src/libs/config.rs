//! Configuration management for the kanbo application.
//!
//! Settings live in a JSON file under the platform application data
//! directory and are fully optional: without a config file kanbo runs with
//! defaults, boards are owned by the OS user, and no remote sync happens.
//!
//! Two modules can be configured:
//! - **Profile**: the acting user id (board owner, comment author) and a
//!   display name.
//! - **Remote**: the board server that receives reorder pushes, as an API
//!   base URL plus auth token.
//!
//! `Config::init()` drives an interactive wizard; `read()` and `save()`
//! handle persistence.

use super::data_storage::DataStorage;
use crate::api::sync::RemoteConfig;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};

/// Configuration file name inside the application data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Owner fallback when neither a profile nor `$USER` is available.
const DEFAULT_USER: &str = "local";

/// A configurable module shown in the interactive setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique key used to route the module's setup
    pub key: String,
    /// Display name shown in the wizard
    pub name: String,
}

/// Identity used for board ownership and comment authorship.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProfileConfig {
    /// Stable user id; boards created with one id stay invisible to others
    pub user: String,
    /// Display name for rendering, defaults to the user id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Root configuration object. Every module is optional and omitted from the
/// JSON when unset.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileConfig>,

    /// Board server receiving reorder pushes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,
}

impl Config {
    /// Loads the configuration, falling back to defaults when no file
    /// exists yet.
    ///
    /// A present but unreadable or unparsable file is an error; a missing
    /// file is not.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON, creating the data
    /// directory when needed.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file if present.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Runs the interactive setup wizard.
    ///
    /// Starts from the existing configuration so re-running the wizard
    /// pre-fills current values; modules left unselected keep their
    /// previous state.
    pub fn init() -> Result<Self> {
        let mut config = match Self::read() {
            Ok(config) => config,
            Err(_) => Config::default(),
        };

        let node_descriptions = vec![
            ConfigModule {
                key: "profile".to_string(),
                name: Message::ConfigModuleProfile.to_string(),
            },
            RemoteConfig::module(),
        ];

        let selected_nodes = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&node_descriptions.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected_nodes {
            match node_descriptions[selection].key.as_str() {
                "profile" => {
                    let default = config.profile.clone().unwrap_or(ProfileConfig {
                        user: env::var("USER").unwrap_or_else(|_| DEFAULT_USER.to_string()),
                        name: None,
                    });
                    msg_print!(Message::ConfigModuleProfile);
                    let user: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptUserId.to_string())
                        .default(default.user)
                        .interact_text()?;
                    let name: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptUserName.to_string())
                        .default(default.name.unwrap_or_default())
                        .allow_empty(true)
                        .interact_text()?;
                    config.profile = Some(ProfileConfig {
                        user,
                        name: if name.is_empty() { None } else { Some(name) },
                    });
                }
                "remote" => config.remote = Some(RemoteConfig::init(&config.remote)?),
                _ => {}
            }
        }

        Ok(config)
    }

    /// The acting user id: configured profile, then `$USER`, then a fixed
    /// fallback.
    pub fn current_user(&self) -> String {
        if let Some(profile) = &self.profile {
            return profile.user.clone();
        }
        env::var("USER").unwrap_or_else(|_| DEFAULT_USER.to_string())
    }
}
