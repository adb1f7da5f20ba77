use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

fn default_class_name() -> String {
    "DinoTrayWindow".into()
}

fn default_window_title() -> String {
    "Dino Tray".into()
}

fn default_tooltip() -> String {
    "Dino - XMPP Client".into()
}

fn default_show_label() -> String {
    "Show Dino".into()
}

fn default_exit_label() -> String {
    "Exit".into()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrayConfig {
    /// Window class registered for the hidden message window.
    #[serde(default = "default_class_name")]
    pub class_name: String,
    #[serde(default = "default_window_title")]
    pub window_title: String,

    #[serde(default = "default_tooltip")]
    pub tooltip: String,
    /// Icon file loaded after `init`. The built-in application icon is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,

    #[serde(default = "default_show_label")]
    pub show_label: String,
    #[serde(default = "default_exit_label")]
    pub exit_label: String,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            class_name: default_class_name(),
            window_title: default_window_title(),
            tooltip: default_tooltip(),
            icon: None,
            show_label: default_show_label(),
            exit_label: default_exit_label(),
        }
    }
}

impl TrayConfig {
    #[cfg(debug_assertions)]
    pub const FILENAME: &'static str = "dino-tray.debug.toml";
    #[cfg(not(debug_assertions))]
    pub const FILENAME: &'static str = "dino-tray.toml";

    pub fn path() -> anyhow::Result<PathBuf> {
        dirs::home_dir()
            .context("Could not determine home directory")
            .map(|dir| dir.join(".config"))
            .map(|dir| dir.join(Self::FILENAME))
    }

    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(config_file: &Path) -> anyhow::Result<Self> {
        if config_file.exists() {
            tracing::info!("Loading config from {}", config_file.display());

            let content = std::fs::read_to_string(config_file)?;
            toml::from_str(&content)
                .with_context(|| format!("Invalid config file {}", config_file.display()))
        } else {
            tracing::info!(
                "Config file not found at {}, using default config",
                config_file.display()
            );

            Ok(Self::default())
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, config_file: &Path) -> anyhow::Result<()> {
        tracing::info!("Saving config to {}", config_file.display());

        if let Some(parent) = config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_file, toml::to_string(self)?)?;
        Ok(())
    }
}
