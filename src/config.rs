use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Native,
    Subsonic,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Native => "native",
            SourceKind::Subsonic => "subsonic",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceKind,
    #[serde(default)]
    pub native_base_url: String,
    /// Session token from the last native login, attached as a bearer header.
    #[serde(default)]
    pub native_token: Option<String>,
    #[serde(default)]
    pub subsonic_base_url: String,
    #[serde(default)]
    pub subsonic_username: String,
    #[serde(default)]
    pub subsonic_password: String,
    #[serde(default = "default_client_name")]
    pub client_name: String,
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
}

fn default_client_name() -> String {
    "Echoplay".to_string()
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Native,
            native_base_url: String::new(),
            native_token: None,
            subsonic_base_url: String::new(),
            subsonic_username: String::new(),
            subsonic_password: String::new(),
            client_name: default_client_name(),
            cache_enabled: default_cache_enabled(),
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> AppResult<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("Cannot find home directory".into()))?;
        Ok(home.join(".echoplay"))
    }

    pub fn config_path() -> AppResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn cache_dir() -> AppResult<PathBuf> {
        Ok(Self::config_dir()?.join("audio_cache"))
    }

    pub fn load() -> AppResult<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Err(AppError::Config(
                "Config file not found. Please run setup.".into(),
            ));
        }
        let content = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> AppResult<()> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;
        let path = Self::config_path()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Drop the native session. Used for the forced logout after a 401.
    pub fn clear_session(&mut self) {
        self.native_token = None;
    }
}
