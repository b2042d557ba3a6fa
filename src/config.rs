use std::path::{Path, PathBuf};

use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    database: String,
    /// Public origin of the fan pages, used for canonical and Open Graph URLs
    pub base_url: String,
    /// Origin assets (artist images, cover art) are served from
    pub asset_base_url: String,
    /// Where the frontend bundle is served from
    pub static_url: String,
    /// Optional local directory to serve under /static
    static_directory: Option<String>,
    pub analytics_key: String,
    /// Header the upstream auth layer sets to the authenticated account id
    pub session_header: String,
    pub features: FeaturesConfig,
    pub feature_fm: Option<FeatureFmConfig>,
    pub delivery: DeliveryConfig,
    pub warehouse: Option<WarehouseConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub fan_release_page: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureFmConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// sea-orm connection url, e.g. `sqlite://warehouse.db?mode=ro`
    pub url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: "~/.local/share/fan-pages/fan-pages.db".to_string(),
            base_url: "http://localhost:3000".to_string(),
            asset_base_url: "http://localhost:3000/assets".to_string(),
            static_url: "/static".to_string(),
            static_directory: None,
            analytics_key: String::new(),
            session_header: "x-authenticated-user".to_string(),
            features: FeaturesConfig::default(),
            feature_fm: None,
            delivery: DeliveryConfig::default(),
            warehouse: None,
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            fan_release_page: true,
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            api_key: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Default location of the config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("fan-pages").join("config.toml"))
    }

    /// Load the config from the default location, falling back to defaults
    /// when no file exists there.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path().ok_or(eyre!("No config directory found"))?;

        if !config_path.exists() {
            tracing::warn!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        Self::from_file(&config_path)
    }

    /// Write the default config to the default location unless a file is
    /// already there. Returns the path of the config file.
    pub fn create_default() -> Result<PathBuf> {
        let config_path = Self::config_path().ok_or(eyre!("No config directory found"))?;
        Self::write_default_to(&config_path)?;
        Ok(config_path)
    }

    fn write_default_to(path: &Path) -> Result<()> {
        if path.exists() {
            tracing::info!("Config file already exists: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(&Self::default()).wrap_err("Failed to serialize config")?;
        std::fs::write(path, contents)
            .wrap_err_with(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Expand ~ to home directory
    fn expand_path(&self, path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(rest);
        }
        PathBuf::from(path)
    }

    /// Get expanded database path
    pub fn database_path(&self) -> PathBuf {
        self.expand_path(&self.database)
    }

    /// Get expanded static directory, if one is configured
    pub fn static_directory_path(&self) -> Option<PathBuf> {
        self.static_directory
            .as_deref()
            .map(|dir| self.expand_path(dir))
    }
}
