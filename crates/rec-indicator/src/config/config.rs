//! Configuration management for rec-indicator.
//!
//! Loads a TOML file from the platform config directory, applies the
//! `OBS_*` environment overrides, and validates the result. Saving uses an
//! atomic write.

use crate::{
    AppError, AppResult,
    config::{
        ConnectionConfig, ENV_FILE_NAME, ENV_HOST, ENV_PASSWORD, ENV_PAUSED_ICON, ENV_PORT,
        ENV_RECORDING_ICON, IconsConfig, OverlayConfig, default_host, default_port,
    },
};

use rec_indicator_core::{ConnectionSettings, IconKind};

use std::{
    collections::HashMap,
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::{BaseDirs, ProjectDirs};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Control-service connection.
    pub connection: ConnectionConfig,
    /// Icon images.
    pub icons: IconsConfig,
    /// Overlay placement and look.
    #[serde(default)]
    pub overlay: OverlayConfig,
}

impl Config {
    /// Load configuration from disk, creating a default if not found, then
    /// apply environment overrides and validate.
    ///
    /// Overrides come from `~/.obs_scripts.env` and the process environment.
    /// The process environment wins.
    ///
    /// Icon files are NOT required to exist here. A missing icon only
    /// prevents the overlay from showing for that state.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            info!("No config found, creating default");
            Self::create_default(&config_path)?
        };

        let env_file = Self::env_file_path();
        config.apply_environment(env_file.as_deref(), |key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Read and parse a config file.
    #[track_caller]
    #[instrument]
    pub fn load_from(config_path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration loaded");

        Ok(config)
    }

    /// Apply `OBS_*` overrides from `env_file` and `process_env`.
    ///
    /// A variable set in `process_env` takes precedence over the file. A
    /// missing file is treated as empty.
    #[track_caller]
    pub fn apply_environment<F>(&mut self, env_file: Option<&Path>, process_env: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_vars = match env_file {
            Some(path) => Self::read_env_file(path)?,
            None => HashMap::new(),
        };

        self.apply_overrides(|key| process_env(key).or_else(|| file_vars.get(key).cloned()))
    }

    /// Read `KEY=value` pairs from a dotenv file without touching the
    /// process environment.
    #[track_caller]
    pub fn read_env_file(path: &Path) -> AppResult<HashMap<String, String>> {
        let entries = match dotenvy::from_path_iter(path) {
            Ok(entries) => entries,
            Err(e) if e.not_found() => {
                debug!(env_file = ?path, "No env file found");
                return Ok(HashMap::new());
            }
            Err(e) => {
                return Err(AppError::ConfigError {
                    reason: format!("Failed to open env file {}: {}", path.display(), e),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let vars = entries
            .collect::<Result<HashMap<_, _>, _>>()
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to parse env file {}: {}", path.display(), e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(env_file = ?path, count = vars.len(), "Env file loaded");

        Ok(vars)
    }

    /// Apply overrides from `lookup`, keyed by the `OBS_*` variable names.
    ///
    /// An empty password override clears the password.
    #[track_caller]
    pub fn apply_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            debug!(host = %host, "Host overridden from environment");
            self.connection.host = host;
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.connection.port = port.trim().parse().map_err(|e| AppError::ConfigError {
                reason: format!("{} is not a valid port ({:?}): {}", ENV_PORT, port, e),
                location: ErrorLocation::from(Location::caller()),
            })?;
            debug!(port = self.connection.port, "Port overridden from environment");
        }

        if let Some(password) = lookup(ENV_PASSWORD) {
            debug!("Password overridden from environment");
            self.connection.password = Some(password).filter(|p| !p.is_empty());
        }

        if let Some(path) = lookup(ENV_RECORDING_ICON) {
            self.icons.recording = PathBuf::from(path);
        }

        if let Some(path) = lookup(ENV_PAUSED_ICON) {
            self.icons.paused = PathBuf::from(path);
        }

        Ok(())
    }

    /// Check values that cannot work at all.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        if self.connection.host.trim().is_empty() {
            return Err(AppError::ConfigError {
                reason: "Connection host must not be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.connection.port == 0 {
            return Err(AppError::ConfigError {
                reason: "Connection port must not be 0".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !(0.0..=1.0).contains(&self.overlay.opacity) {
            return Err(AppError::ConfigError {
                reason: format!(
                    "Overlay opacity must be between 0.0 and 1.0, got {}",
                    self.overlay.opacity
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Log a warning for every icon file that does not exist yet.
    ///
    /// Returns the number of missing icons.
    pub fn warn_missing_icons(&self) -> usize {
        [IconKind::Recording, IconKind::Paused]
            .into_iter()
            .filter(|kind| {
                let path = self.icons.path_for(*kind);
                let missing = !path.exists();
                if missing {
                    warn!(kind = %kind, path = ?path, "Icon not found, indicator will not show for this state");
                }
                missing
            })
            .count()
    }

    /// Connection settings for the listener.
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            host: self.connection.host.clone(),
            port: self.connection.port,
            password: self.connection.password.clone(),
        }
    }

    /// Save configuration using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Default configuration with icons under `data_dir/icons`.
    pub fn with_data_dir(data_dir: &Path) -> Self {
        let icons_dir = data_dir.join("icons");

        Config {
            connection: ConnectionConfig {
                host: default_host(),
                port: default_port(),
                password: None,
            },
            icons: IconsConfig {
                recording: icons_dir.join("recording.png"),
                paused: icons_dir.join("paused.png"),
            },
            overlay: OverlayConfig::default(),
        }
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "rec-indicator", "Rec-Indicator").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get project directories".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    fn env_file_path() -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.home_dir().join(ENV_FILE_NAME))
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default(config_path: &Path) -> AppResult<Self> {
        let proj_dirs = Self::project_dirs()?;
        let config = Self::with_data_dir(proj_dirs.data_dir());

        config.save_to(config_path)?;

        warn!(
            recording_icon = ?config.icons.recording,
            paused_icon = ?config.icons.paused,
            "Default config created. Place icon images at these paths or set them in the config."
        );

        Ok(config)
    }
}
