mod connection_config;
#[allow(clippy::module_inception)]
mod config;
mod icons_config;
mod overlay_config;

pub(crate) use {
    config::Config, connection_config::ConnectionConfig, icons_config::IconsConfig,
    overlay_config::OverlayConfig,
};

pub(crate) const DEFAULT_HOST: &str = "localhost";
pub(crate) const DEFAULT_PORT: u16 = 4455;
pub(crate) const DEFAULT_MARGIN: u32 = 16;
pub(crate) const DEFAULT_OPACITY: f32 = 0.8;

pub(crate) const ENV_HOST: &str = "OBS_WS_HOST";
pub(crate) const ENV_PORT: &str = "OBS_WS_PORT";
pub(crate) const ENV_PASSWORD: &str = "OBS_WS_PW";
pub(crate) const ENV_RECORDING_ICON: &str = "OBS_REC_ICON_PATH";
pub(crate) const ENV_PAUSED_ICON: &str = "OBS_PAUSE_ICON_PATH";

/// Dotenv file in the home directory shared with other OBS scripts.
pub(crate) const ENV_FILE_NAME: &str = ".obs_scripts.env";

pub(crate) fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}

pub(crate) fn default_margin() -> u32 {
    DEFAULT_MARGIN
}

pub(crate) fn default_opacity() -> f32 {
    DEFAULT_OPACITY
}
