//! Hub configuration.
//!
//! Every setting has a default so the console runs with zero configuration.
//! Layered loading: defaults → optional YAML file → `JAM__` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

const DEFAULT_USERS_FILE: &str = "jam_rooms_users.json";
const DEFAULT_SHARE_ORIGIN: &str = "http://localhost:5173/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JamConfig {
    /// Where the user directory is persisted. `None` keeps it in memory only.
    /// Env: `JAM__USERS_FILE`
    pub users_file: Option<PathBuf>,
    pub layout: LayoutConfig,
    /// z-index handed to the first window of a desk
    pub first_z_index: u32,
    /// How many notifications a desk remembers
    pub notification_history: usize,
    /// Delay before a kicked user's window is taken away
    pub kick_eviction_delay_ms: u64,
    /// Whether shared links are enriched with oEmbed titles and thumbnails
    pub fetch_metadata: bool,
    pub metadata_timeout_ms: u64,
    /// Prefix of share links, the room code is appended as a `#join=` fragment
    pub share_origin: String,
}

/// Geometry used to place new room windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub window_width: f64,
    pub window_height: f64,
    /// Total spread of the random offset applied around the centre, per axis
    pub jitter: f64,
}

impl Default for JamConfig {
    fn default() -> Self {
        JamConfig {
            users_file: Some(PathBuf::from(DEFAULT_USERS_FILE)),
            layout: LayoutConfig::default(),
            first_z_index: 10,
            notification_history: 50,
            kick_eviction_delay_ms: 100,
            fetch_metadata: true,
            metadata_timeout_ms: 3_000,
            share_origin: DEFAULT_SHARE_ORIGIN.to_string(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            viewport_width: 1280.0,
            viewport_height: 800.0,
            window_width: jam_model::room::DEFAULT_WINDOW_WIDTH,
            window_height: jam_model::room::DEFAULT_WINDOW_HEIGHT,
            jitter: 100.0,
        }
    }
}

impl JamConfig {
    /// Load configuration with layered loading: defaults → YAML file → environment variables.
    /// A missing file is not an error, the defaults and environment still apply.
    pub fn load_layered(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(JamConfig::default()));

        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }

        // Example: JAM__LAYOUT__VIEWPORT_WIDTH=1920 maps to layout.viewport_width
        figment
            .merge(Env::prefixed("JAM__").split("__"))
            .extract()
            .context("failed to extract config from figment")
    }

    /// A configuration which touches neither the disk nor the network
    pub fn in_memory() -> Self {
        JamConfig {
            users_file: None,
            fetch_metadata: false,
            ..JamConfig::default()
        }
    }
}
