use std::{
    fs,
    path::{Path, PathBuf},
};

use bevy_ecs::system::Resource;
use directories::ProjectDirs;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{prelude::*, screen::CleanupPolicy};

const FILE_NAME: &str = "settings.ron";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Settings file is malformed: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Could not serialize settings: {0}")]
    Serialize(#[from] ron::Error),
}

/// Gameplay tuning, handed to the ECS world as a resource.
/// Speeds are in pixels per second.
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Rules {
    pub paddle_speed: f32,
    pub ball_speed: f32,
    pub ball_speedup: f32,
    pub max_ball_speed: f32,
    pub winning_score: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            paddle_speed: 180.,
            ball_speed: 150.,
            ball_speedup: 1.05,
            max_ball_speed: 400.,
            winning_score: 7,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub window_scale: f64,
    pub volume: f64,
    pub cleanup: CleanupPolicy,
    pub rules: Rules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_scale: 3.,
            volume: 0.5,
            cleanup: CleanupPolicy::default(),
            rules: Rules::default(),
        }
    }
}

impl Settings {
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "pong").map(|dirs| dirs.config_dir().join(FILE_NAME))
    }

    /// Reads the settings at the usual location, falling back to defaults on any problem.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            warn!("No home directory found, using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("{err}, using default settings");
                Self::default()
            }
        }
    }

    /// Reads `path`, writing the defaults there first if it does not exist yet.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(path)?;
            info!("Wrote default settings to {}", path.display());
            return Ok(settings);
        }

        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = ron::ser::to_string_pretty(self, PrettyConfig::default())?;
        fs::write(path, text)?;
        Ok(())
    }
}
