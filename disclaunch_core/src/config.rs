// SPDX-License-Identifier: GPL-3.0
// config.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use log::info;
use serde::Deserialize;

use crate::{
    error::{LauncherError, Result},
    system::System,
};

/// Everything that differs between systems when locating a core, searching for
/// images and building the load descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemProfile {
    pub core_prefix: String,
    pub core_reference: String,
    pub slot_index: u32,
    pub slot_type: String,
    pub slot_delay: u32,
    pub image_extension: String,
    pub search_dirs: Vec<PathBuf>,
}

impl SystemProfile {

    /// Returns the built-in MiSTer profile for the given system.
    pub fn default_for(system: System) -> Self {
        match system {
            System::Psx => SystemProfile {
                core_prefix: "PSX_".to_string(),
                core_reference: "_console/psx".to_string(),
                slot_index: 1,
                slot_type: "s".to_string(),
                slot_delay: 1,
                image_extension: "chd".to_string(),
                search_dirs: vec![
                    PathBuf::from("/media/fat/games/PSX/"),
                    PathBuf::from("/media/usb0/games/PSX/"),
                ],
            },
            System::Saturn => SystemProfile {
                core_prefix: "Saturn_".to_string(),
                core_reference: "_console/saturn".to_string(),
                slot_index: 0,
                slot_type: "s".to_string(),
                slot_delay: 1,
                image_extension: "chd".to_string(),
                search_dirs: vec![
                    PathBuf::from("/media/fat/games/Saturn/"),
                    PathBuf::from("/media/usb0/games/Saturn/"),
                ],
            },
        }
    }
}

/// A `[psx]` or `[saturn]` table from the config file. Any key left out keeps the
/// built-in value for that system.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemProfileOverride {
    core_prefix: Option<String>,
    core_reference: Option<String>,
    slot_index: Option<u32>,
    slot_type: Option<String>,
    slot_delay: Option<u32>,
    image_extension: Option<String>,
    search_dirs: Option<Vec<PathBuf>>,
}

impl SystemProfileOverride {

    /// Applies any overridden values on top of the supplied profile.
    fn apply(&self, mut profile: SystemProfile) -> SystemProfile {

        if let Some(core_prefix) = &self.core_prefix {
            profile.core_prefix = core_prefix.clone();
        }
        if let Some(core_reference) = &self.core_reference {
            profile.core_reference = core_reference.clone();
        }
        if let Some(slot_index) = self.slot_index {
            profile.slot_index = slot_index;
        }
        if let Some(slot_type) = &self.slot_type {
            profile.slot_type = slot_type.clone();
        }
        if let Some(slot_delay) = self.slot_delay {
            profile.slot_delay = slot_delay;
        }
        if let Some(image_extension) = &self.image_extension {
            profile.image_extension = image_extension.clone();
        }
        if let Some(search_dirs) = &self.search_dirs {
            profile.search_dirs = search_dirs.clone();
        }

        profile
    }
}

/// Launcher configuration, read from an optional TOML file. Every field has a
/// MiSTer default, so an empty file is a valid config.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    pub command_channel: PathBuf,
    pub core_dir: PathBuf,
    pub core_extension: String,
    pub catalog_path: PathBuf,
    pub descriptor_path: PathBuf,
    pub mount_point: PathBuf,
    pub mount_fs_types: Vec<String>,
    pub poll_interval_secs: u64,
    pub fallback_program: Option<PathBuf>,
    psx: SystemProfileOverride,
    saturn: SystemProfileOverride,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        LauncherConfig {
            command_channel: PathBuf::from("/dev/MiSTer_cmd"),
            core_dir: PathBuf::from("/media/fat/_Console/"),
            core_extension: "rbf".to_string(),
            catalog_path: PathBuf::from("/media/fat/dla/games.csv"),
            descriptor_path: PathBuf::from("/tmp/disc_launcher.mgl"),
            mount_point: PathBuf::from("/mnt/cdrom"),
            mount_fs_types: vec!["iso9660".to_string(), "udf".to_string()],
            poll_interval_secs: 10,
            fallback_program: None,
            psx: SystemProfileOverride::default(),
            saturn: SystemProfileOverride::default(),
        }
    }
}

impl LauncherConfig {

    /// Loads the config from the given file, or returns the defaults when no file
    /// is given. A file that exists but cannot be read or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {

        match path {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                let config = Self::from_toml_str(&content)?;
                info!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parses a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {

        let config: Self = toml::from_str(content)?;
        if config.poll_interval_secs == 0 {
            return Err(LauncherError::InvalidConfig(
                "poll_interval_secs must be at least 1".to_string()
            ));
        }

        Ok(config)
    }

    /// Returns the effective profile for a system, with any overrides applied.
    pub fn profile(&self, system: System) -> SystemProfile {

        let overrides = match system {
            System::Psx => &self.psx,
            System::Saturn => &self.saturn,
        };

        overrides.apply(SystemProfile::default_for(system))
    }

    /// Returns the delay between poll cycles.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
