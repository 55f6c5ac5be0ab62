// SPDX-License-Identifier: GPL-3.0
// error.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{io, path::PathBuf};
use thiserror::Error;

/// This enum lists every failure that is allowed to escape a poll cycle or startup.
/// Transient conditions such as a missing drive or an unreadable disc are not
/// errors, and are reported as cycle outcomes instead.
#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to write load descriptor {path}: {source}")]
    DescriptorWrite {
        path: PathBuf,
        source: io::Error,
    },

    #[error("failed to write to command channel: {0}")]
    CommandChannel(io::Error),

    #[error("failed to start fallback procedure {program}: {source}")]
    FallbackSpawn {
        program: PathBuf,
        source: io::Error,
    },

    #[error("fallback procedure {program} exited unsuccessfully ({status})")]
    FallbackFailed {
        program: PathBuf,
        status: String,
    },

    #[error("no core found in {0} for any supported system")]
    NoCoreFound(PathBuf),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, LauncherError>;
