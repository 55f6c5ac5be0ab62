// SPDX-License-Identifier: GPL-3.0
// lib.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

// Crate-wide lines to disable specific lints:

// Components are always built through new() with their collaborators spelled
// out. Default is only implemented for plain data such as the config.
#![allow(clippy::new_without_default)]

/// This module contains the error type shared by every component.
pub mod error;

/// This module contains the supported console systems.
pub mod system;

/// This module contains launcher configuration and per-system profiles.
pub mod config;

/// This module contains the (identity, system) to title catalog.
pub mod catalog;

/// This module contains core image discovery.
pub mod core_locator;

/// This module contains the side-effecting platform capabilities: mounting,
/// the command channel and external processes.
pub mod platform;

/// This module contains optical drive discovery.
pub mod drive_monitor;

/// This module contains per-system disc identification.
pub mod disc_identifier;

/// This module contains title and disc-image resolution.
pub mod game_resolver;

/// This module contains load descriptors and launching.
pub mod launch_orchestrator;

/// This module contains the record of the last launched disc.
pub mod launch_state;

/// This module contains the poll cycle tying everything together.
pub mod poll_cycle;

#[cfg(test)]
mod test_support;
