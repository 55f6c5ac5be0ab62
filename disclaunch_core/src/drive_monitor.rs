// SPDX-License-Identifier: GPL-3.0
// drive_monitor.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::path::PathBuf;

/// This module contains the default drive monitor, which asks `lsblk` for the
/// block-device inventory. There may be others in future.
pub mod lsblk_drive_monitor;

/// This trait provides an implementation-opaque way of looking for an attached
/// optical drive.
pub trait DriveMonitor {

    /// Implementations must return the device path of the first optical drive
    /// found, or `None` if there is none. Not finding a drive is not an error.
    fn find_optical_drive(&mut self) -> Option<PathBuf>;
}
