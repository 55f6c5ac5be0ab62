// SPDX-License-Identifier: GPL-3.0
// platform.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use log::{debug, warn};

/// This module contains the real Linux/MiSTer implementations of the traits below.
pub mod mister_platform;

/// This trait provides an implementation-opaque way of mounting and unmounting a
/// drive, so disc identification can be exercised without real devices.
pub trait Mounter {

    /// Implementations must mount the device read-only at the mount point using
    /// the given filesystem type.
    fn mount_read_only(
        &mut self,
        device: &Path,
        mount_point: &Path,
        fs_type: &str
    ) -> io::Result<()>;

    /// Implementations must unmount whatever is mounted at the mount point.
    fn unmount(&mut self, mount_point: &Path) -> io::Result<()>;
}

/// This trait provides an implementation-opaque way of sending text commands to
/// the platform.
pub trait CommandChannel {

    /// Implementations must write the line followed by a newline, and flush it
    /// before returning.
    fn send_line(&mut self, line: &str) -> io::Result<()>;
}

/// This trait provides an implementation-opaque way of running an external program
/// to completion.
pub trait ProcessRunner {

    /// Implementations must run the program with the given arguments, wait for it
    /// to exit, and return its exit code (`None` if it was killed by a signal).
    fn run(&mut self, program: &Path, args: &[OsString]) -> io::Result<Option<i32>>;
}

/// This struct represents a mounted drive. The mount point is unmounted when it is
/// dropped, whichever way the owning function returns.
pub struct MountGuard<'a> {
    mounter: &'a mut dyn Mounter,
    mount_point: PathBuf,
    fs_type: String,
}

/// Implementation functions for the mount guard.
impl<'a> MountGuard<'a> {

    /// Mounts the device read-only, trying each filesystem type in order. Returns
    /// `None` if no filesystem type could be mounted.
    pub fn mount(
        mounter: &'a mut dyn Mounter,
        device: &Path,
        mount_point: &Path,
        fs_types: &[String]
    ) -> Option<Self> {

        for fs_type in fs_types {
            match mounter.mount_read_only(device, mount_point, fs_type) {
                Ok(()) => {
                    debug!("Mounted {} at {} as {}", device.display(), mount_point.display(), fs_type);
                    return Some(MountGuard {
                        mounter,
                        mount_point: mount_point.to_path_buf(),
                        fs_type: fs_type.clone(),
                    });
                }
                Err(err) => debug!("Mounting {} as {} failed: {}", device.display(), fs_type, err),
            }
        }

        // An empty drive fails every mount, so this is routine while idle.
        debug!(
            "Failed to mount {} with any of: {}",
            device.display(),
            fs_types.join(", ")
        );
        None
    }

    /// Returns the directory the drive is mounted at.
    pub fn path(&self) -> &Path {
        &self.mount_point
    }

    /// Returns the filesystem type that was successfully mounted.
    pub fn fs_type(&self) -> &str {
        &self.fs_type
    }
}

impl Drop for MountGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.mounter.unmount(&self.mount_point) {
            warn!("Failed to unmount {}: {}", self.mount_point.display(), err);
        }
    }
}
