// SPDX-License-Identifier: GPL-3.0
// psx_system_cnf.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{
    fs,
    path::{Path, PathBuf},
};

use disclaunch_utility::CustomByteText;
use log::{debug, info, warn};
use walkdir::WalkDir;

use super::{GameIdentity, IdentificationStrategy};
use crate::{
    platform::{MountGuard, Mounter},
    system::System,
};

/// The name of the PlayStation boot descriptor, matched without regard to case.
const SYSTEM_CNF_NAME: &str = "system.cnf";

/// This struct identifies PlayStation discs by mounting them and reading the
/// executable name from the BOOT line of SYSTEM.CNF.
pub struct PsxSystemCnfStrategy {
    mounter: Box<dyn Mounter>,
    mount_point: PathBuf,
    fs_types: Vec<String>,
}

/// Implementation functions for the PlayStation strategy itself.
impl PsxSystemCnfStrategy {

    /// Creates a new strategy that mounts at the supplied mount point, trying each
    /// filesystem type in order.
    pub fn new(mounter: Box<dyn Mounter>, mount_point: &Path, fs_types: &[String]) -> Self {
        PsxSystemCnfStrategy {
            mounter,
            mount_point: mount_point.to_path_buf(),
            fs_types: fs_types.to_vec(),
        }
    }
}

/// Walks the mounted tree looking for SYSTEM.CNF in any letter case.
pub fn find_system_cnf(root: &Path) -> Option<PathBuf> {

    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| entry.file_name().to_string_lossy().eq_ignore_ascii_case(SYSTEM_CNF_NAME))
        .map(|entry| entry.into_path())
}

/// Extracts the game identity from SYSTEM.CNF text. The first BOOT line with a path
/// in it wins: `BOOT=cdrom:\SLUS_005.18;1` gives `SLUS-00518`.
pub fn parse_boot_identity(system_cnf: &str) -> Option<GameIdentity> {

    system_cnf
        .lines()
        .filter(|line| line.to_ascii_uppercase().contains("BOOT"))
        .find_map(boot_line_identity)
}

/// Isolates the executable name between the first path separator and the version
/// terminator, then normalises it.
fn boot_line_identity(line: &str) -> Option<GameIdentity> {

    let value = line.split_once('=').map_or(line, |(_, value)| value);
    let (_, executable) = value.split_once(['\\', '/'])?;
    let executable = executable.split(';').next()?.trim();

    if executable.is_empty() {
        return None;
    }

    let identity: String = executable
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == '_' { '-' } else { c })
        .collect();

    Some(GameIdentity::new(identity))
}

/// Implementation functions to be called from anything that understands what
/// an IdentificationStrategy object is.
impl IdentificationStrategy for PsxSystemCnfStrategy {

    /// PlayStation.
    fn system(&self) -> System {
        System::Psx
    }

    /// Mount the disc, find SYSTEM.CNF and parse it. The drive is unmounted again
    /// when the guard goes out of scope, on every path out of this function.
    fn identify(&mut self, device: &Path) -> Option<GameIdentity> {

        let guard = MountGuard::mount(self.mounter.as_mut(), device, &self.mount_point, &self.fs_types)?;

        let Some(system_cnf_path) = find_system_cnf(guard.path()) else {
            info!("SYSTEM.CNF not found on disc in {}", device.display());
            return None;
        };

        let system_cnf = match fs::read(&system_cnf_path) {
            Ok(bytes) => bytes.latin1_to_string(),
            Err(err) => {
                warn!("Error reading {}: {}", system_cnf_path.display(), err);
                return None;
            }
        };
        debug!("Found {}", system_cnf_path.display());

        let identity = parse_boot_identity(&system_cnf);
        match &identity {
            Some(identity) => info!("Extracted PSX game ID: {}", identity),
            None => info!("No usable BOOT line in {}", system_cnf_path.display()),
        }

        identity
    }
}
