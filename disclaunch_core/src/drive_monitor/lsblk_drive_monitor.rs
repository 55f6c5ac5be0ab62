// SPDX-License-Identifier: GPL-3.0
// lsblk_drive_monitor.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{path::PathBuf, process::Command};

use log::{debug, warn};

use super::DriveMonitor;

/// The device type `lsblk` reports for optical drives.
const OPTICAL_DEVICE_TYPE: &str = "rom";

/// This struct finds optical drives by running `lsblk -d -o NAME,TYPE`.
pub struct LsblkDriveMonitor;

/// Picks the first optical drive out of `lsblk -d -o NAME,TYPE` output. The first
/// line is the column header and is skipped.
pub fn parse_lsblk_output(output: &str) -> Option<PathBuf> {

    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut columns = line.split_whitespace();
            Some((columns.next()?, columns.next()?))
        })
        .find(|(_, device_type)| *device_type == OPTICAL_DEVICE_TYPE)
        .map(|(name, _)| PathBuf::from("/dev").join(name))
}

/// Implementation functions to be called from anything that understands what
/// a DriveMonitor object is.
impl DriveMonitor for LsblkDriveMonitor {

    /// Query the block-device inventory for an optical drive.
    fn find_optical_drive(&mut self) -> Option<PathBuf> {

        let output = match Command::new("lsblk").args(["-d", "-o", "NAME,TYPE"]).output() {
            Ok(output) => output,
            Err(err) => {
                warn!("Error running lsblk: {}", err);
                return None;
            }
        };

        if !output.status.success() {
            warn!("lsblk exited with {}", output.status);
            return None;
        }

        let drive = parse_lsblk_output(&String::from_utf8_lossy(&output.stdout));
        match &drive {
            Some(path) => debug!("Detected optical drive: {}", path.display()),
            None => debug!("No optical drive detected"),
        }

        drive
    }
}


#[cfg(test)]
mod tests {

    use std::path::PathBuf;

    use super::parse_lsblk_output;

    #[test]
    fn parse_lsblk_output_should_find_rom_device() {

        let output = "NAME   TYPE\nmmcblk0 disk\nsda    disk\nsr0    rom\n";

        assert_eq!(parse_lsblk_output(output), Some(PathBuf::from("/dev/sr0")));
    }

    #[test]
    fn parse_lsblk_output_should_take_first_of_several_drives() {

        let output = "NAME TYPE\nsr1  rom\nsr0  rom\n";

        assert_eq!(parse_lsblk_output(output), Some(PathBuf::from("/dev/sr1")));
    }

    #[test]
    fn parse_lsblk_output_should_return_none_without_optical_drive() {

        let output = "NAME TYPE\nsda  disk\nloop0 loop\n";

        assert_eq!(parse_lsblk_output(output), None);
    }

    #[test]
    fn parse_lsblk_output_should_ignore_header_and_short_lines() {

        // A header that happens to say rom must not count as a device.
        let output = "rom rom\n\nsda\n";

        assert_eq!(parse_lsblk_output(output), None);
    }
}
