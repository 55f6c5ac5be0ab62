// SPDX-License-Identifier: GPL-3.0
// mister_platform.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{
    ffi::OsString,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};

use log::debug;

use super::{CommandChannel, Mounter, ProcessRunner};

/// Turns a non-zero exit status of a helper tool into an error.
fn check_status(tool: &str, status: ExitStatus) -> io::Result<()> {

    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{} exited with {}", tool, status)))
    }
}

/// This struct mounts drives using the system `mount` and `umount` tools.
pub struct SystemMounter;

/// Implementation functions to be called from anything that understands what
/// a Mounter object is.
impl Mounter for SystemMounter {

    /// Mount the device read-only, creating the mount point first if needed.
    fn mount_read_only(
        &mut self,
        device: &Path,
        mount_point: &Path,
        fs_type: &str
    ) -> io::Result<()> {

        fs::create_dir_all(mount_point)?;

        let status = Command::new("mount")
            .arg(device)
            .arg(mount_point)
            .args(["-t", fs_type, "-o", "ro"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        check_status("mount", status)
    }

    /// Unmount the mount point.
    fn unmount(&mut self, mount_point: &Path) -> io::Result<()> {

        let status = Command::new("umount")
            .arg(mount_point)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        check_status("umount", status)
    }
}

/// This struct writes commands to the MiSTer command FIFO (or any file standing in
/// for it). The file is opened for each command and never created.
pub struct FileCommandChannel {
    path: PathBuf,
}

impl FileCommandChannel {

    /// Creates a new command channel writing to the supplied path.
    pub fn new(path: &Path) -> Self {
        FileCommandChannel {
            path: path.to_path_buf(),
        }
    }
}

impl CommandChannel for FileCommandChannel {

    /// Write a single line to the channel and flush it straight away.
    fn send_line(&mut self, line: &str) -> io::Result<()> {

        let mut channel = OpenOptions::new().write(true).open(&self.path)?;
        channel.write_all(format!("{}\n", line).as_bytes())?;
        channel.flush()?;

        debug!("Sent '{}' to {}", line, self.path.display());
        Ok(())
    }
}

/// This struct runs external programs as child processes, inheriting our standard
/// streams so their output ends up alongside ours.
pub struct ChildProcessRunner;

impl ProcessRunner for ChildProcessRunner {

    /// Run the program and block until it exits.
    fn run(&mut self, program: &Path, args: &[OsString]) -> io::Result<Option<i32>> {

        let status = Command::new(program).args(args).status()?;
        Ok(status.code())
    }
}
