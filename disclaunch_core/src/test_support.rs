// SPDX-License-Identifier: GPL-3.0
// test_support.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

// Fake platform implementations shared by the unit tests. Each fake records what it
// was asked to do behind an `Rc<RefCell<..>>`, so a test can keep a clone and look
// at the record after the fake itself has been boxed and handed over.

use std::{
    cell::RefCell,
    collections::VecDeque,
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{
    disc_identifier::{GameIdentity, IdentificationStrategy},
    drive_monitor::DriveMonitor,
    platform::{CommandChannel, Mounter, ProcessRunner},
    system::System,
};

#[derive(Default)]
struct MounterLog {
    attempts: Vec<String>,
    mounted: bool,
    unmounts: usize,
}

/// Accepts mounts only for the listed filesystem types.
#[derive(Clone)]
pub struct FakeMounter {
    accepted: Vec<String>,
    fail_unmount: bool,
    log: Rc<RefCell<MounterLog>>,
}

impl FakeMounter {

    pub fn accepting(fs_types: &[&str]) -> Self {
        FakeMounter {
            accepted: fs_types.iter().map(|fs_type| fs_type.to_string()).collect(),
            fail_unmount: false,
            log: Rc::default(),
        }
    }

    pub fn failing_unmount(mut self) -> Self {
        self.fail_unmount = true;
        self
    }

    pub fn attempts(&self) -> Vec<String> {
        self.log.borrow().attempts.clone()
    }

    pub fn unmount_count(&self) -> usize {
        self.log.borrow().unmounts
    }

    pub fn is_mounted(&self) -> bool {
        self.log.borrow().mounted
    }
}

impl Mounter for FakeMounter {

    fn mount_read_only(&mut self, _device: &Path, _mount_point: &Path, fs_type: &str) -> io::Result<()> {

        let mut log = self.log.borrow_mut();
        log.attempts.push(fs_type.to_string());
        if self.accepted.iter().any(|accepted| accepted == fs_type) {
            log.mounted = true;
            Ok(())
        } else {
            Err(io::Error::other("wrong fs type"))
        }
    }

    fn unmount(&mut self, _mount_point: &Path) -> io::Result<()> {

        let mut log = self.log.borrow_mut();
        log.unmounts += 1;
        log.mounted = false;
        if self.fail_unmount {
            Err(io::Error::other("target is busy"))
        } else {
            Ok(())
        }
    }
}

/// Records every line sent, optionally failing every send.
#[derive(Clone, Default)]
pub struct FakeCommandChannel {
    lines: Rc<RefCell<Vec<String>>>,
    broken: bool,
}

impl FakeCommandChannel {

    pub fn broken() -> Self {
        FakeCommandChannel {
            broken: true,
            ..Default::default()
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl CommandChannel for FakeCommandChannel {

    fn send_line(&mut self, line: &str) -> io::Result<()> {

        if self.broken {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "no reader"));
        }
        self.lines.borrow_mut().push(line.to_string());
        Ok(())
    }
}

/// Records every invocation and answers with a fixed exit code.
#[derive(Clone)]
pub struct FakeProcessRunner {
    exit_code: Option<i32>,
    calls: Rc<RefCell<Vec<(PathBuf, Vec<OsString>)>>>,
}

impl FakeProcessRunner {

    pub fn exiting_with(exit_code: Option<i32>) -> Self {
        FakeProcessRunner {
            exit_code,
            calls: Rc::default(),
        }
    }

    pub fn calls(&self) -> Vec<(PathBuf, Vec<OsString>)> {
        self.calls.borrow().clone()
    }
}

impl ProcessRunner for FakeProcessRunner {

    fn run(&mut self, program: &Path, args: &[OsString]) -> io::Result<Option<i32>> {
        self.calls.borrow_mut().push((program.to_path_buf(), args.to_vec()));
        Ok(self.exit_code)
    }
}

/// Reports drives from a script, one entry per call, then no drive.
pub struct FakeDriveMonitor {
    drives: VecDeque<Option<PathBuf>>,
}

impl FakeDriveMonitor {

    pub fn scripted(drives: &[Option<&str>]) -> Self {
        FakeDriveMonitor {
            drives: drives.iter().map(|drive| drive.map(PathBuf::from)).collect(),
        }
    }
}

impl DriveMonitor for FakeDriveMonitor {

    fn find_optical_drive(&mut self) -> Option<PathBuf> {
        self.drives.pop_front().flatten()
    }
}

/// Identifies discs from a script, one entry per call, and counts its calls.
pub struct FakeStrategy {
    system: System,
    identities: VecDeque<Option<GameIdentity>>,
    calls: Rc<RefCell<usize>>,
}

impl FakeStrategy {

    pub fn scripted(system: System, identities: &[Option<&str>]) -> Self {
        FakeStrategy {
            system,
            identities: identities.iter().map(|identity| identity.map(GameIdentity::new)).collect(),
            calls: Rc::default(),
        }
    }

    pub fn call_counter(&self) -> Rc<RefCell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl IdentificationStrategy for FakeStrategy {

    fn system(&self) -> System {
        self.system
    }

    fn identify(&mut self, _device: &Path) -> Option<GameIdentity> {
        *self.calls.borrow_mut() += 1;
        self.identities.pop_front().flatten()
    }
}
