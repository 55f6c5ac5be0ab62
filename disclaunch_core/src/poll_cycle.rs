// SPDX-License-Identifier: GPL-3.0
// poll_cycle.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{collections::HashMap, path::PathBuf};

use log::{debug, info, warn};

use super::{
    catalog::TitleCatalog,
    config::{LauncherConfig, SystemProfile},
    core_locator::{CoreImage, CoreLocator},
    disc_identifier::{
        DiscIdentifier,
        IdentificationStrategy,
        IdentifiedDisc,
        psx_system_cnf::PsxSystemCnfStrategy,
        saturn_header::SaturnHeaderStrategy,
    },
    drive_monitor::{DriveMonitor, lsblk_drive_monitor::LsblkDriveMonitor},
    error::Result,
    game_resolver::{GameResolver, Resolution},
    launch_orchestrator::{LaunchAction, LaunchOrchestrator},
    launch_state::LaunchState,
    platform::mister_platform::{ChildProcessRunner, FileCommandChannel, SystemMounter},
    system::System,
};

/// How a single poll cycle ended.
#[derive(Clone, Debug, PartialEq)]
pub enum CycleOutcome {

    /// No optical drive is attached.
    NoDrive,

    /// A drive is attached but the disc in it (if any) could not be identified.
    NoIdentity {
        drive: PathBuf,
    },

    /// The disc is the one already acted upon, so nothing was done.
    AlreadyLaunched(IdentifiedDisc),

    /// The disc's image was found but its system has no core yet, so it will be
    /// tried again next cycle.
    NoCore(IdentifiedDisc),

    /// A new disc was identified and exactly one action taken for it.
    Acted {
        disc: IdentifiedDisc,
        action: LaunchAction,
    },
}

/// This struct wires every component together and runs one detect, identify,
/// resolve and launch pass at a time.
pub struct PollCycle {
    drive_monitor: Box<dyn DriveMonitor>,
    identifier: DiscIdentifier,
    resolver: GameResolver,
    orchestrator: LaunchOrchestrator,
    core_locator: CoreLocator,
    profiles: HashMap<System, SystemProfile>,
    cores: HashMap<System, CoreImage>,
}

/// Implementation functions for the poll cycle.
impl PollCycle {

    /// Creates a new poll cycle from its components. No cores are known until
    /// `locate_cores` is called, though they are also looked for on demand.
    pub fn new(
        drive_monitor: Box<dyn DriveMonitor>,
        identifier: DiscIdentifier,
        resolver: GameResolver,
        orchestrator: LaunchOrchestrator,
        core_locator: CoreLocator,
        profiles: HashMap<System, SystemProfile>
    ) -> Self {
        PollCycle {
            drive_monitor,
            identifier,
            resolver,
            orchestrator,
            core_locator,
            profiles,
            cores: HashMap::new(),
        }
    }

    /// Creates a poll cycle using the real MiSTer platform, as described by the
    /// supplied config.
    pub fn from_config(config: &LauncherConfig, catalog: TitleCatalog) -> Self {

        let profiles: HashMap<System, SystemProfile> = System::ALL
            .into_iter()
            .map(|system| (system, config.profile(system)))
            .collect();

        let mut resolver = GameResolver::new(catalog);
        for (system, profile) in &profiles {
            resolver.add_system(*system, &profile.search_dirs, &profile.image_extension);
        }

        let strategies: Vec<Box<dyn IdentificationStrategy>> = vec![
            Box::new(PsxSystemCnfStrategy::new(
                Box::new(SystemMounter),
                &config.mount_point,
                &config.mount_fs_types
            )),
            Box::new(SaturnHeaderStrategy),
        ];

        let orchestrator = LaunchOrchestrator::new(
            Box::new(FileCommandChannel::new(&config.command_channel)),
            Box::new(ChildProcessRunner),
            &config.descriptor_path,
            config.fallback_program.as_deref()
        );

        Self::new(
            Box::new(LsblkDriveMonitor),
            DiscIdentifier::new(strategies),
            resolver,
            orchestrator,
            CoreLocator::new(&config.core_dir, &config.core_extension),
            profiles
        )
    }

    /// Looks for a core for every supported system, returning how many were found.
    pub fn locate_cores(&mut self) -> usize {

        for system in System::ALL {
            self.refresh_core(system);
        }

        self.cores.len()
    }

    /// Returns the core located for a system, if any.
    pub fn core(&self, system: System) -> Option<&CoreImage> {
        self.cores.get(&system)
    }

    /// Shows a message box on the platform.
    pub fn show_popup(&mut self, message: &str) {
        self.orchestrator.show_popup(message);
    }

    /// Returns the directory cores are looked for in.
    pub fn core_dir(&self) -> PathBuf {
        self.core_locator.core_dir().to_path_buf()
    }

    /// Tries to locate the core for one system, remembering it if found.
    fn refresh_core(&mut self, system: System) -> bool {

        let Some(profile) = self.profiles.get(&system) else {
            return false;
        };

        match self.core_locator.locate(system, &profile.core_prefix) {
            Some(core) => {
                self.cores.insert(system, core);
                true
            }
            None => false,
        }
    }

    /// Runs one cycle of the state machine, taking the state left by the previous
    /// cycle and returning the state for the next one. Errors are reserved for
    /// failures of the platform or the fallback procedure.
    pub fn run(&mut self, state: LaunchState) -> Result<(LaunchState, CycleOutcome)> {

        let Some(drive) = self.drive_monitor.find_optical_drive() else {
            info!("No optical drive detected. Waiting...");
            return Ok((LaunchState::empty(), CycleOutcome::NoDrive));
        };

        debug!("Checking drive {}...", drive.display());
        let Some(disc) = self.identifier.identify(&drive) else {
            info!("No game detected in {}. Waiting...", drive.display());
            return Ok((LaunchState::empty(), CycleOutcome::NoIdentity { drive }));
        };

        if state.is_current(&disc) {
            info!("Game {} already launched. Waiting for new disc...", disc.identity);
            return Ok((state, CycleOutcome::AlreadyLaunched(disc)));
        }

        let resolution = self.resolver.resolve(&disc);

        // Only a launch needs the core; the fallback and skip paths do not.
        if matches!(resolution, Resolution::Found { .. })
            && !self.cores.contains_key(&disc.system)
            && !self.refresh_core(disc.system)
        {
            warn!("Cannot launch {} game {} without a {} core", disc.system, disc.identity, disc.system);
            return Ok((state, CycleOutcome::NoCore(disc)));
        }

        let profile = self
            .profiles
            .get(&disc.system)
            .cloned()
            .unwrap_or_else(|| SystemProfile::default_for(disc.system));
        let action = self.orchestrator.orchestrate(&drive, &disc, &resolution, &profile)?;

        Ok((
            LaunchState::launched(disc.clone()),
            CycleOutcome::Acted {
                disc,
                action,
            },
        ))
    }
}
