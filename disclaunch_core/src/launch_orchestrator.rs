// SPDX-License-Identifier: GPL-3.0
// launch_orchestrator.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{
    ffi::OsString,
    fs,
    io,
    path::{Path, PathBuf},
};

use disclaunch_utility::escape_xml;
use log::{info, warn};

use super::{
    config::SystemProfile,
    disc_identifier::IdentifiedDisc,
    error::{LauncherError, Result},
    game_resolver::Resolution,
    platform::{CommandChannel, ProcessRunner},
};

/// Popup dimensions for `dialog --msgbox`.
const POPUP_HEIGHT: u32 = 10;
const POPUP_WIDTH: u32 = 40;

/// What the orchestrator ended up doing for a newly identified disc.
#[derive(Clone, Debug, PartialEq)]
pub enum LaunchAction {

    /// A load descriptor was written and `load_core` sent.
    Launched {
        image: PathBuf,
    },

    /// The fallback procedure ran and exited successfully.
    Fallback,

    /// No fallback procedure is configured, so the user was told instead.
    NotFoundNotified,

    /// The title is unknown, so nothing was done.
    SkippedUnknown,
}

/// This struct models a single-slot MGL document telling the platform which core
/// to load and which image to mount into it.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadDescriptor {
    pub core_reference: String,
    pub slot_delay: u32,
    pub slot_type: String,
    pub slot_index: u32,
    pub image_path: PathBuf,
}

/// Implementation functions for the load descriptor.
impl LoadDescriptor {

    /// Creates a descriptor for an image using a system's slot parameters.
    pub fn new(profile: &SystemProfile, image_path: &Path) -> Self {
        LoadDescriptor {
            core_reference: profile.core_reference.clone(),
            slot_delay: profile.slot_delay,
            slot_type: profile.slot_type.clone(),
            slot_index: profile.slot_index,
            image_path: image_path.to_path_buf(),
        }
    }

    /// Renders the descriptor as an MGL (XML) document.
    pub fn to_mgl(&self) -> String {
        format!(
            concat!(
                "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
                "<mistergamedescription>\n",
                "    <rbf>{}</rbf>\n",
                "    <file delay=\"{}\" type=\"{}\" index=\"{}\" path=\"{}\"/>\n",
                "</mistergamedescription>\n"
            ),
            escape_xml(&self.core_reference),
            self.slot_delay,
            escape_xml(&self.slot_type),
            self.slot_index,
            escape_xml(&self.image_path.to_string_lossy())
        )
    }

    /// Writes the descriptor to the supplied path, replacing whatever was there.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_mgl())
    }
}

/// This struct turns a resolution into exactly one action on the platform: a
/// launch, the fallback procedure, a popup, or nothing.
pub struct LaunchOrchestrator {
    channel: Box<dyn CommandChannel>,
    runner: Box<dyn ProcessRunner>,
    descriptor_path: PathBuf,
    fallback_program: Option<PathBuf>,
}

/// Implementation functions for the launch orchestrator.
impl LaunchOrchestrator {

    /// Creates a new orchestrator. Without a fallback program, missing images are
    /// reported with a popup instead.
    pub fn new(
        channel: Box<dyn CommandChannel>,
        runner: Box<dyn ProcessRunner>,
        descriptor_path: &Path,
        fallback_program: Option<&Path>
    ) -> Self {
        LaunchOrchestrator {
            channel,
            runner,
            descriptor_path: descriptor_path.to_path_buf(),
            fallback_program: fallback_program.map(Path::to_path_buf),
        }
    }

    /// Acts on the resolution of a newly identified disc.
    pub fn orchestrate(
        &mut self,
        drive: &Path,
        disc: &IdentifiedDisc,
        resolution: &Resolution,
        profile: &SystemProfile
    ) -> Result<LaunchAction> {

        match resolution {
            Resolution::Found { image, .. } => {
                self.launch(profile, image)?;
                Ok(LaunchAction::Launched {
                    image: image.clone(),
                })
            }
            Resolution::ImageMissing { title } => match self.fallback_program.clone() {
                Some(program) => {
                    self.run_fallback(&program, drive, title, disc)?;
                    Ok(LaunchAction::Fallback)
                }
                None => {
                    self.show_popup(&format!("Game not found: {} ({})", title, disc.identity));
                    Ok(LaunchAction::NotFoundNotified)
                }
            },
            Resolution::UnknownTitle => {
                info!(
                    "No title known for {} game {}, not launching",
                    disc.system,
                    disc.identity
                );
                Ok(LaunchAction::SkippedUnknown)
            }
        }
    }

    /// Writes the load descriptor and sends `load_core` for it. The descriptor is
    /// left on disk afterwards.
    pub fn launch(&mut self, profile: &SystemProfile, image: &Path) -> Result<()> {

        let descriptor = LoadDescriptor::new(profile, image);
        descriptor
            .write_to(&self.descriptor_path)
            .map_err(|source| LauncherError::DescriptorWrite {
                path: self.descriptor_path.clone(),
                source,
            })?;
        info!("Overwrote load descriptor at {}", self.descriptor_path.display());

        let command = format!("load_core {}", self.descriptor_path.display());
        self.channel
            .send_line(&command)
            .map_err(LauncherError::CommandChannel)?;
        info!("Command '{}' sent", command);

        Ok(())
    }

    /// Runs the fallback procedure with the drive, title and system tag, waiting
    /// for it to finish. Anything other than a zero exit is an error.
    fn run_fallback(
        &mut self,
        program: &Path,
        drive: &Path,
        title: &str,
        disc: &IdentifiedDisc
    ) -> Result<()> {

        let args = [
            OsString::from(drive),
            OsString::from(title),
            OsString::from(disc.system.tag()),
        ];

        info!("Running fallback procedure {} for {}", program.display(), title);
        let exit_code = self
            .runner
            .run(program, &args)
            .map_err(|source| LauncherError::FallbackSpawn {
                program: program.to_path_buf(),
                source,
            })?;

        match exit_code {
            Some(0) => Ok(()),
            Some(code) => Err(LauncherError::FallbackFailed {
                program: program.to_path_buf(),
                status: format!("exit code {}", code),
            }),
            None => Err(LauncherError::FallbackFailed {
                program: program.to_path_buf(),
                status: "killed by signal".to_string(),
            }),
        }
    }

    /// Shows a message box on the platform. Failing to show it is only logged.
    pub fn show_popup(&mut self, message: &str) {

        let command = format!(
            "dialog --msgbox \"{}\" {} {}",
            message.replace('"', "'"),
            POPUP_HEIGHT,
            POPUP_WIDTH
        );

        match self.channel.send_line(&command) {
            Ok(()) => info!("Displayed popup: {}", message),
            Err(err) => warn!("Failed to display popup: {}", err),
        }
    }
}
