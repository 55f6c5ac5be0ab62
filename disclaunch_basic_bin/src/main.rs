// SPDX-License-Identifier: GPL-3.0
// main.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{
    path::PathBuf,
    process::ExitCode,
    sync::mpsc::{self, RecvTimeoutError},
    thread,
};

// This file is the core of the basic client - it exists merely as a CLI-based
// program that watches the optical drive and launches whatever disc is inserted.
// It runs until interrupted, or until something goes wrong that needs a human.

use clap::Parser;
use disclaunch_core::{
    catalog::TitleCatalog,
    config::LauncherConfig,
    error::{LauncherError, Result},
    launch_state::LaunchState,
    poll_cycle::PollCycle,
    system::System,
};
use log::{LevelFilter, debug, error, info, warn};

#[derive(Parser)]
#[command(
    version,
    about = "Launches games on MiSTer when a PSX or Saturn disc is inserted",
    long_about = None
)]
struct DiscLaunchArgs {
    #[arg(
        long = "config",
        help = "An optional TOML config file",
        id = "Config file"
    )]
    config: Option<PathBuf>,

    #[arg(
        long = "once",
        help = "Run a single poll cycle and exit"
    )]
    once: bool,

    #[arg(
        short = 'v',
        long = "verbose",
        help = "Log every step of each poll cycle",
        conflicts_with = "quiet"
    )]
    verbose: bool,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Only log warnings and errors"
    )]
    quiet: bool,
}

/// Sets up colourised logging at the level picked on the command line.
fn init_logging(args: &DiscLaunchArgs) {

    let level = if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = colog::default_builder();
    builder.filter_level(level);
    builder.init();
}

/// Loads everything, checks there is at least one core, and then polls until told
/// to stop.
fn run(args: &DiscLaunchArgs) -> Result<()> {

    info!("Starting disc launcher on MiSTer...");
    let config = LauncherConfig::load(args.config.as_deref())?;
    let catalog = TitleCatalog::load(&config.catalog_path);
    let mut poll_cycle = PollCycle::from_config(&config, catalog);

    if poll_cycle.locate_cores() == 0 {
        let prefixes: Vec<String> = System::ALL
            .iter()
            .map(|system| format!("{}*.{}", config.profile(*system).core_prefix, config.core_extension))
            .collect();
        poll_cycle.show_popup(&format!(
            "No core found in {}. Please add {}.",
            poll_cycle.core_dir().display(),
            prefixes.join(" or ")
        ));
        return Err(LauncherError::NoCoreFound(poll_cycle.core_dir()));
    }

    for system in System::ALL {
        if poll_cycle.core(system).is_none() {
            warn!("{} discs will not launch until a {} core is added", system, system);
        }
    }

    // The handler only signals the loop; the loop notices between cycles.
    let (stop_sender, stop_receiver) = mpsc::channel();
    if let Err(err) = ctrlc::set_handler(move || {
        let _ = stop_sender.send(());
    }) {
        warn!("Could not install interrupt handler: {}", err);
    }

    let interval = config.poll_interval();
    let mut state = LaunchState::empty();
    loop {
        let (next_state, outcome) = poll_cycle.run(state)?;
        debug!("Cycle finished: {:?}", outcome);
        state = next_state;

        if args.once {
            return Ok(());
        }

        match stop_receiver.recv_timeout(interval) {
            Ok(()) => {
                info!("Stopped by user. Exiting...");
                return Ok(());
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => thread::sleep(interval),
        }
    }
}

fn main() -> ExitCode {

    let args = DiscLaunchArgs::parse();
    init_logging(&args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
