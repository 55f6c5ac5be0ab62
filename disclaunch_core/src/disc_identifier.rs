// SPDX-License-Identifier: GPL-3.0
// disc_identifier.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{fmt, path::Path};

use log::debug;

use super::system::System;

/// This module contains the PlayStation strategy, which mounts the disc and reads
/// the boot path out of SYSTEM.CNF.
pub mod psx_system_cnf;

/// This module contains the Saturn strategy, which reads the product number straight
/// out of the disc header without mounting anything.
pub mod saturn_header;

/// An opaque token naming a disc's content within one system, such as `SLUS-00518`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameIdentity(String);

impl GameIdentity {

    /// Wraps an already-normalised identity string.
    pub fn new(identity: impl Into<String>) -> Self {
        GameIdentity(identity.into())
    }

    /// Returns the identity as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A disc we managed to identify, along with the system it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifiedDisc {
    pub identity: GameIdentity,
    pub system: System,
}

/// This trait provides an implementation-opaque way of extracting a game identity
/// from an optical drive, for one particular system.
pub trait IdentificationStrategy {

    /// Implementations must return the system whose discs they can identify.
    fn system(&self) -> System;

    /// Implementations must return the identity of the disc in the supplied drive,
    /// or `None` if it cannot be determined for any reason.
    fn identify(&mut self, device: &Path) -> Option<GameIdentity>;
}

/// This struct tries each of its strategies against a drive in a fixed order,
/// stopping at the first one that recognises the disc.
pub struct DiscIdentifier {
    strategies: Vec<Box<dyn IdentificationStrategy>>,
}

/// Implementation functions for the disc identifier.
impl DiscIdentifier {

    /// Creates a new disc identifier that will try the supplied strategies in order.
    pub fn new(strategies: Vec<Box<dyn IdentificationStrategy>>) -> Self {
        DiscIdentifier {
            strategies,
        }
    }

    /// Identifies the disc in the supplied drive. A strategy that fails falls through
    /// to the next one.
    pub fn identify(&mut self, device: &Path) -> Option<IdentifiedDisc> {

        for strategy in self.strategies.iter_mut() {

            let system = strategy.system();
            match strategy.identify(device) {
                Some(identity) => {
                    return Some(IdentifiedDisc {
                        identity,
                        system,
                    });
                }
                None => debug!("Disc in {} is not a readable {} disc", device.display(), system),
            }
        }

        None
    }
}
