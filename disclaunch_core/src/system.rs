// SPDX-License-Identifier: GPL-3.0
// system.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::fmt;

/// This enum represents the optical-media consoles we know how to identify and launch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum System {
    Psx,
    Saturn,
}

impl System {

    /// Every supported system, in the order discs are probed for them.
    pub const ALL: [System; 2] = [System::Psx, System::Saturn];

    /// Returns the tag used for this system in the catalog and on the command line
    /// of the fallback procedure.
    pub fn tag(self) -> &'static str {
        match self {
            System::Psx => "PSX",
            System::Saturn => "Saturn",
        }
    }

    /// Parses a catalog system tag, ignoring case. Unrecognised tags (including the
    /// catalog's "Unknown" default) return `None`.
    pub fn from_tag(tag: &str) -> Option<System> {

        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("PSX") || tag.eq_ignore_ascii_case("PS1") {
            Some(System::Psx)
        } else if tag.eq_ignore_ascii_case("Saturn") || tag.eq_ignore_ascii_case("SS") {
            Some(System::Saturn)
        } else {
            None
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
