// SPDX-License-Identifier: GPL-3.0
// launch_state.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use super::disc_identifier::IdentifiedDisc;

/// This struct remembers the last disc something was done for, so the same disc
/// is not launched again on every poll while it stays in the drive. It is passed
/// into and returned from each poll cycle rather than held globally.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LaunchState {
    last: Option<IdentifiedDisc>,
}

impl LaunchState {

    /// Creates an empty state, as at startup or after a disc is removed.
    pub fn empty() -> Self {
        LaunchState {
            last: None,
        }
    }

    /// Creates a state remembering the supplied disc.
    pub fn launched(disc: IdentifiedDisc) -> Self {
        LaunchState {
            last: Some(disc),
        }
    }

    /// Returns true if the supplied disc is the one already acted upon. Both the
    /// identity and the system have to match.
    pub fn is_current(&self, disc: &IdentifiedDisc) -> bool {
        self.last.as_ref() == Some(disc)
    }

    /// Returns the remembered disc, if any.
    pub fn last(&self) -> Option<&IdentifiedDisc> {
        self.last.as_ref()
    }
}
