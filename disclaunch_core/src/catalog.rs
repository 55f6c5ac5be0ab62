// SPDX-License-Identifier: GPL-3.0
// catalog.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use disclaunch_utility::split_csv_row;
use log::{debug, info, warn};

use super::{disc_identifier::GameIdentity, system::System};

/// The title reported for any identity the catalog does not know.
pub const UNKNOWN_TITLE: &str = "Unknown Game";

/// The system tag assumed when a row has no system column.
const DEFAULT_SYSTEM_TAG: &str = "Unknown";

/// Minimum number of fields (identity and title) for a row to be usable.
const MIN_FIELDS: usize = 2;

/// Column indices within a catalog row.
const IDENTITY_COLUMN: usize = 0;
const TITLE_COLUMN: usize = 1;
const SYSTEM_COLUMN: usize = 3;

/// This struct maps a (game identity, system) pair to a display title. It is
/// built once at startup and only read afterwards.
pub struct TitleCatalog {
    titles: HashMap<(GameIdentity, System), String>,
}

/// Implementation functions for the title catalog.
impl TitleCatalog {

    /// Creates a new, empty catalog, in which every lookup misses.
    pub fn new() -> Self {
        TitleCatalog {
            titles: HashMap::new(),
        }
    }

    /// Loads the catalog from a CSV file. A file that cannot be opened gives an
    /// empty catalog and a warning, rather than an error.
    pub fn load(path: &Path) -> Self {

        match File::open(path) {
            Ok(file) => {
                let catalog = Self::from_reader(BufReader::new(file));
                info!("Loaded {} game titles from {}", catalog.len(), path.display());
                catalog
            }
            Err(err) => {
                warn!("Error loading game titles from {}: {}", path.display(), err);
                Self::new()
            }
        }
    }

    /// Builds the catalog from CSV rows of identity, title, region and system.
    /// The first row is a header. Rows that are too short, or that name a system
    /// we do not support, are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Self {

        let mut catalog = Self::new();
        let mut rows = 0;
        let mut skipped = 0;

        for (line_number, line) in reader.split(b'\n').enumerate().skip(1) {

            let line = match line {
                Ok(line) => String::from_utf8_lossy(&line).into_owned(),
                Err(err) => {
                    warn!("Stopped reading catalog at line {}: {}", line_number + 1, err);
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }
            rows += 1;

            let fields = split_csv_row(&line);
            if fields.len() < MIN_FIELDS {
                skipped += 1;
                continue;
            }

            let system_tag = fields
                .get(SYSTEM_COLUMN)
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .unwrap_or(DEFAULT_SYSTEM_TAG);
            let Some(system) = System::from_tag(system_tag) else {
                skipped += 1;
                continue;
            };

            catalog.insert(
                GameIdentity::new(fields[IDENTITY_COLUMN].trim()),
                system,
                fields[TITLE_COLUMN].trim()
            );
        }

        if rows > 0 && skipped == rows {
            warn!(
                "All {} catalog rows were skipped, so every disc will resolve to {}. \
                 Rows need identity, title, region and a PSX or Saturn system column",
                rows,
                UNKNOWN_TITLE
            );
        } else if skipped > 0 {
            debug!("Skipped {} catalog rows that were malformed or for unsupported systems", skipped);
        }

        catalog
    }

    /// Adds or replaces the title for an identity. Later rows win over earlier ones.
    pub fn insert(&mut self, identity: GameIdentity, system: System, title: &str) {
        self.titles.insert((identity, system), title.to_string());
    }

    /// Returns the title for an identity, or `UNKNOWN_TITLE` if it is not present.
    pub fn title_for(&self, identity: &GameIdentity, system: System) -> &str {
        self.titles
            .get(&(identity.clone(), system))
            .map_or(UNKNOWN_TITLE, String::as_str)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
