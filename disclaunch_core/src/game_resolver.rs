// SPDX-License-Identifier: GPL-3.0
// game_resolver.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{
    collections::HashMap,
    fs::{self, File},
    path::PathBuf,
};

use log::{debug, info, warn};

use super::{
    catalog::{TitleCatalog, UNKNOWN_TITLE},
    disc_identifier::IdentifiedDisc,
    system::System,
};

/// The outcome of turning an identified disc into something launchable.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {

    /// The title is known and an image file for it exists.
    Found {
        title: String,
        image: PathBuf,
    },

    /// The catalog has no title for this disc.
    UnknownTitle,

    /// The title is known but no image file for it was found.
    ImageMissing {
        title: String,
    },
}

/// Where to look for disc images of one system.
struct ImageSearch {
    dirs: Vec<PathBuf>,
    extension: String,
}

/// This struct resolves identified discs to titles via the catalog, and titles to
/// disc-image files via an ordered list of directories per system.
pub struct GameResolver {
    catalog: TitleCatalog,
    searches: HashMap<System, ImageSearch>,
}

/// Looks for `file_name` in each directory in turn and returns the first one that
/// exists and can be opened, canonicalized. A name containing a path separator
/// never matches, so a title cannot point outside the search directories.
pub fn find_image(dirs: &[PathBuf], file_name: &str) -> Option<PathBuf> {

    if file_name.contains(['/', '\\']) {
        warn!("Not searching for {}: the title contains a path separator", file_name);
        return None;
    }

    for dir in dirs {

        let candidate = dir.join(file_name);
        if !candidate.is_file() {
            continue;
        }

        if let Err(err) = File::open(&candidate) {
            warn!("Game file {} is not readable: {}", candidate.display(), err);
            continue;
        }

        debug!("Game file {} is readable", candidate.display());
        return Some(fs::canonicalize(&candidate).unwrap_or(candidate));
    }

    None
}

/// Implementation functions for the game resolver.
impl GameResolver {

    /// Creates a new resolver around the supplied catalog, with no search
    /// directories yet.
    pub fn new(catalog: TitleCatalog) -> Self {
        GameResolver {
            catalog,
            searches: HashMap::new(),
        }
    }

    /// Sets the directories, in priority order, and the image extension for a system.
    pub fn add_system(&mut self, system: System, dirs: &[PathBuf], extension: &str) {
        self.searches.insert(system, ImageSearch {
            dirs: dirs.to_vec(),
            extension: extension.to_string(),
        });
    }

    /// Returns the catalog title for a disc, or `UNKNOWN_TITLE`.
    pub fn title_for(&self, disc: &IdentifiedDisc) -> &str {
        self.catalog.title_for(&disc.identity, disc.system)
    }

    /// Resolves a disc. An unknown title is never searched for on disk.
    pub fn resolve(&self, disc: &IdentifiedDisc) -> Resolution {

        let title = self.title_for(disc);
        if title == UNKNOWN_TITLE {
            return Resolution::UnknownTitle;
        }
        info!("Found {} game: {} ({})", disc.system, title, disc.identity);

        let image = self.searches.get(&disc.system).and_then(|search| {
            find_image(&search.dirs, &format!("{}.{}", title, search.extension))
        });

        match image {
            Some(image) => {
                info!("Found game file: {}", image.display());
                Resolution::Found {
                    title: title.to_string(),
                    image,
                }
            }
            None => {
                info!("Game file not found for {}", title);
                Resolution::ImageMissing {
                    title: title.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
