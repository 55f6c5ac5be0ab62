// SPDX-License-Identifier: GPL-3.0
// core_locator.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};

use super::system::System;

/// A core image found on local storage for a particular system.
#[derive(Clone, Debug, PartialEq)]
pub struct CoreImage {
    pub system: System,
    pub path: PathBuf,
}

/// This struct finds the newest-looking core image for a system within the core
/// directory.
pub struct CoreLocator {
    core_dir: PathBuf,
    extension: String,
}

/// Picks a core from a list of file names. Candidates must start with the prefix
/// and end with `.<extension>`, and the greatest name in plain byte order wins, so
/// `PSX_v3.rbf` is preferred over `PSX_v10.rbf`.
pub fn select_core_name<'a, I>(names: I, prefix: &str, extension: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let suffix = format!(".{}", extension);

    names
        .into_iter()
        .filter(|name| name.starts_with(prefix) && name.ends_with(&suffix))
        .max()
}

/// Implementation functions for the core locator.
impl CoreLocator {

    /// Creates a new core locator scanning the supplied directory for files with the
    /// supplied extension.
    pub fn new(core_dir: &Path, extension: &str) -> Self {
        CoreLocator {
            core_dir: core_dir.to_path_buf(),
            extension: extension.to_string(),
        }
    }

    /// Returns the core directory being scanned.
    pub fn core_dir(&self) -> &Path {
        &self.core_dir
    }

    /// Locates the core for a system, using the system's file name prefix. Returns
    /// `None` if there is no candidate, or if the chosen file has vanished by the
    /// time we check it.
    pub fn locate(&self, system: System, prefix: &str) -> Option<CoreImage> {

        let entries = match fs::read_dir(&self.core_dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Error listing {}: {}", self.core_dir.display(), err);
                return None;
            }
        };

        let names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();

        let Some(name) = select_core_name(names.iter().map(String::as_str), prefix, &self.extension) else {
            warn!(
                "No {} core found in {}. Please place a {}*.{} file there.",
                system,
                self.core_dir.display(),
                prefix,
                self.extension
            );
            return None;
        };

        let path = self.core_dir.join(name);
        if let Err(err) = fs::metadata(&path) {
            warn!("{} core {} reported but not accessible: {}", system, path.display(), err);
            return None;
        }

        info!("Found {} core: {}", system, path.display());
        Some(CoreImage {
            system,
            path,
        })
    }
}


#[cfg(test)]
mod tests {

    use std::fs;

    use super::{CoreLocator, select_core_name};
    use crate::system::System;

    #[test]
    fn select_core_name_should_order_by_name_not_version() {

        let names = ["PSX_v3.rbf", "PSX_v10.rbf"];

        assert_eq!(select_core_name(names, "PSX_", "rbf"), Some("PSX_v3.rbf"));
    }

    #[test]
    fn select_core_name_should_prefer_latest_dated_build() {

        let names = ["PSX_20240101.rbf", "PSX_20250312.rbf", "PSX_20231130.rbf"];

        assert_eq!(select_core_name(names, "PSX_", "rbf"), Some("PSX_20250312.rbf"));
    }

    #[test]
    fn select_core_name_should_ignore_other_prefixes_and_extensions() {

        let names = ["Saturn_20250101.rbf", "PSX_20250101.mgl", "psx_20990101.rbf", "menu.rbf"];

        assert_eq!(select_core_name(names, "PSX_", "rbf"), None);
        assert_eq!(select_core_name(names, "Saturn_", "rbf"), Some("Saturn_20250101.rbf"));
    }

    #[test]
    fn locate_should_return_path_within_core_dir() {

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("PSX_20240101.rbf"), "").unwrap();
        fs::write(dir.path().join("PSX_20250312.rbf"), "").unwrap();
        let locator = CoreLocator::new(dir.path(), "rbf");

        let core = locator.locate(System::Psx, "PSX_").unwrap();

        assert_eq!(core.system, System::Psx);
        assert_eq!(core.path, dir.path().join("PSX_20250312.rbf"));
    }

    #[test]
    fn locate_should_fail_without_candidates_or_directory() {

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("PSX_20250312.rbf"), "").unwrap();
        let locator = CoreLocator::new(dir.path(), "rbf");
        let missing_dir = CoreLocator::new(&dir.path().join("_Console"), "rbf");

        assert_eq!(locator.locate(System::Saturn, "Saturn_"), None);
        assert_eq!(missing_dir.locate(System::Psx, "PSX_"), None);
    }
}
