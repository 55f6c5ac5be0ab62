// SPDX-License-Identifier: GPL-3.0
// tests.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{fs, path::PathBuf};

use super::{GameResolver, Resolution, find_image};
use crate::{
    catalog::TitleCatalog,
    disc_identifier::{GameIdentity, IdentifiedDisc},
    system::System,
};

// Tests for the game resolver.

fn psx_disc(identity: &str) -> IdentifiedDisc {
    IdentifiedDisc {
        identity: GameIdentity::new(identity),
        system: System::Psx,
    }
}

/// A resolver knowing one PSX title, searching the two supplied directories.
fn resolver(dirs: &[PathBuf]) -> GameResolver {

    let mut catalog = TitleCatalog::new();
    catalog.insert(GameIdentity::new("SLUS-00518"), System::Psx, "Title");

    let mut resolver = GameResolver::new(catalog);
    resolver.add_system(System::Psx, dirs, "chd");
    resolver
}

#[test]
fn resolve_should_find_image_in_first_directory() {

    let fat = tempfile::tempdir().unwrap();
    let usb = tempfile::tempdir().unwrap();
    fs::write(fat.path().join("Title.chd"), "").unwrap();
    fs::write(usb.path().join("Title.chd"), "").unwrap();
    let resolver = resolver(&[fat.path().to_path_buf(), usb.path().to_path_buf()]);

    let output = resolver.resolve(&psx_disc("SLUS-00518"));

    assert_eq!(output, Resolution::Found {
        title: "Title".to_string(),
        image: fs::canonicalize(fat.path().join("Title.chd")).unwrap(),
    });
}

#[test]
fn resolve_should_fall_back_to_later_directories() {

    let fat = tempfile::tempdir().unwrap();
    let usb = tempfile::tempdir().unwrap();
    fs::write(usb.path().join("Title.chd"), "").unwrap();
    let resolver = resolver(&[fat.path().join("missing"), fat.path().to_path_buf(), usb.path().to_path_buf()]);

    let output = resolver.resolve(&psx_disc("SLUS-00518"));

    assert_eq!(output, Resolution::Found {
        title: "Title".to_string(),
        image: fs::canonicalize(usb.path().join("Title.chd")).unwrap(),
    });
}

#[test]
fn resolve_should_report_missing_image_for_known_title() {

    let fat = tempfile::tempdir().unwrap();
    fs::write(fat.path().join("Title.cue"), "").unwrap();
    let resolver = resolver(&[fat.path().to_path_buf()]);

    let output = resolver.resolve(&psx_disc("SLUS-00518"));

    assert_eq!(output, Resolution::ImageMissing {
        title: "Title".to_string(),
    });
}

#[test]
fn resolve_should_not_search_for_unknown_title() {

    // Given an image named after the sentinel title exists,
    let fat = tempfile::tempdir().unwrap();
    fs::write(fat.path().join("Unknown Game.chd"), "").unwrap();
    let resolver = resolver(&[fat.path().to_path_buf()]);

    // an unknown identity must still not resolve to it.
    let output = resolver.resolve(&psx_disc("SLUS-99999"));

    assert_eq!(output, Resolution::UnknownTitle);
}

#[test]
fn resolve_should_miss_for_system_without_search_dirs() {

    let mut catalog = TitleCatalog::new();
    catalog.insert(GameIdentity::new("T-1234G"), System::Saturn, "Saturn Title");
    let resolver = GameResolver::new(catalog);

    let output = resolver.resolve(&IdentifiedDisc {
        identity: GameIdentity::new("T-1234G"),
        system: System::Saturn,
    });

    assert_eq!(output, Resolution::ImageMissing {
        title: "Saturn Title".to_string(),
    });
}

#[test]
fn find_image_should_skip_directories_with_same_name() {

    let fat = tempfile::tempdir().unwrap();
    fs::create_dir(fat.path().join("Title.chd")).unwrap();

    assert_eq!(find_image(&[fat.path().to_path_buf()], "Title.chd"), None);
}

#[test]
fn titles_with_path_separators_should_never_match() {

    let fat = tempfile::tempdir().unwrap();
    let nested = fat.path().join("Sub");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("Title.chd"), "").unwrap();
    let outside = tempfile::tempdir().unwrap();
    let absolute = outside.path().join("Title.chd");
    fs::write(&absolute, "").unwrap();
    let dirs = [fat.path().to_path_buf()];

    assert_eq!(find_image(&dirs, "Sub/Title.chd"), None);
    assert_eq!(find_image(&dirs, &absolute.display().to_string()), None);
    assert_eq!(find_image(&dirs, "Sub\\Title.chd"), None);
}
