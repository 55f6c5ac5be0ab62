// SPDX-License-Identifier: GPL-3.0
// saturn_header.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    ops::Range,
    path::Path,
};

use disclaunch_utility::CustomByteText;
use log::{debug, info};

use super::{GameIdentity, IdentificationStrategy};
use crate::system::System;

/// Size of a logical data sector.
pub const SECTOR_SIZE: usize = 2048;

/// Byte offset of the first logical sector, which holds the Saturn system header.
const HEADER_SECTOR_OFFSET: u64 = 0;

/// Where the product number lives inside the header sector.
pub const PRODUCT_NUMBER_RANGE: Range<usize> = 32..42;

/// This struct identifies Saturn discs by reading the product number directly out
/// of the raw header sector, with no mount step.
pub struct SaturnHeaderStrategy;

/// Decodes the product number from a header sector.
pub fn parse_header_sector(sector: &[u8]) -> Option<GameIdentity> {

    sector
        .get(PRODUCT_NUMBER_RANGE)?
        .ascii_field()
        .map(GameIdentity::new)
}

/// Reads the header sector from the supplied stream and decodes it. A short read
/// is reported as an `UnexpectedEof` error.
pub fn read_identity<R: Read + Seek>(reader: &mut R) -> io::Result<Option<GameIdentity>> {

    let mut sector = [0_u8; SECTOR_SIZE];
    reader.seek(SeekFrom::Start(HEADER_SECTOR_OFFSET))?;
    reader.read_exact(&mut sector)?;

    Ok(parse_header_sector(&sector))
}

/// Implementation functions to be called from anything that understands what
/// an IdentificationStrategy object is.
impl IdentificationStrategy for SaturnHeaderStrategy {

    /// Sega Saturn.
    fn system(&self) -> System {
        System::Saturn
    }

    /// Open the drive as a raw byte stream and read the header. Any I/O failure
    /// means no identity.
    fn identify(&mut self, device: &Path) -> Option<GameIdentity> {

        let identity = File::open(device).and_then(|mut drive| read_identity(&mut drive));
        match identity {
            Ok(Some(identity)) => {
                info!("Extracted Saturn game ID: {}", identity);
                Some(identity)
            }
            Ok(None) => {
                debug!("No Saturn product number on disc in {}", device.display());
                None
            }
            Err(err) => {
                debug!("Error reading header sector from {}: {}", device.display(), err);
                None
            }
        }
    }
}
