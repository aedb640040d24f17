use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;

use csv::WriterBuilder;
use tracing::{debug, info};

use crate::error::Result;
use crate::types::{Listing, LISTING_FIELDS};

/// CSV-backed persistence for the last-known listing set. The file is read
/// or rewritten whole; there is no partial access.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the persisted listing set. `Ok(None)` means no file exists yet,
    /// which callers use to pick bootstrap over reconcile.
    pub fn load(&self) -> Result<Option<Vec<Listing>>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No prior store file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut listings = Vec::new();
        for row in reader.deserialize() {
            listings.push(row?);
        }

        debug!(rows = listings.len(), "Loaded prior store");
        Ok(Some(listings))
    }

    /// Full overwrite: header row, then one row per listing in the given
    /// order. Absent prices serialize as empty fields, never as zero.
    pub fn save(&self, listings: &[Listing]) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        // Written explicitly so an empty listing set still produces a header.
        writer.write_record(LISTING_FIELDS)?;
        for listing in listings {
            writer.serialize(listing)?;
        }
        writer.flush()?;

        info!(rows = listings.len(), path = %self.path.display(), "Store written");
        Ok(())
    }
}
