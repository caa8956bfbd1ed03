//! Store Builder
//!
//! Writes a complete data file from a set of records: header, index, then
//! record bodies. This is the out-of-band population step; the store
//! itself only reads and patches files that already exist.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Result, RosterError};
use crate::record::codec;
use crate::record::{EmployeeRecord, IndexEntry, HEADER_LEN, INDEX_ENTRY_LEN, MAX_NAME_BYTES};

use super::DataFile;

/// Builder for creating new data files
///
/// Records are buffered until [`finish`](StoreBuilder::finish): the index
/// precedes the bodies on disk and its size depends on the final record
/// count, so no body byte can be placed before all records are known.
pub struct StoreBuilder {
    /// Records in the order they will appear in the index
    records: Vec<EmployeeRecord>,
    /// Ids seen so far, for duplicate rejection
    ids: HashSet<i32>,
}

impl StoreBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Buffer one record for writing
    ///
    /// Rejects duplicate ids and names longer than the u16 length prefix
    /// allows, so `finish` cannot fail on a record that was accepted.
    pub fn add(&mut self, record: EmployeeRecord) -> Result<()> {
        for name in [&record.first_name, &record.last_name] {
            if name.len() > MAX_NAME_BYTES {
                return Err(RosterError::NameTooLong { len: name.len() });
            }
        }
        if !self.ids.insert(record.id) {
            return Err(RosterError::DuplicateId { id: record.id });
        }

        self.records.push(record);
        Ok(())
    }

    /// Number of records buffered so far
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Write header, index, and bodies; fsync; return file metadata
    pub fn finish(self, path: impl AsRef<Path>) -> Result<DataFile> {
        let path = path.as_ref();

        // Encode every body first: the index needs each body's length to
        // lay out offsets.
        let bodies = self
            .records
            .iter()
            .map(codec::encode_record)
            .collect::<Result<Vec<_>>>()?;

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        let mut writer = BufWriter::new(file);

        writer.write_all(&codec::encode_header(self.records.len() as i32))?;

        // The index region is fixed-size, so the first body starts right
        // after it and each subsequent body follows the previous one.
        let mut offset = (HEADER_LEN + self.records.len() * INDEX_ENTRY_LEN) as i64;
        for (record, body) in self.records.iter().zip(&bodies) {
            let entry = IndexEntry {
                id: record.id,
                offset,
            };
            writer.write_all(&codec::encode_index_entry(&entry))?;
            offset += body.len() as i64;
        }

        for body in &bodies {
            writer.write_all(body)?;
        }

        writer.flush()?;
        let file = writer
            .into_inner()
            .map_err(|e| RosterError::Io(e.into_error()))?;
        file.sync_all()?;

        let file_size = file.metadata()?.len();

        debug!(
            path = %path.display(),
            records = self.records.len(),
            file_size,
            "data file written"
        );

        Ok(DataFile {
            path: path.to_path_buf(),
            record_count: self.records.len(),
            file_size,
        })
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
