//! Indexed store
//!
//! Opens the data file, loads the index into memory, and serves seek-based
//! reads and in-place salary patches.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::config::{Config, SyncStrategy};
use crate::error::{Result, RosterError};
use crate::record::codec;
use crate::record::{EmployeeRecord, HEADER_LEN, INDEX_ENTRY_LEN, SALARY_FIELD_OFFSET};

use super::{FileIndex, RecordIterator};

/// Store for one open data file with its in-memory index
///
/// The store is the sole reader and writer of the file for its lifetime.
/// The index is built exactly once at open and never changes; record
/// bodies are mutated in place and never moved, grown, or deleted. The
/// file handle is released on every exit path by ownership: dropping the
/// store closes it.
pub struct Store {
    /// File handle, read/write mode
    file: File,
    /// In-memory index: id → file offset, in file order
    index: FileIndex,
    /// Store configuration
    config: Config,
    /// A patch is waiting for its deferred fsync
    needs_sync: bool,
}

impl Store {
    /// Open a store with the default configuration
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Open a store, loading the whole index eagerly
    ///
    /// Fails with [`RosterError::FileNotFound`] if the path does not exist
    /// and with [`RosterError::Format`] if the header or any index entry
    /// is truncated or corrupt. A failed open never yields a partially
    /// indexed store.
    pub fn open_with_config(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let path = path.as_ref();

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => RosterError::FileNotFound {
                    path: path.display().to_string(),
                },
                _ => RosterError::Io(e),
            })?;

        let file_size = file.metadata()?.len();
        let index = Self::load_index(&mut file, file_size)?;

        debug!(
            path = %path.display(),
            records = index.len(),
            "store opened, index loaded"
        );

        Ok(Self {
            file,
            index,
            config,
            needs_sync: false,
        })
    }

    /// Read the header region at offset 0 and build the id → offset map
    fn load_index(file: &mut File, file_size: u64) -> Result<FileIndex> {
        file.seek(SeekFrom::Start(0))?;
        let record_count = codec::decode_header(file)?;

        // A count below 1 marks an empty store, a terminal "no data"
        // condition rather than an error.
        if record_count < 1 {
            return Ok(FileIndex::default());
        }
        let record_count = record_count as usize;

        // The index region is fixed-size, so validate it against the file
        // length before allocating.
        let index_len = record_count * INDEX_ENTRY_LEN;
        if file_size < (HEADER_LEN + index_len) as u64 {
            return Err(RosterError::Format(format!(
                "truncated index: header declares {} entries, file holds {} bytes",
                record_count, file_size
            )));
        }

        let mut index_data = vec![0u8; index_len];
        file.read_exact(&mut index_data)?;

        // Parse entries in file order: [id(4)][offset(8)]
        let mut index = FileIndex::with_capacity(record_count);
        let mut reader = &index_data[..];
        for _ in 0..record_count {
            let entry = codec::decode_index_entry(&mut reader)?;

            if entry.offset < 0 || entry.offset as u64 >= file_size {
                return Err(RosterError::Format(format!(
                    "index offset {} for id {} outside file of {} bytes",
                    entry.offset, entry.id, file_size
                )));
            }
            index.insert(entry.id, entry.offset as u64)?;
        }

        Ok(index)
    }

    /// Ids in the order they appear in the file's header
    pub fn ids(&self) -> &[i32] {
        self.index.ids()
    }

    /// Number of indexed records
    pub fn record_count(&self) -> usize {
        self.index.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether an id is present in the index
    pub fn contains(&self, id: i32) -> bool {
        self.index.offset(id).is_some()
    }

    /// Read one record by id — one seek plus one codec call
    ///
    /// Fails with [`RosterError::RecordNotFound`] for an unknown id, and
    /// with [`RosterError::IdMismatch`] if id verification is enabled and
    /// the body disagrees with the index.
    pub fn read_record(&mut self, id: i32) -> Result<EmployeeRecord> {
        let offset = self
            .index
            .offset(id)
            .ok_or(RosterError::RecordNotFound { id })?;

        self.file.seek(SeekFrom::Start(offset))?;
        let record = codec::decode_record(&mut self.file)?;

        if self.config.verify_record_ids && record.id != id {
            return Err(RosterError::IdMismatch {
                expected: id,
                found: record.id,
            });
        }

        Ok(record)
    }

    /// Patch one record's salary in place
    ///
    /// Overwrites exactly the 8 salary bytes at `offset + 4` (the id
    /// precedes the salary in the body). Never shifts other bytes, never
    /// changes the file length, never rewrites the index.
    pub fn update_salary(&mut self, id: i32, new_salary: f64) -> Result<()> {
        let offset = self
            .index
            .offset(id)
            .ok_or(RosterError::RecordNotFound { id })?;

        self.file.seek(SeekFrom::Start(offset + SALARY_FIELD_OFFSET))?;
        self.file.write_all(&codec::encode_salary(new_salary))?;

        match self.config.sync {
            SyncStrategy::EveryWrite => self.file.sync_data()?,
            SyncStrategy::OnClose => self.needs_sync = true,
        }

        debug!(id, new_salary, "salary patched in place");
        Ok(())
    }

    /// Iterate all records in index order
    pub fn iter(&mut self) -> RecordIterator<'_> {
        RecordIterator::new(&mut self.file, &self.index, self.config.verify_record_ids)
    }

    /// Force patched bytes to disk now
    pub fn flush(&mut self) -> Result<()> {
        self.file.sync_data()?;
        self.needs_sync = false;
        Ok(())
    }

    /// Close the store, surfacing any deferred sync error
    ///
    /// Dropping the store also releases the handle; `close` exists so the
    /// final fsync of [`SyncStrategy::OnClose`] has somewhere to fail
    /// loudly.
    pub fn close(mut self) -> Result<()> {
        if self.needs_sync {
            self.file.sync_data()?;
            self.needs_sync = false;
        }
        Ok(())
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        if self.needs_sync {
            if let Err(e) = self.file.sync_data() {
                warn!("deferred sync failed while closing store: {}", e);
            }
        }
    }
}
