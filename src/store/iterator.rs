//! Record Iterator
//!
//! Sequential iteration over all records in index order.

use std::fs::File;
use std::io::{Seek, SeekFrom};

use crate::error::{Result, RosterError};
use crate::record::codec;
use crate::record::EmployeeRecord;

use super::FileIndex;

/// Iterator over records in the order their ids appear in the index
///
/// Bodies may sit anywhere the index points, so each step is a seek to
/// the next entry's offset rather than a linear scan.
pub struct RecordIterator<'a> {
    file: &'a mut File,
    index: &'a FileIndex,
    pos: usize,
    verify_ids: bool,
}

impl<'a> RecordIterator<'a> {
    pub(super) fn new(file: &'a mut File, index: &'a FileIndex, verify_ids: bool) -> Self {
        Self {
            file,
            index,
            pos: 0,
            verify_ids,
        }
    }
}

impl<'a> Iterator for RecordIterator<'a> {
    type Item = Result<EmployeeRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, offset) = self.index.entry_at(self.pos)?;
        self.pos += 1;

        if let Err(e) = self.file.seek(SeekFrom::Start(offset)) {
            return Some(Err(RosterError::Io(e)));
        }

        let record = match codec::decode_record(self.file) {
            Ok(r) => r,
            Err(e) => return Some(Err(e)),
        };

        if self.verify_ids && record.id != id {
            return Some(Err(RosterError::IdMismatch {
                expected: id,
                found: record.id,
            }));
        }

        Some(Ok(record))
    }
}
