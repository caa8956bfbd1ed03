//! Record codec
//!
//! Pure byte-level encoding and decoding for the data file format. No file
//! ownership here: decoding reads from any `io::Read`, encoding produces
//! byte buffers. The store owns seeking and hands this module a stream
//! positioned at the right offset.
//!
//! Truncation while decoding (`UnexpectedEof`) is reported as a
//! [`RosterError::Format`]: a short read inside a declared region means the
//! data is malformed, not that the environment failed. All other I/O errors
//! pass through as [`RosterError::Io`].

use std::io::{ErrorKind, Read};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, RosterError};

use super::{EmployeeRecord, IndexEntry, INDEX_ENTRY_LEN, MAX_NAME_BYTES};

// =============================================================================
// Decoding
// =============================================================================

/// Decode the file header: the record count
pub fn decode_header<R: Read>(reader: &mut R) -> Result<i32> {
    let mut buf = [0u8; 4];
    read_exact_or_format(reader, &mut buf, "header")?;
    Ok(i32::from_be_bytes(buf))
}

/// Decode one index entry: (id, offset)
pub fn decode_index_entry<R: Read>(reader: &mut R) -> Result<IndexEntry> {
    let mut buf = [0u8; INDEX_ENTRY_LEN];
    read_exact_or_format(reader, &mut buf, "index entry")?;

    let id = i32::from_be_bytes(buf[0..4].try_into().unwrap());
    let offset = i64::from_be_bytes(buf[4..12].try_into().unwrap());

    Ok(IndexEntry { id, offset })
}

/// Decode one record body: id, salary, first name, last name
pub fn decode_record<R: Read>(reader: &mut R) -> Result<EmployeeRecord> {
    let mut fixed = [0u8; 12];
    read_exact_or_format(reader, &mut fixed, "record body")?;

    let id = i32::from_be_bytes(fixed[0..4].try_into().unwrap());
    let salary = f64::from_be_bytes(fixed[4..12].try_into().unwrap());

    let first_name = decode_name(reader, "first name")?;
    let last_name = decode_name(reader, "last name")?;

    Ok(EmployeeRecord {
        id,
        salary,
        first_name,
        last_name,
    })
}

/// Decode one length-prefixed UTF-8 name string
fn decode_name<R: Read>(reader: &mut R, field: &str) -> Result<String> {
    let mut len_buf = [0u8; 2];
    read_exact_or_format(reader, &mut len_buf, field)?;
    let len = u16::from_be_bytes(len_buf) as usize;

    let mut payload = vec![0u8; len];
    read_exact_or_format(reader, &mut payload, field)?;

    String::from_utf8(payload)
        .map_err(|e| RosterError::Format(format!("invalid UTF-8 in {}: {}", field, e)))
}

/// read_exact with truncation reported as a format violation
fn read_exact_or_format<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => RosterError::Format(format!(
            "truncated {}: expected {} more bytes",
            what,
            buf.len()
        )),
        _ => RosterError::Io(e),
    })
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode the file header
pub fn encode_header(record_count: i32) -> [u8; 4] {
    record_count.to_be_bytes()
}

/// Encode one index entry
pub fn encode_index_entry(entry: &IndexEntry) -> [u8; INDEX_ENTRY_LEN] {
    let mut buf = [0u8; INDEX_ENTRY_LEN];
    buf[0..4].copy_from_slice(&entry.id.to_be_bytes());
    buf[4..12].copy_from_slice(&entry.offset.to_be_bytes());
    buf
}

/// Encode one record body
///
/// Fails with [`RosterError::NameTooLong`] if a name encodes to more than
/// 65535 bytes (the u16 length prefix's ceiling).
pub fn encode_record(record: &EmployeeRecord) -> Result<Bytes> {
    let first = record.first_name.as_bytes();
    let last = record.last_name.as_bytes();

    for name in [first, last] {
        if name.len() > MAX_NAME_BYTES {
            return Err(RosterError::NameTooLong { len: name.len() });
        }
    }

    let mut buf = BytesMut::with_capacity(12 + 2 + first.len() + 2 + last.len());
    buf.put_i32(record.id);
    buf.put_f64(record.salary);
    buf.put_u16(first.len() as u16);
    buf.put_slice(first);
    buf.put_u16(last.len() as u16);
    buf.put_slice(last);

    Ok(buf.freeze())
}

/// Encode a salary for an in-place patch
///
/// The caller seeks to `record_offset + 4` (the id precedes the salary)
/// before writing these 8 bytes.
pub fn encode_salary(salary: f64) -> [u8; 8] {
    salary.to_be_bytes()
}
