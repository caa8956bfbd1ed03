//! Tests for the record codec
//!
//! These tests verify:
//! - Round-trip encoding for record bodies, headers, and index entries
//! - Truncation detection at every field boundary
//! - Length-prefix and UTF-8 validation
//! - The in-place salary patch layout (salary bytes sit at offset 4)

use rosterdb::record::codec;
use rosterdb::{EmployeeRecord, IndexEntry, RosterError};

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_record() -> EmployeeRecord {
    EmployeeRecord::new(101, 55_000.0, "Ada", "Lovelace")
}

fn decode_from(bytes: &[u8]) -> rosterdb::Result<EmployeeRecord> {
    let mut reader = bytes;
    codec::decode_record(&mut reader)
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_record_round_trip() {
    let record = sample_record();

    let bytes = codec::encode_record(&record).unwrap();
    let decoded = decode_from(&bytes).unwrap();

    assert_eq!(record, decoded);
}

#[test]
fn test_record_round_trip_empty_names() {
    let record = EmployeeRecord::new(7, 0.0, "", "");

    let bytes = codec::encode_record(&record).unwrap();
    let decoded = decode_from(&bytes).unwrap();

    assert_eq!(record, decoded);
}

#[test]
fn test_record_round_trip_multibyte_names() {
    let record = EmployeeRecord::new(42, 83_250.5, "Åse", "Müller-Østergård");

    let bytes = codec::encode_record(&record).unwrap();
    let decoded = decode_from(&bytes).unwrap();

    assert_eq!(record, decoded);
}

#[test]
fn test_record_round_trip_max_length_name() {
    let long_name = "a".repeat(65_535);
    let record = EmployeeRecord::new(1, 1.0, long_name.clone(), "b");

    let bytes = codec::encode_record(&record).unwrap();
    let decoded = decode_from(&bytes).unwrap();

    assert_eq!(decoded.first_name, long_name);
}

#[test]
fn test_header_round_trip() {
    let bytes = codec::encode_header(3);
    let count = codec::decode_header(&mut bytes.as_slice()).unwrap();

    assert_eq!(count, 3);
}

#[test]
fn test_index_entry_round_trip() {
    let entry = IndexEntry {
        id: 101,
        offset: 28,
    };

    let bytes = codec::encode_index_entry(&entry);
    let decoded = codec::decode_index_entry(&mut bytes.as_slice()).unwrap();

    assert_eq!(entry, decoded);
}

// =============================================================================
// Encoding Validation
// =============================================================================

#[test]
fn test_encode_rejects_over_long_name() {
    let record = EmployeeRecord::new(1, 1.0, "x".repeat(65_536), "y");

    let result = codec::encode_record(&record);

    assert!(matches!(result, Err(RosterError::NameTooLong { len: 65_536 })));
}

// =============================================================================
// Truncation Detection
// =============================================================================

#[test]
fn test_decode_header_truncated() {
    let result = codec::decode_header(&mut [0u8, 0, 0].as_slice());

    assert!(matches!(result, Err(RosterError::Format(_))));
}

#[test]
fn test_decode_index_entry_truncated() {
    let bytes = codec::encode_index_entry(&IndexEntry { id: 1, offset: 16 });

    let result = codec::decode_index_entry(&mut &bytes[..11]);

    assert!(matches!(result, Err(RosterError::Format(_))));
}

#[test]
fn test_decode_record_truncated_fixed_fields() {
    let bytes = codec::encode_record(&sample_record()).unwrap();

    // Cut inside the id + salary region
    let result = decode_from(&bytes[..10]);

    assert!(matches!(result, Err(RosterError::Format(_))));
}

#[test]
fn test_decode_record_truncated_name_payload() {
    let bytes = codec::encode_record(&sample_record()).unwrap();

    // Keep the first name's length prefix but drop part of its payload
    let result = decode_from(&bytes[..15]);

    assert!(matches!(result, Err(RosterError::Format(_))));
}

#[test]
fn test_decode_record_length_prefix_past_end() {
    // id + salary, then a first name claiming 500 bytes with only 3 present
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&101i32.to_be_bytes());
    bytes.extend_from_slice(&55_000.0f64.to_be_bytes());
    bytes.extend_from_slice(&500u16.to_be_bytes());
    bytes.extend_from_slice(b"Ada");

    let result = decode_from(&bytes);

    assert!(matches!(result, Err(RosterError::Format(_))));
}

#[test]
fn test_decode_record_invalid_utf8() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&101i32.to_be_bytes());
    bytes.extend_from_slice(&55_000.0f64.to_be_bytes());
    bytes.extend_from_slice(&2u16.to_be_bytes());
    bytes.extend_from_slice(&[0xFF, 0xFE]);
    bytes.extend_from_slice(&0u16.to_be_bytes());

    let result = decode_from(&bytes);

    assert!(matches!(result, Err(RosterError::Format(_))));
}

// =============================================================================
// Salary Patch Layout
// =============================================================================

#[test]
fn test_salary_bytes_sit_at_offset_four() {
    let record = sample_record();
    let bytes = codec::encode_record(&record).unwrap();

    assert_eq!(&bytes[4..12], &record.salary.to_be_bytes());
    assert_eq!(&bytes[4..12], &codec::encode_salary(record.salary));
}

#[test]
fn test_splicing_salary_patches_only_that_field() {
    let record = sample_record();
    let mut bytes = codec::encode_record(&record).unwrap().to_vec();

    bytes[4..12].copy_from_slice(&codec::encode_salary(65_000.0));
    let patched = decode_from(&bytes).unwrap();

    assert_eq!(patched.salary, 65_000.0);
    assert_eq!(patched.id, record.id);
    assert_eq!(patched.first_name, record.first_name);
    assert_eq!(patched.last_name, record.last_name);
}
