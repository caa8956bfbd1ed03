//! # rosterdb
//!
//! A minimal random-access employee record store:
//! - Single binary file: fixed-layout index followed by record bodies
//! - Index loaded once at open for O(1) id → offset lookups
//! - Seek-based reads and true in-place salary patching
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CLI / Glue Layer                          │
//! │             (prompting, parsing, printing)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Indexed Store                              │
//! │       (file handle, id → offset map, seek + patch)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌──────────────┐
//!               │ Record Codec │
//!               │ (pure bytes) │
//!               └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, RosterError};
pub use config::{Config, SyncStrategy};
pub use record::{EmployeeRecord, IndexEntry};
pub use store::{DataFile, RecordIterator, Store, StoreBuilder};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rosterdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
