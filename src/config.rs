//! Configuration for rosterdb
//!
//! Centralized configuration with sensible defaults.

/// Configuration for an open store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// Sync strategy: when to fsync after an in-place patch
    pub sync: SyncStrategy,

    // -------------------------------------------------------------------------
    // Integrity Configuration
    // -------------------------------------------------------------------------
    /// Cross-check that the id stored inside a record body matches the
    /// index id used to locate it. Off restores the permissive behavior
    /// of readers that trust the index blindly.
    pub verify_record_ids: bool,
}

/// When patched bytes are flushed to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync after every patch (safest, slowest)
    EveryWrite,

    /// fsync once when the store is closed
    OnClose,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync: SyncStrategy::EveryWrite,
            verify_record_ids: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the sync strategy for in-place patches
    pub fn sync(mut self, sync: SyncStrategy) -> Self {
        self.config.sync = sync;
        self
    }

    /// Enable or disable the record-body id cross-check
    pub fn verify_record_ids(mut self, verify: bool) -> Self {
        self.config.verify_record_ids = verify;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
