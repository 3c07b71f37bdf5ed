//! Error types for the partition visualizer
//!
//! Request validation and configuration loading report through this
//! enum. The placement engine itself has no failure path.

use thiserror::Error;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type
#[derive(Debug, Error)]
pub enum Error {
    // Request validation errors
    #[error("input for '{field}' must be positive")]
    NonPositive { field: &'static str },

    #[error("input for '{field}' cannot exceed {max}")]
    TooLarge { field: &'static str, max: u32 },

    #[error("multi-region clusters require at least 2 data centers, got {zones}")]
    TooFewZones { zones: u32 },

    #[error(
        "replication factor ({replication_factor}) cannot exceed total brokers ({total_brokers})"
    )]
    ReplicationFactorTooLarge {
        replication_factor: u32,
        total_brokers: u32,
    },

    #[error(
        "min ISR ({min_insync_replicas}) cannot exceed replication factor ({replication_factor})"
    )]
    MinIsrTooLarge {
        min_insync_replicas: u32,
        replication_factor: u32,
    },

    // Configuration errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this error rejects the placement request itself
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NonPositive { .. }
                | Self::TooLarge { .. }
                | Self::TooFewZones { .. }
                | Self::ReplicationFactorTooLarge { .. }
                | Self::MinIsrTooLarge { .. }
        )
    }
}
