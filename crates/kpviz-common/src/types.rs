//! Core type definitions for the partition visualizer
//!
//! Identifiers, cluster modes, replica roles and the placement request
//! shared between the engine and its front ends.

use crate::error::{Error, Result};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest value accepted for any count in a request (five digits)
pub const MAX_COUNT: u32 = 99_999;

/// Broker identifier (0-based, unique across all zones)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct BrokerId(u32);

impl BrokerId {
    /// Create a broker ID
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Zone (data center) identifier, 1-based and contiguous
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct ZoneId(u32);

impl ZoneId {
    /// Create a zone ID
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Partition identifier, 1-based
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct PartitionId(u32);

impl PartitionId {
    /// Create a partition ID
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Partition ID for a zero-based partition index
    #[must_use]
    pub const fn from_index(index: u32) -> Self {
        Self(index + 1)
    }

    /// Get the raw value
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Deployment mode of the simulated cluster
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterMode {
    /// One cluster in one implicit zone
    #[default]
    Single,
    /// A stretched cluster spanning several data centers
    MultiRegion,
}

impl ClusterMode {
    /// Whether observer replicas exist in this mode
    #[must_use]
    pub const fn has_observers(self) -> bool {
        matches!(self, Self::MultiRegion)
    }
}

impl fmt::Display for ClusterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::MultiRegion => write!(f, "multi-region"),
        }
    }
}

/// Role of a partition replica on a broker
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplicaRole {
    /// Primary replica; exactly one per partition
    Leader,
    /// In-sync replica counted toward min ISR
    Follower,
    /// Asynchronous replica outside the ISR quota (multi-region only)
    Observer,
}

impl fmt::Display for ReplicaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leader => write!(f, "Leader"),
            Self::Follower => write!(f, "Follower"),
            Self::Observer => write!(f, "Observer"),
        }
    }
}

/// Parameters of one placement simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    /// Deployment mode
    pub mode: ClusterMode,
    /// Number of partitions (P)
    pub partitions: u32,
    /// Replication factor (RF)
    pub replication_factor: u32,
    /// Minimum in-sync replicas, leader included
    pub min_insync_replicas: u32,
    /// Total brokers in single mode, brokers per zone in multi-region mode
    pub brokers: u32,
    /// Zone count; ignored in single mode
    pub zones: u32,
}

impl PlacementRequest {
    /// Request for a single cluster with `brokers` brokers in total
    #[must_use]
    pub const fn single(
        brokers: u32,
        partitions: u32,
        replication_factor: u32,
        min_insync_replicas: u32,
    ) -> Self {
        Self {
            mode: ClusterMode::Single,
            partitions,
            replication_factor,
            min_insync_replicas,
            brokers,
            zones: 1,
        }
    }

    /// Request for a multi-region cluster with `brokers_per_zone` brokers in each zone
    #[must_use]
    pub const fn multi_region(
        zones: u32,
        brokers_per_zone: u32,
        partitions: u32,
        replication_factor: u32,
        min_insync_replicas: u32,
    ) -> Self {
        Self {
            mode: ClusterMode::MultiRegion,
            partitions,
            replication_factor,
            min_insync_replicas,
            brokers: brokers_per_zone,
            zones,
        }
    }

    /// Number of zones the topology will have
    #[must_use]
    pub const fn effective_zones(&self) -> u32 {
        match self.mode {
            ClusterMode::Single => 1,
            ClusterMode::MultiRegion => self.zones,
        }
    }

    /// Brokers created inside each zone
    #[must_use]
    pub const fn brokers_per_zone(&self) -> u32 {
        self.brokers
    }

    /// Total broker count across all zones, `None` on overflow
    #[must_use]
    pub const fn total_brokers(&self) -> Option<u32> {
        self.brokers.checked_mul(self.effective_zones())
    }

    /// Check the request the way the configuration front end does.
    ///
    /// The placement engine never calls this; it assumes a request that
    /// already passed.
    pub fn validate(&self) -> Result<()> {
        let mut counts = vec![
            ("partitions", self.partitions),
            ("replication factor", self.replication_factor),
            ("min ISR", self.min_insync_replicas),
        ];
        match self.mode {
            ClusterMode::Single => counts.insert(0, ("total brokers", self.brokers)),
            ClusterMode::MultiRegion => {
                counts.insert(0, ("data centers", self.zones));
                counts.insert(1, ("brokers per data center", self.brokers));
            }
        }
        if let Some((field, _)) = counts.iter().find(|(_, value)| *value == 0) {
            return Err(Error::NonPositive { field: *field });
        }
        if let Some((field, _)) = counts.iter().find(|(_, value)| *value > MAX_COUNT) {
            return Err(Error::TooLarge {
                field: *field,
                max: MAX_COUNT,
            });
        }

        if self.mode == ClusterMode::MultiRegion && self.zones < 2 {
            return Err(Error::TooFewZones { zones: self.zones });
        }

        let total_brokers = match self.total_brokers() {
            Some(total) if total <= MAX_COUNT => total,
            _ => {
                return Err(Error::TooLarge {
                    field: "total brokers",
                    max: MAX_COUNT,
                });
            }
        };
        if self.replication_factor > total_brokers {
            return Err(Error::ReplicationFactorTooLarge {
                replication_factor: self.replication_factor,
                total_brokers,
            });
        }
        if self.min_insync_replicas > self.replication_factor {
            return Err(Error::MinIsrTooLarge {
                min_insync_replicas: self.min_insync_replicas,
                replication_factor: self.replication_factor,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_id_from_index() {
        assert_eq!(PartitionId::from_index(0), PartitionId::new(1));
        assert_eq!(PartitionId::from_index(9).get(), 10);
    }

    #[test]
    fn test_total_brokers() {
        assert_eq!(PlacementRequest::single(5, 1, 1, 1).total_brokers(), Some(5));
        assert_eq!(
            PlacementRequest::multi_region(3, 4, 1, 1, 1).total_brokers(),
            Some(12)
        );
        assert_eq!(
            PlacementRequest::multi_region(65_536, 65_536, 1, 3, 1).total_brokers(),
            None
        );

        // Zone count is ignored in single mode
        let mut request = PlacementRequest::single(5, 1, 1, 1);
        request.zones = 7;
        assert_eq!(request.effective_zones(), 1);
        assert_eq!(request.total_brokers(), Some(5));
    }

    #[test]
    fn test_validate_ok() {
        assert!(PlacementRequest::single(3, 4, 2, 1).validate().is_ok());
        assert!(PlacementRequest::multi_region(2, 2, 4, 2, 2).validate().is_ok());
        assert!(PlacementRequest::single(1, 1, 1, 1).validate().is_ok());
    }

    #[test]
    fn test_validate_non_positive() {
        let err = PlacementRequest::single(0, 4, 2, 1).validate().unwrap_err();
        assert!(matches!(err, Error::NonPositive { field: "total brokers" }));

        let err = PlacementRequest::single(3, 4, 2, 0).validate().unwrap_err();
        assert!(matches!(err, Error::NonPositive { field: "min ISR" }));

        let err = PlacementRequest::multi_region(0, 2, 4, 2, 1).validate().unwrap_err();
        assert!(matches!(err, Error::NonPositive { field: "data centers" }));
    }

    #[test]
    fn test_validate_upper_bound() {
        assert!(PlacementRequest::single(MAX_COUNT, 1, 1, 1).validate().is_ok());

        let err = PlacementRequest::single(3, MAX_COUNT + 1, 2, 1).validate().unwrap_err();
        assert!(matches!(
            err,
            Error::TooLarge {
                field: "partitions",
                max: MAX_COUNT
            }
        ));
        assert!(err.is_validation());

        // Each count fits, the product does not
        let err = PlacementRequest::multi_region(400, 400, 1, 3, 1).validate().unwrap_err();
        assert!(matches!(err, Error::TooLarge { field: "total brokers", .. }));

        // Overflows u32 rather than saturating into a valid total
        let err = PlacementRequest::multi_region(65_536, 65_536, 1, 3, 1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::TooLarge { .. }));
    }

    #[test]
    fn test_validate_too_few_zones() {
        let err = PlacementRequest::multi_region(1, 3, 4, 2, 1).validate().unwrap_err();
        assert!(matches!(err, Error::TooFewZones { zones: 1 }));
    }

    #[test]
    fn test_validate_replication_factor() {
        let err = PlacementRequest::single(3, 4, 4, 1).validate().unwrap_err();
        assert!(matches!(
            err,
            Error::ReplicationFactorTooLarge {
                replication_factor: 4,
                total_brokers: 3
            }
        ));

        // Per-zone brokers multiply out in multi-region mode
        assert!(PlacementRequest::multi_region(2, 2, 4, 4, 1).validate().is_ok());
    }

    #[test]
    fn test_validate_min_isr() {
        let err = PlacementRequest::single(3, 4, 2, 3).validate().unwrap_err();
        assert!(matches!(
            err,
            Error::MinIsrTooLarge {
                min_insync_replicas: 3,
                replication_factor: 2
            }
        ));
        assert!(err.is_validation());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(BrokerId::new(4).to_string(), "4");
        assert_eq!(ZoneId::new(2).to_string(), "2");
        assert_eq!(PartitionId::from_index(0).to_string(), "1");
    }

    #[test]
    fn test_replica_role_serde() {
        assert_eq!(serde_json::to_string(&ReplicaRole::Observer).unwrap(), "\"observer\"");
        let role: ReplicaRole = serde_json::from_str("\"leader\"").unwrap();
        assert_eq!(role, ReplicaRole::Leader);
    }

    #[test]
    fn test_cluster_mode_serde() {
        let mode: ClusterMode = serde_json::from_str("\"multi-region\"").unwrap();
        assert_eq!(mode, ClusterMode::MultiRegion);
        assert!(mode.has_observers());
        assert!(!ClusterMode::Single.has_observers());
        assert_eq!(ClusterMode::MultiRegion.to_string(), "multi-region");
    }
}
