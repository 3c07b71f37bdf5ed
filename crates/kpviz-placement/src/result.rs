//! Placement result and queries over it

use crate::topology::ClusterTopology;
use kpviz_common::{BrokerId, PartitionId, ReplicaRole, ZoneId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of a placement computation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Populated zones and brokers
    pub topology: ClusterTopology,
    /// Zone spread recommendation (empty in single mode)
    pub advisory: String,
}

/// A replica located in the topology
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedReplica {
    /// Owning zone
    pub zone: ZoneId,
    /// Owning broker
    pub broker: BrokerId,
    /// Replica role
    pub role: ReplicaRole,
}

impl PlacementResult {
    /// Total replicas placed
    #[must_use]
    pub fn replica_count(&self) -> usize {
        self.topology.replica_count()
    }

    /// All replicas of one partition, in broker ID order
    #[must_use]
    pub fn partition_replicas(&self, partition: PartitionId) -> Vec<PlacedReplica> {
        self.topology
            .zones
            .values()
            .flat_map(move |zone| {
                zone.brokers.values().flat_map(move |broker| {
                    broker
                        .replicas
                        .iter()
                        .filter(move |r| r.partition == partition)
                        .map(move |r| PlacedReplica {
                            zone: zone.id,
                            broker: broker.id,
                            role: r.role,
                        })
                })
            })
            .collect()
    }

    /// Broker holding the leader of a partition
    #[must_use]
    pub fn leader_of(&self, partition: PartitionId) -> Option<BrokerId> {
        self.topology.all_brokers().find_map(|broker| {
            broker
                .replicas
                .iter()
                .any(|r| r.partition == partition && r.role == ReplicaRole::Leader)
                .then_some(broker.id)
        })
    }

    /// Leader count per broker, including brokers that lead nothing
    #[must_use]
    pub fn leader_counts(&self) -> BTreeMap<BrokerId, usize> {
        self.topology
            .all_brokers()
            .map(|b| (b.id, b.count_role(ReplicaRole::Leader)))
            .collect()
    }

    /// Replica count per zone
    #[must_use]
    pub fn zone_replica_counts(&self) -> BTreeMap<ZoneId, usize> {
        self.topology
            .zones
            .values()
            .map(|z| (z.id, z.brokers.values().map(|b| b.replicas.len()).sum()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Replica;
    use kpviz_common::PlacementRequest;

    fn create_test_result() -> PlacementResult {
        let mut topology =
            ClusterTopology::for_request(&PlacementRequest::multi_region(2, 1, 2, 2, 1));
        let layout = [
            (0, 1, ReplicaRole::Leader),
            (1, 1, ReplicaRole::Observer),
            (1, 2, ReplicaRole::Leader),
            (0, 2, ReplicaRole::Observer),
        ];
        for (broker, partition, role) in layout {
            let (_, b) = topology.find_broker(BrokerId::new(broker)).unwrap();
            b.replicas.push(Replica {
                partition: PartitionId::new(partition),
                role,
            });
        }
        PlacementResult {
            topology,
            advisory: String::new(),
        }
    }

    #[test]
    fn test_partition_replicas() {
        let result = create_test_result();
        let replicas = result.partition_replicas(PartitionId::new(2));

        assert_eq!(replicas.len(), 2);
        assert_eq!(replicas[0].broker, BrokerId::new(0));
        assert_eq!(replicas[0].zone, ZoneId::new(1));
        assert_eq!(replicas[0].role, ReplicaRole::Observer);
        assert_eq!(replicas[1].zone, ZoneId::new(2));
        assert!(result.partition_replicas(PartitionId::new(3)).is_empty());
    }

    #[test]
    fn test_leader_queries() {
        let result = create_test_result();
        assert_eq!(result.leader_of(PartitionId::new(1)), Some(BrokerId::new(0)));
        assert_eq!(result.leader_of(PartitionId::new(2)), Some(BrokerId::new(1)));
        assert_eq!(result.leader_of(PartitionId::new(3)), None);

        let counts = result.leader_counts();
        assert_eq!(counts.get(&BrokerId::new(0)), Some(&1));
        assert_eq!(counts.get(&BrokerId::new(1)), Some(&1));
    }

    #[test]
    fn test_zone_replica_counts() {
        let result = create_test_result();
        assert_eq!(result.replica_count(), 4);
        let counts = result.zone_replica_counts();
        assert_eq!(counts.get(&ZoneId::new(1)), Some(&2));
        assert_eq!(counts.get(&ZoneId::new(2)), Some(&2));
    }
}
