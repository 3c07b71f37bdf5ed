//! Cluster topology representation

use kpviz_common::{BrokerId, ClusterMode, PartitionId, PlacementRequest, ReplicaRole, ZoneId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Simulated cluster: zones owning brokers owning replicas
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterTopology {
    /// Deployment mode
    pub mode: ClusterMode,
    /// All zones, keyed by ID
    pub zones: BTreeMap<ZoneId, Zone>,
}

impl ClusterTopology {
    /// Create a new empty topology
    #[must_use]
    pub fn new(mode: ClusterMode) -> Self {
        Self {
            mode,
            zones: BTreeMap::new(),
        }
    }

    /// Build the empty zones and brokers a request implies.
    ///
    /// Broker IDs are dense from 0, in zone order then broker order.
    #[must_use]
    pub fn for_request(request: &PlacementRequest) -> Self {
        let mut topology = Self::new(request.mode);
        let mut next_broker = 0;

        for zone_idx in 0..request.effective_zones() {
            let zone_id = ZoneId::new(zone_idx + 1);
            let zone = topology.zones.entry(zone_id).or_insert_with(|| Zone::new(zone_id));

            for _ in 0..request.brokers_per_zone() {
                let broker_id = BrokerId::new(next_broker);
                zone.brokers.insert(broker_id, Broker::new(broker_id));
                next_broker += 1;
            }
        }

        topology
    }

    /// Get all brokers in the cluster
    pub fn all_brokers(&self) -> impl Iterator<Item = &Broker> {
        self.zones.values().flat_map(|z| z.brokers.values())
    }

    /// Broker IDs in ascending order
    #[must_use]
    pub fn broker_ids(&self) -> Vec<BrokerId> {
        let mut ids: Vec<BrokerId> = self.all_brokers().map(|b| b.id).collect();
        ids.sort_unstable();
        ids
    }

    /// Total number of brokers
    #[must_use]
    pub fn broker_count(&self) -> usize {
        self.zones.values().map(|z| z.brokers.len()).sum()
    }

    /// Find a broker for mutation, along with its zone
    pub fn find_broker(&mut self, broker_id: BrokerId) -> Option<(ZoneId, &mut Broker)> {
        self.zones
            .values_mut()
            .find_map(|z| {
                let zone_id = z.id;
                z.brokers.get_mut(&broker_id).map(|b| (zone_id, b))
            })
    }

    /// Total replicas placed across all brokers
    #[must_use]
    pub fn replica_count(&self) -> usize {
        self.all_brokers().map(|b| b.replicas.len()).sum()
    }
}

/// A data center grouping of brokers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone ID (1-based)
    pub id: ZoneId,
    /// Brokers in this zone
    pub brokers: BTreeMap<BrokerId, Broker>,
}

impl Zone {
    /// Create a new zone
    #[must_use]
    pub fn new(id: ZoneId) -> Self {
        Self {
            id,
            brokers: BTreeMap::new(),
        }
    }
}

/// A broker and the replicas assigned to it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broker {
    /// Broker ID
    pub id: BrokerId,
    /// Replicas in assignment order
    pub replicas: Vec<Replica>,
}

impl Broker {
    /// Create a broker with no replicas
    #[must_use]
    pub fn new(id: BrokerId) -> Self {
        Self {
            id,
            replicas: Vec::new(),
        }
    }

    /// Replicas sorted by partition ID
    #[must_use]
    pub fn sorted_replicas(&self) -> Vec<Replica> {
        let mut replicas = self.replicas.clone();
        replicas.sort_by_key(|r| r.partition);
        replicas
    }

    /// Number of replicas with the given role
    #[must_use]
    pub fn count_role(&self, role: ReplicaRole) -> usize {
        self.replicas.iter().filter(|r| r.role == role).count()
    }
}

/// One replica of a partition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replica {
    /// Partition ID (1-based)
    pub partition: PartitionId,
    /// Replica role
    pub role: ReplicaRole,
}
