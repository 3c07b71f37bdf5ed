//! Partition replica placement
//!
//! Each partition gets a round-robin leader, then its remaining replicas
//! are drawn from a per-partition shuffle of all brokers. In multi-region
//! clusters the first pass refuses to reuse a zone while an unused zone
//! still has a free broker; a second pass fills whatever is left.

use crate::advisory::advisory;
use crate::result::PlacementResult;
use crate::topology::{ClusterTopology, Replica};
use kpviz_common::{BrokerId, ClusterMode, PartitionId, PlacementRequest, ReplicaRole, ZoneId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Placement engine owning a random source seeded once
pub struct PlacementEngine {
    rng: StdRng,
}

impl PlacementEngine {
    /// Create an engine seeded from OS entropy
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with a fixed seed
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Compute placement for a request.
    ///
    /// Successive calls keep drawing from the same random stream, so
    /// repeated requests get different shuffles.
    pub fn compute(&mut self, request: &PlacementRequest) -> PlacementResult {
        compute_placement(request, &mut self.rng)
    }
}

impl Default for PlacementEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute replica placement for every partition of a request.
///
/// The request is assumed valid. A topology without brokers comes back
/// initialized but empty, with no advisory.
pub fn compute_placement<R: Rng + ?Sized>(
    request: &PlacementRequest,
    rng: &mut R,
) -> PlacementResult {
    let mut topology = ClusterTopology::for_request(request);
    let broker_ids = topology.broker_ids();

    if broker_ids.is_empty() {
        warn!(mode = %request.mode, "topology has no brokers, nothing to place");
        return PlacementResult {
            topology,
            advisory: String::new(),
        };
    }

    let advisory = match request.mode {
        ClusterMode::Single => String::new(),
        ClusterMode::MultiRegion => advisory(request.replication_factor, request.zones),
    };

    let zone_index: HashMap<BrokerId, ZoneId> = topology
        .zones
        .values()
        .flat_map(|z| z.brokers.keys().map(move |b| (*b, z.id)))
        .collect();

    for index in 0..request.partitions {
        let mut shuffled = broker_ids.clone();
        shuffled.shuffle(rng);
        place_partition(
            &mut topology,
            &zone_index,
            &broker_ids,
            &shuffled,
            request,
            index,
        );
    }

    PlacementResult { topology, advisory }
}

/// Role bookkeeping for the non-leader replicas of one partition
#[derive(Clone, Copy, Debug)]
struct RoleQuota {
    mode: ClusterMode,
    target_followers: u32,
    target_observers: u32,
    followers: u32,
    observers: u32,
}

impl RoleQuota {
    fn new(request: &PlacementRequest) -> Self {
        // The leader counts toward min ISR
        let target_followers = request.min_insync_replicas.saturating_sub(1);
        let target_observers = request
            .replication_factor
            .saturating_sub(1)
            .saturating_sub(target_followers);

        Self {
            mode: request.mode,
            target_followers,
            target_observers,
            followers: 0,
            observers: 0,
        }
    }

    fn next_role(&mut self) -> ReplicaRole {
        if self.mode == ClusterMode::Single {
            return ReplicaRole::Follower;
        }

        if self.followers < self.target_followers {
            self.followers += 1;
            ReplicaRole::Follower
        } else {
            // Replicas beyond both quotas are observers as well
            if self.observers >= self.target_observers {
                debug!(observers = self.observers, "observer quota exceeded");
            }
            self.observers += 1;
            ReplicaRole::Observer
        }
    }
}

/// Place all replicas of the partition at zero-based `index`.
///
/// Returns false when the leader broker cannot be located, in which case
/// the partition is skipped entirely.
fn place_partition(
    topology: &mut ClusterTopology,
    zone_index: &HashMap<BrokerId, ZoneId>,
    broker_ids: &[BrokerId],
    shuffled: &[BrokerId],
    request: &PlacementRequest,
    index: u32,
) -> bool {
    let partition = PartitionId::from_index(index);
    let leader_id = broker_ids[index as usize % broker_ids.len()];

    let Some((leader_zone, leader)) = topology.find_broker(leader_id) else {
        warn!(%partition, broker = %leader_id, "leader broker not found, skipping partition");
        return false;
    };
    leader.replicas.push(Replica {
        partition,
        role: ReplicaRole::Leader,
    });

    let replication_factor = request.replication_factor as usize;
    let zone_count = topology.zones.len();
    let spread_zones = request.mode == ClusterMode::MultiRegion;

    let mut assigned: HashSet<BrokerId> = HashSet::from([leader_id]);
    let mut used_zones: HashSet<ZoneId> = HashSet::from([leader_zone]);
    let mut quota = RoleQuota::new(request);

    // First pass: one replica per zone before any zone gets a second
    for &candidate in shuffled {
        if assigned.len() >= replication_factor {
            break;
        }
        if assigned.contains(&candidate) {
            continue;
        }
        let Some(&zone) = zone_index.get(&candidate) else {
            continue;
        };

        if spread_zones && used_zones.len() < zone_count && used_zones.contains(&zone) {
            let unused_zone_free = shuffled.iter().any(|other| {
                !assigned.contains(other)
                    && zone_index
                        .get(other)
                        .is_some_and(|z| !used_zones.contains(z))
            });
            if unused_zone_free {
                continue;
            }
        }

        if assign(topology, candidate, partition, &mut quota) {
            assigned.insert(candidate);
            used_zones.insert(zone);
        }
    }

    // Second pass: fill from any zone
    if spread_zones && assigned.len() < replication_factor {
        for &candidate in shuffled {
            if assigned.len() >= replication_factor {
                break;
            }
            if assigned.contains(&candidate) {
                continue;
            }
            if assign(topology, candidate, partition, &mut quota) {
                assigned.insert(candidate);
            }
        }
    }

    debug!(
        %partition,
        leader = %leader_id,
        replicas = assigned.len(),
        zones = used_zones.len(),
        "placed partition"
    );
    true
}

fn assign(
    topology: &mut ClusterTopology,
    broker_id: BrokerId,
    partition: PartitionId,
    quota: &mut RoleQuota,
) -> bool {
    match topology.find_broker(broker_id) {
        Some((_, broker)) => {
            broker.replicas.push(Replica {
                partition,
                role: quota.next_role(),
            });
            true
        }
        None => false,
    }
}
