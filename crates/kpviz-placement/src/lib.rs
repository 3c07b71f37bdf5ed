//! Partition visualizer placement - simulated Kafka replica assignment
//!
//! This crate assigns every partition of a simulated cluster a set of
//! replicas across brokers and, in multi-region mode, data centers.
//!
//! # Algorithm
//!
//! - **Leaders** rotate round robin over the broker IDs in ascending order.
//! - **Followers and observers** are drawn from a fresh shuffle of all
//!   brokers per partition. Multi-region clusters fill every zone once
//!   before placing a second replica in any zone.
//! - **Roles**: in multi-region mode the first `min_isr - 1` non-leaders
//!   are followers and the rest observers. Single clusters only have
//!   followers.
//!
//! # Example
//! ```ignore
//! use kpviz_common::PlacementRequest;
//! use kpviz_placement::PlacementEngine;
//!
//! let mut engine = PlacementEngine::new();
//! let result = engine.compute(&PlacementRequest::multi_region(3, 2, 12, 3, 2));
//! println!("{}", result.advisory);
//! ```

pub mod advisory;
pub mod engine;
pub mod result;
pub mod topology;

pub use advisory::advisory;
pub use engine::{PlacementEngine, compute_placement};
pub use result::{PlacedReplica, PlacementResult};
pub use topology::{Broker, ClusterTopology, Replica, Zone};
