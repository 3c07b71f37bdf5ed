//! Configuration types for the partition visualizer
//!
//! A TOML file can describe the cluster to simulate and how to present
//! the result. Command-line flags override anything set here.

use crate::error::{Error, Result};
use crate::types::{ClusterMode, PlacementRequest};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cluster to simulate, if described in the file
    pub cluster: Option<ClusterConfig>,
    /// Output configuration
    pub output: OutputConfig,
    /// Simulation configuration
    pub simulation: SimulationConfig,
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::configuration(e.to_string()))
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Cluster topology section
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Deployment mode
    pub mode: ClusterMode,
    /// Total brokers (single) or brokers per data center (multi-region)
    pub brokers: u32,
    /// Number of data centers; ignored in single mode
    pub zones: u32,
    /// Number of partitions
    pub partitions: u32,
    /// Replication factor
    pub replication_factor: u32,
    /// Minimum in-sync replicas
    pub min_insync_replicas: u32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            mode: ClusterMode::Single,
            brokers: 3,
            zones: 1,
            partitions: 6,
            replication_factor: 3,
            min_insync_replicas: 2,
        }
    }
}

impl From<&ClusterConfig> for PlacementRequest {
    fn from(cluster: &ClusterConfig) -> Self {
        Self {
            mode: cluster.mode,
            partitions: cluster.partitions,
            replication_factor: cluster.replication_factor,
            min_insync_replicas: cluster.min_insync_replicas,
            brokers: cluster.brokers,
            zones: cluster.zones,
        }
    }
}

/// Output format for placement results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Boxed, colored text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Output section
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Result format
    pub format: OutputFormat,
    /// Color replica roles in text output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

/// Simulation section
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed seed for the shuffle; fresh entropy when unset
    pub seed: Option<u64>,
}
