//! Zone spread recommendation for multi-region clusters
//!
//! The advisory is informational only; placement never reads it.

/// Recommend how `replication_factor` replicas should spread over `zones`.
///
/// Returns an empty string when there are no zones.
#[must_use]
pub fn advisory(replication_factor: u32, zones: u32) -> String {
    if zones == 0 {
        return String::new();
    }

    let mut text =
        format!("Distribute {replication_factor} replicas across {zones} DCs for fault tolerance.");
    if replication_factor <= zones {
        text.push_str(" Aim for at most one replica per zone per partition.");
    } else {
        let min_per_zone = replication_factor / zones;
        let extra_zones = replication_factor % zones;
        text.push_str(&format!(
            " Aim for ~{min_per_zone} replicas per DC, with {extra_zones} DCs having an extra \
             replica."
        ));
    }
    text
}
