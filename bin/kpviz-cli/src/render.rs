//! Text and JSON rendering of placement results

use colored::Colorize;
use kpviz_common::{ClusterMode, ReplicaRole};
use kpviz_placement::{Broker, PlacementResult};

const TITLE: &str = "Kafka Partition Visualizer";

/// Render a result as pretty JSON
pub fn render_json(result: &PlacementResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Render a result as boxed text, one row of brokers per zone
#[must_use]
pub fn render_text(result: &PlacementResult, color: bool) -> String {
    let mode = result.topology.mode;
    let multi_region = mode == ClusterMode::MultiRegion;
    let mut out = String::new();

    if color {
        out.push_str(&TITLE.bold().to_string());
    } else {
        out.push_str(TITLE);
    }
    out.push_str("\n\n");

    if multi_region && !result.advisory.is_empty() {
        out.push_str(&format!("MRC Recommendation: {}\n\n", result.advisory));
    }

    for zone in result.topology.zones.values() {
        if multi_region {
            let header = format!("Data Center {}:", zone.id);
            if color {
                out.push_str(&header.bold().to_string());
            } else {
                out.push_str(&header);
            }
            out.push_str("\n\n");
        }

        let boxes: Vec<Vec<String>> = zone
            .brokers
            .values()
            .map(|b| broker_box(b, mode, color))
            .collect();
        out.push_str(&join_horizontal(&boxes));
        out.push('\n');
    }

    out.push_str(&summary(result));

    out.push_str("Legend: ");
    out.push_str(&paint("Leader (pX)", ReplicaRole::Leader, mode, color));
    out.push_str("  ");
    out.push_str(&paint("Follower (pX)", ReplicaRole::Follower, mode, color));
    if mode.has_observers() {
        out.push_str("  ");
        out.push_str(&paint("Observer (pX)", ReplicaRole::Observer, mode, color));
    }
    out.push('\n');

    out
}

/// Broker, replica and leader totals shown above the legend
fn summary(result: &PlacementResult) -> String {
    let topology = &result.topology;
    let mut out = format!(
        "{} brokers, {} replicas\n",
        topology.broker_count(),
        result.replica_count()
    );

    let leaders: Vec<String> = result
        .leader_counts()
        .iter()
        .map(|(broker, count)| format!("B{broker}={count}"))
        .collect();
    if !leaders.is_empty() {
        out.push_str(&format!("Leaders per broker: {}\n", leaders.join(" ")));
    }

    if topology.mode == ClusterMode::MultiRegion {
        let zones: Vec<String> = result
            .zone_replica_counts()
            .iter()
            .map(|(zone, count)| format!("DC{zone}={count}"))
            .collect();
        out.push_str(&format!("Replicas per DC: {}\n", zones.join(" ")));
    }

    out.push('\n');
    out
}

/// Role whose style a replica is drawn in. Observers only exist in
/// multi-region clusters; elsewhere they fall back to the follower style.
const fn display_role(role: ReplicaRole, mode: ClusterMode) -> ReplicaRole {
    match role {
        ReplicaRole::Observer if !mode.has_observers() => ReplicaRole::Follower,
        other => other,
    }
}

fn paint(text: &str, role: ReplicaRole, mode: ClusterMode, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match display_role(role, mode) {
        ReplicaRole::Leader => text.green().to_string(),
        ReplicaRole::Follower => text.yellow().to_string(),
        ReplicaRole::Observer => text.red().to_string(),
    }
}

/// Box lines for one broker. All lines share the same visible width.
fn broker_box(broker: &Broker, mode: ClusterMode, color: bool) -> Vec<String> {
    let header = format!("Broker {}:", broker.id);

    let (body, body_width) = if broker.replicas.is_empty() {
        let empty = "(empty)";
        let text = if color {
            empty.dimmed().to_string()
        } else {
            empty.to_string()
        };
        (text, empty.len())
    } else {
        let mut text = String::new();
        let mut width = 0;
        for replica in broker.sorted_replicas() {
            let token = format!(" p{}", replica.partition);
            width += token.len();
            text.push_str(&paint(&token, replica.role, mode, color));
        }
        (text, width)
    };

    let inner = header.len().max(body_width);
    let border = "─".repeat(inner + 2);
    vec![
        format!("╭{border}╮"),
        format!("│ {header}{} │", " ".repeat(inner - header.len())),
        format!("│ {body}{} │", " ".repeat(inner - body_width)),
        format!("╰{border}╯"),
    ]
}

fn join_horizontal(boxes: &[Vec<String>]) -> String {
    let height = boxes.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = String::new();
    for row in 0..height {
        let line: Vec<&str> = boxes
            .iter()
            .filter_map(|b| b.get(row).map(String::as_str))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
