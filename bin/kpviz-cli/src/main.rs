//! Kafka partition visualizer CLI
//!
//! This binary simulates replica placement for a described cluster and
//! prints the layout.
//!
//! Usage:
//!   kpviz-cli single --brokers 3 --partitions 4 --replication-factor 2 --min-isr 1
//!   kpviz-cli multi-region --zones 3 --brokers-per-zone 2 --partitions 6 \
//!       --replication-factor 3 --min-isr 2
//!   kpviz-cli --config cluster.toml --format json

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kpviz_common::config::OutputFormat;
use kpviz_common::{Config, Error, PlacementRequest};
use kpviz_placement::PlacementEngine;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "kpviz-cli")]
#[command(about = "Simulate and visualize Kafka partition replica placement")]
#[command(version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the broker shuffle (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Single cluster in one data center
    Single {
        /// Total number of brokers
        #[arg(long)]
        brokers: u32,
        /// Number of partitions
        #[arg(long)]
        partitions: u32,
        /// Replication factor
        #[arg(long)]
        replication_factor: u32,
        /// Minimum in-sync replicas
        #[arg(long)]
        min_isr: u32,
    },
    /// Multi-region cluster spanning several data centers
    MultiRegion {
        /// Number of data centers
        #[arg(long)]
        zones: u32,
        /// Brokers in each data center
        #[arg(long)]
        brokers_per_zone: u32,
        /// Number of partitions
        #[arg(long)]
        partitions: u32,
        /// Replication factor
        #[arg(long)]
        replication_factor: u32,
        /// Minimum in-sync replicas
        #[arg(long)]
        min_isr: u32,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the result
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let request = resolve_request(args.command.as_ref(), &config)?;
    request.validate()?;

    let format = args.format.map_or(config.output.format, OutputFormat::from);
    let color = config.output.color && !args.no_color;
    let seed = args.seed.or(config.simulation.seed);

    info!(
        mode = %request.mode,
        brokers = request.total_brokers().unwrap_or_default(),
        zones = request.effective_zones(),
        partitions = request.partitions,
        replication_factor = request.replication_factor,
        min_isr = request.min_insync_replicas,
        "Simulating placement"
    );

    let mut engine = seed.map_or_else(PlacementEngine::new, PlacementEngine::with_seed);
    let result = engine.compute(&request);

    match format {
        OutputFormat::Text => print!("{}", render::render_text(&result, color)),
        OutputFormat::Json => println!("{}", render::render_json(&result)?),
    }

    Ok(())
}

/// Pick the request from the subcommand, falling back to the config file
fn resolve_request(command: Option<&Commands>, config: &Config) -> Result<PlacementRequest> {
    let request = match command {
        Some(Commands::Single {
            brokers,
            partitions,
            replication_factor,
            min_isr,
        }) => PlacementRequest::single(*brokers, *partitions, *replication_factor, *min_isr),
        Some(Commands::MultiRegion {
            zones,
            brokers_per_zone,
            partitions,
            replication_factor,
            min_isr,
        }) => PlacementRequest::multi_region(
            *zones,
            *brokers_per_zone,
            *partitions,
            *replication_factor,
            *min_isr,
        ),
        None => match &config.cluster {
            Some(cluster) => PlacementRequest::from(cluster),
            None => {
                return Err(Error::configuration(
                    "no cluster described: use a subcommand or a [cluster] config section",
                )
                .into());
            }
        },
    };
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kpviz_common::ClusterMode;

    #[test]
    fn test_resolve_from_subcommand() {
        let args = Args::try_parse_from([
            "kpviz-cli",
            "multi-region",
            "--zones",
            "3",
            "--brokers-per-zone",
            "2",
            "--partitions",
            "6",
            "--replication-factor",
            "3",
            "--min-isr",
            "2",
        ])
        .unwrap();

        let request = resolve_request(args.command.as_ref(), &Config::default()).unwrap();
        assert_eq!(request, PlacementRequest::multi_region(3, 2, 6, 3, 2));
    }

    #[test]
    fn test_subcommand_overrides_config() {
        let config =
            Config::from_toml_str("[cluster]\nmode = \"multi-region\"\nzones = 4\n").unwrap();
        let args = Args::try_parse_from([
            "kpviz-cli",
            "single",
            "--brokers",
            "3",
            "--partitions",
            "4",
            "--replication-factor",
            "2",
            "--min-isr",
            "1",
        ])
        .unwrap();

        let request = resolve_request(args.command.as_ref(), &config).unwrap();
        assert_eq!(request.mode, ClusterMode::Single);
        assert_eq!(request.total_brokers(), Some(3));
    }

    #[test]
    fn test_resolve_from_config() {
        let config = Config::from_toml_str("[cluster]\nbrokers = 5\npartitions = 10\n").unwrap();
        let request = resolve_request(None, &config).unwrap();
        assert_eq!(request.brokers, 5);
        assert_eq!(request.partitions, 10);
    }

    #[test]
    fn test_resolve_without_cluster_fails() {
        let err = resolve_request(None, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("no cluster described"));
    }

    #[test]
    fn test_global_flags() {
        let args = Args::try_parse_from([
            "kpviz-cli",
            "--seed",
            "7",
            "--format",
            "json",
            "--no-color",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(7));
        assert!(matches!(args.format, Some(FormatArg::Json)));
        assert!(args.no_color);
        assert!(args.command.is_none());
    }
}
