mod report;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::EnvFilter;

use archmetrics_core::{
    Analyser, Analysis, Config, ContainmentMode, EntityKind, Graph, MetricRegistry,
    PartitionStrategy, Protocol, RelationKind, ReportFormat,
};

#[derive(Parser)]
#[command(name = "archmetrics")]
#[command(about = "Architecture metrics for extracted code entity graphs", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute metrics for a protocol file
    Analyze {
        /// Protocol file (.json, .yaml or .yml)
        protocol: PathBuf,

        /// Config file (defaults to ./archmetrics.toml, then the user config)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: console or json
        #[arg(long)]
        format: Option<ReportFormat>,

        /// Containment reading: flattened or direct
        #[arg(long)]
        containment: Option<ContainmentMode>,

        /// Module cohesion clustering: greedy or connected-components
        #[arg(long)]
        partition: Option<PartitionStrategy>,

        /// Compute each metric's nodes in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Show node and relation counts of a protocol file
    Inspect {
        /// Protocol file (.json, .yaml or .yml)
        protocol: PathBuf,
    },
    /// List the built-in metrics in execution order
    Metrics,
    /// Print the default configuration
    Config,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Analyze {
            protocol,
            config,
            format,
            containment,
            partition,
            parallel,
        } => {
            let mut config = Config::load_from(config.as_deref()).wrap_err("Failed to load config")?;
            if let Some(format) = format {
                config.report.format = format;
            }
            if let Some(containment) = containment {
                config.traversal.containment = containment;
            }
            if let Some(partition) = partition {
                config.cohesion.partition = partition;
            }
            if parallel {
                config.analysis.parallel = true;
            }
            analyze(&protocol, &config, &mut out)?;
        }
        Commands::Inspect { protocol } => {
            inspect(&protocol, &mut out)?;
        }
        Commands::Metrics => {
            list_metrics(&MetricRegistry::builtin(), &mut out)?;
        }
        Commands::Config => {
            write!(out, "{}", Config::default_config_string())?;
        }
    }

    Ok(())
}

/// Logs go to stderr so reports on stdout stay parseable.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_protocol(path: &Path) -> Result<Protocol> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read protocol {}", path.display()))?;

    let protocol = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => Protocol::from_yaml_str(&content),
        _ => Protocol::from_json_str(&content),
    }
    .wrap_err_with(|| format!("Failed to parse protocol {}", path.display()))?;

    info!(
        path = %path.display(),
        entities = protocol.entity_count(),
        relations = protocol.relations.len(),
        "Loaded protocol"
    );
    Ok(protocol)
}

fn analyze(path: &Path, config: &Config, out: &mut dyn Write) -> Result<()> {
    let protocol = load_protocol(path)?;
    let graph = Graph::build(&protocol).wrap_err("Invalid protocol")?;

    let analyser = Analyser::from_config(config);
    let metrics = analyser.analyse(&graph).wrap_err("Analysis failed")?;
    let analysis = Analysis { graph, metrics };

    report::render(
        config.report.format,
        &analysis,
        analyser.registry(),
        config.report.precision,
        out,
    )?;
    Ok(())
}

fn inspect(path: &Path, out: &mut dyn Write) -> Result<()> {
    let protocol = load_protocol(path)?;
    let graph = Graph::build(&protocol).wrap_err("Invalid protocol")?;

    writeln!(out, "Entities: {}", graph.len())?;
    for kind in EntityKind::ALL {
        let count = graph.nodes_of_kind(kind).len();
        if count > 0 {
            writeln!(out, "  {:<20} {}", kind.group_name(), count)?;
        }
    }

    writeln!(out, "Relations: {}", graph.relations().len())?;
    for kind in RelationKind::ALL {
        let count = graph.relation_count(kind);
        if count > 0 {
            writeln!(out, "  {:<20} {}", kind.relation_name(), count)?;
        }
    }
    Ok(())
}

fn list_metrics(registry: &MetricRegistry, out: &mut dyn Write) -> Result<()> {
    for metric in registry.resolve_order()? {
        writeln!(out, "{} ({})", metric.name(), metric.scope())?;
        writeln!(out, "  {}", metric.description())?;
        if let Some(kinds) = metric.applicable_kinds() {
            let kinds = if kinds.len() == EntityKind::ALL.len() {
                "all".to_string()
            } else {
                kinds
                    .iter()
                    .map(|kind| kind.display_name())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            writeln!(out, "  Applies to: {}", kinds)?;
        }
        if !metric.depends_on().is_empty() {
            writeln!(out, "  Depends on: {}", metric.depends_on().join(", "))?;
        }
    }
    Ok(())
}
