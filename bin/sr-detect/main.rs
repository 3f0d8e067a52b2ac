use anyhow::Result;
use clap::{Parser, ValueEnum};
use sr_cli::run_detection;
use sr_core::config::{self, CandidateOrder, ReportFormat};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Series,
    Ranked,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Detect support and resistance levels in a price series", long_about = None)]
struct Args {
    /// Price series file, one `date,price` record per line
    #[arg(required_unless_present = "init_config")]
    input: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write config/default.toml and exit
    #[arg(long)]
    init_config: bool,

    /// Number of most recent samples to analyse
    #[arg(long)]
    sample_window: Option<usize>,

    /// Samples on each side of a local extremum
    #[arg(long)]
    radius: Option<usize>,

    /// Fractional price tolerance, e.g. 0.05 for +-5%
    #[arg(long)]
    tolerance: Option<f64>,

    /// Minimum recurrence count for a reported level
    #[arg(long)]
    min_recurrence: Option<usize>,

    /// Candidate ordering between stages
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Print every intermediate stage
    #[arg(long)]
    stages: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.init_config {
        let path = config::ensure_default_config("config")?;
        info!("Default config available at {}", path.display());
        return Ok(());
    }

    // Load config, then apply command line overrides
    let mut config = config::load_config(args.config.as_ref())?;
    if let Some(sample_window) = args.sample_window {
        config.detector.sample_window = sample_window;
    }
    if let Some(radius) = args.radius {
        config.detector.local_window_radius = radius;
    }
    if let Some(tolerance) = args.tolerance {
        config.detector.similarity_tolerance = tolerance;
    }
    if let Some(min_recurrence) = args.min_recurrence {
        config.detector.minority_threshold = min_recurrence;
    }
    if let Some(order) = args.order {
        config.detector.candidate_order = match order {
            OrderArg::Series => CandidateOrder::Series,
            OrderArg::Ranked => CandidateOrder::Ranked,
        };
    }
    if let Some(format) = args.format {
        config.report.format = match format {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
        };
    }
    if args.stages {
        config.report.show_stages = true;
    }
    config.validate()?;

    let Some(input) = args.input else {
        anyhow::bail!("no input file given");
    };
    let report = run_detection(&config, &input)?;
    print!("{}", report);

    Ok(())
}
