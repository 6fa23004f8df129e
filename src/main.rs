use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use stackviz::Representation;
use stackviz::core::config::{self, CliOverrides, StackvizConfig};
use stackviz::core::sequencer::BusyPolicy;

/// Comma separated starting elements, bottom first.
#[derive(Debug, Clone)]
struct Seed(Vec<i64>);

fn parse_seed_arg(raw: &str) -> Result<Seed, String> {
    config::parse_seed(raw).map(Seed).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "stackviz", about = "Animated stack visualizer for the terminal")]
struct Args {
    /// Representation shown at startup
    #[arg(short, long, value_enum)]
    view: Option<Representation>,

    /// Starting elements, bottom first (e.g. "15,25,30,50")
    #[arg(short, long, value_parser = parse_seed_arg)]
    seed: Option<Seed>,

    /// Start with an empty stack
    #[arg(long, conflicts_with = "seed")]
    empty: bool,

    /// Apply pushes and pops without animation delays
    #[arg(long)]
    instant: bool,

    /// What to do with a request made while another is animating
    #[arg(short, long, value_enum)]
    policy: Option<BusyPolicy>,

    /// Config file to use instead of ~/.stackviz/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = "stackviz.log")]
    log_file: PathBuf,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        StackvizConfig::default()
    });

    let cli = CliOverrides {
        view: args.view,
        seed: args.seed.map(|Seed(values)| values),
        empty: args.empty,
        instant: args.instant,
        policy: args.policy,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Stackviz starting up: view {:?}, {} seeded elements, policy {:?}",
        resolved.view,
        resolved.seed.len(),
        resolved.busy_policy
    );

    stackviz::tui::run(resolved)
}
