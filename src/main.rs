use clap::Parser;
use flow_tagger::{app::App, settings::Config};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "flow-tagger")]
#[command(about = "Classify flow logs by port and protocol, aggregate counts per tag")]
struct Cli {
    #[arg(short, long, help = "Flow log input file")]
    flow_log: Option<PathBuf>,

    #[arg(short, long, help = "Lookup table CSV (port,protocol,tag)")]
    lookup_table: Option<PathBuf>,

    #[arg(long, help = "Tag counts output file")]
    tag_output: Option<PathBuf>,

    #[arg(long, help = "Port-protocol counts output file")]
    port_protocol_output: Option<PathBuf>,

    #[arg(short, long, help = "Number of aggregation workers (default: CPU count)")]
    workers: Option<usize>,

    #[arg(short, long, help = "Configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::init();
    }

    // Load configuration: defaults, then config file, then CLI overrides
    let mut config = match &cli.config {
        Some(path) => match Config::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {:#}", e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    if let Some(path) = cli.flow_log {
        config.input.flow_log = path;
    }
    if let Some(path) = cli.lookup_table {
        config.input.lookup_table = path;
    }
    if let Some(path) = cli.tag_output {
        config.output.tag_counts = path;
    }
    if let Some(path) = cli.port_protocol_output {
        config.output.port_protocol_counts = path;
    }
    if cli.workers.is_some() {
        config.workers.count = cli.workers;
    }

    println!(
        "Processing {} against {}",
        config.input.flow_log.display(),
        config.input.lookup_table.display()
    );

    let app = App::new(config);
    match app.run() {
        Ok(summary) => {
            println!(
                "Aggregated {} records with {} workers: {} tags, {} port-protocol combinations",
                summary.records_read,
                summary.workers,
                summary.tag_entries,
                summary.port_protocol_entries
            );
            println!(
                "Reports written to {} and {}",
                app.config().output.tag_counts.display(),
                app.config().output.port_protocol_counts.display()
            );
        }
        Err(e) => {
            eprintln!("Processing failed: {:#}", e);
            process::exit(1);
        }
    }
}
