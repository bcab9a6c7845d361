use std::path::PathBuf;

use clap::Parser;
use linkplot::{run_linked, DataSet, StderrLogger, SyncConfig};

#[derive(Parser)]
#[command(name = "linkplot", author, version, about = "Chart and data table with linked point selection", long_about = None)]
struct Cli {
    /// Dataset file (.json, .yaml or .yml). Defaults to the built-in solar employment data.
    dataset: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Cli::parse();
    if let Err(e) = StderrLogger::install(StderrLogger::level_for_verbosity(args.verbose)) {
        eprintln!("failed to install logger: {e}");
    }

    let dataset = match &args.dataset {
        Some(path) => match DataSet::load_from_path(path) {
            Ok(ds) => ds,
            Err(e) => {
                log::error!("cannot load {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => DataSet::solar_employment(),
    };

    let cfg = SyncConfig {
        title: "LinkPlot".to_string(),
        credits: Some("Source: thesolarfoundation.com".to_string()),
        y_axis_title: Some("Number of Employees".to_string()),
        ..Default::default()
    };
    if let Err(e) = run_linked(dataset, cfg) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
