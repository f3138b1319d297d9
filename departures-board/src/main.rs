use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use departures_board::config::Settings;
use departures_board::fetch::{self, BoardFetcher, FetchConfig};
use departures_board::generate;

fn print_usage() {
    eprintln!("Usage: departures-board generate <config.json>");
    eprintln!("       departures-board fetch <config.json> <data_path>");
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [cmd, config] if cmd.as_str() == "generate" => match generate::run(Path::new(config)) {
            Ok(output) => {
                println!("Generated: {}", output.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, "generate failed");
                ExitCode::FAILURE
            }
        },
        [cmd, config, data_path] if cmd.as_str() == "fetch" => {
            fetch_boards(Path::new(config), Path::new(data_path)).await
        }
        _ => {
            print_usage();
            ExitCode::FAILURE
        }
    }
}

async fn fetch_boards(config_path: &Path, data_path: &Path) -> ExitCode {
    let settings = match Settings::load(config_path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "failed to load settings");
            return ExitCode::FAILURE;
        }
    };

    let fetcher = match BoardFetcher::new(FetchConfig::new()) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::error!(error = %e, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    match fetch::fetch_all_boards(&fetcher, &settings, data_path).await {
        Ok(fetched) => {
            tracing::info!(fetched, "fetch complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "fetch failed");
            ExitCode::FAILURE
        }
    }
}
