use std::{path::PathBuf, process::ExitCode};

use drive_consumer::{settings::Settings, startup::App};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let mut args = std::env::args_os().skip(1);
    let (Some(input), Some(output), None) = (args.next(), args.next(), args.next()) else {
        eprintln!("Usage: drive-consumer [input_data_file] [output_file]");
        return ExitCode::FAILURE;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = match Settings::new(&PathBuf::from(input), &PathBuf::from(output)) {
        Ok(settings) => settings,
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    match App::new(settings).run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("pipeline failed: {e}");
            ExitCode::FAILURE
        }
    }
}
