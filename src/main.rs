mod adapters;
mod application;
mod config;
mod domain;
mod interface;
mod ports;

use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adapters::OciAdapter;
use config::Config;
use interface::cli::{self, prompt, Args};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_env().with_overrides(args.config_file.clone(), args.profile.clone());

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("oci_vm_alarms={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting oci-vm-alarms v{}", env!("CARGO_PKG_VERSION"));

    let confirm = prompt::for_mode(args.non_interactive);
    let connect = |config: &Config| OciAdapter::connect(config).map(OciAdapter::into_handle);

    match cli::run(&args, &config, connect, confirm.as_ref()).await {
        Ok(outcome) => {
            println!("\n{outcome}");
            ExitCode::from(outcome.exit_status())
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(remedy) = e.remedy() {
                eprintln!("{remedy}");
            }
            ExitCode::from(e.exit_status())
        }
    }
}
