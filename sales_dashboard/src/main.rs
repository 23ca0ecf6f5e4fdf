use clap::Parser;
use sales_dashboard::{run, Cli};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_dashboard=info,sales_forecast=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match run(cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
