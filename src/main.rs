use anyhow::Context;
use bubbletea_rs::Program;
use clap::Parser;
use std::process::ExitCode;
use virtual_scroll_demo::config::{self, Cli, Settings};
use virtual_scroll_demo::{logging, Demo, Error};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<Error>().map_or(1, Error::exit_code);
            ExitCode::from(code as u8)
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli).context("invalid settings")?;

    logging::init(cli.log_file.as_deref(), &cli.log_level).context("failed to set up logging")?;
    tracing::debug!(?settings, "starting");
    config::install(settings);

    let program = Program::<Demo>::builder()
        .alt_screen(true)
        .build()
        .map_err(|e| Error::Runtime(e.to_string()))
        .context("failed to create terminal program")?;

    program
        .run()
        .await
        .map_err(|e| Error::Runtime(e.to_string()))
        .context("terminal program failed")?;

    tracing::info!("demo finished");
    Ok(())
}
