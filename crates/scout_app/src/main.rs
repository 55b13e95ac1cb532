mod cli;
mod config;
mod render;
mod session;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use scout_core::{AnalysisState, AppState};
use scout_engine::{Analyzer, GeminiInvoker};
use scout_logging::{scout_info, scout_warn, LogDestination};

use cli::{Cli, Commands};
use config::AppConfig;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let destination = match &cli.global.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    scout_logging::initialize(destination, cli.global.log_level());

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let config = AppConfig::load(cli.global.config.as_deref(), &cwd)?
        .apply(cli.global.overrides());

    // Older deployments set API_KEY; keep accepting it.
    let api_key = cli
        .global
        .api_key
        .clone()
        .or_else(|| std::env::var("API_KEY").ok())
        .filter(|key| !key.trim().is_empty());
    if api_key.is_none() {
        scout_warn!("no API key set; export GEMINI_API_KEY or pass --api-key");
    }

    let invoker = GeminiInvoker::new(config.invoker_settings(api_key));
    let analyzer = Analyzer::new(Arc::new(invoker), config.grounding());
    // Single thread so the run id stamped on log lines stays with the run.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    scout_info!("model {} at {}", config.model, config.api_base);

    match cli.command {
        Commands::Analyze { url, export } => {
            let state = runtime.block_on(analyzer.submit(
                AppState::new(),
                &url,
                &session::print_progress,
            ));
            session::print_view(&state.view());

            if let (Some(choice), Some(run)) = (export, state.run()) {
                let today = chrono::Local::now().date_naive();
                let written = session::export_run(
                    run,
                    choice.formats(),
                    &scout_core::Stage::ALL,
                    &config.output_dir,
                    today,
                )
                .context("exporting keywords")?;
                for path in written {
                    println!("Esportato: {}", path.display());
                }
            }

            Ok(match state.analysis_state() {
                AnalysisState::Complete => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        Commands::Interactive => {
            let stdin = std::io::stdin();
            session::run_interactive(&runtime, &analyzer, &config.output_dir, stdin.lock())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
