use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use scout_core::{AnalysisRun, AppState, AppViewModel, Stage};
use scout_engine::{export_filename, export_records, Analyzer, ExportError, ExportFormat};
use scout_logging::scout_warn;
use tokio::runtime::Runtime;

use crate::render;

pub const HELP: &str = "Comandi:
  <url>                                    analizza un sito
  :export <csv|xlsx|all> [current|potential|both]
  :help
  :quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Analyze(String),
    Export {
        formats: Vec<ExportFormat>,
        stages: Vec<Stage>,
    },
    Help,
    Quit,
    Empty,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Analyze(line.to_string()));
    };

    let mut words = rest.split_whitespace();
    match words.next() {
        Some("quit" | "q" | "exit") => Ok(Command::Quit),
        Some("help" | "h") => Ok(Command::Help),
        Some("export") => {
            let formats = match words.next() {
                Some("csv") => vec![ExportFormat::Csv],
                Some("xlsx") => vec![ExportFormat::Xlsx],
                Some("all") => ExportFormat::ALL.to_vec(),
                Some(other) => return Err(format!("formato sconosciuto: {other}")),
                None => return Err("specifica un formato: csv, xlsx o all".to_string()),
            };
            let stages = match words.next() {
                None | Some("both") => Stage::ALL.to_vec(),
                Some("current") => vec![Stage::CurrentTraffic],
                Some("potential") => vec![Stage::PotentialGap],
                Some(other) => return Err(format!("sezione sconosciuta: {other}")),
            };
            Ok(Command::Export { formats, stages })
        }
        Some(other) => Err(format!("comando sconosciuto: :{other}")),
        None => Err("comando vuoto".to_string()),
    }
}

/// Export the chosen lists of `run`; empty lists are skipped.
pub fn export_run(
    run: &AnalysisRun,
    formats: &[ExportFormat],
    stages: &[Stage],
    dir: &Path,
    date: NaiveDate,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::new();
    for &stage in stages {
        let filename = export_filename(stage, date);
        for &format in formats {
            if let Some(path) = export_records(format, run.records(stage), dir, &filename)? {
                written.push(path);
            }
        }
    }
    Ok(written)
}

/// Progress printer handed to the analyzer.
pub fn print_progress(view: &AppViewModel) {
    if let Some(progress) = view.progress {
        println!("{progress}");
    }
}

pub fn print_view(view: &AppViewModel) {
    for line in render::render(view) {
        println!("{line}");
    }
}

/// Read-eval loop over `input`, one run at a time, until EOF or `:quit`.
pub fn run_interactive(
    runtime: &Runtime,
    analyzer: &Analyzer,
    output_dir: &Path,
    input: impl BufRead,
) -> Result<()> {
    let mut state = AppState::new();
    println!("{HELP}");
    prompt()?;

    for line in input.lines() {
        let line = line.context("reading stdin")?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Empty) => {}
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Analyze(url)) => {
                state = runtime.block_on(analyzer.submit(state, &url, &print_progress));
                print_view(&state.view());
            }
            Ok(Command::Export { formats, stages }) => match state.run() {
                Some(run) if !state.analysis_state().is_busy() => {
                    let today = chrono::Local::now().date_naive();
                    match export_run(run, &formats, &stages, output_dir, today) {
                        Ok(paths) if paths.is_empty() => println!("Nessun dato da esportare."),
                        Ok(paths) => {
                            for path in paths {
                                println!("Esportato: {}", path.display());
                            }
                        }
                        Err(err) => {
                            scout_warn!("export failed: {}", err);
                            println!("Esportazione non riuscita: {err}");
                        }
                    }
                }
                _ => println!("Nessuna analisi da esportare."),
            },
            Err(message) => println!("{message}"),
        }
        prompt()?;
    }
    println!();
    Ok(())
}

fn prompt() -> Result<()> {
    print!("URL> ");
    std::io::stdout().flush().context("flushing stdout")
}
