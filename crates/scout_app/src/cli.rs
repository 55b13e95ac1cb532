use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use scout_engine::ExportFormat;

use crate::config::Overrides;

#[derive(Parser)]
#[command(
    name = "seo_scout",
    version,
    about = "Current-traffic and gap keyword analysis via search-grounded Gemini prompts"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// RON config file (default: ./seo_scout.ron when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Gemini API key
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Model identifier
    #[arg(long, global = true, env = "SEO_SCOUT_MODEL")]
    pub model: Option<String>,
    /// Base URL of the generative language API
    #[arg(long, global = true, env = "SEO_SCOUT_API_BASE")]
    pub api_base: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
    /// Ask the model without live web search
    #[arg(long, global = true)]
    pub no_grounding: bool,
    /// Directory for exported files
    #[arg(long, global = true)]
    pub out: Option<PathBuf>,
    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            model: self.model.clone(),
            api_base: self.api_base.clone(),
            request_timeout_secs: self.timeout_secs,
            no_grounding: self.no_grounding,
            output_dir: self.out.clone(),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one site and exit
    Analyze {
        /// Site to analyze; https:// is added when no scheme is given
        url: String,
        /// Export both keyword lists after a run
        #[arg(long, value_enum)]
        export: Option<ExportChoice>,
    },
    /// Read sites from stdin, one per line, until EOF or :quit
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportChoice {
    Csv,
    Xlsx,
    All,
}

impl ExportChoice {
    pub fn formats(self) -> &'static [ExportFormat] {
        match self {
            ExportChoice::Csv => &[ExportFormat::Csv],
            ExportChoice::Xlsx => &[ExportFormat::Xlsx],
            ExportChoice::All => &ExportFormat::ALL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_parses_export_and_globals() {
        let cli = Cli::try_parse_from([
            "seo_scout",
            "analyze",
            "example.com",
            "--export",
            "all",
            "--no-grounding",
            "-vv",
        ])
        .unwrap();
        assert!(cli.global.no_grounding);
        assert_eq!(cli.global.log_level(), log::LevelFilter::Debug);
        match cli.command {
            Commands::Analyze { url, export } => {
                assert_eq!(url, "example.com");
                assert_eq!(export, Some(ExportChoice::All));
            }
            Commands::Interactive => panic!("wrong subcommand"),
        }
    }
}
