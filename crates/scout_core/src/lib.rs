//! SEO scout core: pure analysis state machine, prompt construction and
//! model response parsing. Nothing in this crate performs IO.
mod effect;
mod extract;
mod msg;
mod prompt;
mod record;
mod state;
mod update;
mod url;
mod view_model;

pub use effect::Effect;
pub use extract::{extract_keywords, ParseFailure, ResponseParseError};
pub use msg::Msg;
pub use prompt::{build_prompt, JSON_OUTPUT_CONTRACT};
pub use record::{KeywordRecord, Stage};
pub use state::{
    AnalysisFailure, AnalysisRun, AnalysisState, AppState, RunId, GENERIC_ERROR_MESSAGE,
};
pub use update::update;
pub use url::normalize_target_url;
pub use view_model::{AppViewModel, KeywordSection, PROGRESS_CURRENT, PROGRESS_POTENTIAL};
