use crate::view_model::{AppViewModel, KeywordSection, PROGRESS_CURRENT, PROGRESS_POTENTIAL};
use crate::{KeywordRecord, ResponseParseError, Stage};

pub type RunId = u64;

/// The only error text ever shown to the user, whatever went wrong.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Si è verificato un errore durante l'analisi. Assicurati che l'URL sia corretto e riprova.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    AnalyzingCurrent,
    AnalyzingPotential,
    Complete,
    Error,
}

impl AnalysisState {
    /// True while a run is in flight; submissions are ignored then.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            AnalysisState::AnalyzingCurrent | AnalysisState::AnalyzingPotential
        )
    }

    pub(crate) fn active_stage(self) -> Option<Stage> {
        match self {
            AnalysisState::AnalyzingCurrent => Some(Stage::CurrentTraffic),
            AnalysisState::AnalyzingPotential => Some(Stage::PotentialGap),
            _ => None,
        }
    }
}

/// Developer-facing detail of why a run ended in `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisFailure {
    ModelInvocation { stage: Stage, message: String },
    ResponseParse { stage: Stage, error: ResponseParseError },
}

impl AnalysisFailure {
    pub fn stage(&self) -> Stage {
        match self {
            AnalysisFailure::ModelInvocation { stage, .. }
            | AnalysisFailure::ResponseParse { stage, .. } => *stage,
        }
    }
}

impl std::fmt::Display for AnalysisFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisFailure::ModelInvocation { stage, message } => {
                write!(f, "model invocation failed during {stage}: {message}")
            }
            AnalysisFailure::ResponseParse { stage, error } => {
                write!(f, "{error} during {stage}")
            }
        }
    }
}

/// Everything produced by one submission. Replaced wholesale on resubmit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRun {
    run_id: RunId,
    url: String,
    current: Vec<KeywordRecord>,
    potential: Vec<KeywordRecord>,
    error: Option<String>,
    failure: Option<AnalysisFailure>,
}

impl AnalysisRun {
    fn new(run_id: RunId, url: String) -> Self {
        Self {
            run_id,
            url,
            current: Vec::new(),
            potential: Vec::new(),
            error: None,
            failure: None,
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn records(&self, stage: Stage) -> &[KeywordRecord] {
        match stage {
            Stage::CurrentTraffic => &self.current,
            Stage::PotentialGap => &self.potential,
        }
    }

    /// User-facing error message, if the run failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Diagnostic detail behind `error`; not meant for end users.
    pub fn failure(&self) -> Option<&AnalysisFailure> {
        self.failure.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    analysis: AnalysisState,
    run: Option<AnalysisRun>,
    last_run_id: RunId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analysis_state(&self) -> AnalysisState {
        self.analysis
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn run(&self) -> Option<&AnalysisRun> {
        self.run.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.analysis.is_busy();
        let progress = match self.analysis {
            AnalysisState::AnalyzingCurrent => Some(PROGRESS_CURRENT),
            AnalysisState::AnalyzingPotential => Some(PROGRESS_POTENTIAL),
            _ => None,
        };
        let run = self.run.as_ref();

        let current = run
            .filter(|run| {
                !run.current.is_empty()
                    || matches!(
                        self.analysis,
                        AnalysisState::AnalyzingPotential | AnalysisState::Complete
                    )
            })
            .map(|run| KeywordSection::new(Stage::CurrentTraffic, run.current.clone()));
        let potential = run
            .filter(|run| self.analysis == AnalysisState::Complete && !run.potential.is_empty())
            .map(|run| KeywordSection::new(Stage::PotentialGap, run.potential.clone()));

        AppViewModel {
            state: self.analysis,
            input: self.input.clone(),
            url: run.map(|run| run.url.clone()),
            submit_enabled: !busy && !self.input.trim().is_empty(),
            progress,
            error: run.and_then(|run| run.error.clone()),
            current,
            potential,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    /// Discard the previous run and start a fresh one at the current-traffic stage.
    pub(crate) fn start_run(&mut self, url: String) -> RunId {
        self.last_run_id += 1;
        self.run = Some(AnalysisRun::new(self.last_run_id, url));
        self.analysis = AnalysisState::AnalyzingCurrent;
        self.mark_dirty();
        self.last_run_id
    }

    /// The run id and url of the run waiting on `stage`, if any.
    pub(crate) fn awaiting(&self, run_id: RunId, stage: Stage) -> Option<&AnalysisRun> {
        let run = self.run.as_ref()?;
        (run.run_id == run_id && self.analysis.active_stage() == Some(stage)).then_some(run)
    }

    pub(crate) fn store_records(&mut self, stage: Stage, records: Vec<KeywordRecord>) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        match stage {
            Stage::CurrentTraffic => {
                run.current = records;
                self.analysis = AnalysisState::AnalyzingPotential;
            }
            Stage::PotentialGap => {
                run.potential = records;
                self.analysis = AnalysisState::Complete;
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn fail(&mut self, failure: AnalysisFailure) {
        if let Some(run) = self.run.as_mut() {
            run.error = Some(GENERIC_ERROR_MESSAGE.to_string());
            run.failure = Some(failure);
        }
        self.analysis = AnalysisState::Error;
        self.mark_dirty();
    }
}
