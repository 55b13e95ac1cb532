use crate::{AnalysisState, KeywordRecord, Stage};

pub const PROGRESS_CURRENT: &str = "1/2 Analisi del traffico attuale tramite Google Search...";
pub const PROGRESS_POTENTIAL: &str = "2/2 Analisi competitor e gap di mercato in corso...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub state: AnalysisState,
    pub input: String,
    /// Normalized target of the active or last run.
    pub url: Option<String>,
    pub submit_enabled: bool,
    pub progress: Option<&'static str>,
    pub error: Option<String>,
    pub current: Option<KeywordSection>,
    pub potential: Option<KeywordSection>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn sections(&self) -> impl Iterator<Item = &KeywordSection> {
        self.current.iter().chain(self.potential.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSection {
    pub stage: Stage,
    pub title: &'static str,
    pub description: &'static str,
    pub records: Vec<KeywordRecord>,
}

impl KeywordSection {
    pub(crate) fn new(stage: Stage, records: Vec<KeywordRecord>) -> Self {
        Self {
            stage,
            title: stage.title(),
            description: stage.description(),
            records,
        }
    }
}
