use crate::{RunId, Stage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input.
    InputChanged(String),
    /// User submitted the current input for analysis.
    Submitted,
    /// The model answered the prompt for `stage`.
    ModelResponded {
        run_id: RunId,
        stage: Stage,
        text: String,
    },
    /// The model call for `stage` failed or returned no text.
    ModelFailed {
        run_id: RunId,
        stage: Stage,
        message: String,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
