use crate::{RunId, Stage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send `prompt` to the model with search grounding; answer with
    /// `Msg::ModelResponded` or `Msg::ModelFailed` for the same run and stage.
    InvokeModel {
        run_id: RunId,
        stage: Stage,
        url: String,
        prompt: String,
    },
}
