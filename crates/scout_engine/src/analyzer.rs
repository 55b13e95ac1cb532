use std::collections::VecDeque;
use std::sync::Arc;

use scout_core::{update, AppState, AppViewModel, Effect, Msg};
use scout_logging::{scout_info, scout_warn};

use crate::{Grounding, ModelInvoker};

/// Receives the view after every visible state change of a run.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, view: &AppViewModel);
}

impl<F> ProgressSink for F
where
    F: Fn(&AppViewModel) + Send + Sync,
{
    fn emit(&self, view: &AppViewModel) {
        self(view)
    }
}

/// Executes core effects against a model, one at a time, feeding the
/// outcomes back through `update` until the run settles.
pub struct Analyzer {
    invoker: Arc<dyn ModelInvoker>,
    grounding: Grounding,
}

impl Analyzer {
    pub fn new(invoker: Arc<dyn ModelInvoker>, grounding: Grounding) -> Self {
        Self { invoker, grounding }
    }

    /// Enter `input` and submit it, returning once the run is `Complete`,
    /// `Error`, or was never started (busy state or blank input).
    pub async fn submit(&self, state: AppState, input: &str, sink: &dyn ProgressSink) -> AppState {
        let state = self
            .dispatch(state, Msg::InputChanged(input.to_string()), sink)
            .await;
        self.dispatch(state, Msg::Submitted, sink).await
    }

    pub async fn dispatch(&self, state: AppState, msg: Msg, sink: &dyn ProgressSink) -> AppState {
        let mut inbox = VecDeque::from([msg]);
        let mut state = state;
        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;
            let view = state.view();
            if state.consume_dirty() {
                sink.emit(&view);
            }
            // Effects run strictly in order; each yields exactly one reply.
            for effect in effects {
                inbox.push_back(self.execute(effect).await);
            }
        }
        state
    }

    async fn execute(&self, effect: Effect) -> Msg {
        match effect {
            Effect::InvokeModel {
                run_id,
                stage,
                url,
                prompt,
            } => {
                scout_logging::set_run_id(run_id);
                scout_info!("{} stage: asking model about {}", stage, url);
                match self.invoker.invoke(&prompt, self.grounding).await {
                    Ok(text) => Msg::ModelResponded {
                        run_id,
                        stage,
                        text,
                    },
                    Err(err) => {
                        scout_warn!("{} stage: {}", stage, err);
                        Msg::ModelFailed {
                            run_id,
                            stage,
                            message: err.to_string(),
                        }
                    }
                }
            }
        }
    }
}
