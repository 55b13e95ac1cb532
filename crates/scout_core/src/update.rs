use scout_logging::{scout_debug, scout_error, scout_info, scout_warn};

use crate::{
    build_prompt, extract_keywords, normalize_target_url, AnalysisFailure, AppState, Effect, Msg,
    RunId, Stage,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            // Input is locked while a run is in flight.
            if !state.analysis_state().is_busy() {
                state.set_input(text);
            }
            Vec::new()
        }
        Msg::Submitted => {
            if state.analysis_state().is_busy() {
                scout_debug!("submit ignored while {:?}", state.analysis_state());
                return (state, Vec::new());
            }
            let Some(url) = normalize_target_url(state.input()) else {
                return (state, Vec::new());
            };
            let run_id = state.start_run(url.clone());
            scout_info!("run {} started for {}", run_id, url);
            vec![invoke(run_id, Stage::CurrentTraffic, url)]
        }
        Msg::ModelResponded {
            run_id,
            stage,
            text,
        } => {
            let Some(url) = awaited_url(&state, run_id, stage) else {
                return (state, Vec::new());
            };
            match extract_keywords(&text) {
                Ok(records) => {
                    scout_info!("{} stage produced {} keywords", stage, records.len());
                    state.store_records(stage, records);
                    match stage {
                        Stage::CurrentTraffic => vec![invoke(run_id, Stage::PotentialGap, url)],
                        Stage::PotentialGap => Vec::new(),
                    }
                }
                Err(error) => {
                    scout_error!("{} stage: {}", stage, error);
                    scout_debug!("unparseable model response: {}", error.raw_text);
                    state.fail(AnalysisFailure::ResponseParse { stage, error });
                    Vec::new()
                }
            }
        }
        Msg::ModelFailed {
            run_id,
            stage,
            message,
        } => {
            if awaited_url(&state, run_id, stage).is_some() {
                scout_error!("{} stage: model invocation failed: {}", stage, message);
                state.fail(AnalysisFailure::ModelInvocation { stage, message });
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn invoke(run_id: RunId, stage: Stage, url: String) -> Effect {
    Effect::InvokeModel {
        run_id,
        stage,
        prompt: build_prompt(stage, &url),
        url,
    }
}

fn awaited_url(state: &AppState, run_id: RunId, stage: Stage) -> Option<String> {
    let url = state.awaiting(run_id, stage).map(|run| run.url().to_string());
    if url.is_none() {
        scout_warn!(
            "ignoring {} result for run {} while {:?}",
            stage,
            run_id,
            state.analysis_state()
        );
    }
    url
}
