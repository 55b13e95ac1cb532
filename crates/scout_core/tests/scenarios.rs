//! Full two-stage runs driven by hand, the way a driver executes effects.
use scout_core::{update, AnalysisState, AppState, Effect, Msg, Stage};

/// Feed each effect to `answer` and the result back into `update` until idle.
/// Returns the final state and the stages the model was asked for.
fn drive(
    state: AppState,
    input: &str,
    mut answer: impl FnMut(Stage, &str) -> Result<String, String>,
) -> (AppState, Vec<Stage>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    let (mut state, mut pending) = update(state, Msg::Submitted);
    let mut asked = Vec::new();
    while let Some(Effect::InvokeModel {
        run_id,
        stage,
        prompt,
        ..
    }) = pending.pop()
    {
        asked.push(stage);
        let msg = match answer(stage, &prompt) {
            Ok(text) => Msg::ModelResponded {
                run_id,
                stage,
                text,
            },
            Err(message) => Msg::ModelFailed {
                run_id,
                stage,
                message,
            },
        };
        let (next, effects) = update(state, msg);
        state = next;
        pending.extend(effects);
    }
    (state, asked)
}

fn twenty(prefix: &str) -> String {
    let items: Vec<String> = (1..=20)
        .map(|i| format!(r#"{{"keyword":"{prefix} {i}","metric":"Alto","details":"d{i}"}}"#))
        .collect();
    format!("```json\n[\n{}\n]\n```", items.join(",\n"))
}

#[test]
fn two_successful_stages_complete_with_twenty_records_each() {
    let (state, asked) = drive(AppState::new(), "example.com", |stage, prompt| {
        assert!(prompt.contains("https://example.com"));
        Ok(match stage {
            Stage::CurrentTraffic => twenty("attuale"),
            Stage::PotentialGap => twenty("potenziale"),
        })
    });

    assert_eq!(asked, vec![Stage::CurrentTraffic, Stage::PotentialGap]);
    assert_eq!(state.analysis_state(), AnalysisState::Complete);
    let run = state.run().unwrap();
    assert_eq!(run.records(Stage::CurrentTraffic).len(), 20);
    assert_eq!(run.records(Stage::PotentialGap).len(), 20);
    assert_eq!(run.records(Stage::CurrentTraffic)[0].keyword(), "attuale 1");
    assert_eq!(run.records(Stage::PotentialGap)[19].keyword(), "potenziale 20");
    assert!(run.error().is_none());
}

#[test]
fn empty_first_answer_errors_and_skips_second_stage() {
    let (state, asked) = drive(AppState::new(), "example.com", |_, _| {
        Err("no text generated".to_string())
    });

    assert_eq!(asked, vec![Stage::CurrentTraffic]);
    assert_eq!(state.analysis_state(), AnalysisState::Error);
    assert!(state.run().unwrap().records(Stage::CurrentTraffic).is_empty());
}

#[test]
fn scheme_less_input_reaches_the_model_prefixed() {
    let mut prompts = Vec::new();
    let (state, _) = drive(AppState::new(), "bad site", |_, prompt| {
        prompts.push(prompt.to_string());
        Err("stop".to_string())
    });
    assert_eq!(state.run().unwrap().url(), "https://bad site");
    assert!(prompts[0].contains("https://bad site"));
}
