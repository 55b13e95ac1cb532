use serde::Deserialize;
use serde_json::Value;

use crate::KeywordRecord;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFailure {
    #[error("response is empty")]
    Empty,
    #[error("invalid json: {0}")]
    InvalidJson(String),
    #[error("json value is not an array")]
    NotAnArray,
    #[error("record {index} is invalid: {message}")]
    InvalidRecord { index: usize, message: String },
}

/// The model answered, but not with the expected keyword array.
///
/// `raw_text` is the untouched model output, kept for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse model response: {reason}")]
pub struct ResponseParseError {
    pub reason: ParseFailure,
    pub raw_text: String,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    keyword: String,
    metric: String,
    details: String,
}

/// Decode a model response into keyword records.
///
/// At most one layer of markdown fencing is removed: a ```` ```json ```` block
/// wins over a bare ```` ``` ```` block, and unfenced text is parsed as is.
/// Anything else that is not a clean JSON array of records fails as a whole.
pub fn extract_keywords(raw: &str) -> Result<Vec<KeywordRecord>, ResponseParseError> {
    parse_records(unfence(raw.trim())).map_err(|reason| ResponseParseError {
        reason,
        raw_text: raw.to_string(),
    })
}

fn unfence(text: &str) -> &str {
    let after_open = text
        .split_once(JSON_FENCE)
        .or_else(|| text.split_once(FENCE))
        .map(|(_, rest)| rest);
    match after_open {
        Some(rest) => rest.split_once(FENCE).map_or(rest, |(inner, _)| inner),
        None => text,
    }
}

fn parse_records(payload: &str) -> Result<Vec<KeywordRecord>, ParseFailure> {
    if payload.trim().is_empty() {
        return Err(ParseFailure::Empty);
    }
    let value: Value =
        serde_json::from_str(payload).map_err(|err| ParseFailure::InvalidJson(err.to_string()))?;
    let Value::Array(items) = value else {
        return Err(ParseFailure::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let raw: RawRecord =
                serde_json::from_value(item).map_err(|err| ParseFailure::InvalidRecord {
                    index,
                    message: err.to_string(),
                })?;
            if raw.keyword.trim().is_empty() {
                return Err(ParseFailure::InvalidRecord {
                    index,
                    message: "keyword is empty".to_string(),
                });
            }
            Ok(KeywordRecord::new(raw.keyword, raw.metric, raw.details))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fence_wins_over_earlier_plain_fence() {
        let text = "```\nnot this\n```\n```json\n[]\n```";
        assert_eq!(unfence(text), "\n[]\n");
    }

    #[test]
    fn unclosed_fence_runs_to_end() {
        assert_eq!(unfence("```json\n[1]"), "\n[1]");
        assert_eq!(unfence("intro ```[2]"), "[2]");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(unfence("[]"), "[]");
    }
}
