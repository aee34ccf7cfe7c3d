//! Tolerant decoding of model output into a [`Decision`]

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{Clause, Decision, DecisionKind};

const FENCE: &str = "```";

/// Shape the model is asked to return
#[derive(Deserialize)]
struct RawDecision {
    decision: String,
    #[serde(default)]
    amount: Option<f64>,
    justification: String,
    clauses: Vec<Clause>,
}

/// Recover the JSON payload from text that may sit inside a code fence.
///
/// The fence may carry an info string of any case (`json`, `JSON`) and may
/// open and close on the same line. Text that already starts with a JSON
/// object, or has no fence, is returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return trimmed;
    }

    let Some(open_idx) = trimmed.find(FENCE) else {
        return trimmed;
    };
    let after = &trimmed[open_idx + FENCE.len()..];

    // Skip the info string up to the payload
    let body_start = after
        .find(|c: char| c == '\n' || c == '{' || c == '[')
        .unwrap_or(after.len());
    let body = &after[body_start..];

    match body.find(FENCE) {
        Some(end_idx) => body[..end_idx].trim(),
        None => body.trim(),
    }
}

/// Parse raw model output into a decision.
///
/// Fails with [`Error::ModelResponse`] when the payload is not JSON, misses a
/// required field, names an unknown verdict, or carries a negative amount.
/// A model claiming the `error` verdict itself is treated as malformed.
pub fn parse_decision(raw: &str) -> Result<Decision> {
    let payload = strip_code_fence(raw);

    let parsed: RawDecision =
        serde_json::from_str(payload).map_err(|e| Error::model_response(e.to_string()))?;

    let decision: DecisionKind = parsed.decision.parse().map_err(Error::model_response)?;
    if decision == DecisionKind::Error {
        return Err(Error::model_response("model reported an error verdict"));
    }

    if let Some(amount) = parsed.amount {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::model_response(format!("invalid amount {}", amount)));
        }
    }

    Ok(Decision {
        decision,
        amount: parsed.amount,
        justification: parsed.justification,
        clauses: parsed.clauses,
    })
}
