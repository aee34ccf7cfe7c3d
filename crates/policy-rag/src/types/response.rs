//! Response types for ingestion and claim decisions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verdict reached for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionKind {
    /// Claim is covered in full
    Approved,
    /// Claim is not covered
    Rejected,
    /// Claim is covered in part
    Partial,
    /// No trustworthy decision could be produced
    Error,
}

impl DecisionKind {
    /// Wire name of the verdict
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Partial => "partial",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "partial" => Ok(Self::Partial),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown decision '{}'", other)),
        }
    }
}

/// A supporting clause quoted in a decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Clause text
    pub text: String,
    /// Originating filename
    pub source: String,
}

/// Structured decision returned for every query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Verdict
    pub decision: DecisionKind,
    /// Payable amount, if any
    pub amount: Option<f64>,
    /// Short justification
    pub justification: String,
    /// Supporting clauses, in the order the model cited them
    pub clauses: Vec<Clause>,
}

impl Decision {
    /// Degraded decision used whenever the model output cannot be trusted.
    ///
    /// The justification carries at most `max_chars` characters of `reason`.
    pub fn fallback(reason: &str, max_chars: usize) -> Self {
        Self {
            decision: DecisionKind::Error,
            amount: None,
            justification: truncate_chars(reason, max_chars),
            clauses: Vec::new(),
        }
    }

    /// Whether this is a fallback decision
    pub fn is_error(&self) -> bool {
        self.decision == DecisionKind::Error
    }
}

/// Truncate to at most `max_chars` characters, respecting char boundaries
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Response from document ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Always "indexed" on success
    pub status: String,
    /// Filename echoed back
    pub filename: String,
    /// Number of chunks written to the index
    pub chunks_indexed: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Ingestion timestamp
    pub ingested_at: chrono::DateTime<chrono::Utc>,
}

impl IngestResponse {
    /// Successful ingestion acknowledgement
    pub fn indexed(filename: String, chunks_indexed: usize, processing_time_ms: u64) -> Self {
        Self {
            status: "indexed".to_string(),
            filename,
            chunks_indexed,
            processing_time_ms,
            ingested_at: chrono::Utc::now(),
        }
    }
}
