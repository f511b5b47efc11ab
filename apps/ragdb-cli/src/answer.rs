//! Abstention policy applied on top of a retrieval result.

use serde::Serialize;

use ragdb_core::types::{Candidate, RetrievalMode, RetrievalResult};

pub const NO_INFORMATION: &str = "I am sorry, but I could not find any relevant information.";
pub const LOW_CONFIDENCE: &str = "I am sorry, but the most relevant information found has a low confidence score.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub answer: String,
    pub contexts: Vec<Candidate>,
    pub fusion_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Confidence in the top candidate for the requested mode.
///
/// Fused reads the combined score, which is absent (and counts as 0) when
/// fusion was skipped. Baseline reads `1 - dense_distance`.
pub fn confidence(result: &RetrievalResult, mode: RetrievalMode) -> Option<f32> {
    let top = result.top()?;
    match mode {
        RetrievalMode::Fused => Some(top.combined_score.unwrap_or(0.0)),
        RetrievalMode::Baseline => Some(top.dense_similarity()),
    }
}

pub fn answer(result: RetrievalResult, mode: RetrievalMode, threshold: f32) -> Answer {
    let confidence = confidence(&result, mode);
    let answer = match (result.top(), confidence) {
        (Some(top), Some(c)) if c >= threshold => top.record.text.clone(),
        (Some(_), _) => LOW_CONFIDENCE.to_string(),
        (None, _) => NO_INFORMATION.to_string(),
    };
    Answer { answer, contexts: result.candidates, fusion_applied: result.fusion_applied, confidence }
}
