//! Normalization and fixed equal-weight fusion of the dense and lexical signals.
//!
//! Both signals are scaled by their maximum over the current candidate set, so
//! fused scores only rank candidates within one query.

use ragdb_core::types::Candidate;

pub const DENSE_WEIGHT: f32 = 0.5;
pub const LEXICAL_WEIGHT: f32 = 0.5;

/// `1 - d / max(d)` per candidate, or all zeros when the largest distance is
/// not positive (every candidate equidistant at zero).
pub fn dense_similarities(distances: &[f32]) -> Vec<f32> {
    let max_dist = distances.iter().copied().fold(0.0f32, f32::max);
    if max_dist > 0.0 {
        distances.iter().map(|d| 1.0 - d / max_dist).collect()
    } else {
        vec![0.0; distances.len()]
    }
}

/// `s / max(s)` per candidate, or all zeros when no candidate scored above zero.
pub fn normalize_lexical(scores: &[f32]) -> Vec<f32> {
    let max_lex = scores.iter().copied().fold(0.0f32, f32::max);
    if max_lex > 0.0 {
        scores.iter().map(|s| s / max_lex).collect()
    } else {
        vec![0.0; scores.len()]
    }
}

pub fn combine(sim: f32, lex_norm: f32) -> f32 { DENSE_WEIGHT * sim + LEXICAL_WEIGHT * lex_norm }

/// Attach lexical and combined scores, then order by combined score descending.
///
/// `candidates` must arrive in dense order; the sort is stable so ties keep it.
/// `lexical` holds one raw score per candidate.
pub fn fuse(candidates: &mut [Candidate], lexical: &[f32]) {
    debug_assert_eq!(candidates.len(), lexical.len());
    let distances: Vec<f32> = candidates.iter().map(|c| c.dense_distance).collect();
    let sims = dense_similarities(&distances);
    let lex_norms = normalize_lexical(lexical);
    for (((c, raw), sim), lex_norm) in candidates.iter_mut().zip(lexical).zip(sims).zip(lex_norms) {
        c.lexical_score = Some(*raw);
        c.combined_score = Some(combine(sim, lex_norm));
    }
    candidates.sort_by(|a, b| {
        let a = a.combined_score.unwrap_or(0.0);
        let b = b.combined_score.unwrap_or(0.0);
        b.total_cmp(&a)
    });
}
