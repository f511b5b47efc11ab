use ragdb_core::types::{RetrievalMode, RetrievalResult};

use crate::answer::Answer;

const SNIPPET_MAX_CHARS: usize = 200;

pub fn format_json<T: serde::Serialize>(value: &T) -> anyhow::Result<String> { Ok(serde_json::to_string_pretty(value)?) }

pub fn format_search(query: &str, mode: RetrievalMode, result: &RetrievalResult) -> String {
    if result.is_empty() {
        return format!("❌ No results for \"{query}\"");
    }
    let skipped = if mode == RetrievalMode::Fused && !result.fusion_applied { ", fusion skipped" } else { "" };
    let mut out = format!("🔍 {} result{} for \"{query}\" ({mode}{skipped})\n\n", result.len(), if result.len() == 1 { "" } else { "s" });
    for (i, c) in result.candidates.iter().enumerate() {
        out.push_str(&format!("{}. {} (p. {})\n", i + 1, c.record.source_title, c.record.page_number));
        let mut scores = vec![format!("distance: {:.4}", c.dense_distance)];
        if let Some(l) = c.lexical_score { scores.push(format!("bm25: {l:.4}")); }
        if let Some(s) = c.combined_score { scores.push(format!("combined: {s:.4}")); }
        out.push_str(&format!("   [{}]\n", scores.join(", ")));
        out.push_str(&format!("   {}\n", c.record.source_url));
        out.push_str(&format!("   {}\n\n", snippet(&c.record.text)));
    }
    out.trim_end().to_string()
}

pub fn format_answer(answer: &Answer) -> String {
    let mut out = format!("💬 {}\n", answer.answer);
    if let Some(c) = answer.confidence { out.push_str(&format!("   confidence: {c:.3}\n")); }
    if !answer.contexts.is_empty() {
        out.push_str("\n📚 Sources:\n");
        for c in &answer.contexts {
            out.push_str(&format!("   - {} (p. {}) {}\n", c.record.source_title, c.record.page_number, c.record.source_url));
        }
    }
    out.trim_end().to_string()
}

fn snippet(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= SNIPPET_MAX_CHARS { return flat; }
    let cut: String = flat.chars().take(SNIPPET_MAX_CHARS).collect();
    format!("{cut}...")
}
