use anyhow::{anyhow, Result};
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, TermQuery};
use tantivy::schema::{IndexRecordOption, Value};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tracing::debug;

use ragdb_core::traits::LexicalScorer;

use crate::tantivy_utils::{build_schema, query_terms, register_tokenizer};

// Single indexing thread; tantivy requires at least 15MB per thread.
const WRITER_MEMORY_BUDGET: usize = 20_000_000;

/// BM25 scorer whose corpus statistics (document frequency, average length)
/// come exclusively from the documents passed to a single call.
///
/// Nothing is retained between calls, so scores are only comparable within
/// one call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bm25Scorer;

impl Bm25Scorer {
	pub fn new() -> Self { Self }

	pub fn score_documents(&self, query: &str, documents: &[&str]) -> Result<Vec<f32>> {
		let mut scores = vec![0.0f32; documents.len()];
		let terms = query_terms(query);
		if documents.is_empty() || terms.is_empty() { return Ok(scores); }

		let (schema, fields) = build_schema();
		let index = Index::create_in_ram(schema);
		register_tokenizer(&index);
		let mut writer: IndexWriter = index.writer_with_num_threads(1, WRITER_MEMORY_BUDGET)?;
		for (position, text) in documents.iter().enumerate() {
			writer.add_document(doc!(
				fields.position => position as u64,
				fields.text => text.to_string(),
			))?;
		}
		writer.commit()?;
		writer.wait_merging_threads()?;

		let reader: IndexReader = index.reader_builder().reload_policy(ReloadPolicy::Manual).try_into()?;
		let searcher = reader.searcher();
		let clauses: Vec<(Occur, Box<dyn Query>)> = terms
			.iter()
			.map(|t| {
				let term = Term::from_field_text(fields.text, t);
				let q: Box<dyn Query> = Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs));
				(Occur::Should, q)
			})
			.collect();
		let query = BooleanQuery::new(clauses);
		let top_docs = searcher.search(&query, &TopDocs::with_limit(documents.len()))?;
		let matched = top_docs.len();
		for (score, addr) in top_docs {
			let doc: TantivyDocument = searcher.doc(addr)?;
			let position = doc
				.get_first(fields.position)
				.and_then(|v| v.as_u64())
				.ok_or_else(|| anyhow!("scored document has no stored position"))?;
			if let Some(slot) = scores.get_mut(position as usize) { *slot = score; }
		}
		debug!(documents = documents.len(), terms = terms.len(), matched, "bm25 scored candidate set");
		Ok(scores)
	}
}

impl LexicalScorer for Bm25Scorer {
	fn score(&self, query: &str, documents: &[&str]) -> Result<Vec<f32>> { self.score_documents(query, documents) }
}
