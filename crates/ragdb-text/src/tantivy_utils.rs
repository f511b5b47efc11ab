use tantivy::schema::{Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED};
use tantivy::tokenizer::{TextAnalyzer, WhitespaceTokenizer};
use tantivy::Index;

/// Splits on ASCII whitespace only: no lowercasing, stemming or stop-words.
pub const TOKENIZER_NAME: &str = "split_whitespace";

pub struct ScoringFields {
	pub position: Field,
	pub text: Field,
}

pub fn build_schema() -> (Schema, ScoringFields) {
	let mut schema_builder = Schema::builder();
	let position = schema_builder.add_u64_field("position", STORED);
	let text_field_indexing = TextFieldIndexing::default().set_tokenizer(TOKENIZER_NAME).set_index_option(IndexRecordOption::WithFreqs);
	let text_options = TextOptions::default().set_indexing_options(text_field_indexing);
	let text = schema_builder.add_text_field("text", text_options);
	(schema_builder.build(), ScoringFields { position, text })
}

pub fn register_tokenizer(index: &Index) {
	let tokenizer = TextAnalyzer::builder(WhitespaceTokenizer::default()).build();
	index.tokenizers().register(TOKENIZER_NAME, tokenizer);
}

/// Query-side counterpart of the registered tokenizer. Duplicates are kept.
pub fn query_terms(query: &str) -> Vec<&str> { query.split_ascii_whitespace().collect() }
