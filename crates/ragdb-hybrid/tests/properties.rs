use proptest::prelude::*;

use ragdb_core::traits::Embedder;
use ragdb_core::types::{ChunkRecord, RetrievalMode};
use ragdb_embed::HashingEmbedder;
use ragdb_hybrid::HybridRetriever;
use ragdb_vector::{FlatL2Index, IdMap, MemoryChunkStore};

const DIM: usize = 64;
const VOCAB: &[&str] = &["pump", "valve", "motor", "belt", "filter", "stop", "oil", "gear", "the", "check"];

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB), 1..8).prop_map(|words| words.join(" "))
}

fn retriever(texts: &[String]) -> HybridRetriever<FlatL2Index, IdMap, MemoryChunkStore> {
    let embedder = HashingEmbedder::new(DIM);
    let vectors: Vec<Vec<f32>> = texts.iter().map(|t| embedder.embed(t).unwrap()).collect();
    let index = FlatL2Index::from_vectors(DIM, &vectors).unwrap();
    let ids: Vec<u64> = (1..=texts.len() as u64).collect();
    let records = texts.iter().zip(&ids).map(|(t, id)| ChunkRecord {
        id: *id,
        text: t.clone(),
        source_title: "Field guide".into(),
        source_url: "https://example.org/guide".into(),
        page_number: 1,
    });
    let store = MemoryChunkStore::from_records(records).unwrap();
    HybridRetriever::new(Box::new(embedder), index, IdMap::new(ids), store).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn baseline_is_bounded_and_distance_ordered(texts in prop::collection::vec(text(), 0..12), query in text(), k in 1usize..6) {
        let result = retriever(&texts).retrieve(&query, k, RetrievalMode::Baseline).unwrap();
        prop_assert!(!result.fusion_applied);
        prop_assert_eq!(result.len(), k.min(texts.len()));
        for pair in result.candidates.windows(2) {
            prop_assert!(pair[0].dense_distance <= pair[1].dense_distance);
        }
    }

    #[test]
    fn fused_scores_are_bounded_and_descending(texts in prop::collection::vec(text(), 0..12), query in text(), k in 1usize..6) {
        let result = retriever(&texts).retrieve(&query, k, RetrievalMode::Fused).unwrap();
        prop_assert_eq!(result.len(), k.min(texts.len()));
        prop_assert_eq!(result.fusion_applied, texts.len().min(2 * k) >= 2);
        if result.fusion_applied {
            let scores: Vec<f32> = result.candidates.iter().map(|c| c.combined_score.unwrap()).collect();
            for s in &scores {
                prop_assert!((-1e-6f32..=1.0 + 1e-6).contains(s), "combined score {} out of range", s);
            }
            for pair in scores.windows(2) {
                prop_assert!(pair[0] >= pair[1]);
            }
            prop_assert!(result.candidates.iter().all(|c| c.lexical_score.unwrap() >= 0.0));
        } else {
            prop_assert!(result.candidates.iter().all(|c| c.combined_score.is_none()));
        }
    }

    #[test]
    fn fused_results_come_from_the_baseline_pool(texts in prop::collection::vec(text(), 1..12), query in text(), k in 1usize..6) {
        let r = retriever(&texts);
        let pool = r.retrieve(&query, 2 * k, RetrievalMode::Baseline).unwrap();
        let fused = r.retrieve(&query, k, RetrievalMode::Fused).unwrap();
        let pool_ids: Vec<u64> = pool.candidates.iter().map(|c| c.record.id).collect();
        for c in &fused.candidates {
            prop_assert!(pool_ids.contains(&c.record.id));
        }
    }
}
