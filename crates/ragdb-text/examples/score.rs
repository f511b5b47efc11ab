use std::env;

use ragdb_text::Bm25Scorer;

// Score a handful of passages against a query, treating them as the whole corpus.
// Usage:
//   cargo run -p ragdb-text --example score -- "your query" "passage one" "passage two" ...

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run -p ragdb-text --example score -- <query> <passage>...");
        std::process::exit(1);
    }
    let query = &args[0];
    let passages: Vec<&str> = args[1..].iter().map(String::as_str).collect();

    let scores = Bm25Scorer::new().score_documents(query, &passages)?;
    println!("Query: {}", query);
    for (i, (passage, score)) in passages.iter().zip(scores).enumerate() {
        println!("  {}. bm25={:.4}  {}", i + 1, score, passage);
    }
    Ok(())
}
