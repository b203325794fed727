//! Demonstrates plucking the `results` array out of a paginated API
//! response while it streams in, reacting to each record **before** the
//! full payload has arrived.
//!
//! The wrapper document looks roughly as follows (abridged):
//!
//! ```text
//! {
//!   "total":   number,
//!   "results": [ { "id": number, "name": string }, ... ],
//!   "next":    string | null
//! }
//! ```
//!
//! The example streams a *single* JSON document but feeds it to the
//! extractor in small, irregular chunks to mirror how an HTTP body shows up
//! from the network. Each record is printed the moment its closing boundary
//! arrives; once the stream ends, the reconstructed wrapper (with `results`
//! emptied) is printed too, so pagination metadata like `next` stays
//! available without ever holding the full array in memory.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonpluck --example paginated_results
//! ```

use jsonpluck::{ArrayExtractor, ExtractorOptions, Item};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A toy response streamed in eight tiny chunks. In real life these would
    // come from the network.
    let simulated_stream: [&[u8]; 8] = [
        br#"{"total":3,"#,
        br#""results":[{"id":1,"#,
        br#""name":"ant"},"#,
        br#"{"id":2,"name":"bee"#,
        br#""},{"id":3,"#,
        br#""name":"cicada"}"#,
        br#"],"next":"#,
        br#""page-2"}"#,
    ];

    let mut extractor = ArrayExtractor::new(ExtractorOptions {
        target_path: "results".into(),
        retain_remainder: true,
        ..ExtractorOptions::default()
    })?;

    for chunk in simulated_stream {
        for item in extractor.feed(chunk)? {
            if let Item::Parsed(record) = item {
                println!("record arrived: {record}");
            }
        }
    }

    if let Some(Item::Parsed(wrapper)) = extractor.finish()? {
        println!("wrapper without results: {wrapper}");
    }

    Ok(())
}
