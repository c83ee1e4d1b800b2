//! SQL rendering for batch results.
//!
//! Pure formatting with no I/O: a batch becomes one `INSERT` statement.
//! The only sanitization performed is doubling embedded single quotes in
//! labels; this is NOT a substitute for parameterized persistence in any
//! real deployment.

use crate::SourceEmbedding;

/// Render a batch as a single
/// `INSERT INTO images (path, embedding) VALUES (...), (...);`
/// statement, one tuple per item in batch order. Embedding vectors are
/// rendered as their bracketed textual sequence. An empty batch renders
/// as the empty string.
pub fn render_insert(results: &[SourceEmbedding]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let tuples: Vec<String> = results
        .iter()
        .map(|item| {
            let path = item.label.replace('\'', "''");
            let values: Vec<String> = item
                .embedding
                .vector
                .iter()
                .map(|v| v.to_string())
                .collect();
            format!("('{path}', '[{}]')", values.join(", "))
        })
        .collect();

    format!(
        "INSERT INTO images (path, embedding) VALUES {};",
        tuples.join(", ")
    )
}
