use serde::{Deserialize, Serialize};

/// Embedding output: an ordered sequence of f32 values plus metadata about
/// how it was produced. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageEmbedding {
    /// Final embedding values, L2-normalized by the compute layer.
    pub vector: Vec<f32>,
    /// Name of the model that produced the vector.
    pub model_name: String,
    /// Dimension of `vector`.
    pub embedding_dim: usize,
    /// Whether [`vector`](Self::vector) was L2-normalized.
    pub normalized: bool,
}
