mod adaptive;
mod dedup;
mod in_memory;
mod normalize;
mod vector;

pub use adaptive::{AdaptiveRetriever, RetrieverConfig};
pub use dedup::Deduplicator;
pub use in_memory::InMemorySearch;
pub use normalize::{NormalizerConfig, PassageNormalizer};
pub use vector::VectorSearch;

pub use reach_core::{Passage, PassageSet, SimilaritySearch};
