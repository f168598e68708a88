//! Reach: adaptive retrieval augmentation with TTL caching.
//!
//! This crate re-exports the Reach sub-crates for single-import usage.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `default` | `cache`, `retrieval`, `generation` |
//! | `model-utils` | `ProviderBackend`, `ScriptedChatModel`, `RetryChatModel` |
//! | `openai` | OpenAI chat model and embeddings |
//! | `pinecone` | Pinecone vector store |
//! | `full` | All features enabled |
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use reach::cache::{CacheConfig, TtlCache};
//! use reach::generation::{GenerationTask, Generator};
//! use reach::retrieval::{AdaptiveRetriever, RetrieverConfig};
//! ```

/// Passages, messages, `ReachError` and the capability traits. Always available.
pub use reach_core as core;

/// TTL cache, injectable clock and background sweeper.
#[cfg(feature = "cache")]
pub use reach_cache as cache;

/// Provider HTTP backend, scripted test model and retry wrapper.
#[cfg(feature = "model-utils")]
pub use reach_models as models;

#[cfg(feature = "openai")]
pub use reach_openai as openai;

#[cfg(feature = "pinecone")]
pub use reach_pinecone as pinecone;

/// Passage normalizer, deduplicator, adaptive retriever and search adapters.
#[cfg(feature = "retrieval")]
pub use reach_retrieval as retrieval;

/// QA and topic-slide generation over the retriever.
#[cfg(feature = "generation")]
pub use reach_generation as generation;
