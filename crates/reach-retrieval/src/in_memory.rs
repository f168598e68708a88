use std::collections::HashSet;

use async_trait::async_trait;
use reach_core::{Passage, PassageSet, ReachError, SimilaritySearch};

/// A search backend over a fixed passage list, ranked by shared query terms.
///
/// Useful for tests and for running the service without a vector index.
#[derive(Debug, Clone, Default)]
pub struct InMemorySearch {
    passages: Vec<Passage>,
}

impl InMemorySearch {
    pub fn new(passages: Vec<Passage>) -> Self {
        Self { passages }
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

#[async_trait]
impl SimilaritySearch for InMemorySearch {
    async fn search(&self, query: &str, top_k: usize) -> Result<PassageSet, ReachError> {
        let query_terms = tokenize(query);
        let mut scored: Vec<(usize, &Passage)> = self
            .passages
            .iter()
            .map(|p| (query_terms.intersection(&tokenize(&p.text)).count(), p))
            .collect();

        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(scored
            .into_iter()
            .filter(|(score, _)| *score > 0)
            .take(top_k)
            .map(|(_, p)| p.clone())
            .collect())
    }
}

fn tokenize(input: &str) -> HashSet<String> {
    input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}
