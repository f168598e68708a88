use std::sync::Arc;
use std::time::Instant;

use reach_cache::TtlCache;
use reach_core::{PassageSet, SimilaritySearch};
use tracing::{debug, error, info, warn};

use crate::{Deduplicator, PassageNormalizer};

/// Search sizing and the expansion fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrieverConfig {
    /// Passages requested from the backend per search call.
    pub top_k: usize,
    /// Below this many clean passages the query is expanded and searched again.
    pub min_docs: usize,
    /// Appended verbatim to the query to steer the second search toward the service domain.
    pub expansion_suffix: String,
}

impl RetrieverConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_min_docs(mut self, min_docs: usize) -> Self {
        self.min_docs = min_docs;
        self
    }

    pub fn with_expansion_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.expansion_suffix = suffix.into();
        self
    }
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            min_docs: 4,
            expansion_suffix: " dementia symptoms management".to_string(),
        }
    }
}

/// Wraps a raw [`SimilaritySearch`] with cleaning, deduplication, a minimum-count
/// threshold with one expanded retry, and a TTL cache of final results.
///
/// `retrieve` never fails: a backend error is logged and yields an empty (or, when
/// only the expansion failed, partial) set. Failed lookups are not cached.
pub struct AdaptiveRetriever {
    search: Arc<dyn SimilaritySearch>,
    cache: Arc<TtlCache<PassageSet>>,
    normalizer: PassageNormalizer,
    deduplicator: Deduplicator,
    config: RetrieverConfig,
}

impl AdaptiveRetriever {
    pub fn new(
        search: Arc<dyn SimilaritySearch>,
        cache: Arc<TtlCache<PassageSet>>,
        config: RetrieverConfig,
    ) -> Self {
        Self {
            search,
            cache,
            normalizer: PassageNormalizer::default(),
            deduplicator: Deduplicator::default(),
            config,
        }
    }

    pub fn with_normalizer(mut self, normalizer: PassageNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_deduplicator(mut self, deduplicator: Deduplicator) -> Self {
        self.deduplicator = deduplicator;
        self
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<TtlCache<PassageSet>> {
        &self.cache
    }

    pub fn cache_key(query: &str) -> String {
        format!("retrieval:{query}")
    }

    pub fn expanded_query(&self, query: &str) -> String {
        format!("{query}{}", self.config.expansion_suffix)
    }

    fn clean(&self, raw: PassageSet) -> PassageSet {
        self.deduplicator.dedup(self.normalizer.normalize_passages(raw))
    }

    pub async fn retrieve(&self, query: &str) -> PassageSet {
        let key = Self::cache_key(query);
        if let Some(cached) = self.cache.get(&key).await {
            info!(query, count = cached.len(), "retrieval cache hit");
            return cached;
        }
        info!(query, "retrieval cache miss");

        let started = Instant::now();
        let raw = match self.search.search(query, self.config.top_k).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(query, error = %e, "similarity search failed, continuing without passages");
                return PassageSet::new();
            }
        };
        debug!(query, raw = raw.len(), "primary search returned");

        let primary = self.clean(raw);
        debug!(query, kept = primary.len(), "primary passages after cleaning");

        let mut complete = true;
        let result = if primary.len() < self.config.min_docs {
            let expanded = self.expanded_query(query);
            info!(
                query,
                count = primary.len(),
                threshold = self.config.min_docs,
                expanded = %expanded,
                "insufficient passages, searching with expanded query"
            );
            match self.search.search(&expanded, self.config.top_k).await {
                Ok(raw) => {
                    debug!(query = %expanded, raw = raw.len(), "expanded search returned");
                    let extra = self.clean(raw);
                    self.deduplicator.merge(primary, extra)
                }
                Err(e) => {
                    warn!(
                        query = %expanded,
                        error = %e,
                        "expanded search failed, keeping primary passages"
                    );
                    complete = false;
                    primary
                }
            }
        } else {
            primary
        };

        if result.len() < self.config.min_docs {
            warn!(
                query,
                count = result.len(),
                threshold = self.config.min_docs,
                "low passage count after expansion"
            );
        }

        if complete {
            self.cache.set(key, result.clone()).await;
        }
        info!(
            query,
            count = result.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "retrieved and processed passages"
        );
        result
    }
}
