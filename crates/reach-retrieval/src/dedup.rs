use std::collections::HashSet;

use reach_core::PassageSet;

/// Drops passages whose lowercase text prefix was already seen earlier in the same pass.
///
/// Two passages that share the first `signature_chars` characters are treated as
/// duplicates even if they diverge later. The first occurrence wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deduplicator {
    signature_chars: usize,
}

impl Deduplicator {
    pub fn new(signature_chars: usize) -> Self {
        Self { signature_chars }
    }

    pub fn signature_chars(&self) -> usize {
        self.signature_chars
    }

    pub fn signature(&self, text: &str) -> String {
        text.chars()
            .take(self.signature_chars)
            .collect::<String>()
            .to_lowercase()
    }

    pub fn dedup(&self, passages: PassageSet) -> PassageSet {
        let mut seen = HashSet::with_capacity(passages.len());
        passages
            .into_iter()
            .filter(|p| seen.insert(self.signature(&p.text)))
            .collect()
    }

    /// Concatenate `primary` then `secondary` and deduplicate, so primary passages come first.
    pub fn merge(&self, primary: PassageSet, secondary: PassageSet) -> PassageSet {
        let mut all = primary;
        all.extend(secondary);
        self.dedup(all)
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(150)
    }
}
