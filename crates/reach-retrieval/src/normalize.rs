use std::sync::LazyLock;

use regex::Regex;
use reach_core::PassageSet;

/// Bracketed section tags, fixed noise labels, and the mis-decoded checkbox glyph.
static NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[SECTION:.*?\]|TABLE OF CONTENTS|Introduction\]|Notes:|â¬œ|⬜")
        .expect("noise pattern is valid")
});
static REPEATED_PERIODS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s*\.+").expect("period pattern is valid"));
static REPEATED_LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r\n|\n|\r){2,}").expect("line break pattern is valid"));
static REPEATED_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

/// Acceptance rules applied after cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Cleaned passages shorter than this many characters are dropped.
    pub min_chars: usize,
    /// Structural markers whose presence after cleaning means the passage is mostly layout.
    pub residual_markers: Vec<String>,
    /// Boilerplate phrases that carry no topic-specific information.
    pub skip_phrases: Vec<String>,
}

impl NormalizerConfig {
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    pub fn with_skip_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_residual_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.residual_markers = markers.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_chars: 100,
            residual_markers: vec!["SECTION".to_string(), "Contents".to_string()],
            skip_phrases: [
                "Caregiver Notebook will serve",
                "Your Notebook in an easy to find spot",
                "health care providers",
                "doctor's visit",
                "TABLE OF CONTENTS",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Strips markup noise from raw passage text and rejects passages with no usable content.
#[derive(Debug, Clone, Default)]
pub struct PassageNormalizer {
    config: NormalizerConfig,
}

impl PassageNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Apply the cleaning passes in order. The order matters: the later passes
    /// collapse whatever gaps the earlier removals leave behind.
    pub fn clean(&self, raw: &str) -> String {
        let text = NOISE.replace_all(raw, "");
        let text = REPEATED_PERIODS.replace_all(&text, ".");
        let text = REPEATED_LINE_BREAKS.replace_all(&text, "\n");
        let text = REPEATED_WHITESPACE.replace_all(&text, " ");
        text.trim().to_string()
    }

    /// Whether an already cleaned text is worth keeping.
    pub fn accepts(&self, cleaned: &str) -> bool {
        if cleaned.chars().count() < self.config.min_chars {
            return false;
        }
        if self
            .config
            .residual_markers
            .iter()
            .any(|m| cleaned.contains(m.as_str()))
        {
            return false;
        }
        !self
            .config
            .skip_phrases
            .iter()
            .any(|p| cleaned.contains(p.as_str()))
    }

    /// Clean `raw`, returning `None` when the result is rejected.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let cleaned = self.clean(raw);
        self.accepts(&cleaned).then_some(cleaned)
    }

    /// Replace each passage's text with its cleaned form and silently drop rejected ones.
    /// Relative order is preserved.
    pub fn normalize_passages(&self, passages: PassageSet) -> PassageSet {
        passages
            .into_iter()
            .filter_map(|mut passage| {
                let cleaned = self.normalize(&passage.text)?;
                passage.text = cleaned;
                Some(passage)
            })
            .collect()
    }
}
