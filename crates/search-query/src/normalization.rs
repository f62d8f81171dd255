use std::collections::BTreeSet;

use crate::config::QueryConfig;
use crate::error::Result;
use crate::folding::{CharFolding, LatinFolding};

/// Turns raw query text into the canonical word set shared by all peers.
#[derive(Clone, Debug)]
pub struct Normalizer<F: CharFolding = LatinFolding> {
    separators: Vec<char>,
    folding: F,
}

impl Normalizer<LatinFolding> {
    pub fn new(config: &QueryConfig) -> Result<Self> {
        Self::with_folding(config, LatinFolding)
    }
}

impl Default for Normalizer<LatinFolding> {
    fn default() -> Self {
        let config = QueryConfig::default();
        Self {
            separators: config.separators.chars().collect(),
            folding: LatinFolding,
        }
    }
}

impl<F: CharFolding> Normalizer<F> {
    /// Build a normalizer with a caller-supplied transliteration table.
    pub fn with_folding(config: &QueryConfig, folding: F) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            separators: config.separators.chars().collect(),
            folding,
        })
    }

    /// Normalize raw text: fold letters, blank out every separator, trim,
    /// lowercase, split on whitespace. The result is deduplicated and sorted
    /// by codepoint, so the same words in any order give the same set.
    pub fn normalize(&self, raw: &str) -> BTreeSet<String> {
        let folded = self.folding.fold(raw);
        // Blank separators before lowercasing: final sigma depends on the word boundary.
        let spaced: String = folded
            .chars()
            .map(|c| if self.is_separator(c) { ' ' } else { c })
            .collect();
        let lower = spaced.trim().to_lowercase();

        let words: BTreeSet<String> = lower.split_whitespace().map(str::to_string).collect();
        tracing::debug!(
            "normalized {} chars into {} query words",
            raw.chars().count(),
            words.len()
        );
        words
    }

    /// Canonical words joined by a single space.
    pub fn normalize_to_query_string(&self, raw: &str) -> String {
        let words: Vec<String> = self.normalize(raw).into_iter().collect();
        words.join(" ")
    }

    pub fn is_separator(&self, c: char) -> bool {
        self.separators.contains(&c)
    }
}
