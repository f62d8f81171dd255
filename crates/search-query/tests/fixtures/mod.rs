use std::collections::BTreeSet;

use search_query::hashing::WordDigest;
use search_query::{HashCodec, QueryConfig};

/// Digest that maps every word to the same bytes, to force hash collisions.
#[allow(dead_code)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantDigest;

impl WordDigest for ConstantDigest {
    fn digest(&self, _word: &str) -> [u8; 32] {
        [7u8; 32]
    }
}

/// Build an ordered word set from string literals.
#[allow(dead_code)]
pub fn words(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|w| w.to_string()).collect()
}

/// Codec with the default width of 12.
#[allow(dead_code)]
pub fn codec() -> HashCodec {
    HashCodec::new(&QueryConfig::default()).unwrap()
}

/// Codec with a custom width (at least 2) and a one-char log prefix.
#[allow(dead_code)]
pub fn codec_with_width(width: usize) -> HashCodec {
    let config = QueryConfig {
        hash_width: width,
        anonymize_prefix: 1,
        ..QueryConfig::default()
    };
    HashCodec::new(&config).unwrap()
}
