use std::collections::BTreeSet;
use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::{QueryConfig, DEFAULT_ANONYMIZE_PREFIX, DEFAULT_HASH_WIDTH};
use crate::error::{QueryError, Result};

/// Appended to every hash prefix in log output.
pub const ANONYMIZED_SUFFIX: &str = ".........";

/// Deterministic word digest; every node must return the same bytes for the same word.
pub trait WordDigest {
    fn digest(&self, word: &str) -> [u8; 32];
}

/// sha256(word)
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Digest;

impl WordDigest for Sha256Digest {
    fn digest(&self, word: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(word.as_bytes());
        hasher.finalize().into()
    }
}

/// A word hash of exactly the configured width, drawn from the URL-safe base64 alphabet.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixedHash(String);

impl FixedHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of chars in the hash.
    pub fn width(&self) -> usize {
        self.0.chars().count()
    }

    /// The first `len` chars, or the whole hash when it is shorter.
    pub fn prefix(&self, len: usize) -> &str {
        match self.0.char_indices().nth(len) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for FixedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts words to fixed-width hashes and hash sets to and from their
/// flat wire form (hash chunks concatenated without a delimiter).
#[derive(Clone, Debug)]
pub struct HashCodec<D: WordDigest = Sha256Digest> {
    width: usize,
    log_prefix: usize,
    digest: D,
}

impl HashCodec<Sha256Digest> {
    pub fn new(config: &QueryConfig) -> Result<Self> {
        Self::with_digest(config, Sha256Digest)
    }
}

impl Default for HashCodec<Sha256Digest> {
    fn default() -> Self {
        Self {
            width: DEFAULT_HASH_WIDTH,
            log_prefix: DEFAULT_ANONYMIZE_PREFIX,
            digest: Sha256Digest,
        }
    }
}

impl<D: WordDigest> HashCodec<D> {
    pub fn with_digest(config: &QueryConfig, digest: D) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            width: config.hash_width,
            log_prefix: config.anonymize_prefix,
            digest,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Hash one word: base64 of its digest, cut to the codec width.
    pub fn hash_word(&self, word: &str) -> FixedHash {
        let encoded = URL_SAFE_NO_PAD.encode(self.digest.digest(word));
        FixedHash(encoded[..self.width].to_string())
    }

    /// Hash every word. Distinct words sharing a hash collapse into one entry.
    pub fn tokens_to_hashes(&self, words: &BTreeSet<String>) -> BTreeSet<FixedHash> {
        words.iter().map(|w| self.hash_word(w)).collect()
    }

    /// Split a flat hash string into its fixed-width chunks.
    /// An empty string decodes to the empty set.
    pub fn decode(&self, flat: &str) -> Result<BTreeSet<FixedHash>> {
        let chars: Vec<char> = flat.chars().collect();
        if chars.len() % self.width != 0 {
            tracing::warn!(
                "rejecting hash string of {} chars, width is {}",
                chars.len(),
                self.width
            );
            return Err(QueryError::MalformedHashString {
                len: chars.len(),
                width: self.width,
            });
        }
        Ok(chars
            .chunks(self.width)
            .map(|chunk| FixedHash(chunk.iter().collect()))
            .collect())
    }

    /// Concatenate hashes in iteration order. Passing a `BTreeSet` yields the
    /// canonical (sorted) form that every peer reproduces.
    pub fn encode<'a, I>(&self, hashes: I) -> String
    where
        I: IntoIterator<Item = &'a FixedHash>,
    {
        encode_hashes(hashes)
    }

    /// Render hashes for logging: `[abc........., xyz.........]`.
    /// Only the configured prefix of each hash is shown, which is always
    /// shorter than the hash itself.
    pub fn anonymize<'a, I>(&self, hashes: I) -> String
    where
        I: IntoIterator<Item = &'a FixedHash>,
    {
        let parts: Vec<String> = hashes
            .into_iter()
            .map(|h| format!("{}{}", h.prefix(self.log_prefix), ANONYMIZED_SUFFIX))
            .collect();
        format!("[{}]", parts.join(", "))
    }

    /// Accept a hash received from elsewhere if it has this codec's width.
    pub fn check(&self, hash: &FixedHash) -> Result<()> {
        let len = hash.width();
        if len != self.width {
            return Err(QueryError::MalformedHashString {
                len,
                width: self.width,
            });
        }
        Ok(())
    }
}

/// Concatenate hashes in iteration order, without a delimiter.
pub fn encode_hashes<'a, I>(hashes: I) -> String
where
    I: IntoIterator<Item = &'a FixedHash>,
{
    let mut flat = String::new();
    for hash in hashes {
        flat.push_str(hash.as_str());
    }
    flat
}
