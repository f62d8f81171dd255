use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Width of the hash chunks exchanged between peers.
pub const DEFAULT_HASH_WIDTH: usize = 12;

/// Characters that split a raw query into words.
pub const DEFAULT_SEPARATORS: &str = "' .,:/-&";

/// Number of hash characters kept when a query is written to the log.
/// Must stay below the hash width.
pub const DEFAULT_ANONYMIZE_PREFIX: usize = 3;

/// Upper bound for the hash width: a 256-bit digest renders to 43 base64 chars.
pub const MAX_HASH_WIDTH: usize = 43;

/// Parameters every node must agree on to produce identical tokens and hashes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryConfig {
    pub hash_width: usize,
    pub separators: String,
    pub anonymize_prefix: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            hash_width: DEFAULT_HASH_WIDTH,
            separators: DEFAULT_SEPARATORS.to_string(),
            anonymize_prefix: DEFAULT_ANONYMIZE_PREFIX,
        }
    }
}

impl QueryConfig {
    /// Check that the parameters describe a usable normalizer and codec.
    pub fn validate(&self) -> Result<()> {
        if self.hash_width == 0 || self.hash_width > MAX_HASH_WIDTH {
            return Err(QueryError::InvalidConfig(format!(
                "hash width {} outside 1..={}",
                self.hash_width, MAX_HASH_WIDTH
            )));
        }
        if self.separators.is_empty() {
            return Err(QueryError::InvalidConfig(
                "separator set is empty".to_string(),
            ));
        }
        if self.anonymize_prefix == 0 || self.anonymize_prefix >= self.hash_width {
            return Err(QueryError::InvalidConfig(format!(
                "anonymize prefix {} outside 1..{}",
                self.anonymize_prefix, self.hash_width
            )));
        }
        Ok(())
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::ser::into_writer(self, &mut buf)
            .map_err(|e| QueryError::Encoding(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize from CBOR bytes and validate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let config: Self =
            ciborium::de::from_reader(bytes).map_err(|e| QueryError::Encoding(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
