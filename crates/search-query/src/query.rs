use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::hashing::{encode_hashes, FixedHash, HashCodec, WordDigest};
use crate::types::{Constraint, ContentDomain, SearchScope};

pub const DEFAULT_WANTED_RESULTS: usize = 10;
pub const DEFAULT_MAXIMUM_TIME_MS: u64 = 3000;
pub const DEFAULT_URL_MASK: &str = ".*";

/// Query words and their hashes. A word query owns each word together with its
/// hash, so removing a word removes its hash as well.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
enum QueryKeys {
    Words(BTreeMap<String, FixedHash>),
    Hashes(BTreeSet<FixedHash>),
}

/// A search request as handed to the retrieval engine.
///
/// Built once through [`QueryBuilder`]; afterwards only [`Query::filter_out`]
/// mutates it. All fields are owned std collections, so a `Query` can be shared
/// across worker threads for reading.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Query {
    keys: QueryKeys,
    max_distance: i32,
    prefer: String,
    content_domain: ContentDomain,
    wanted_results: usize,
    maximum_time_ms: u64,
    url_mask: String,
    scope: Option<SearchScope>,
    group_name: Option<String>,
    max_targets: Option<u32>,
    constraint: Constraint,
}

impl Query {
    /// Number of distinct query hashes.
    pub fn size(&self) -> usize {
        match &self.keys {
            QueryKeys::Words(words) => words.values().collect::<BTreeSet<_>>().len(),
            QueryKeys::Hashes(hashes) => hashes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Whether the query still knows its words (false for hash-only queries).
    pub fn has_terms(&self) -> bool {
        matches!(self.keys, QueryKeys::Words(_))
    }

    /// The words in codepoint order, `None` for a hash-only query.
    pub fn terms(&self) -> Option<BTreeSet<&str>> {
        match &self.keys {
            QueryKeys::Words(words) => Some(words.keys().map(String::as_str).collect()),
            QueryKeys::Hashes(_) => None,
        }
    }

    /// Hashes of the current words, or the pre-resolved hash set.
    pub fn hashes(&self) -> BTreeSet<FixedHash> {
        match &self.keys {
            QueryKeys::Words(words) => words.values().cloned().collect(),
            QueryKeys::Hashes(hashes) => hashes.clone(),
        }
    }

    /// Words joined by `separator` in codepoint order; empty for a hash-only query.
    pub fn join_terms(&self, separator: &str) -> String {
        match &self.keys {
            QueryKeys::Words(words) => {
                let parts: Vec<&str> = words.keys().map(String::as_str).collect();
                parts.join(separator)
            }
            QueryKeys::Hashes(_) => String::new(),
        }
    }

    /// Drop every word found in `stop_words`, together with its hash.
    pub fn filter_out(&mut self, stop_words: &BTreeSet<String>) -> Result<()> {
        match &mut self.keys {
            QueryKeys::Words(words) => {
                let before = words.len();
                words.retain(|word, _| !stop_words.contains(word));
                tracing::debug!("filtered {} stop words from query", before - words.len());
                Ok(())
            }
            QueryKeys::Hashes(_) => Err(QueryError::MissingTermSet {
                operation: "filter_out",
            }),
        }
    }

    /// Flat wire form of the hash set, in canonical order.
    pub fn hash_string(&self) -> String {
        encode_hashes(&self.hashes())
    }

    /// Hash set rendered for logs through the codec's anonymization.
    pub fn anonymized<D: WordDigest>(&self, codec: &HashCodec<D>) -> String {
        codec.anonymize(&self.hashes())
    }

    pub fn max_distance(&self) -> i32 {
        self.max_distance
    }

    /// Proximity scoring is off for a non-positive distance.
    pub fn uses_proximity(&self) -> bool {
        self.max_distance > 0
    }

    pub fn prefer(&self) -> &str {
        &self.prefer
    }

    pub fn content_domain(&self) -> ContentDomain {
        self.content_domain
    }

    pub fn wanted_results(&self) -> usize {
        self.wanted_results
    }

    pub fn maximum_time_ms(&self) -> u64 {
        self.maximum_time_ms
    }

    pub fn url_mask(&self) -> &str {
        &self.url_mask
    }

    /// `None` when the scope was decided upstream (hash-only query).
    pub fn scope(&self) -> Option<SearchScope> {
        self.scope
    }

    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    pub fn max_targets(&self) -> Option<u32> {
        self.max_targets
    }

    /// Group name and target cap, only when the scope is a group scope.
    pub fn peer_group(&self) -> Option<(&str, Option<u32>)> {
        match (self.scope, self.group_name.as_deref()) {
            (Some(scope), Some(name)) if scope.is_group() => Some((name, self.max_targets)),
            _ => None,
        }
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::ser::into_writer(self, &mut buf)
            .map_err(|e| QueryError::Encoding(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize from CBOR bytes. A decoded query must satisfy the same rules
    /// as a built one: every word carries `codec.hash_word(word)`, pre-resolved
    /// hashes have the codec width, and a hash-only query has no scope.
    pub fn from_bytes<D: WordDigest>(bytes: &[u8], codec: &HashCodec<D>) -> Result<Self> {
        let query: Query =
            ciborium::de::from_reader(bytes).map_err(|e| QueryError::Encoding(e.to_string()))?;
        query.check_scope()?;
        match &query.keys {
            QueryKeys::Words(words) => {
                for (word, hash) in words {
                    if *hash != codec.hash_word(word) {
                        tracing::warn!(
                            "rejecting decoded query: hash {} does not match its word",
                            codec.anonymize([hash])
                        );
                        return Err(QueryError::HashMismatch);
                    }
                }
            }
            QueryKeys::Hashes(hashes) => {
                for hash in hashes {
                    codec.check(hash)?;
                }
            }
        }
        Ok(query)
    }

    fn check_scope(&self) -> Result<()> {
        let scoped =
            self.scope.is_some() || self.group_name.is_some() || self.max_targets.is_some();
        if scoped && !self.has_terms() {
            return Err(QueryError::MissingTermSet { operation: "scope" });
        }
        Ok(())
    }
}

/// Collects the parameters of a [`Query`].
#[derive(Clone, Debug)]
pub struct QueryBuilder {
    keys: QueryKeys,
    max_distance: i32,
    prefer: String,
    content_domain: ContentDomain,
    wanted_results: usize,
    maximum_time_ms: u64,
    url_mask: String,
    scope: Option<SearchScope>,
    group_name: Option<String>,
    max_targets: Option<u32>,
    constraint: Constraint,
}

impl QueryBuilder {
    /// Start from normalized words; each word is hashed with `codec`.
    pub fn from_words<D: WordDigest>(words: BTreeSet<String>, codec: &HashCodec<D>) -> Self {
        let keyed = words
            .into_iter()
            .map(|w| {
                let hash = codec.hash_word(&w);
                (w, hash)
            })
            .collect();
        Self::with_keys(QueryKeys::Words(keyed))
    }

    /// Start from hashes resolved upstream. Such a query carries no scope.
    pub fn from_hashes(hashes: BTreeSet<FixedHash>) -> Self {
        Self::with_keys(QueryKeys::Hashes(hashes))
    }

    fn with_keys(keys: QueryKeys) -> Self {
        Self {
            keys,
            max_distance: 0,
            prefer: String::new(),
            content_domain: ContentDomain::default(),
            wanted_results: DEFAULT_WANTED_RESULTS,
            maximum_time_ms: DEFAULT_MAXIMUM_TIME_MS,
            url_mask: DEFAULT_URL_MASK.to_string(),
            scope: None,
            group_name: None,
            max_targets: None,
            constraint: Constraint::CATCH_ALL,
        }
    }

    pub fn max_distance(mut self, max_distance: i32) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn prefer(mut self, prefer: impl Into<String>) -> Self {
        self.prefer = prefer.into();
        self
    }

    pub fn content_domain(mut self, content_domain: ContentDomain) -> Self {
        self.content_domain = content_domain;
        self
    }

    pub fn wanted_results(mut self, wanted_results: usize) -> Self {
        self.wanted_results = wanted_results;
        self
    }

    pub fn maximum_time_ms(mut self, maximum_time_ms: u64) -> Self {
        self.maximum_time_ms = maximum_time_ms;
        self
    }

    pub fn url_mask(mut self, url_mask: impl Into<String>) -> Self {
        self.url_mask = url_mask.into();
        self
    }

    pub fn scope(mut self, scope: SearchScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Peer group to target; only read for group scopes.
    pub fn peer_group(mut self, name: impl Into<String>, max_targets: u32) -> Self {
        self.group_name = Some(name.into());
        self.max_targets = Some(max_targets);
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = constraint;
        self
    }

    /// Finish the query. Scope parameters on a hash-only query are rejected.
    pub fn build(self) -> Result<Query> {
        let query = Query {
            keys: self.keys,
            max_distance: self.max_distance,
            prefer: self.prefer,
            content_domain: self.content_domain,
            wanted_results: self.wanted_results,
            maximum_time_ms: self.maximum_time_ms,
            url_mask: self.url_mask,
            scope: self.scope,
            group_name: self.group_name,
            max_targets: self.max_targets,
            constraint: self.constraint,
        };
        query.check_scope()?;
        tracing::debug!(
            "built query: {} hashes, scope={:?}, domain={}, constraint={}",
            query.size(),
            query.scope,
            query.content_domain.label(),
            query.constraint
        );
        Ok(query)
    }
}
