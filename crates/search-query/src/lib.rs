//! Search query representation for a distributed full-text search network.
//!
//! Raw query text is normalized into a canonical word set, each word is hashed
//! to a fixed-width identity hash, and the result is bundled with scope, content
//! and constraint parameters into an immutable [`query::Query`]. Word sets and
//! hash sets are always kept in codepoint order so every peer serializes the same
//! query identically; flat hash strings and CBOR are the wire forms.

pub mod config;
pub mod error;
pub mod folding;
pub mod hashing;
pub mod normalization;
pub mod query;
pub mod stopwords;
pub mod types;

pub use config::QueryConfig;
pub use error::{QueryError, Result};
pub use hashing::{FixedHash, HashCodec};
pub use normalization::Normalizer;
pub use query::{Query, QueryBuilder};
pub use types::{Constraint, ConstraintFlag, ContentDomain, SearchScope};
