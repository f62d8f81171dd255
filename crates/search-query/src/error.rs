use thiserror::Error;

/// Errors raised while building, decoding or configuring a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("hash string length {len} is not a multiple of the hash width {width}")]
    MalformedHashString { len: usize, width: usize },

    #[error("{operation} requires a term set, but the query was built from hashes")]
    MissingTermSet { operation: &'static str },

    #[error("decoded hash does not match the digest of its word")]
    HashMismatch,

    #[error("invalid query configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid constraint pattern: {0:?}")]
    InvalidConstraint(String),

    #[error("CBOR encoding error: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
