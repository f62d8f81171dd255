use std::collections::BTreeSet;

/// English words that carry no weight as query terms.
pub const ENGLISH: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// The English list as a stop set for `Query::filter_out`.
pub fn english() -> BTreeSet<String> {
    ENGLISH.iter().map(|w| w.to_string()).collect()
}

pub fn is_stop_word(word: &str) -> bool {
    ENGLISH.contains(&word)
}
