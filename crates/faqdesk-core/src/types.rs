use serde::{Deserialize, Serialize};

/// One known topic from the content index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexEntry {
    /// Stable identifier, unique, assigned at content-authoring time.
    /// Example: "faq.what.is.smsf".
    pub id: String,

    /// Display title. Falls back to `id` when the raw entry has none.
    pub title: String,

    /// Storage key of the backing document. Falls back through alternate
    /// field names, then to a path derived from `id`.
    pub key: String,

    /// Optional external reference link. Empty string when absent.
    pub url: String,

    /// Related topic ids, in authored order. May contain duplicates and
    /// self-references; those are filtered when suggestions are built.
    pub suggestions: Vec<String>,
}

/// Points a reader at the document an answer came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Citation {
    pub title: String,
    pub key: String,
    pub url: String,
}

/// One related topic offered alongside a resolved answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub id: String,
    pub title: String,
}

/// A fully resolved FAQ lookup: document body with its header stripped,
/// exactly one citation, and deduplicated related topics.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    pub answer: String,
    pub citation: Citation,
    pub suggestions: Vec<Suggestion>,
}
