use std::collections::{HashMap, HashSet};

use log::info;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{FaqdeskError, Result};
use crate::store::ContentStore;
use crate::types::{IndexEntry, Suggestion};

/// The two accepted encodings of the raw index document: a list of entries
/// (bare, or wrapped under an `items` key) or a flat id-to-entry mapping.
/// Variant order matters: an object with a list-valued `items` key must be
/// read as the wrapped form, not as a mapping with an `items` topic.
///
/// Only the document shape is checked here. Entries are carried as loose
/// values so one junk element (an authoring comment, a placeholder) skips
/// that entry instead of refusing the whole index.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Items { items: Vec<Value> },
    Map(HashMap<String, Value>),
    List(Vec<Value>),
}

/// One index entry as authored, before normalization. Every field is
/// optional; alternate field names are carried separately so the fallback
/// order stays explicit.
#[derive(Debug)]
struct RawEntry {
    id: Option<String>,
    title: Option<String>,
    key: Option<String>,
    s3_key: Option<String>,
    path: Option<String>,
    url: Option<String>,
    link: Option<String>,
    suggestions: Option<Value>,
    followups: Option<Value>,
}

impl RawEntry {
    /// Reads one entry from a raw value. Non-object values yield `None`;
    /// numeric field values are stringified, since authored ids sometimes
    /// arrive as bare numbers.
    fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        Some(Self {
            id: field_string(fields, "id"),
            title: field_string(fields, "title"),
            key: field_string(fields, "key"),
            s3_key: field_string(fields, "s3_key"),
            path: field_string(fields, "path"),
            url: field_string(fields, "url"),
            link: field_string(fields, "link"),
            suggestions: fields.get("suggestions").cloned(),
            followups: fields.get("followups").cloned(),
        })
    }

    /// Normalizes one raw entry under a known id.
    ///
    /// `key` falls back through `s3_key` and `path` to `{prefix}{id}.md`;
    /// `title` falls back to the id; `url` falls back through `link` to
    /// empty; `suggestions` falls back through `followups` to empty, and
    /// non-string elements are dropped.
    fn normalize(self, id: String, prefix: &str) -> IndexEntry {
        let key = nonempty(self.key)
            .or_else(|| nonempty(self.s3_key))
            .or_else(|| nonempty(self.path))
            .unwrap_or_else(|| format!("{prefix}{id}.md"));
        let title = nonempty(self.title).unwrap_or_else(|| id.clone());
        let url = nonempty(self.url)
            .or_else(|| nonempty(self.link))
            .unwrap_or_default();
        let suggestions = string_list(self.suggestions)
            .or_else(|| string_list(self.followups))
            .unwrap_or_default();

        IndexEntry {
            id,
            title,
            key,
            url,
            suggestions,
        }
    }
}

fn nonempty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn field_string(fields: &Map<String, Value>, name: &str) -> Option<String> {
    match fields.get(name) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Accepts only a non-empty array, keeping its string elements. Anything
/// else (missing, wrong-shaped, empty) yields `None` so the next alternate
/// field name gets a chance.
fn string_list(value: Option<Value>) -> Option<Vec<String>> {
    match value {
        Some(Value::Array(items)) if !items.is_empty() => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

/// Immutable id-to-entry mapping, built once at startup from the raw index
/// document and shared read-only for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct FaqIndex {
    entries: HashMap<String, IndexEntry>,
}

impl FaqIndex {
    /// Fetches and parses the index document from the store.
    ///
    /// A document matching neither accepted shape is a fatal
    /// [`FaqdeskError::IndexShape`]; the caller is expected to refuse to
    /// start.
    pub async fn load(store: &dyn ContentStore, index_key: &str, prefix: &str) -> Result<Self> {
        let raw = store.fetch(index_key).await?;
        let index = Self::from_json(&raw, prefix)?;
        info!("index loaded: {} entries from {}", index.len(), index_key);
        Ok(index)
    }

    /// Parses and normalizes a raw index document.
    pub fn from_json(raw: &[u8], prefix: &str) -> Result<Self> {
        let parsed: RawIndex = serde_json::from_slice(raw)
            .map_err(|e| FaqdeskError::IndexShape(e.to_string()))?;

        let mut entries = HashMap::new();
        match parsed {
            RawIndex::Items { items } | RawIndex::List(items) => {
                for item in items {
                    let Some(raw) = RawEntry::from_value(&item) else {
                        continue;
                    };
                    // Entries without a usable id cannot be addressed; skip them.
                    let Some(id) = raw.id.clone().filter(|id| !id.is_empty()) else {
                        continue;
                    };
                    entries.insert(id.clone(), raw.normalize(id, prefix));
                }
            }
            RawIndex::Map(map) => {
                for (id, value) in map {
                    let Some(raw) = RawEntry::from_value(&value) else {
                        continue;
                    };
                    // The map key is authoritative; any inner id is ignored.
                    entries.insert(id.clone(), raw.normalize(id, prefix));
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, id: &str) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the suggestion list for a resolved entry: authored order,
    /// duplicates and the entry's own id skipped, ids missing from the
    /// index skipped.
    pub fn suggestions_for(&self, entry: &IndexEntry) -> Vec<Suggestion> {
        let mut seen: HashSet<&str> = HashSet::from([entry.id.as_str()]);
        let mut out = Vec::new();
        for sid in &entry.suggestions {
            if !seen.insert(sid.as_str()) {
                continue;
            }
            let Some(related) = self.entries.get(sid) else {
                continue;
            };
            out.push(Suggestion {
                id: related.id.clone(),
                title: related.title.clone(),
            });
        }
        out
    }
}
