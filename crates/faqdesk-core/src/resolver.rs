use std::sync::Arc;

use log::debug;

use crate::error::Result;
use crate::frontmatter::strip_front_matter;
use crate::index::FaqIndex;
use crate::store::ContentStore;
use crate::types::{Citation, ResolvedEntry};

/// Resolves FAQ ids against the index and the content store.
pub struct EntryResolver<S: ContentStore + ?Sized> {
    index: Arc<FaqIndex>,
    store: Arc<S>,
}

impl<S: ContentStore + ?Sized> EntryResolver<S> {
    pub fn new(index: Arc<FaqIndex>, store: Arc<S>) -> Self {
        Self { index, store }
    }

    /// Resolves one id to its document body, citation, and related topics.
    ///
    /// `Ok(None)` means the id is not in the index, a legitimate negative
    /// result. `Err` means the index knows the id but the backing document
    /// could not be read; callers render that as a degraded answer, never
    /// as a transport fault.
    pub async fn resolve(&self, id: &str) -> Result<Option<ResolvedEntry>> {
        let Some(entry) = self.index.get(id) else {
            return Ok(None);
        };

        let raw = self.store.fetch(&entry.key).await?;
        let text = decode_text(raw);
        let answer = strip_front_matter(&text).to_string();
        let suggestions = self.index.suggestions_for(entry);
        let citation = Citation {
            title: entry.title.clone(),
            key: entry.key.clone(),
            url: entry.url.clone(),
        };
        debug!("resolved {id} from {}", entry.key);

        Ok(Some(ResolvedEntry {
            answer,
            citation,
            suggestions,
        }))
    }
}

/// Decodes document bytes as UTF-8, substituting replacement characters
/// for invalid sequences rather than failing.
fn decode_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::error::FaqdeskError;

    struct MapStore {
        documents: HashMap<String, Vec<u8>>,
        fail: bool,
    }

    impl MapStore {
        fn new(documents: &[(&str, &[u8])]) -> Self {
            Self {
                documents: documents
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_vec()))
                    .collect(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                documents: HashMap::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl ContentStore for MapStore {
        async fn fetch(&self, key: &str) -> Result<Vec<u8>> {
            if self.fail {
                return Err(FaqdeskError::StoreRead {
                    key: key.to_string(),
                    reason: "wire unplugged".to_string(),
                });
            }
            self.documents
                .get(key)
                .cloned()
                .ok_or_else(|| FaqdeskError::DocumentNotFound(key.to_string()))
        }
    }

    fn index() -> Arc<FaqIndex> {
        let raw = r#"{
            "faq.what.is.smsf": {
                "title": "What is an SMSF?",
                "key": "faq/what-is-smsf.md",
                "suggestions": ["faq.what.is.smsf", "faq.setup.costs", "faq.setup.costs", "faq.unknown"]
            },
            "faq.setup.costs": {"title": "Setup costs"}
        }"#;
        Arc::new(FaqIndex::from_json(raw.as_bytes(), "faq/").unwrap())
    }

    #[tokio::test]
    async fn resolves_a_known_id() {
        let store = Arc::new(MapStore::new(&[(
            "faq/what-is-smsf.md",
            b"---\ntitle: What is an SMSF?\n---\nA private super fund.".as_slice(),
        )]));
        let resolver = EntryResolver::new(index(), store);

        let resolved = resolver.resolve("faq.what.is.smsf").await.unwrap().unwrap();
        assert_eq!(resolved.answer, "A private super fund.");
        assert_eq!(resolved.citation.key, "faq/what-is-smsf.md");
        assert_eq!(resolved.citation.title, "What is an SMSF?");
        assert_eq!(resolved.suggestions.len(), 1);
        assert_eq!(resolved.suggestions[0].id, "faq.setup.costs");
    }

    #[tokio::test]
    async fn unknown_id_is_a_negative_result_not_an_error() {
        let resolver = EntryResolver::new(index(), Arc::new(MapStore::new(&[])));
        assert!(resolver.resolve("faq.nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_an_error() {
        let resolver = EntryResolver::new(index(), Arc::new(MapStore::failing()));
        let err = resolver.resolve("faq.what.is.smsf").await.unwrap_err();
        assert!(matches!(err, FaqdeskError::StoreRead { .. }));
    }

    #[tokio::test]
    async fn missing_document_surfaces_as_an_error() {
        let resolver = EntryResolver::new(index(), Arc::new(MapStore::new(&[])));
        let err = resolver.resolve("faq.what.is.smsf").await.unwrap_err();
        assert!(matches!(err, FaqdeskError::DocumentNotFound(_)));
    }

    #[tokio::test]
    async fn malformed_bytes_decode_permissively() {
        let store = Arc::new(MapStore::new(&[(
            "faq/what-is-smsf.md",
            b"Fund access age: 55\xe2 years".as_slice(),
        )]));
        let resolver = EntryResolver::new(index(), store);

        let resolved = resolver.resolve("faq.what.is.smsf").await.unwrap().unwrap();
        assert!(resolved.answer.contains("Fund access age"));
        assert!(resolved.answer.contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn works_through_a_trait_object() {
        let store: Arc<dyn ContentStore> = Arc::new(MapStore::new(&[(
            "faq/what-is-smsf.md",
            b"Body.".as_slice(),
        )]));
        let resolver: EntryResolver<dyn ContentStore> = EntryResolver::new(index(), store);
        let resolved = resolver.resolve("faq.what.is.smsf").await.unwrap().unwrap();
        assert_eq!(resolved.answer, "Body.");
    }
}
