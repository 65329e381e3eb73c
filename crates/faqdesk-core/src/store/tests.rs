use std::io::Write;

use super::*;

fn corpus_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("faq")).unwrap();
    let mut file = std::fs::File::create(dir.path().join("faq/what-is-smsf.md")).unwrap();
    file.write_all(b"---\ntitle: t\n---\nBody.").unwrap();
    dir
}

#[tokio::test]
async fn fs_store_reads_a_document() {
    let dir = corpus_dir();
    let store = FsStore::open(dir.path()).unwrap();
    let bytes = store.fetch("faq/what-is-smsf.md").await.unwrap();
    assert_eq!(bytes, b"---\ntitle: t\n---\nBody.");
}

#[tokio::test]
async fn fs_store_reports_missing_documents() {
    let dir = corpus_dir();
    let store = FsStore::open(dir.path()).unwrap();
    let err = store.fetch("faq/nope.md").await.unwrap_err();
    assert!(matches!(err, FaqdeskError::DocumentNotFound(_)));
}

#[tokio::test]
async fn fs_store_rejects_keys_that_escape_the_root() {
    let dir = corpus_dir();
    let store = FsStore::open(dir.path()).unwrap();

    let err = store.fetch("../outside.md").await.unwrap_err();
    assert!(matches!(err, FaqdeskError::StoreRead { .. }));

    let err = store.fetch("/etc/hostname").await.unwrap_err();
    assert!(matches!(err, FaqdeskError::StoreRead { .. }));
}

#[test]
fn fs_store_requires_an_existing_root() {
    assert!(matches!(
        FsStore::open("/definitely/not/a/real/dir"),
        Err(FaqdeskError::Config(_))
    ));
}

#[test]
fn from_address_rejects_an_empty_address() {
    assert!(matches!(from_address("   "), Err(FaqdeskError::Config(_))));
}

#[test]
fn from_address_picks_a_backend_by_scheme() {
    let dir = corpus_dir();
    assert!(from_address(dir.path().to_str().unwrap()).is_ok());
    assert!(from_address("https://corpus.example.com/content").is_ok());
    assert!(from_address("http://127.0.0.1:9000/bucket").is_ok());
}

#[test]
fn http_store_builds_urls_from_base_and_key() {
    let store = HttpStore::new("https://corpus.example.com/content/").unwrap();
    assert_eq!(
        store.url_for("faq/what-is-smsf.md"),
        "https://corpus.example.com/content/faq/what-is-smsf.md"
    );
    assert_eq!(
        store.url_for("/faq/index.json"),
        "https://corpus.example.com/content/faq/index.json"
    );
}
