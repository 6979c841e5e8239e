mod common;

use common::{setup, HashEmbedder, DIM};
use exemplar::domain::entities::example::ExampleRecord;
use exemplar::domain::error::DomainError;
use exemplar::Exemplar;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_ingest_reports_count_and_binds_signature() {
    let store = setup();
    let count = store
        .ingest(&[
            ExampleRecord::new("List all employees", json!("SELECT * FROM employees")),
            ExampleRecord::new(
                "Count active orders",
                json!("SELECT COUNT(*) FROM orders WHERE active=1"),
            ),
        ])
        .await
        .unwrap();
    assert_eq!(count, 2);

    let stats = store.stats().unwrap();
    assert_eq!(stats.examples, 2);
    let binding = stats.binding.unwrap();
    assert_eq!(binding.model, "hash-test");
    assert_eq!(binding.dimension, DIM);
}

#[tokio::test]
async fn test_empty_batch_is_malformed() {
    let store = setup();
    let err = store.ingest(&[]).await.unwrap_err();
    assert!(matches!(err, DomainError::MalformedRecord(_)));
}

#[tokio::test]
async fn test_missing_query_fails_whole_batch() {
    let store = setup();
    let err = store
        .ingest(&[
            ExampleRecord::new("good record", json!("SELECT 1")),
            ExampleRecord::new("bad record", serde_json::Value::Null),
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MalformedRecord(_)));

    // Nothing from the failed batch is retrievable.
    assert_eq!(store.stats().unwrap().examples, 0);
    let results = store.retrieve("good record", 2).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_missing_query_deserializes_as_null_and_is_rejected() {
    let store = setup();
    let records: Vec<ExampleRecord> =
        serde_json::from_str(r#"[{"input": "no query field here"}]"#).unwrap();
    let err = store.ingest(&records).await.unwrap_err();
    assert!(matches!(err, DomainError::MalformedRecord(_)));
}

#[tokio::test]
async fn test_empty_input_fails_whole_batch() {
    let store = setup();
    let err = store
        .ingest(&[ExampleRecord::new("   ", json!("SELECT 1"))])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MalformedRecord(_)));
}

#[tokio::test]
async fn test_reingest_same_batch_is_idempotent() {
    let store = setup();
    let batch = vec![
        ExampleRecord::new("the ingest worker", json!("q1")),
        ExampleRecord::new("rotate api keys", json!("q2")),
    ];
    store.ingest(&batch).await.unwrap();
    store.ingest(&batch).await.unwrap();

    assert_eq!(store.stats().unwrap().examples, 2);
    let results = store.retrieve("rotate api keys", 1).await.unwrap();
    assert_eq!(results[0].input, "rotate api keys");
    assert_eq!(results[0].query, json!("q2"));
}

#[tokio::test]
async fn test_reordered_batch_keeps_content() {
    let store = setup();
    let a = ExampleRecord::new("display pending deploys", json!("qa"));
    let b = ExampleRecord::new("restart the ingest worker", json!("qb"));
    store.ingest(&[a.clone(), b.clone()]).await.unwrap();
    store.ingest(&[b, a]).await.unwrap();

    assert_eq!(store.stats().unwrap().examples, 2);
    let results = store.retrieve("display pending deploys", 1).await.unwrap();
    assert_eq!(results[0].query, json!("qa"));
}

#[tokio::test]
async fn test_changed_query_for_same_input_overwrites() {
    let store = setup();
    store
        .ingest(&[ExampleRecord::new("rotate api keys", json!("old"))])
        .await
        .unwrap();
    store
        .ingest(&[ExampleRecord::new("rotate api keys", json!("new"))])
        .await
        .unwrap();

    assert_eq!(store.stats().unwrap().examples, 1);
    let results = store.retrieve("rotate api keys", 1).await.unwrap();
    assert_eq!(results[0].query, json!("new"));
}

#[tokio::test]
async fn test_duplicate_inputs_in_one_batch_collapse() {
    let store = setup();
    store
        .ingest(&[
            ExampleRecord::new("rotate api keys", json!("first")),
            ExampleRecord::new("rotate api keys", json!("second")),
        ])
        .await
        .unwrap();

    assert_eq!(store.stats().unwrap().examples, 1);
    let results = store.retrieve("rotate api keys", 1).await.unwrap();
    assert_eq!(results[0].query, json!("second"));
}

#[tokio::test]
async fn test_provider_change_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("examples.db");
    let db_path = db_path.to_str().unwrap();

    let store = Exemplar::with_providers(db_path, Arc::new(HashEmbedder::new())).unwrap();
    store
        .ingest(&[ExampleRecord::new("rotate api keys", json!("q"))])
        .await
        .unwrap();
    drop(store);

    // Same model name, different dimension.
    let narrow =
        Exemplar::with_providers(db_path, Arc::new(HashEmbedder::named("hash-test", 16))).unwrap();
    let err = narrow
        .ingest(&[ExampleRecord::new("another", json!("q"))])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmbeddingMismatch(_)));
    let err = narrow.retrieve("rotate api keys", 1).await.unwrap_err();
    assert!(matches!(err, DomainError::EmbeddingMismatch(_)));

    // Different model name, same dimension.
    let renamed =
        Exemplar::with_providers(db_path, Arc::new(HashEmbedder::named("other-model", DIM)))
            .unwrap();
    let err = renamed
        .ingest(&[ExampleRecord::new("another", json!("q"))])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmbeddingMismatch(_)));
}
