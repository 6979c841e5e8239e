mod common;

use common::HashEmbedder;
use exemplar::domain::entities::example::ExampleRecord;
use exemplar::Exemplar;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_sql_fewshot_scenario() {
    let store = Exemplar::with_providers(":memory:", Arc::new(HashEmbedder::new())).unwrap();
    store
        .ingest(&[
            ExampleRecord::new("List all employees", json!("SELECT * FROM employees")),
            ExampleRecord::new(
                "Count active orders",
                json!("SELECT COUNT(*) FROM orders WHERE active=1"),
            ),
        ])
        .await
        .unwrap();

    let results = store.retrieve("employees list", 1).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].input, "List all employees");
    assert_eq!(results[0].query, json!("SELECT * FROM employees"));
}

#[tokio::test]
async fn test_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("examples.db");
    let db_path = db_path.to_str().unwrap();

    {
        let store = Exemplar::with_providers(db_path, Arc::new(HashEmbedder::new())).unwrap();
        store
            .ingest(&[ExampleRecord::new(
                "persisted entries survive process restarts",
                json!({"sql": "SELECT 1"}),
            )])
            .await
            .unwrap();
    }

    let reopened = Exemplar::with_providers(db_path, Arc::new(HashEmbedder::new())).unwrap();
    assert_eq!(reopened.stats().unwrap().examples, 1);
    let results = reopened
        .retrieve("persisted entries survive process restarts", 2)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].query, json!({"sql": "SELECT 1"}));
}
