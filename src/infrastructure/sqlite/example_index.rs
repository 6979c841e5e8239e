use crate::domain::error::DomainError;
use crate::domain::ports::example_index::{
    EmbeddingSignature, ExampleIndex, ExampleRow, Neighbor,
};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::Mutex;

/// Vector index over the `examples` table. Vectors are stored as f32
/// little-endian blobs; nearest-neighbor queries are a full scan ranked by
/// cosine distance, which is fine at few-shot collection sizes.
pub struct SqliteExampleIndex {
    conn: Mutex<Connection>,
}

impl SqliteExampleIndex {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
        if a.len() != b.len() || a.is_empty() {
            return 1.0;
        }
        let mut dot = 0.0_f64;
        let mut norm_a = 0.0_f64;
        let mut norm_b = 0.0_f64;
        for (x, y) in a.iter().zip(b.iter()) {
            let x = *x as f64;
            let y = *y as f64;
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom == 0.0 {
            1.0
        } else {
            1.0 - dot / denom
        }
    }

    fn serialize_vector(v: &[f32]) -> Vec<u8> {
        v.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }
}

impl ExampleIndex for SqliteExampleIndex {
    fn upsert(&self, rows: &[ExampleRow]) -> Result<(), DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::StoreWrite(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::StoreWrite(format!("Failed to start batch: {e}")))?;
        let now = Utc::now().to_rfc3339();
        for row in rows {
            let blob = Self::serialize_vector(&row.embedding);
            tx.execute(
                "INSERT OR REPLACE INTO examples (id, document, metadata, embedding, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![row.id, row.document, row.metadata, blob, now],
            )
            .map_err(|e| DomainError::StoreWrite(format!("Failed to store example: {e}")))?;
        }
        tx.commit()
            .map_err(|e| DomainError::StoreWrite(format!("Failed to commit batch: {e}")))
    }

    fn query_nearest(&self, embedding: &[f32], k: usize) -> Result<Vec<Neighbor>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::StoreQuery(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT document, metadata, embedding FROM examples")
            .map_err(|e| DomainError::StoreQuery(e.to_string()))?;
        let mut results: Vec<Neighbor> = stmt
            .query_map([], |row| {
                let document: String = row.get(0)?;
                let metadata: String = row.get(1)?;
                let blob: Vec<u8> = row.get(2)?;
                Ok((document, metadata, blob))
            })
            .map_err(|e| DomainError::StoreQuery(e.to_string()))?
            .filter_map(|r| r.ok())
            .map(|(document, metadata, blob)| {
                let stored = Self::deserialize_vector(&blob);
                Neighbor {
                    document,
                    metadata,
                    distance: Self::cosine_distance(embedding, &stored),
                }
            })
            .collect();

        results.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(k);
        Ok(results)
    }

    fn count(&self) -> Result<usize, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::StoreQuery(e.to_string()))?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM examples", [], |r| r.get(0))
            .map_err(|e| DomainError::StoreQuery(e.to_string()))?;
        Ok(count as usize)
    }

    fn signature(&self) -> Result<Option<EmbeddingSignature>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::StoreQuery(e.to_string()))?;
        let row = conn
            .query_row(
                "SELECT model, dimension FROM collection_meta WHERE id = 0",
                [],
                |r| {
                    let model: String = r.get(0)?;
                    let dimension: i64 = r.get(1)?;
                    Ok(EmbeddingSignature {
                        model,
                        dimension: dimension as usize,
                    })
                },
            );
        match row {
            Ok(sig) => Ok(Some(sig)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::StoreQuery(e.to_string())),
        }
    }

    fn bind_signature(&self, sig: &EmbeddingSignature) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::StoreWrite(e.to_string()))?;
        conn.execute(
            "INSERT OR REPLACE INTO collection_meta (id, model, dimension, created_at)
             VALUES (0, ?1, ?2, ?3)",
            params![sig.model, sig.dimension as i64, Utc::now().to_rfc3339()],
        )
        .map_err(|e| DomainError::StoreWrite(format!("Failed to bind signature: {e}")))?;
        Ok(())
    }
}
