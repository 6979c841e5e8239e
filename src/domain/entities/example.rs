use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for content-derived example ids. Fixed so the same input text
/// always maps to the same id across runs and processes.
const EXAMPLE_ID_NAMESPACE: Uuid = Uuid::from_bytes([
    0x6f, 0x1c, 0x0e, 0x8a, 0x2d, 0x47, 0x4b, 0x9e, 0x8f, 0x3a, 0xd1, 0x55, 0x0b, 0x7c, 0x21,
    0x64,
]);

/// A source example pair: natural-language input plus the structured query
/// to return verbatim when the input is retrieved as a nearest neighbor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleRecord {
    pub input: String,
    /// Arbitrary JSON value. A missing field deserializes as `Null` and is
    /// rejected at ingestion, not silently skipped.
    #[serde(default)]
    pub query: serde_json::Value,
}

impl ExampleRecord {
    pub fn new(input: impl Into<String>, query: serde_json::Value) -> Self {
        Self {
            input: input.into(),
            query,
        }
    }

    /// Content-derived id: UUIDv5 of the trimmed input text. Two records with
    /// the same input share an id, so re-ingestion overwrites by content
    /// rather than by batch position.
    pub fn id(&self) -> String {
        Uuid::new_v5(&EXAMPLE_ID_NAMESPACE, self.input.trim().as_bytes()).to_string()
    }
}

/// One retrieved neighbor: the original input text and its stored query,
/// deserialized back to the exact value that was ingested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedExample {
    pub input: String,
    pub query: serde_json::Value,
}
