use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Azure OpenAI embeddings. Same wire format as OpenAI, but addressed by
/// resource endpoint + deployment name, authenticated with an `api-key`
/// header, and versioned with an `api-version` query parameter.
pub struct AzureOpenAiProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    deployment: String,
    api_version: String,
    model: String,
}

#[derive(Serialize)]
struct AzureRequest {
    input: Vec<String>,
}

#[derive(Deserialize)]
struct AzureResponse {
    data: Vec<AzureEmbedding>,
}

#[derive(Deserialize)]
struct AzureEmbedding {
    embedding: Vec<f32>,
}

impl AzureOpenAiProvider {
    pub fn new(
        api_key: String,
        endpoint: String,
        deployment: String,
        api_version: Option<String>,
        model: Option<String>,
    ) -> Self {
        let model = model.unwrap_or_else(|| "text-embedding-3-small".to_string());
        Self {
            client: Client::new(),
            api_key,
            endpoint,
            deployment,
            api_version: api_version.unwrap_or_else(|| "2024-02-01".to_string()),
            model,
        }
    }

    fn model_dimension(model: &str) -> usize {
        match model {
            "text-embedding-3-small" => 1536,
            "text-embedding-3-large" => 3072,
            "text-embedding-ada-002" => 1536,
            _ => 1536,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for AzureOpenAiProvider {
    async fn embed(
        &self,
        texts: &[String],
        _input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        let url = format!(
            "{}/openai/deployments/{}/embeddings?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        );

        let resp = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&AzureRequest {
                input: texts.to_vec(),
            })
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("Azure OpenAI API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Embedding(format!(
                "Azure OpenAI API {status}: {body}"
            )));
        }

        let result: AzureResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Parse error: {e}")))?;
        Ok(result.data.into_iter().map(|d| d.embedding).collect())
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        Self::model_dimension(&self.model)
    }
}
