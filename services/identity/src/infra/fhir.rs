use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::domain::repository::ResourceLinker;
use crate::domain::types::ResourceType;
use crate::error::IdentityServiceError;

/// Resource Linker over the clinical-data server's HTTP (FHIR-style) API.
///
/// `POST {base}/{Type}` creates a resource and echoes it back with an `id`;
/// `GET {base}/{Type}/{id}` fetches one; `GET {base}/metadata` is the server's
/// capability/liveness endpoint. Every call is bounded by the client timeout.
#[derive(Clone)]
pub struct HttpResourceLinker {
    client: Client,
    base_url: String,
}

impl HttpResourceLinker {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("build clinical-data client: {e}"))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }
}

impl ResourceLinker for HttpResourceLinker {
    async fn create(
        &self,
        resource_type: ResourceType,
        attributes: &serde_json::Value,
    ) -> Result<String, IdentityServiceError> {
        let url = format!("{}/{}", self.base_url, resource_type.as_str());
        let response = self
            .client
            .post(&url)
            .json(attributes)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, resource_type = %resource_type, "resource create request failed");
                IdentityServiceError::ResourceCreationFailed
            })?;

        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                resource_type = %resource_type,
                "clinical-data server rejected resource create"
            );
            return Err(IdentityServiceError::ResourceCreationFailed);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|_| IdentityServiceError::ResourceCreationFailed)?;
        body.get("id")
            .and_then(|id| id.as_str())
            .map(str::to_owned)
            .ok_or(IdentityServiceError::ResourceCreationFailed)
    }

    async fn get(
        &self,
        resource_type: ResourceType,
        resource_id: &str,
    ) -> Result<Option<serde_json::Value>, IdentityServiceError> {
        let url = format!("{}/{}/{}", self.base_url, resource_type.as_str(), resource_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("resource get failed: {e}"))?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::GONE => Ok(None),
            status if status.is_success() => {
                let body = response
                    .json()
                    .await
                    .map_err(|e| anyhow::anyhow!("decode resource body: {e}"))?;
                Ok(Some(body))
            }
            status => Err(anyhow::anyhow!("resource get returned {status}").into()),
        }
    }

    async fn ping(&self) -> Result<(), IdentityServiceError> {
        let url = format!("{}/metadata", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("clinical-data server unreachable: {e}"))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(anyhow::anyhow!("clinical-data server metadata returned {}", response.status()).into())
        }
    }
}
