use super::types::{EndpointRef, RequestPayload, ServiceEnvelope};
use crate::errors::{PricerError, PricerResult};
use reqwest::Client;
use std::time::Duration;

/// Spark Execute API client. One outbound POST per invocation, single
/// attempt, no caching; the caller decides whether to resubmit. All methods
/// return Result, never panic.
#[derive(Clone)]
pub struct SparkClient {
    client: Client,
    base_url: String,
    folder: String,
    tenant: String,
    api_key: String,
}

impl SparkClient {
    pub fn new(
        base_url: &str,
        folder: &str,
        tenant: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .pool_max_idle_per_host(4)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            folder: folder.to_string(),
            tenant: tenant.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn execute_url(&self, endpoint: &EndpointRef) -> String {
        format!(
            "{}/folders/{}/services/{}/Execute",
            self.base_url, self.folder, endpoint.service
        )
    }

    pub async fn execute(
        &self,
        endpoint: &EndpointRef,
        payload: &RequestPayload,
    ) -> PricerResult<ServiceEnvelope> {
        let url = self.execute_url(endpoint);

        let resp = self
            .client
            .post(&url)
            .header("x-tenant-name", &self.tenant)
            .header("x-synthetic-key", &self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PricerError::SparkApi {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        serde_json::from_str::<ServiceEnvelope>(&body).map_err(|e| {
            PricerError::MalformedResponse(format!("POST {}: {e}", endpoint.service))
        })
    }
}
