use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::{ApiError, ApiException},
    protocol::{ContactSubmission, SubmissionReceipt},
};
use url::Url;

#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Any `Err` is reported to the user as a failed submission.
    async fn submit(&self, submission: &ContactSubmission) -> Result<SubmissionReceipt>;
}

/// Stand-in for a real backend: waits, then accepts everything.
#[derive(Debug, Clone)]
pub struct SimulatedSubmissionService {
    latency: Duration,
}

impl SimulatedSubmissionService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl SubmissionService for SimulatedSubmissionService {
    async fn submit(&self, submission: &ContactSubmission) -> Result<SubmissionReceipt> {
        tokio::time::sleep(self.latency).await;
        let receipt = SubmissionReceipt::generated();
        tracing::info!(
            reference = %receipt.reference,
            subject = %submission.subject,
            "simulated submission accepted"
        );
        Ok(receipt)
    }
}

/// POSTs the submission as JSON. Any 2xx is success; the body may carry a
/// receipt, otherwise one is generated locally.
#[derive(Debug, Clone)]
pub struct HttpSubmissionService {
    client: Client,
    endpoint: Url,
}

impl HttpSubmissionService {
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("invalid submission endpoint '{endpoint}'"))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            bail!(
                "submission endpoint must use http or https, got '{}'",
                endpoint.scheme()
            );
        }
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionService for HttpSubmissionService {
    async fn submit(&self, submission: &ContactSubmission) -> Result<SubmissionReceipt> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await
            .with_context(|| format!("failed to reach submission endpoint {}", self.endpoint))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .context("failed to read submission response body")?;

        if !status.is_success() {
            if let Ok(api_error) = serde_json::from_slice::<ApiError>(&body) {
                return Err(anyhow!(ApiException::from(api_error)))
                    .with_context(|| format!("submission rejected with status {status}"));
            }
            bail!("submission rejected with status {status}");
        }

        let receipt = serde_json::from_slice::<SubmissionReceipt>(&body)
            .unwrap_or_else(|_| SubmissionReceipt::generated());
        tracing::info!(reference = %receipt.reference, %status, "submission accepted");
        Ok(receipt)
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
