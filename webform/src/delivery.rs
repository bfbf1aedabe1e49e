//! Best-effort webhook delivery of submitted answers.
//!
//! Delivery is fire-and-forget from the form's point of view: the submit
//! handler spawns it and returns at once. The spawned task logs its own
//! outcome; the [`DeliveryTask`] handle lets a caller cancel it or await the
//! outcome, but nothing requires either. There is no timeout and no retry.

use reqwest::Client;
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use webform_types::AnswerRecord;

/// Errors that can occur while delivering answers to a webhook.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("webhook request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The endpoint answered, but not with JSON.
    #[error("webhook response (status {status}) is not valid JSON: {source}")]
    Decode {
        status: u16,
        #[source]
        source: reqwest::Error,
    },

    #[error("webhook delivery cancelled")]
    Cancelled,

    /// Delivery was requested outside of a tokio runtime.
    #[error("no async runtime to deliver the webhook on")]
    NoRuntime,

    #[error("webhook delivery task failed: {0}")]
    TaskFailed(String),
}

impl DeliveryError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Posts answer records to one endpoint.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    url: String,
    client: Client,
}

impl WebhookClient {
    /// Create a client for the given endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    /// Create a client for the given endpoint reusing an existing HTTP client.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the answers as JSON and decode the JSON response.
    ///
    /// Any status is accepted as long as the body decodes.
    pub async fn deliver(&self, answers: &AnswerRecord) -> Result<Value, DeliveryError> {
        debug!(url = %self.url, fields = answers.len(), "posting answers to webhook");

        let response = self
            .client
            .post(&self.url)
            .json(answers)
            .send()
            .await
            .map_err(DeliveryError::Request)?;

        let status = response.status();
        response
            .json::<Value>()
            .await
            .map_err(|source| DeliveryError::Decode {
                status: status.as_u16(),
                source,
            })
    }

    /// Start delivering the answers in the background.
    ///
    /// Fails only when called outside of a tokio runtime.
    pub fn spawn(&self, answers: AnswerRecord) -> Result<DeliveryTask, DeliveryError> {
        let runtime = Handle::try_current().map_err(|_| DeliveryError::NoRuntime)?;

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let client = self.clone();

        let handle = runtime.spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => Err(DeliveryError::Cancelled),
                result = client.deliver(&answers) => result,
            };

            match &outcome {
                Ok(body) => info!(url = %client.url, response = %body, "webhook response"),
                Err(e) => error!(url = %client.url, "webhook error: {e}"),
            }
            outcome
        });

        Ok(DeliveryTask { handle, cancel })
    }
}

/// Handle to an in-flight webhook delivery.
///
/// Dropping the handle does not cancel the delivery.
#[derive(Debug)]
pub struct DeliveryTask {
    handle: JoinHandle<Result<Value, DeliveryError>>,
    cancel: CancellationToken,
}

impl DeliveryTask {
    /// Abandon the delivery. A request already on the wire may still reach
    /// the endpoint; its response is ignored.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the delivery to finish.
    pub async fn outcome(self) -> Result<Value, DeliveryError> {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(DeliveryError::TaskFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_outside_runtime_fails() {
        let client = WebhookClient::new("http://127.0.0.1:9/hook");
        let result = client.spawn(AnswerRecord::new());
        assert!(matches!(result, Err(DeliveryError::NoRuntime)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_request_error() {
        // Port 9 (discard) is closed on test machines.
        let client = WebhookClient::new("http://127.0.0.1:9/hook");
        let outcome = client.spawn(AnswerRecord::new()).unwrap().outcome().await;
        assert!(matches!(outcome, Err(DeliveryError::Request(_))));
    }

    #[tokio::test]
    async fn cancelled_before_completion() {
        let client = WebhookClient::new("http://127.0.0.1:9/hook");
        let task = client.spawn(AnswerRecord::new()).unwrap();
        task.cancel();

        let outcome = task.outcome().await;
        assert!(matches!(outcome, Err(DeliveryError::Cancelled)));
    }
}
