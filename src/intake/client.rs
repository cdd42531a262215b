use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::error::IntakeError;
use super::payload::Payload;
use crate::model::Field;

/// Delivers a registration payload to the intake side.
///
/// Delivery is best effort: success means the request went out without a
/// transport error. The response is never inspected, so a retry after a
/// failure may produce a duplicate intake record.
pub trait Intake: Clone + Send + Sync + 'static {
    fn deliver(&self, payload: &Payload) -> impl Future<Output = Result<(), IntakeError>> + Send;
}

/// Posts payloads to the spreadsheet intake endpoint, then to every webhook.
#[derive(Debug, Clone)]
pub struct HttpIntake {
    client: Client,
    intake_url: Option<String>,
    webhooks: Vec<String>,
}

impl HttpIntake {
    /// Creates a client with the given per-request timeout.
    ///
    /// An empty `intake_url` leaves the intake unconfigured; every delivery
    /// then fails with [`IntakeError::NotConfigured`].
    pub fn new(
        intake_url: &str,
        webhooks: Vec<String>,
        timeout: Duration,
    ) -> Result<Self, IntakeError> {
        let client = Client::builder().timeout(timeout).build()?;
        let intake_url = (!intake_url.trim().is_empty()).then(|| intake_url.trim().to_string());
        Ok(Self {
            client,
            intake_url,
            webhooks,
        })
    }

    /// Returns `true` if an intake endpoint is set.
    pub fn is_configured(&self) -> bool {
        self.intake_url.is_some()
    }

    /// Posts the payload to every webhook concurrently.
    ///
    /// Runs as a detached task after the intake accepted the payload, so a
    /// slow webhook never delays the caller. Failures are logged and
    /// otherwise ignored.
    async fn fan_out(&self, payload: &Payload) {
        let results = join_all(
            self.webhooks
                .iter()
                .map(|url| self.client.post(url).json(payload).send()),
        )
        .await;

        for (url, result) in self.webhooks.iter().zip(results) {
            match result {
                Ok(response) => debug!(%url, status = %response.status(), "webhook notified"),
                Err(e) => warn!(%url, error = %e, "webhook delivery failed"),
            }
        }
    }
}

impl Intake for HttpIntake {
    async fn deliver(&self, payload: &Payload) -> Result<(), IntakeError> {
        let url = self.intake_url.as_deref().ok_or(IntakeError::NotConfigured)?;

        let response = self.client.post(url).json(payload).send().await?;
        debug!(status = %response.status(), "intake endpoint responded");
        info!(
            full_name = payload.str_value(Field::FullName),
            program = payload.str_value(Field::Program),
            "registration delivered"
        );

        if !self.webhooks.is_empty() {
            let this = self.clone();
            let payload = payload.clone();
            tokio::spawn(async move { this.fan_out(&payload).await });
        }
        Ok(())
    }
}
