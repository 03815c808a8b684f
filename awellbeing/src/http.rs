//! Client for a remote Aura wellbeing API.

use std::time::Duration;

use acommon::BoxFuture;
use reqwest::{Client, Response};

use crate::{NewEntry, UserStats, WellbeingEntry, WellbeingError, WellbeingStore};

pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct HttpWellbeingStore {
    client: Client,
    base_url: String,
}

impl HttpWellbeingStore {
    /// Client with the default five second timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, WellbeingError> {
        let client = Client::builder()
            .timeout(DEFAULT_API_TIMEOUT)
            .build()
            .map_err(|error| WellbeingError::api(format!("failed to build http client: {error}")))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn check(response: Response) -> Result<Response, WellbeingError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(WellbeingError::api(format!(
            "wellbeing api returned {status}: {body}"
        )))
    }
}

fn send_error(error: reqwest::Error) -> WellbeingError {
    if error.is_timeout() {
        WellbeingError::api(format!("wellbeing api timed out: {error}"))
    } else {
        WellbeingError::api(format!("wellbeing api unreachable: {error}"))
    }
}

impl WellbeingStore for HttpWellbeingStore {
    fn stats<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<UserStats, WellbeingError>> {
        Box::pin(async move {
            let url = self.endpoint(&format!("api/user/{user_id}/stats"));
            let response = self.client.get(url).send().await.map_err(send_error)?;
            let response = Self::check(response).await?;

            response
                .json::<UserStats>()
                .await
                .map_err(|error| WellbeingError::api(format!("invalid stats payload: {error}")))
        })
    }

    fn record<'a>(&'a self, entry: WellbeingEntry) -> BoxFuture<'a, Result<(), WellbeingError>> {
        Box::pin(async move {
            let payload = NewEntry::from(&entry);
            let response = self
                .client
                .post(self.endpoint("api/entries"))
                .json(&payload)
                .send()
                .await
                .map_err(send_error)?;
            Self::check(response).await?;
            Ok(())
        })
    }
}
