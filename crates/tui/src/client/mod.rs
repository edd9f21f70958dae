use api_types::transaction::{NewTransaction, SubmitResponse, TransactionRecord};
use reqwest::{
    RequestBuilder, Url,
    header::{CACHE_CONTROL, PRAGMA},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::{AppError, Result};

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx reply. The body is read in full before failing.
    #[error("HTTP {status}: {body}")]
    Remote { status: u16, body: String },
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The sheet's web-app endpoint. One URL serves both verbs.
///
/// Every call is a single attempt: no retry, no backoff and no timeout beyond
/// what the transport imposes.
#[derive(Debug, Clone)]
pub struct Client {
    endpoint: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| AppError::InvalidEndpoint(format!("{endpoint}: {err}")))?;
        Ok(Self {
            endpoint,
            http: reqwest::Client::new(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// All rows, in sheet order.
    pub async fn list_transactions(
        &self,
    ) -> std::result::Result<Vec<TransactionRecord>, ClientError> {
        self.fetch_json(self.http.get(self.endpoint.clone())).await
    }

    /// Appends one row. A `2xx` reply can still carry `ok: false`.
    pub async fn submit_transaction(
        &self,
        payload: &NewTransaction,
    ) -> std::result::Result<SubmitResponse, ClientError> {
        self.fetch_json(self.http.post(self.endpoint.clone()).json(payload))
            .await
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> std::result::Result<T, ClientError> {
        let res = request
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "endpoint replied");

        if !status.is_success() {
            return Err(ClientError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
