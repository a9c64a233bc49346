use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::utils::{FetchResult, get_json};

/// Placeholder substituted with the address in `BALANCE_API_URL`.
pub const ADDRESS_PLACEHOLDER: &str = "{address}";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("balance lookup failed: {0}")]
    Failed(String),

    #[error("balance lookup timed out after {0:?}")]
    TimedOut(Duration),

    #[error("balance service returned an invalid balance: {0}")]
    InvalidBalance(f64),

    #[error("invalid balance lookup url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[async_trait]
pub trait BalanceLookup: Send + Sync {
    async fn fetch_balance(&self, address: &str) -> Result<f64, LookupError>;
}

/// Reads `balance` from a JSON object body. Absent or `null` means zero.
fn balance_field(body: &Map<String, Value>) -> Result<f64, LookupError> {
    match body.get("balance") {
        None | Some(Value::Null) => Ok(0.0),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| LookupError::Failed(format!("balance is not a number: {value}"))),
    }
}

/// Talks to the external balance API over HTTP.
pub struct HttpBalanceClient {
    http_client: reqwest::Client,
    url_template: String,
}

impl HttpBalanceClient {
    pub fn new(url_template: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()?;
        Self::with_client(http_client, url_template)
    }

    pub fn with_client(http_client: reqwest::Client, url_template: &str) -> anyhow::Result<Self> {
        let client = Self {
            http_client,
            url_template: url_template.to_string(),
        };
        // Fail at startup rather than on the first command.
        client.lookup_url("0x0000000000000000000000000000000000000000")?;
        Ok(client)
    }

    pub fn lookup_url(&self, address: &str) -> Result<Url, LookupError> {
        if self.url_template.contains(ADDRESS_PLACEHOLDER) {
            return Ok(Url::parse(
                &self.url_template.replace(ADDRESS_PLACEHOLDER, address),
            )?);
        }

        let mut url = Url::parse(&self.url_template)?;
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(address);
        Ok(url)
    }
}

#[async_trait]
impl BalanceLookup for HttpBalanceClient {
    async fn fetch_balance(&self, address: &str) -> Result<f64, LookupError> {
        let url = self.lookup_url(address)?;
        debug!(%url, "fetching balance");

        // Map rejects arrays and scalars, so only an object body decodes
        let balance = match get_json::<Map<String, Value>>(&self.http_client, url.as_str()).await {
            FetchResult::Success(body) => balance_field(&body)?,
            FetchResult::Empty => 0.0,
            FetchResult::Failed(reason) => return Err(LookupError::Failed(reason)),
        };

        if !balance.is_finite() || balance < 0.0 {
            return Err(LookupError::InvalidBalance(balance));
        }
        Ok(balance)
    }
}
