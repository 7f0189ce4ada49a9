//! Postal code lookup.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use pizzeria::address::{PostalCode, ResolvedAddress};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Public ViaCEP endpoint.
pub const VIACEP_BASE_URL: &str = "https://viacep.com.br";

/// Resolves postal codes to addresses.
///
/// Results are not trusted: callers still check the city against the serviceable area.
#[automock]
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Address for `cep`, or `None` when the postal code does not exist.
    async fn lookup(&self, cep: &PostalCode) -> Result<Option<ResolvedAddress>, LookupError>;
}

/// HTTP client for the ViaCEP postal code API.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    base_url: String,
    http: Client,
}

impl ViaCepClient {
    /// Create a client for `base_url` (e.g. [`VIACEP_BASE_URL`]) with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    #[tracing::instrument(name = "checkout.lookup.viacep", skip(self), fields(cep = %cep), err)]
    async fn lookup(&self, cep: &PostalCode) -> Result<Option<ResolvedAddress>, LookupError> {
        let url = format!("{}/ws/{}/json/", self.base_url, cep.as_str());

        let response = self.http.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(LookupError::UnexpectedResponse(format!(
                "lookup failed with status {status}: {text}"
            )));
        }

        let body: Value = response.json().await?;

        let resolved = parse_response(body)?;

        debug!(found = resolved.is_some(), "postal code lookup finished");

        Ok(resolved)
    }
}

#[derive(Debug, Deserialize)]
struct ViaCepAddress {
    #[serde(default)]
    logradouro: String,

    #[serde(default)]
    bairro: String,

    localidade: String,
    uf: String,
}

/// `{"erro": true}` (or `"true"`) marks an unknown postal code.
fn parse_response(body: Value) -> Result<Option<ResolvedAddress>, LookupError> {
    let not_found = match body.get("erro") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
        Some(_) | None => false,
    };

    if not_found {
        return Ok(None);
    }

    let address: ViaCepAddress = serde_json::from_value(body)
        .map_err(|error| LookupError::UnexpectedResponse(error.to_string()))?;

    Ok(Some(ResolvedAddress {
        street: address.logradouro,
        neighborhood: address.bairro,
        city: address.localidade,
        state: address.uf,
    }))
}

/// Errors that can occur when looking up a postal code.
#[derive(Debug, Error)]
pub enum LookupError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-2xx response or unexpected body.
    #[error("unexpected response from address lookup: {0}")]
    UnexpectedResponse(String),
}
