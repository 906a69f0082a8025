// src/core/client.rs

use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Production Stripe REST endpoint. All consumed resources live under /v1.
const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";

const USER_AGENT: &str = concat!("stripe-audit/", env!("CARGO_PKG_VERSION"));

/// Failure of a single remote query.
///
/// Probes only ever branch on [`ApiError::is_permission_denied`]; every
/// other variant is treated as a transient gap in coverage and logged.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("permission denied reading {0}")]
    PermissionDenied(&'static str),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("request for {resource} failed with status {status}: {message}")]
    Request {
        resource: &'static str,
        status: u16,
        message: String,
    },
    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// True when the credential lacks scope for the queried resource.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ApiError::PermissionDenied(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

// --- API Resource Models ---
// Only the fields the probes read are deserialized; everything else in the
// Stripe payloads is ignored.

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    #[serde(default)]
    pub livemode: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Charge {
    pub id: String,
    pub amount: i64,
    /// Creation time as a Unix timestamp in seconds.
    pub created: i64,
    #[serde(default)]
    pub customer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEndpoint {
    pub id: String,
    pub url: String,
    /// `enabled` or `disabled` on the wire.
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    #[serde(default)]
    pub payment_method_options: Option<PaymentMethodOptions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethodOptions {
    #[serde(default)]
    pub card: Option<CardOptions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardOptions {
    #[serde(default)]
    pub request_three_d_secure: Option<String>,
}

impl PaymentIntent {
    /// Whether this intent asks Stripe to attempt 3-D Secure authentication.
    pub fn requests_three_d_secure(&self) -> bool {
        matches!(
            self.payment_method_options
                .as_ref()
                .and_then(|options| options.card.as_ref())
                .and_then(|card| card.request_three_d_secure.as_deref()),
            Some("automatic" | "any")
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    #[serde(default)]
    pub customer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Refund {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: String,
    /// BTreeMap keeps key iteration deterministic, which keeps the emission
    /// order of metadata findings deterministic.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Stripe wraps every list response in this envelope.
#[derive(Debug, Deserialize)]
struct List<T> {
    data: Vec<T>,
}

/// Stripe error payloads carry a nested `error` object.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

// --- Account API Seam ---

/// Read-only view of the audited Stripe account.
///
/// This is the single seam between the probes and the outside world: the
/// production implementation talks to the Stripe REST API, tests substitute
/// an in-memory stub. Every operation reads one bounded page and never
/// mutates remote state.
#[allow(async_fn_in_trait)]
pub trait AccountApi {
    /// The raw secret key the handle was built with. Exposed so the API
    /// usage probe can apply the literal test-mode prefix convention.
    fn secret_key(&self) -> &str;

    async fn retrieve_account(&self) -> Result<Account, ApiError>;
    async fn retrieve_balance(&self) -> Result<Balance, ApiError>;
    async fn list_charges(&self, limit: u8) -> Result<Vec<Charge>, ApiError>;
    async fn list_webhook_endpoints(&self, limit: u8) -> Result<Vec<WebhookEndpoint>, ApiError>;
    async fn list_payment_intents(&self, limit: u8) -> Result<Vec<PaymentIntent>, ApiError>;
    async fn list_payment_methods(&self, limit: u8) -> Result<Vec<PaymentMethod>, ApiError>;
    async fn list_refunds(&self, limit: u8) -> Result<Vec<Refund>, ApiError>;
    async fn list_customers(&self, limit: u8) -> Result<Vec<Customer>, ApiError>;
}

/// Reqwest-backed client for the Stripe REST API.
pub struct StripeClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_api_base(secret_key, DEFAULT_API_BASE)
    }

    /// Points the client at an alternate API base, e.g. a local stripe-mock.
    pub fn with_api_base(
        secret_key: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_base: api_base.into(),
            secret_key: secret_key.into(),
        })
    }

    /// Performs one authenticated GET and decodes the response.
    ///
    /// HTTP 403 means the key lacks scope for this resource; 401 means the
    /// key itself was rejected. Both are surfaced as distinct variants so
    /// callers can tell a coverage gap from a configuration failure.
    async fn get<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
        query: &[(&str, u8)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.api_base, path);
        debug!(resource, %url, "Issuing API request.");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.secret_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::FORBIDDEN {
                return Err(ApiError::PermissionDenied(resource));
            }
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| status.to_string());
            if status == StatusCode::UNAUTHORIZED {
                return Err(ApiError::Authentication(message));
            }
            return Err(ApiError::Request {
                resource,
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
        limit: u8,
    ) -> Result<Vec<T>, ApiError> {
        let envelope: List<T> = self.get(resource, path, &[("limit", limit)]).await?;
        Ok(envelope.data)
    }
}

impl AccountApi for StripeClient {
    fn secret_key(&self) -> &str {
        &self.secret_key
    }

    async fn retrieve_account(&self) -> Result<Account, ApiError> {
        self.get("account", "account", &[]).await
    }

    async fn retrieve_balance(&self) -> Result<Balance, ApiError> {
        self.get("balance", "balance", &[]).await
    }

    async fn list_charges(&self, limit: u8) -> Result<Vec<Charge>, ApiError> {
        self.list("charges", "charges", limit).await
    }

    async fn list_webhook_endpoints(&self, limit: u8) -> Result<Vec<WebhookEndpoint>, ApiError> {
        self.list("webhook_endpoints", "webhook_endpoints", limit).await
    }

    async fn list_payment_intents(&self, limit: u8) -> Result<Vec<PaymentIntent>, ApiError> {
        self.list("payment_intents", "payment_intents", limit).await
    }

    async fn list_payment_methods(&self, limit: u8) -> Result<Vec<PaymentMethod>, ApiError> {
        self.list("payment_methods", "payment_methods", limit).await
    }

    async fn list_refunds(&self, limit: u8) -> Result<Vec<Refund>, ApiError> {
        self.list("refunds", "refunds", limit).await
    }

    async fn list_customers(&self, limit: u8) -> Result<Vec<Customer>, ApiError> {
        self.list("customers", "customers", limit).await
    }
}
