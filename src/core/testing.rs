// src/core/testing.rs

//! In-memory stand-in for the Stripe API shared by the probe and
//! orchestrator tests. Each resource is scripted with an outcome so tests
//! can exercise permission denials, transport failures, and skewed latency
//! without a network.

use std::time::Duration;

use crate::core::client::{
    Account, AccountApi, ApiError, Balance, Charge, Customer, PaymentIntent, PaymentMethod,
    Refund, WebhookEndpoint,
};

/// Scripted outcome of one API resource.
pub enum Call<T> {
    Ok(T),
    Denied,
    Fail,
    /// Succeeds after sleeping, to skew probe completion order.
    Slow(T, Duration),
}

impl<T: Clone> Call<T> {
    async fn resolve(&self, resource: &'static str) -> Result<T, ApiError> {
        match self {
            Call::Ok(value) => Ok(value.clone()),
            Call::Denied => Err(ApiError::PermissionDenied(resource)),
            Call::Fail => Err(ApiError::Transport(format!(
                "connection reset reading {resource}"
            ))),
            Call::Slow(value, delay) => {
                tokio::time::sleep(*delay).await;
                Ok(value.clone())
            }
        }
    }
}

pub struct StubApi {
    pub secret_key: String,
    pub account: Call<Account>,
    pub balance: Call<Balance>,
    pub charges: Call<Vec<Charge>>,
    pub webhook_endpoints: Call<Vec<WebhookEndpoint>>,
    pub payment_intents: Call<Vec<PaymentIntent>>,
    pub payment_methods: Call<Vec<PaymentMethod>>,
    pub refunds: Call<Vec<Refund>>,
    pub customers: Call<Vec<Customer>>,
}

impl StubApi {
    /// A readable live-mode account with no activity. The balance read is
    /// denied, mimicking a restricted key, so the key-scope check stays
    /// quiet.
    pub fn empty_account() -> Self {
        Self {
            secret_key: "sk_live_stub".to_string(),
            account: Call::Ok(Account {
                id: "acct_stub".to_string(),
            }),
            balance: Call::Denied,
            charges: Call::Ok(Vec::new()),
            webhook_endpoints: Call::Ok(Vec::new()),
            payment_intents: Call::Ok(Vec::new()),
            payment_methods: Call::Ok(Vec::new()),
            refunds: Call::Ok(Vec::new()),
            customers: Call::Ok(Vec::new()),
        }
    }

    /// A key with no read scope at all.
    pub fn denied_everywhere() -> Self {
        Self {
            secret_key: "sk_live_stub".to_string(),
            account: Call::Denied,
            balance: Call::Denied,
            charges: Call::Denied,
            webhook_endpoints: Call::Denied,
            payment_intents: Call::Denied,
            payment_methods: Call::Denied,
            refunds: Call::Denied,
            customers: Call::Denied,
        }
    }
}

impl AccountApi for StubApi {
    fn secret_key(&self) -> &str {
        &self.secret_key
    }

    async fn retrieve_account(&self) -> Result<Account, ApiError> {
        self.account.resolve("account").await
    }

    async fn retrieve_balance(&self) -> Result<Balance, ApiError> {
        self.balance.resolve("balance").await
    }

    async fn list_charges(&self, _limit: u8) -> Result<Vec<Charge>, ApiError> {
        self.charges.resolve("charges").await
    }

    async fn list_webhook_endpoints(&self, _limit: u8) -> Result<Vec<WebhookEndpoint>, ApiError> {
        self.webhook_endpoints.resolve("webhook_endpoints").await
    }

    async fn list_payment_intents(&self, _limit: u8) -> Result<Vec<PaymentIntent>, ApiError> {
        self.payment_intents.resolve("payment_intents").await
    }

    async fn list_payment_methods(&self, _limit: u8) -> Result<Vec<PaymentMethod>, ApiError> {
        self.payment_methods.resolve("payment_methods").await
    }

    async fn list_refunds(&self, _limit: u8) -> Result<Vec<Refund>, ApiError> {
        self.refunds.resolve("refunds").await
    }

    async fn list_customers(&self, _limit: u8) -> Result<Vec<Customer>, ApiError> {
        self.customers.resolve("customers").await
    }
}

/// Charge fixture helper.
pub fn charge(id: &str, customer: Option<&str>, amount: i64, created: i64) -> Charge {
    Charge {
        id: id.to_string(),
        amount,
        created,
        customer: customer.map(String::from),
    }
}

/// Webhook endpoint fixture helper.
pub fn webhook_endpoint(id: &str, url: &str, status: &str) -> WebhookEndpoint {
    WebhookEndpoint {
        id: id.to_string(),
        url: url.to_string(),
        status: status.to_string(),
    }
}
