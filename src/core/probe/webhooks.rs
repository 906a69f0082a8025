// src/core/probe/webhooks.rs

use tracing::{info, warn};
use url::{Host, Url};

use crate::core::catalog;
use crate::core::client::AccountApi;
use crate::core::models::Issue;

const WEBHOOK_PAGE_LIMIT: u8 = 100;

/// Probes the webhook endpoint configuration of the account.
pub async fn run_webhook_probe<C: AccountApi + Sync>(client: &C) -> Vec<Issue> {
    info!("Starting webhook configuration probe.");
    let mut issues = Vec::new();

    check_endpoints(client, &mut issues).await;

    // Signature handling and handler idempotency happen on the merchant's
    // servers and cannot be observed through the API, so both stay standing
    // reminders.
    issues.push(Issue::standing(&catalog::SIGNATURE_VERIFICATION));
    issues.push(Issue::standing(&catalog::IDEMPOTENCY_HANDLING));

    info!(findings = issues.len(), "Webhook probe finished.");
    issues
}

async fn check_endpoints<C: AccountApi + Sync>(client: &C, issues: &mut Vec<Issue>) {
    let endpoints = match client.list_webhook_endpoints(WEBHOOK_PAGE_LIMIT).await {
        Ok(endpoints) => endpoints,
        Err(e) if e.is_permission_denied() => {
            issues.push(Issue::standing(&catalog::WEBHOOK_PERMISSION_DENIED));
            return;
        }
        Err(e) => {
            warn!(error = %e, "Webhook endpoint listing failed.");
            return;
        }
    };

    if endpoints.is_empty() {
        issues.push(Issue::standing(&catalog::NO_WEBHOOKS));
        return;
    }

    for endpoint in &endpoints {
        if endpoint.status != "enabled" {
            issues.push(Issue::detailed(
                &catalog::DISABLED_WEBHOOK,
                format!("Webhook {} is disabled", endpoint.id),
            ));
        }

        if !endpoint.url.starts_with("https://") {
            issues.push(Issue::detailed(
                &catalog::INSECURE_WEBHOOK_URL,
                format!("Webhook {} uses insecure URL {}", endpoint.id, endpoint.url),
            ));
        }

        if is_loopback_url(&endpoint.url) {
            issues.push(Issue::detailed(
                &catalog::LOCALHOST_WEBHOOK,
                format!(
                    "Webhook {} points to loopback address {}",
                    endpoint.id, endpoint.url
                ),
            ));
        }
    }
}

/// True when the URL's host is the local machine, whichever way it is
/// spelled.
fn is_loopback_url(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
