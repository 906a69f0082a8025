// src/core/probe/api_usage.rs

use tracing::{debug, info, warn};

use crate::core::catalog;
use crate::core::client::AccountApi;
use crate::core::models::Issue;

/// Secret keys minted for test mode carry this literal prefix.
const TEST_KEY_PREFIX: &str = "sk_test_";

/// Probes how the API credential itself is used: key scope, idempotency
/// discipline, and test-mode credentials.
pub async fn run_api_usage_probe<C: AccountApi + Sync>(client: &C) -> Vec<Issue> {
    info!("Starting API usage probe.");
    let mut issues = Vec::new();

    check_key_scope(client, &mut issues).await;

    // Idempotency key usage is invisible in list responses, so this stays a
    // standing reminder rather than an observed finding.
    issues.push(Issue::standing(&catalog::IDEMPOTENCY_CHECK));

    if client.secret_key().starts_with(TEST_KEY_PREFIX) {
        debug!("Secret key carries the test-mode prefix.");
        issues.push(Issue::standing(&catalog::TEST_KEY_IN_PRODUCTION));
    }

    info!(findings = issues.len(), "API usage probe finished.");
    issues
}

/// A full-access key can read both the account and its balance; a restricted
/// key is denied somewhere along the way.
async fn check_key_scope<C: AccountApi + Sync>(client: &C, issues: &mut Vec<Issue>) {
    match client.retrieve_account().await {
        Ok(_) => match client.retrieve_balance().await {
            Ok(_) => issues.push(Issue::standing(&catalog::OVERLY_BROAD_KEY)),
            Err(e) if e.is_permission_denied() => {
                debug!("Balance read denied, key appears restricted.");
            }
            Err(e) => warn!(error = %e, "Balance lookup failed."),
        },
        Err(e) if e.is_permission_denied() => {
            issues.push(Issue::standing(&catalog::RESTRICTED_KEY_DETECTED));
        }
        Err(e) => warn!(error = %e, "Account lookup failed."),
    }
}
