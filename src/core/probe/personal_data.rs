// src/core/probe/personal_data.rs

use tracing::{info, warn};

use crate::core::catalog;
use crate::core::client::AccountApi;
use crate::core::models::Issue;

const CUSTOMER_PAGE_LIMIT: u8 = 10;

/// Case-insensitive substrings that mark a customer metadata key as
/// sensitive personal data.
const SENSITIVE_METADATA_TERMS: &[&str] = &[
    "ssn",
    "social_security",
    "passport",
    "drivers_license",
    "credit_score",
];

/// Probes customer records for personal data that does not belong in a
/// payment platform.
pub async fn run_personal_data_probe<C: AccountApi + Sync>(client: &C) -> Vec<Issue> {
    info!("Starting personal data handling probe.");
    let mut issues = Vec::new();

    check_customer_metadata(client, &mut issues).await;

    issues.push(Issue::standing(&catalog::METADATA_BEST_PRACTICE));
    issues.push(Issue::standing(&catalog::GDPR_COMPLIANCE));
    issues.push(Issue::standing(&catalog::DATA_RETENTION));
    issues.push(Issue::standing(&catalog::DATA_PORTABILITY));

    info!(findings = issues.len(), "Personal data probe finished.");
    issues
}

/// One finding per matching metadata key occurrence, so two customers with
/// the same offending key are each reported.
async fn check_customer_metadata<C: AccountApi + Sync>(client: &C, issues: &mut Vec<Issue>) {
    let customers = match client.list_customers(CUSTOMER_PAGE_LIMIT).await {
        Ok(customers) => customers,
        Err(e) if e.is_permission_denied() => {
            issues.push(Issue::standing(&catalog::PII_PERMISSION_DENIED));
            return;
        }
        Err(e) => {
            warn!(error = %e, "Customer listing failed.");
            return;
        }
    };

    for customer in &customers {
        for key in customer.metadata.keys() {
            let lowered = key.to_lowercase();
            if SENSITIVE_METADATA_TERMS
                .iter()
                .any(|term| lowered.contains(term))
            {
                issues.push(Issue::detailed(
                    &catalog::SENSITIVE_PII_IN_METADATA,
                    format!(
                        "Customer {} metadata contains potentially sensitive PII key: {}",
                        customer.id, key
                    ),
                ));
            }
        }
    }
}
