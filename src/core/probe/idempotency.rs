// src/core/probe/idempotency.rs

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::core::catalog;
use crate::core::client::AccountApi;
use crate::core::models::Issue;

const CHARGE_PAGE_LIMIT: u8 = 50;
const REFUND_PAGE_LIMIT: u8 = 20;

/// Two charges for the same customer and amount closer together than this
/// are treated as a potential duplicate.
const DUPLICATE_WINDOW_SECS: i64 = 300;

/// Probes a recent window of charges for missing-idempotency symptoms.
pub async fn run_idempotency_probe<C: AccountApi + Sync>(client: &C) -> Vec<Issue> {
    info!("Starting idempotency pattern probe.");
    let mut issues = Vec::new();

    check_recent_charges(client, &mut issues).await;
    observe_refund_volume(client).await;

    issues.push(Issue::standing(&catalog::IDEMPOTENCY_BEST_PRACTICE));
    issues.push(Issue::standing(&catalog::REFUND_IDEMPOTENCY));

    info!(findings = issues.len(), "Idempotency probe finished.");
    issues
}

async fn check_recent_charges<C: AccountApi + Sync>(client: &C, issues: &mut Vec<Issue>) {
    let charges = match client.list_charges(CHARGE_PAGE_LIMIT).await {
        Ok(charges) => charges,
        Err(e) if e.is_permission_denied() => {
            issues.push(Issue::standing(&catalog::IDEMPOTENCY_PERMISSION_DENIED));
            return;
        }
        Err(e) => {
            warn!(error = %e, "Charge listing failed.");
            return;
        }
    };

    // Group the window by (customer, amount). Charges with no customer have
    // no stable grouping key and are skipped.
    let mut groups: BTreeMap<(String, i64), Vec<i64>> = BTreeMap::new();
    for charge in &charges {
        if let Some(customer) = &charge.customer {
            groups
                .entry((customer.clone(), charge.amount))
                .or_default()
                .push(charge.created);
        }
    }

    for ((customer, amount), mut created) in groups {
        if created.len() < 2 {
            continue;
        }
        created.sort_unstable();
        // One finding per qualifying group, however many close pairs it has.
        if created
            .windows(2)
            .any(|pair| pair[1] - pair[0] < DUPLICATE_WINDOW_SECS)
        {
            debug!(%customer, amount, "Close charge timestamps detected.");
            issues.push(Issue::detailed(
                &catalog::POTENTIAL_DUPLICATE_CHARGE,
                format!(
                    "Charges for customer {customer} with amount {amount} fall within 5 minutes of each other, may indicate missing idempotency"
                ),
            ));
        }
    }
}

/// Refund idempotency cannot be observed through the API either; the
/// listing only feeds coverage logging.
async fn observe_refund_volume<C: AccountApi + Sync>(client: &C) {
    match client.list_refunds(REFUND_PAGE_LIMIT).await {
        Ok(refunds) => debug!(refunds = refunds.len(), "Recent refunds listed."),
        Err(e) => debug!(error = %e, "Refund listing unavailable."),
    }
}
