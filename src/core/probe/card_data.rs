// src/core/probe/card_data.rs

use tracing::{debug, info, warn};

use crate::core::catalog;
use crate::core::client::AccountApi;
use crate::core::models::Issue;

const PAYMENT_INTENT_PAGE_LIMIT: u8 = 20;
const PAYMENT_METHOD_PAGE_LIMIT: u8 = 10;

/// Probes payment-card handling: SCA coverage, payment method attachment,
/// and the PCI ground rules.
pub async fn run_card_data_probe<C: AccountApi + Sync>(client: &C) -> Vec<Issue> {
    info!("Starting card data handling probe.");
    let mut issues = Vec::new();

    check_sca_coverage(client, &mut issues).await;
    issues.push(Issue::standing(&catalog::SCA_BEST_PRACTICE));

    check_payment_method_attachment(client, &mut issues).await;
    issues.push(Issue::standing(&catalog::PCI_COMPLIANCE));

    issues.push(Issue::standing(&catalog::CARD_DATA_SECURITY));
    issues.push(Issue::standing(&catalog::CVV_HANDLING));

    info!(findings = issues.len(), "Card data probe finished.");
    issues
}

/// Flags the account when fewer than half of the recent payment intents
/// request 3-D Secure. An empty sample proves nothing and is skipped.
async fn check_sca_coverage<C: AccountApi + Sync>(client: &C, issues: &mut Vec<Issue>) {
    let intents = match client.list_payment_intents(PAYMENT_INTENT_PAGE_LIMIT).await {
        Ok(intents) => intents,
        Err(e) if e.is_permission_denied() => {
            issues.push(Issue::standing(&catalog::SCA_PERMISSION_DENIED));
            return;
        }
        Err(e) => {
            warn!(error = %e, "Payment intent listing failed.");
            return;
        }
    };

    let total = intents.len();
    let secured = intents
        .iter()
        .filter(|intent| intent.requests_three_d_secure())
        .count();

    if total > 0 && secured * 2 < total {
        debug!(secured, total, "3-D Secure coverage below one half.");
        issues.push(Issue::standing(&catalog::SCA_COMPLIANCE));
    }
}

async fn check_payment_method_attachment<C: AccountApi + Sync>(client: &C, issues: &mut Vec<Issue>) {
    match client.list_payment_methods(PAYMENT_METHOD_PAGE_LIMIT).await {
        Ok(methods) => {
            let unattached = methods.iter().filter(|m| m.customer.is_none()).count();
            if unattached > 0 {
                issues.push(Issue::detailed(
                    &catalog::UNATTACHED_PAYMENT_METHODS,
                    format!("Found {unattached} payment method(s) not attached to a customer"),
                ));
            }
        }
        Err(e) => debug!(error = %e, "Payment method listing unavailable."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::{CardOptions, PaymentIntent, PaymentMethod, PaymentMethodOptions};
    use crate::core::testing::{Call, StubApi};

    fn kinds(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.kind.as_str()).collect()
    }

    fn intent(id: &str, three_d_secure: Option<&str>) -> PaymentIntent {
        PaymentIntent {
            id: id.to_string(),
            payment_method_options: three_d_secure.map(|mode| PaymentMethodOptions {
                card: Some(CardOptions {
                    request_three_d_secure: Some(mode.to_string()),
                }),
            }),
        }
    }

    fn method(id: &str, customer: Option<&str>) -> PaymentMethod {
        PaymentMethod {
            id: id.to_string(),
            customer: customer.map(String::from),
        }
    }

    #[tokio::test]
    async fn low_sca_coverage_is_flagged() {
        let mut stub = StubApi::empty_account();
        stub.payment_intents = Call::Ok(vec![
            intent("pi_1", Some("automatic")),
            intent("pi_2", None),
            intent("pi_3", None),
        ]);

        let issues = run_card_data_probe(&stub).await;
        assert!(issues.iter().any(|i| i.kind == "sca_compliance"));
    }

    #[tokio::test]
    async fn majority_sca_coverage_passes() {
        let mut stub = StubApi::empty_account();
        stub.payment_intents = Call::Ok(vec![
            intent("pi_1", Some("automatic")),
            intent("pi_2", Some("any")),
            intent("pi_3", None),
        ]);

        let issues = run_card_data_probe(&stub).await;
        assert!(!issues.iter().any(|i| i.kind == "sca_compliance"));
    }

    #[tokio::test]
    async fn exactly_half_coverage_passes() {
        let mut stub = StubApi::empty_account();
        stub.payment_intents = Call::Ok(vec![
            intent("pi_1", Some("automatic")),
            intent("pi_2", None),
        ]);

        let issues = run_card_data_probe(&stub).await;
        assert!(!issues.iter().any(|i| i.kind == "sca_compliance"));
    }

    #[tokio::test]
    async fn empty_sample_makes_no_sca_claim() {
        let stub = StubApi::empty_account();
        let issues = run_card_data_probe(&stub).await;
        assert_eq!(
            kinds(&issues),
            vec![
                "sca_best_practice",
                "pci_compliance",
                "card_data_security",
                "cvv_handling",
            ]
        );
    }

    #[tokio::test]
    async fn unattached_payment_methods_are_flagged_once() {
        let mut stub = StubApi::empty_account();
        stub.payment_methods = Call::Ok(vec![
            method("pm_1", None),
            method("pm_2", None),
            method("pm_3", Some("cus_1")),
        ]);

        let issues = run_card_data_probe(&stub).await;
        let unattached: Vec<_> = issues
            .iter()
            .filter(|i| i.kind == "unattached_payment_methods")
            .collect();
        assert_eq!(unattached.len(), 1);
        assert!(unattached[0].message.contains('2'));
    }

    #[tokio::test]
    async fn permission_denials_leave_only_gaps_and_reminders() {
        let mut stub = StubApi::empty_account();
        stub.payment_intents = Call::Denied;
        stub.payment_methods = Call::Denied;

        let issues = run_card_data_probe(&stub).await;
        assert_eq!(
            kinds(&issues),
            vec![
                "sca_permission_denied",
                "sca_best_practice",
                "pci_compliance",
                "card_data_security",
                "cvv_handling",
            ]
        );
    }
}
