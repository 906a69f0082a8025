// src/core/probe/mod.rs

// This file acts as the public interface for the `probe` module and owns
// the orchestration across the fixed probe battery.
pub mod api_usage;
pub mod card_data;
pub mod idempotency;
pub mod personal_data;
pub mod webhooks;

use chrono::Utc;
use tracing::{debug, info};

use crate::core::client::AccountApi;
use crate::core::models::{RiskScore, ScanReport};

use self::api_usage::run_api_usage_probe;
use self::card_data::run_card_data_probe;
use self::idempotency::run_idempotency_probe;
use self::personal_data::run_personal_data_probe;
use self::webhooks::run_webhook_probe;

/// Executes every probe concurrently and reduces their findings to a single
/// report.
///
/// `tokio::join!` waits for the whole battery, so a slow probe delays but
/// never aborts the others. Each probe contains its own remote failures; the
/// only errors that can escape here are programming defects, which are
/// allowed to propagate. The final issue sequence is the fixed concatenation
/// of probe outputs in declaration order, so completion timing never changes
/// the result.
pub async fn run_full_scan<C>(client: &C) -> ScanReport
where
    C: AccountApi + Sync,
{
    info!("Starting full account scan.");

    let (api_usage, webhooks, idempotency, card_data, personal_data) = tokio::join!(
        run_api_usage_probe(client),
        run_webhook_probe(client),
        run_idempotency_probe(client),
        run_card_data_probe(client),
        run_personal_data_probe(client),
    );

    let mut issues = api_usage;
    issues.extend(webhooks);
    issues.extend(idempotency);
    issues.extend(card_data);
    issues.extend(personal_data);

    let risk_score = RiskScore::from_issues(&issues);

    // Best-effort identity lookup; a failure only leaves the field empty.
    let account_id = match client.retrieve_account().await {
        Ok(account) => Some(account.id),
        Err(e) => {
            debug!(error = %e, "Account identity lookup failed.");
            None
        }
    };

    info!(
        issues = issues.len(),
        percentage = risk_score.percentage,
        "Scan finished."
    );

    ScanReport {
        issues,
        risk_score,
        timestamp: Utc::now(),
        account_id,
    }
}
