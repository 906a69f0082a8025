//! Static, read-only catalog of every issue kind the probes can emit,
//! complete with severity, default finding text, and remediation advice.
//! Keeping this data-driven means the scanner's guidance can be tuned
//! without touching probe logic.

use crate::core::models::{Issue, Severity};

/// The full definition of an issue kind.
///
/// `kind` is the stable machine-readable identifier that ends up on every
/// emitted [`Issue`]. `message` is the default finding text; probes override
/// it when a finding names a specific offending resource.
pub struct IssueKind {
    pub kind: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    pub recommendation: &'static str,
}

impl Issue {
    /// Builds an issue from a catalog entry with its default message.
    /// This is the constructor for standing reminders and account-wide
    /// findings.
    pub fn standing(kind: &IssueKind) -> Self {
        Self {
            severity: kind.severity,
            kind: kind.kind.to_string(),
            message: kind.message.to_string(),
            recommendation: kind.recommendation.to_string(),
        }
    }

    /// Builds an issue from a catalog entry with a message describing a
    /// specific offending resource.
    pub fn detailed(kind: &IssueKind, message: impl Into<String>) -> Self {
        Self {
            severity: kind.severity,
            kind: kind.kind.to_string(),
            message: message.into(),
            recommendation: kind.recommendation.to_string(),
        }
    }
}

// --- API key usage ---

pub static OVERLY_BROAD_KEY: IssueKind = IssueKind {
    kind: "overly_broad_key",
    severity: Severity::High,
    message: "API key appears to have full account access",
    recommendation: "Use restricted API keys with minimal required permissions",
};

pub static RESTRICTED_KEY_DETECTED: IssueKind = IssueKind {
    kind: "restricted_key_detected",
    severity: Severity::Low,
    message: "Using restricted API key (good practice)",
    recommendation: "Continue using restricted keys for production",
};

pub static IDEMPOTENCY_CHECK: IssueKind = IssueKind {
    kind: "idempotency_check",
    severity: Severity::Medium,
    message: "Verify idempotency keys are used for all charge/payment operations",
    recommendation: "Always include an idempotency_key parameter for idempotent operations (charges, payments, refunds)",
};

pub static TEST_KEY_IN_PRODUCTION: IssueKind = IssueKind {
    kind: "test_key_in_production",
    severity: Severity::High,
    message: "Test API key detected, ensure this is not used in production",
    recommendation: "Use live keys (sk_live_...) in production environments",
};

// --- Webhook configuration ---

pub static NO_WEBHOOKS: IssueKind = IssueKind {
    kind: "no_webhooks",
    severity: Severity::Medium,
    message: "No webhook endpoints configured",
    recommendation: "Configure webhooks to handle asynchronous events (payment_intent.succeeded, charge.failed, etc.)",
};

pub static DISABLED_WEBHOOK: IssueKind = IssueKind {
    kind: "disabled_webhook",
    severity: Severity::High,
    message: "Webhook endpoint is disabled",
    recommendation: "Enable the webhook or remove it if no longer needed",
};

pub static INSECURE_WEBHOOK_URL: IssueKind = IssueKind {
    kind: "insecure_webhook_url",
    severity: Severity::High,
    message: "Webhook endpoint uses an insecure HTTP URL",
    recommendation: "Always use HTTPS for webhook endpoints",
};

pub static LOCALHOST_WEBHOOK: IssueKind = IssueKind {
    kind: "localhost_webhook",
    severity: Severity::Medium,
    message: "Webhook endpoint points to a loopback address",
    recommendation: "Remove localhost webhooks from production accounts",
};

pub static WEBHOOK_PERMISSION_DENIED: IssueKind = IssueKind {
    kind: "webhook_permission_denied",
    severity: Severity::Low,
    message: "Cannot access webhook endpoints (may need broader key permissions)",
    recommendation: "Grant webhook read permissions to audit webhook configuration",
};

pub static SIGNATURE_VERIFICATION: IssueKind = IssueKind {
    kind: "signature_verification",
    severity: Severity::High,
    message: "Verify webhook signature verification is implemented",
    recommendation: "Always verify webhook signatures using your Stripe webhook secret to prevent unauthorized requests",
};

pub static IDEMPOTENCY_HANDLING: IssueKind = IssueKind {
    kind: "idempotency_handling",
    severity: Severity::Medium,
    message: "Ensure webhook handlers are idempotent",
    recommendation: "Use idempotency keys or check processed-event flags to prevent duplicate processing",
};

// --- Idempotency patterns ---

pub static POTENTIAL_DUPLICATE_CHARGE: IssueKind = IssueKind {
    kind: "potential_duplicate_charge",
    severity: Severity::Medium,
    message: "Found charges with the same customer and amount within 5 minutes, may indicate missing idempotency",
    recommendation: "Use idempotency keys for all charge and payment operations to prevent duplicates",
};

pub static IDEMPOTENCY_PERMISSION_DENIED: IssueKind = IssueKind {
    kind: "idempotency_permission_denied",
    severity: Severity::Low,
    message: "Cannot access charges to check idempotency patterns",
    recommendation: "Grant charges read permission to audit idempotency usage",
};

pub static IDEMPOTENCY_BEST_PRACTICE: IssueKind = IssueKind {
    kind: "idempotency_best_practice",
    severity: Severity::High,
    message: "Idempotency keys are critical for payment operations",
    recommendation: "Always include an idempotency_key parameter when creating charges, payments, refunds, and other idempotent operations",
};

pub static REFUND_IDEMPOTENCY: IssueKind = IssueKind {
    kind: "refund_idempotency",
    severity: Severity::Medium,
    message: "Ensure refunds use idempotency keys",
    recommendation: "Use idempotency keys for refunds to prevent accidental duplicate refunds",
};

// --- Card data handling ---

pub static SCA_COMPLIANCE: IssueKind = IssueKind {
    kind: "sca_compliance",
    severity: Severity::High,
    message: "Low 3D Secure usage detected, may violate SCA requirements for EU",
    recommendation: "Enable 3D Secure (SCA) for all EU payments to comply with PSD2 regulations",
};

pub static SCA_PERMISSION_DENIED: IssueKind = IssueKind {
    kind: "sca_permission_denied",
    severity: Severity::Low,
    message: "Cannot access payment intents to check SCA compliance",
    recommendation: "Grant payment intents read permission to audit SCA usage",
};

pub static SCA_BEST_PRACTICE: IssueKind = IssueKind {
    kind: "sca_best_practice",
    severity: Severity::Medium,
    message: "Ensure SCA (3D Secure) is properly configured for EU customers",
    recommendation: "Use Stripe's automatic SCA handling or explicitly request 3D Secure for EU payments",
};

pub static UNATTACHED_PAYMENT_METHODS: IssueKind = IssueKind {
    kind: "unattached_payment_methods",
    severity: Severity::Medium,
    message: "Found payment methods not attached to customers",
    recommendation: "Attach payment methods to customers for better security and PCI compliance",
};

pub static PCI_COMPLIANCE: IssueKind = IssueKind {
    kind: "pci_compliance",
    severity: Severity::High,
    message: "Never store raw card data, use Stripe Payment Methods or Elements",
    recommendation: "Use Stripe.js and the Payment Intents API to handle card data securely without touching PCI scope",
};

pub static CARD_DATA_SECURITY: IssueKind = IssueKind {
    kind: "card_data_security",
    severity: Severity::High,
    message: "Verify card data never touches your servers",
    recommendation: "Use Stripe Elements or Checkout to collect card data directly, never send card numbers to your backend",
};

pub static CVV_HANDLING: IssueKind = IssueKind {
    kind: "cvv_handling",
    severity: Severity::Medium,
    message: "CVV should never be stored",
    recommendation: "CVV codes should only be collected at payment time and never stored or logged",
};

// --- Personal data handling ---

pub static SENSITIVE_PII_IN_METADATA: IssueKind = IssueKind {
    kind: "sensitive_pii_in_metadata",
    severity: Severity::High,
    message: "Customer metadata contains potentially sensitive PII",
    recommendation: "Avoid storing sensitive PII in Stripe metadata. Use secure storage solutions for SSN, passport numbers, etc.",
};

pub static PII_PERMISSION_DENIED: IssueKind = IssueKind {
    kind: "pii_permission_denied",
    severity: Severity::Low,
    message: "Cannot access customer data to check PII collection",
    recommendation: "Grant customers read permission to audit PII collection practices",
};

pub static METADATA_BEST_PRACTICE: IssueKind = IssueKind {
    kind: "metadata_best_practice",
    severity: Severity::Medium,
    message: "Review metadata usage for unnecessary PII collection",
    recommendation: "Only collect PII that is necessary for payment processing. Avoid storing SSN, passport numbers, or other sensitive identifiers in Stripe metadata",
};

pub static GDPR_COMPLIANCE: IssueKind = IssueKind {
    kind: "gdpr_compliance",
    severity: Severity::Low,
    message: "Ensure GDPR compliance for EU customers",
    recommendation: "Implement data minimization principles, only collect PII that is necessary and has a legal basis",
};

pub static DATA_RETENTION: IssueKind = IssueKind {
    kind: "data_retention",
    severity: Severity::Medium,
    message: "Implement data retention policies",
    recommendation: "Define and enforce data retention policies for customer PII. Delete data that is no longer needed",
};

pub static DATA_PORTABILITY: IssueKind = IssueKind {
    kind: "data_portability",
    severity: Severity::Low,
    message: "Ensure customers can access and export their data",
    recommendation: "Implement the GDPR right to data portability, allowing customers to export their data in a machine-readable format",
};

#[cfg(test)]
mod tests {
    use super::*;

    static ALL: &[&IssueKind] = &[
        &OVERLY_BROAD_KEY,
        &RESTRICTED_KEY_DETECTED,
        &IDEMPOTENCY_CHECK,
        &TEST_KEY_IN_PRODUCTION,
        &NO_WEBHOOKS,
        &DISABLED_WEBHOOK,
        &INSECURE_WEBHOOK_URL,
        &LOCALHOST_WEBHOOK,
        &WEBHOOK_PERMISSION_DENIED,
        &SIGNATURE_VERIFICATION,
        &IDEMPOTENCY_HANDLING,
        &POTENTIAL_DUPLICATE_CHARGE,
        &IDEMPOTENCY_PERMISSION_DENIED,
        &IDEMPOTENCY_BEST_PRACTICE,
        &REFUND_IDEMPOTENCY,
        &SCA_COMPLIANCE,
        &SCA_PERMISSION_DENIED,
        &SCA_BEST_PRACTICE,
        &UNATTACHED_PAYMENT_METHODS,
        &PCI_COMPLIANCE,
        &CARD_DATA_SECURITY,
        &CVV_HANDLING,
        &SENSITIVE_PII_IN_METADATA,
        &PII_PERMISSION_DENIED,
        &METADATA_BEST_PRACTICE,
        &GDPR_COMPLIANCE,
        &DATA_RETENTION,
        &DATA_PORTABILITY,
    ];

    #[test]
    fn catalog_kinds_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for entry in ALL {
            assert!(seen.insert(entry.kind), "duplicate catalog kind: {}", entry.kind);
        }
    }

    #[test]
    fn constructors_carry_catalog_fields() {
        let standing = Issue::standing(&NO_WEBHOOKS);
        assert_eq!(standing.kind, "no_webhooks");
        assert_eq!(standing.severity, Severity::Medium);
        assert_eq!(standing.message, NO_WEBHOOKS.message);

        let detailed = Issue::detailed(&DISABLED_WEBHOOK, "Webhook we_123 is disabled");
        assert_eq!(detailed.kind, "disabled_webhook");
        assert_eq!(detailed.severity, Severity::High);
        assert_eq!(detailed.message, "Webhook we_123 is disabled");
        assert_eq!(detailed.recommendation, DISABLED_WEBHOOK.recommendation);
    }
}
