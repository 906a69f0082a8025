// src/report.rs

//! Renders a finished [`ScanReport`] as console text, JSON, or a standalone
//! HTML page. Pure formatting; nothing here inspects the account.

use std::fmt::Write as _;

use crate::core::models::{Issue, ScanReport, Severity};

const RULE_WIDTH: usize = 60;

/// Plain-text report for the terminal, grouped by severity.
pub fn render_console(report: &ScanReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Stripe Integration Risk Scan Report");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out);
    let _ = writeln!(out, "Risk Score: {}%", report.risk_score.percentage);
    let _ = writeln!(out, "  Total Issues: {}", report.risk_score.total);
    let _ = writeln!(
        out,
        "  High: {} | Medium: {} | Low: {}",
        report.risk_score.high, report.risk_score.medium, report.risk_score.low
    );

    if let Some(account_id) = &report.account_id {
        let _ = writeln!(out);
        let _ = writeln!(out, "Account ID: {account_id}");
    }

    console_section(&mut out, report, Severity::High, "HIGH SEVERITY ISSUES");
    console_section(&mut out, report, Severity::Medium, "MEDIUM SEVERITY ISSUES");
    console_section(&mut out, report, Severity::Low, "LOW SEVERITY / INFORMATIONAL");

    if report.issues.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "No issues found! Your Stripe integration looks secure.");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    out
}

fn console_section(out: &mut String, report: &ScanReport, severity: Severity, title: &str) {
    let issues: Vec<&Issue> = report
        .issues
        .iter()
        .filter(|issue| issue.severity == severity)
        .collect();
    if issues.is_empty() {
        return;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{title}:");
    for (index, issue) in issues.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {}", index + 1, issue.kind);
        let _ = writeln!(out, "   {}", issue.message);
        let _ = writeln!(out, "   -> {}", issue.recommendation);
    }
}

/// Pretty-printed JSON in the shape downstream tooling consumes.
pub fn render_json(report: &ScanReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Self-contained HTML page mirroring the console layout.
pub fn render_html(report: &ScanReport) -> String {
    let score_color = match report.risk_score.percentage {
        70.. => "#dc2626",
        40.. => "#d97706",
        _ => "#16a34a",
    };

    let account_line = report
        .account_id
        .as_deref()
        .map(|id| format!("<p><strong>Account ID:</strong> {}</p>", escape_html(id)))
        .unwrap_or_default();

    let mut sections = String::new();
    sections.push_str(&html_section(report, Severity::High, "High Severity Issues"));
    sections.push_str(&html_section(report, Severity::Medium, "Medium Severity Issues"));
    sections.push_str(&html_section(
        report,
        Severity::Low,
        "Low Severity / Informational",
    ));
    if report.issues.is_empty() {
        sections.push_str(
            "<div class=\"issue\" style=\"border-color: #16a34a;\"><div class=\"issue-type\">No issues found! Your Stripe integration looks secure.</div></div>",
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Stripe Integration Risk Scan Report</title>
  <style>
    body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 40px; background: #f5f5f5; }}
    .container {{ max-width: 1200px; margin: 0 auto; background: white; padding: 40px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
    h1 {{ color: #1a1a1a; border-bottom: 3px solid #635bff; padding-bottom: 10px; }}
    .risk-score {{ font-size: 48px; font-weight: bold; color: {score_color}; margin: 20px 0; }}
    .stats {{ display: flex; gap: 20px; margin: 20px 0; }}
    .stat {{ padding: 15px; background: #f9f9f9; border-radius: 6px; flex: 1; }}
    .stat-label {{ color: #666; font-size: 14px; }}
    .stat-value {{ font-size: 24px; font-weight: bold; margin-top: 5px; }}
    .high {{ color: #dc2626; }}
    .medium {{ color: #d97706; }}
    .low {{ color: #2563eb; }}
    .issue {{ margin: 20px 0; padding: 15px; border-left: 4px solid; border-radius: 4px; background: #f9f9f9; }}
    .issue.high {{ border-color: #dc2626; }}
    .issue.medium {{ border-color: #d97706; }}
    .issue.low {{ border-color: #2563eb; }}
    .issue-type {{ font-weight: bold; font-size: 18px; margin-bottom: 8px; }}
    .issue-message {{ margin: 8px 0; }}
    .issue-recommendation {{ color: #666; font-style: italic; margin-top: 8px; }}
    .section {{ margin: 40px 0; }}
    .section-title {{ font-size: 24px; font-weight: bold; margin-bottom: 20px; padding-bottom: 10px; border-bottom: 2px solid #e5e5e5; }}
  </style>
</head>
<body>
  <div class="container">
    <h1>Stripe Integration Risk Scan Report</h1>
    <div class="risk-score">{percentage}%</div>
    <div class="stats">
      <div class="stat">
        <div class="stat-label">Total Issues</div>
        <div class="stat-value">{total}</div>
      </div>
      <div class="stat">
        <div class="stat-label">High Severity</div>
        <div class="stat-value high">{high}</div>
      </div>
      <div class="stat">
        <div class="stat-label">Medium Severity</div>
        <div class="stat-value medium">{medium}</div>
      </div>
      <div class="stat">
        <div class="stat-label">Low Severity</div>
        <div class="stat-value low">{low}</div>
      </div>
    </div>
    {account_line}
    <p><strong>Scan Date:</strong> {scan_date}</p>
    {sections}
  </div>
</body>
</html>"#,
        percentage = report.risk_score.percentage,
        total = report.risk_score.total,
        high = report.risk_score.high,
        medium = report.risk_score.medium,
        low = report.risk_score.low,
        scan_date = report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

fn html_section(report: &ScanReport, severity: Severity, title: &str) -> String {
    let issues: Vec<&Issue> = report
        .issues
        .iter()
        .filter(|issue| issue.severity == severity)
        .collect();
    if issues.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, "<div class=\"section\">");
    let _ = writeln!(
        out,
        "  <div class=\"section-title {severity}\">{title}</div>"
    );
    for issue in issues {
        let _ = writeln!(out, "  <div class=\"issue {}\">", issue.severity);
        let _ = writeln!(
            out,
            "    <div class=\"issue-type\">{}</div>",
            escape_html(&issue.kind)
        );
        let _ = writeln!(
            out,
            "    <div class=\"issue-message\">{}</div>",
            escape_html(&issue.message)
        );
        let _ = writeln!(
            out,
            "    <div class=\"issue-recommendation\">{}</div>",
            escape_html(&issue.recommendation)
        );
        let _ = writeln!(out, "  </div>");
    }
    let _ = writeln!(out, "</div>");
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::core::models::RiskScore;

    fn sample_report() -> ScanReport {
        let issues = vec![
            Issue {
                severity: Severity::High,
                kind: "signature_verification".to_string(),
                message: "Verify webhook signature verification is implemented".to_string(),
                recommendation: "Always verify webhook signatures".to_string(),
            },
            Issue {
                severity: Severity::Low,
                kind: "gdpr_compliance".to_string(),
                message: "Ensure GDPR compliance for <EU> customers".to_string(),
                recommendation: "Implement data minimization".to_string(),
            },
        ];
        let risk_score = RiskScore::from_issues(&issues);
        ScanReport {
            issues,
            risk_score,
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            account_id: Some("acct_123".to_string()),
        }
    }

    #[test]
    fn console_report_groups_by_severity() {
        let rendered = render_console(&sample_report());
        assert!(rendered.contains("Risk Score: 55%"));
        assert!(rendered.contains("HIGH SEVERITY ISSUES:"));
        assert!(rendered.contains("LOW SEVERITY / INFORMATIONAL:"));
        assert!(!rendered.contains("MEDIUM SEVERITY ISSUES:"));
        assert!(rendered.contains("Account ID: acct_123"));
    }

    #[test]
    fn console_report_handles_a_clean_scan() {
        let report = ScanReport {
            issues: Vec::new(),
            risk_score: RiskScore::from_issues(&[]),
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            account_id: None,
        };
        let rendered = render_console(&report);
        assert!(rendered.contains("No issues found!"));
        assert!(!rendered.contains("Account ID:"));
    }

    #[test]
    fn json_report_uses_the_expected_shape() {
        let rendered = render_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["riskScore"]["percentage"], 55);
        assert_eq!(value["issues"][0]["type"], "signature_verification");
        assert_eq!(value["accountId"], "acct_123");
        assert!(value["timestamp"].is_i64());
    }

    #[test]
    fn html_report_escapes_untrusted_text() {
        let rendered = render_html(&sample_report());
        assert!(rendered.contains("&lt;EU&gt;"));
        assert!(!rendered.contains("<EU>"));
        assert!(rendered.contains("class=\"issue high\""));
    }

    #[test]
    fn html_escaping_covers_the_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#039;"
        );
    }
}
