// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Report Rendering
//!
//! Pure functions from an [`AuditReport`] to its two output shapes: a
//! Markdown document grouped by severity (mismatches, then warnings, then
//! consistent services, then statistics) and a JSON dump with the same
//! information. Writing the result anywhere is the caller's business.

use serde::Serialize;

use tally_common::models::entry::{AuditEntry, Status};

use crate::reconcile::AuditReport;

/// Renders the Markdown report.
pub fn markdown(report: &AuditReport) -> String {
    let timestamp = report.generated_at.format("%Y-%m-%d %H:%M:%S");

    let ok = report.count(Status::Ok);
    let warnings = report.count(Status::MissingReservation);
    let errors = report.count(Status::IpMismatch);
    let total = report.total();

    let mut out = String::new();

    out.push_str(&format!(
        "# IP Address Consistency Audit Report\n\n\
         **Generated:** {timestamp}\n\n\
         ## Summary\n\n\
         | Status | Count | Description |\n\
         |--------|-------|-------------|\n\
         | OK | {ok} | All systems consistent |\n\
         | WARNING | {warnings} | Missing DHCP reservation |\n\
         | ERROR | {errors} | IP mismatch detected |\n\
         | **Total** | **{total}** | Services audited |\n\n\
         ---\n\n"
    ));

    if errors > 0 {
        out.push_str("## ERRORS - IP Mismatches (Urgent Fix Required)\n\n");
        out.push_str("| Service | Declared IP | Live IP | Issue |\n");
        out.push_str("|---------|-------------|---------|-------|\n");
        for entry in report.by_status(Status::IpMismatch) {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                entry.service,
                entry.declared_ip,
                entry.live_ip.as_deref().unwrap_or("N/A"),
                entry.issue.as_deref().unwrap_or_default()
            ));
        }
        out.push_str("\n---\n\n");
    }

    if warnings > 0 {
        out.push_str("## WARNINGS - Missing DHCP Reservations\n\n");
        out.push_str("These services should have DHCP reservations to prevent IP changes:\n\n");
        out.push_str("| Service | IP Address | Port | Action Needed |\n");
        out.push_str("|---------|------------|------|---------------|\n");
        for entry in report.by_status(Status::MissingReservation) {
            out.push_str(&format!(
                "| {} | {} | {} | Add DHCP reservation |\n",
                entry.service, entry.declared_ip, entry.port
            ));
        }
        out.push_str("\n---\n\n");
    }

    if ok > 0 {
        out.push_str("## OK - Consistent Configuration\n\n");
        out.push_str("| Service | IP Address | DHCP Reserved | DHCP Hostname |\n");
        out.push_str("|---------|------------|---------------|---------------|\n");
        for entry in report.by_status(Status::Ok) {
            out.push_str(&format!(
                "| {} | {} | Yes | {} |\n",
                entry.service,
                entry.declared_ip,
                entry.dhcp_hostname.as_deref().unwrap_or("N/A")
            ));
        }
        out.push_str("\n---\n\n");
    }

    out.push_str(&format!(
        "## Audit Statistics\n\n\
         - **Declared Services:** {total}\n\
         - **DHCP Reservations:** {}\n\
         - **Coverage:** {ok}/{total} services have DHCP reservations ({}%)\n\n\
         ---\n\n",
        report.reservation_count,
        report.coverage_percent()
    ));

    out.push_str("## Recommended Actions\n\n");

    if errors > 0 {
        out.push_str("### Critical (Fix Immediately)\n\n");
        for entry in report.by_status(Status::IpMismatch) {
            out.push_str(&format!(
                "1. **{}**: Update the proxy services file IP from `{}` to `{}`\n",
                entry.service,
                entry.declared_ip,
                entry.live_ip.as_deref().unwrap_or("N/A")
            ));
        }
        out.push('\n');
    }

    if warnings > 0 {
        out.push_str("### Important (Fix Soon)\n\n");
        for entry in report.by_status(Status::MissingReservation) {
            out.push_str(&format!(
                "1. **{}**: Add DHCP reservation for IP `{}`\n",
                entry.service, entry.declared_ip
            ));
        }
        out.push('\n');
    }

    out.push_str("---\n\n*Report generated by `tally audit`*\n");

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    timestamp: String,
    results: JsonBuckets<'a>,
    statistics: JsonStatistics,
}

#[derive(Serialize)]
struct JsonBuckets<'a> {
    ok: Vec<&'a AuditEntry>,
    missing_reservation: Vec<&'a AuditEntry>,
    ip_mismatch: Vec<&'a AuditEntry>,
}

#[derive(Serialize)]
struct JsonStatistics {
    total_services: usize,
    ok: usize,
    warnings: usize,
    errors: usize,
    dhcp_reservations: usize,
    coverage_percent: usize,
}

/// Renders the machine-readable report.
pub fn json(report: &AuditReport) -> anyhow::Result<String> {
    let payload = JsonReport {
        timestamp: report.generated_at.to_rfc3339(),
        results: JsonBuckets {
            ok: report.by_status(Status::Ok).collect(),
            missing_reservation: report.by_status(Status::MissingReservation).collect(),
            ip_mismatch: report.by_status(Status::IpMismatch).collect(),
        },
        statistics: JsonStatistics {
            total_services: report.total(),
            ok: report.count(Status::Ok),
            warnings: report.count(Status::MissingReservation),
            errors: report.count(Status::IpMismatch),
            dhcp_reservations: report.reservation_count,
            coverage_percent: report.coverage_percent(),
        },
    };

    Ok(serde_json::to_string_pretty(&payload)?)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use chrono::Local;
    use tally_common::models::entry::AuditEntry;

    use super::*;

    fn entry(service: &str, status: Status, live_ip: Option<&str>) -> AuditEntry {
        AuditEntry {
            service: service.to_string(),
            declared_ip: String::from("192.168.1.50"),
            port: String::from("8080"),
            dhcp_reserved: status != Status::MissingReservation,
            dhcp_hostname: Some(String::from("widget")),
            dns_domain: String::from("widget.internal.lab.lan"),
            dns_target: Some(String::from("192.168.1.110")),
            dns_points_at_proxy: true,
            live_ip: live_ip.map(String::from),
            status,
            issue: match status {
                Status::Ok => None,
                Status::MissingReservation => Some(String::from("Missing DHCP reservation")),
                Status::IpMismatch => Some(String::from(
                    "IP mismatch: declared=192.168.1.50, live=192.168.1.51",
                )),
            },
        }
    }

    fn report(entries: Vec<AuditEntry>) -> AuditReport {
        AuditReport {
            generated_at: Local::now(),
            reservation_count: entries.len(),
            entries,
        }
    }

    #[test]
    fn markdown_orders_sections_by_severity() {
        let md = markdown(&report(vec![
            entry("ok-service", Status::Ok, Some("192.168.1.50")),
            entry("warn-service", Status::MissingReservation, None),
            entry("bad-service", Status::IpMismatch, Some("192.168.1.51")),
        ]));

        let errors_at = md.find("## ERRORS").unwrap();
        let warnings_at = md.find("## WARNINGS").unwrap();
        let ok_at = md.find("## OK").unwrap();
        let stats_at = md.find("## Audit Statistics").unwrap();

        assert!(errors_at < warnings_at);
        assert!(warnings_at < ok_at);
        assert!(ok_at < stats_at);
    }

    #[test]
    fn markdown_skips_empty_sections() {
        let md = markdown(&report(vec![entry(
            "ok-service",
            Status::Ok,
            Some("192.168.1.50"),
        )]));

        assert!(!md.contains("## ERRORS"));
        assert!(!md.contains("## WARNINGS"));
        assert!(md.contains("## OK - Consistent Configuration"));
    }

    #[test]
    fn warning_rows_carry_the_remediation() {
        let md = markdown(&report(vec![entry(
            "widget-service",
            Status::MissingReservation,
            None,
        )]));

        assert!(md.contains("| widget-service | 192.168.1.50 | 8080 | Add DHCP reservation |"));
        assert!(md.contains("Add DHCP reservation for IP `192.168.1.50`"));
    }

    #[test]
    fn statistics_footer_reports_coverage() {
        let md = markdown(&report(vec![
            entry("a-service", Status::Ok, None),
            entry("b-service", Status::MissingReservation, None),
        ]));

        assert!(md.contains("1/2 services have DHCP reservations (50%)"));
    }

    #[test]
    fn empty_report_renders_without_sections() {
        let md = markdown(&report(Vec::new()));
        assert!(md.contains("| **Total** | **0** | Services audited |"));
        assert!(md.contains("(0%)"));
    }

    #[test]
    fn json_buckets_and_statistics_line_up() {
        let payload = json(&report(vec![
            entry("ok-service", Status::Ok, Some("192.168.1.50")),
            entry("bad-service", Status::IpMismatch, Some("192.168.1.51")),
        ]))
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["statistics"]["total_services"], 2);
        assert_eq!(value["statistics"]["errors"], 1);
        assert_eq!(value["results"]["ip_mismatch"][0]["service"], "bad-service");
        assert_eq!(value["results"]["missing_reservation"].as_array().unwrap().len(), 0);
    }
}
