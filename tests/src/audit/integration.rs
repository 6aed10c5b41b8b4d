// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::path::Path;

use tally_common::config::{
    AuditConfig, AuditSettings, DhcpSettings, DnsSettings, InventorySettings, ProxySettings,
    TimeoutSettings,
};
use tally_common::models::entry::Status;
use tally_core::{audit, report};

use crate::utils::FakeShell;

const SERVICES_YML: &str = r#"
http:
  services:
    grafana-service:
      loadBalancer:
        servers:
          - url: "http://192.168.1.60:3000"
    influxdb-service:
      loadBalancer:
        servers:
          - url: "http://192.168.1.74:8086"
    jellyfin-service:
      loadBalancer:
        servers:
          - url: "http://192.168.1.80:8096"
    nas-service:
      loadBalancer:
        servers:
          - url: "http://192.168.1.50:5000"
"#;

const KEA_CONFIG: &str = r#"
{
  "Dhcp4": {
    "subnet4": [
      {
        "subnet": "192.168.1.0/24",
        "reservations": [
          { "hw-address": "aa:bb:cc:00:00:60", "ip-address": "192.168.1.60", "hostname": "grafana" },
          { "hw-address": "aa:bb:cc:00:00:74", "ip-address": "192.168.1.74", "hostname": "influxdb" },
          { "hw-address": "aa:bb:cc:00:00:50", "ip-address": "192.168.1.50", "hostname": "nas" }
        ]
      }
    ]
  }
}
"#;

const PCT_LIST: &str = "\
VMID       Status     Lock         Name
100        running                 grafana
101        running                 influxdb
102        running                 jellyfin
103        stopped                 forge
";

fn test_config(services_path: &Path) -> AuditConfig {
    AuditConfig {
        proxy: ProxySettings {
            services_path: services_path.to_path_buf(),
        },
        dhcp: DhcpSettings {
            host: String::from("dhcp-01"),
            user: String::from("root"),
            config_path: String::from("/etc/kea/kea-dhcp4.conf"),
        },
        dns: DnsSettings {
            // Nothing listens here; the DNS stage must degrade to empty.
            base_url: String::from("http://127.0.0.1:1"),
            username: String::from("audit"),
            password: String::from("secret"),
        },
        inventory: InventorySettings {
            hosts: vec![String::from("pve-01")],
            user: String::from("root"),
            subnet_prefix: String::from("192.168.1"),
        },
        audit: AuditSettings {
            proxy_ip: String::from("192.168.1.110"),
            service_suffix: String::from("-service"),
            internal_zone: String::from("internal.lab.lan"),
            physical_services: vec![String::from("nas-service")],
            report_path: Default::default(),
        },
        timeouts: TimeoutSettings {
            connect_secs: 1,
            command_secs: 1,
            http_secs: 1,
        },
    }
}

fn homelab_shell() -> FakeShell {
    FakeShell::new()
        .respond("root@dhcp-01", "cat /etc/kea/kea-dhcp4.conf", KEA_CONFIG)
        .respond("root@pve-01", "pct list", PCT_LIST)
        .respond(
            "root@pve-01",
            "pct config 100",
            "arch: amd64\ntags: 192.168.1.60;community-script\n",
        )
        .respond(
            "root@pve-01",
            "pct config 101",
            "arch: amd64\ntags: 192.168.1.99;community-script\n",
        )
        .respond(
            "root@pve-01",
            "pct config 102",
            "arch: amd64\ntags: 192.168.1.80;media\n",
        )
}

#[tokio::test]
async fn full_audit_classifies_each_service() {
    let dir = tempfile::tempdir().unwrap();
    let services = dir.path().join("services.yml");
    std::fs::write(&services, SERVICES_YML).unwrap();

    let config = test_config(&services);
    let shell = homelab_shell();

    let result = audit::run(&config, &shell).await;

    assert_eq!(result.total(), 4);
    assert_eq!(result.reservation_count, 3);

    let names: Vec<&str> = result.entries.iter().map(|e| e.service.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "grafana-service",
            "influxdb-service",
            "jellyfin-service",
            "nas-service"
        ],
        "entries must come out in service-name order"
    );

    let grafana = &result.entries[0];
    assert_eq!(grafana.status, Status::Ok);
    assert_eq!(grafana.live_ip.as_deref(), Some("192.168.1.60"));
    assert_eq!(grafana.dhcp_hostname.as_deref(), Some("grafana"));
    assert_eq!(grafana.dns_domain, "grafana.internal.lab.lan");

    let influxdb = &result.entries[1];
    assert_eq!(influxdb.status, Status::IpMismatch);
    assert_eq!(influxdb.live_ip.as_deref(), Some("192.168.1.99"));
    assert_eq!(
        influxdb.issue.as_deref(),
        Some("IP mismatch: declared=192.168.1.74, live=192.168.1.99")
    );

    // The workload is running at the declared IP, but without a reservation
    // the warning outranks the live evidence.
    let jellyfin = &result.entries[2];
    assert_eq!(jellyfin.status, Status::MissingReservation);
    assert!(!jellyfin.dhcp_reserved);

    // Physical hosts never appear in the inventory; skipping the live match
    // keeps them consistent.
    let nas = &result.entries[3];
    assert_eq!(nas.status, Status::Ok);
    assert_eq!(nas.live_ip, None);

    assert!(result.has_mismatches());
    assert!(result.has_warnings());
    assert_eq!(result.coverage_percent(), 50);
}

#[tokio::test]
async fn dns_outage_never_gates_status() {
    let dir = tempfile::tempdir().unwrap();
    let services = dir.path().join("services.yml");
    std::fs::write(&services, SERVICES_YML).unwrap();

    let result = audit::run(&test_config(&services), &homelab_shell()).await;

    // The DNS endpoint is unreachable in every test; statuses must be
    // unaffected and the comparison must report "not at proxy".
    for entry in &result.entries {
        assert_eq!(entry.dns_target, None);
        assert!(!entry.dns_points_at_proxy);
    }
}

#[tokio::test]
async fn rendered_reports_reflect_the_findings() {
    let dir = tempfile::tempdir().unwrap();
    let services = dir.path().join("services.yml");
    std::fs::write(&services, SERVICES_YML).unwrap();

    let result = audit::run(&test_config(&services), &homelab_shell()).await;

    let md = report::markdown(&result);
    assert!(md.contains("## ERRORS - IP Mismatches (Urgent Fix Required)"));
    assert!(md.contains(
        "| influxdb-service | 192.168.1.74 | 192.168.1.99 | \
         IP mismatch: declared=192.168.1.74, live=192.168.1.99 |"
    ));
    assert!(md.contains("| jellyfin-service | 192.168.1.80 | 8096 | Add DHCP reservation |"));
    assert!(md.contains("| grafana-service | 192.168.1.60 | Yes | grafana |"));
    assert!(md.contains("2/4 services have DHCP reservations (50%)"));

    let json: serde_json::Value = serde_json::from_str(&report::json(&result).unwrap()).unwrap();
    assert_eq!(json["statistics"]["total_services"], 4);
    assert_eq!(json["statistics"]["errors"], 1);
    assert_eq!(json["statistics"]["warnings"], 1);
    assert_eq!(json["statistics"]["dhcp_reservations"], 3);
    assert_eq!(
        json["results"]["ip_mismatch"][0]["service"],
        "influxdb-service"
    );
}

#[tokio::test]
async fn repeated_runs_are_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let services = dir.path().join("services.yml");
    std::fs::write(&services, SERVICES_YML).unwrap();

    let config = test_config(&services);

    let first = audit::run(&config, &homelab_shell()).await;
    let second = audit::run(&config, &homelab_shell()).await;

    assert_eq!(first.entries, second.entries);
}

#[tokio::test]
async fn unreachable_sources_degrade_to_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let services = dir.path().join("services.yml");
    std::fs::write(&services, SERVICES_YML).unwrap();

    // Nothing is scripted: every SSH call fails, every dataset is empty.
    let result = audit::run(&test_config(&services), &FakeShell::new()).await;

    assert_eq!(result.total(), 4);
    assert_eq!(result.reservation_count, 0);
    assert!(!result.has_mismatches(), "no live evidence, no mismatch");
    assert!(
        result
            .entries
            .iter()
            .all(|e| e.status == Status::MissingReservation)
    );
}

#[tokio::test]
async fn missing_services_file_produces_an_empty_report() {
    let config = test_config(Path::new("/nonexistent/services.yml"));

    let result = audit::run(&config, &FakeShell::new()).await;

    assert_eq!(result.total(), 0);
    assert!(!result.has_mismatches());
    assert_eq!(result.coverage_percent(), 0);
}
