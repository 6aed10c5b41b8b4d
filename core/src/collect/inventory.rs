// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Live Inventory Collector
//!
//! Walks the configured virtualization hosts, lists their containers and
//! resolves each running one to an IP through its tag string. Hosts are
//! queried sequentially; an unreachable host is skipped with a warning and
//! never aborts the scan.

use std::collections::BTreeMap;

use anyhow::Context;
use regex::Regex;

use tally_common::config::InventorySettings;
use tally_common::models::workload::LiveWorkload;
use tally_common::{error, info, warn};

use crate::remote::RemoteShell;

/// A row of `pct list` output: (vmid, status, name).
type ListingRow = (String, String, String);

/// Scans all hosts and returns running workloads keyed by lower-cased name.
/// A duplicate name overwrites the earlier workload.
pub async fn scan(
    shell: &dyn RemoteShell,
    settings: &InventorySettings,
) -> BTreeMap<String, LiveWorkload> {
    let mut workloads = BTreeMap::new();

    let pattern = match subnet_pattern(&settings.subnet_prefix) {
        Ok(pattern) => pattern,
        Err(e) => {
            error!("Invalid inventory subnet prefix: {e:#}");
            return workloads;
        }
    };

    for host in &settings.hosts {
        let target = format!("{}@{}", settings.user, host);
        let listing = match shell.run(&target, "pct list").await {
            Ok(output) => output,
            Err(e) => {
                warn!("Skipping unreachable inventory host {host}: {e:#}");
                continue;
            }
        };

        for (vmid, status, name) in parse_listing(&listing) {
            if status != "running" {
                continue;
            }

            let command = format!("pct config {vmid}");
            let config = match shell.run(&target, &command).await {
                Ok(output) => output,
                Err(e) => {
                    warn!("Failed to read config of workload {vmid} on {host}: {e:#}");
                    continue;
                }
            };

            // Workloads without an IP tag are simply not part of the audit.
            if let Some(ip) = extract_tagged_ip(&config, &pattern) {
                let workload = LiveWorkload::new(&name, ip, host, &vmid);
                workloads.insert(workload.name.clone(), workload);
            }
        }
    }

    info!(
        "Found {} live workloads reporting an IP tag",
        workloads.len()
    );
    workloads
}

/// Parses tabular `pct list` output, skipping the header row. Rows with
/// fewer than three columns are ignored.
pub fn parse_listing(output: &str) -> Vec<ListingRow> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(vmid), Some(status), Some(name)) => {
                    Some((vmid.to_string(), status.to_string(), name.to_string()))
                }
                _ => None,
            }
        })
        .collect()
}

/// Finds the first subnet-prefixed IPv4 in the workload's `tags:` line,
/// e.g. `tags: 192.168.1.74;community-script`.
pub fn extract_tagged_ip(config_output: &str, pattern: &Regex) -> Option<String> {
    let tags_line = config_output
        .lines()
        .find(|line| line.starts_with("tags:"))?;

    pattern.find(tags_line).map(|m| m.as_str().to_string())
}

/// Builds the tag-matching pattern for a dotted subnet prefix.
pub fn subnet_pattern(prefix: &str) -> anyhow::Result<Regex> {
    Regex::new(&format!(r"{}\.\d{{1,3}}", regex::escape(prefix)))
        .with_context(|| format!("building IP pattern for prefix '{prefix}'"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
