// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # DHCP Reservation Collector
//!
//! Fetches the DHCP server's configuration over the remote shell and extracts
//! static reservations. The config is the one genuinely unstructured input in
//! the audit (a JSON-with-comments dialect with no reader available here), so
//! extraction works per reservation block: a block must carry a hardware
//! address and an IP, the hostname is optional and only honored when it sits
//! in the same block.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use tally_common::config::DhcpSettings;
use tally_common::models::reservation::DhcpReservation;
use tally_common::{error, info};

use crate::remote::RemoteShell;

/// One brace-enclosed block. Reservation objects in the config are flat, so
/// refusing nested braces keeps a block from swallowing its neighbors.
static BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^{}]*\}").unwrap());

static HW_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""hw-address"\s*:\s*"([^"]+)""#).unwrap());
static IP_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""ip-address"\s*:\s*"([^"]+)""#).unwrap());
static HOSTNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""hostname"\s*:\s*"([^"]+)""#).unwrap());

/// Retrieves the config from the DHCP host and parses its reservations.
/// Transport failures are non-fatal and yield an empty mapping.
pub async fn fetch(
    shell: &dyn RemoteShell,
    settings: &DhcpSettings,
) -> BTreeMap<String, DhcpReservation> {
    let command = format!("cat {}", settings.config_path);
    let target = format!("{}@{}", settings.user, settings.host);

    match shell.run(&target, &command).await {
        Ok(text) => {
            let reservations = parse(&text);
            info!(
                "Parsed {} DHCP reservations from {}",
                reservations.len(),
                settings.host
            );
            reservations
        }
        Err(e) => {
            error!(
                "Failed to fetch DHCP reservations from {}: {e:#}",
                settings.host
            );
            BTreeMap::new()
        }
    }
}

/// Extracts (MAC, IP, optional hostname) triples from the config text,
/// keyed by IP. A duplicate IP overwrites the earlier reservation.
pub fn parse(config_text: &str) -> BTreeMap<String, DhcpReservation> {
    let mut reservations = BTreeMap::new();

    for block in BLOCK.find_iter(config_text) {
        let block = block.as_str();

        let Some(mac) = HW_ADDRESS.captures(block) else {
            continue;
        };
        let Some(ip) = IP_ADDRESS.captures(block) else {
            continue;
        };
        let hostname = HOSTNAME.captures(block).map(|caps| caps[1].to_string());

        let ip = ip[1].to_string();
        reservations.insert(
            ip.clone(),
            DhcpReservation::new(ip, &mac[1], hostname.as_deref()),
        );
    }

    reservations
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
