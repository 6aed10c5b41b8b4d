// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Reconciliation
//!
//! The cross-referencing heuristic at the center of the audit. For every
//! declared service, in sorted name order:
//!
//! 1. derive the service's DNS domain from its base name and the internal
//!    zone;
//! 2. look up a DHCP reservation at the declared IP (exact match only);
//! 3. look up the DNS rewrite target and note whether it points at the
//!    reverse proxy (reported, never gating);
//! 4. resolve a live IP — exact workload-name match first, then a guarded
//!    substring match over the workloads in sorted order;
//! 5. classify: a missing reservation outranks everything, a diverging live
//!    IP is a mismatch, everything else (including "no live evidence at
//!    all") counts as consistent.
//!
//! All lookups run over `BTreeMap`s, so the scan order — and with it the
//! fuzzy-match winner — is deterministic across runs.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::Serialize;

use tally_common::config::AuditSettings;
use tally_common::models::entry::{AuditEntry, Status};
use tally_common::models::reservation::DhcpReservation;
use tally_common::models::service::DeclaredService;
use tally_common::models::workload::LiveWorkload;

/// Base names shorter than this never fuzzy-match; "db" would otherwise hit
/// half the inventory.
const MIN_FUZZY_LEN: usize = 4;

/// The bucketed outcome of one audit run.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub generated_at: DateTime<Local>,

    /// All entries, in service-name order.
    pub entries: Vec<AuditEntry>,

    /// Total reservations the DHCP server knows about, for the statistics
    /// footer (not every reservation belongs to a declared service).
    pub reservation_count: usize,
}

impl AuditReport {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn count(&self, status: Status) -> usize {
        self.by_status(status).count()
    }

    pub fn by_status(&self, status: Status) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter().filter(move |e| e.status == status)
    }

    pub fn has_mismatches(&self) -> bool {
        self.count(Status::IpMismatch) > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.count(Status::MissingReservation) > 0
    }

    /// Share of services with a reservation, as a rounded-down percentage.
    pub fn coverage_percent(&self) -> usize {
        if self.total() == 0 {
            return 0;
        }
        100 * self.count(Status::Ok) / self.total()
    }
}

/// Cross-references the four datasets into per-service entries.
pub fn reconcile(
    services: &BTreeMap<String, DeclaredService>,
    reservations: &BTreeMap<String, DhcpReservation>,
    rewrites: &BTreeMap<String, String>,
    live: &BTreeMap<String, LiveWorkload>,
    settings: &AuditSettings,
) -> Vec<AuditEntry> {
    services
        .values()
        .map(|service| classify(service, reservations, rewrites, live, settings))
        .collect()
}

fn classify(
    service: &DeclaredService,
    reservations: &BTreeMap<String, DhcpReservation>,
    rewrites: &BTreeMap<String, String>,
    live: &BTreeMap<String, LiveWorkload>,
    settings: &AuditSettings,
) -> AuditEntry {
    let base_name = service.base_name(&settings.service_suffix);
    let dns_domain = format!("{base_name}.{}", settings.internal_zone);

    let reservation = reservations.get(&service.ip);
    let dns_target = rewrites.get(&dns_domain).cloned();
    let dns_points_at_proxy = !settings.proxy_ip.is_empty()
        && dns_target.as_deref() == Some(settings.proxy_ip.as_str());

    let is_physical = settings
        .physical_services
        .iter()
        .any(|name| name == &service.name);

    let live_ip = if is_physical {
        None
    } else {
        resolve_live_ip(&base_name, live).map(|workload| workload.ip.clone())
    };

    let (status, issue) = match (reservation.is_some(), live_ip.as_deref()) {
        (false, _) => (
            Status::MissingReservation,
            Some(String::from("Missing DHCP reservation")),
        ),
        (true, Some(observed)) if observed != service.ip => (
            Status::IpMismatch,
            Some(format!(
                "IP mismatch: declared={}, live={observed}",
                service.ip
            )),
        ),
        _ => (Status::Ok, None),
    };

    AuditEntry {
        service: service.name.clone(),
        declared_ip: service.ip.clone(),
        port: service.port.clone(),
        dhcp_reserved: reservation.is_some(),
        dhcp_hostname: reservation.map(|r| r.hostname.clone()),
        dns_domain,
        dns_target,
        dns_points_at_proxy,
        live_ip,
        status,
        issue,
    }
}

/// Resolves the live workload for a base name.
///
/// Exact key match wins outright. Otherwise the workloads are scanned in
/// sorted name order and the first substring match is taken, with two
/// guards: the base must be at least [`MIN_FUZZY_LEN`] characters, and a
/// candidate whose hyphen-prefix names some *other* service while still
/// containing the base (e.g. `backup-grafana` for base `grafana`) is
/// skipped.
fn resolve_live_ip<'a>(
    base_name: &str,
    live: &'a BTreeMap<String, LiveWorkload>,
) -> Option<&'a LiveWorkload> {
    if let Some(workload) = live.get(base_name) {
        return Some(workload);
    }

    if base_name.len() < MIN_FUZZY_LEN {
        return None;
    }

    live.iter().find_map(|(candidate, workload)| {
        if let Some((head, _)) = candidate.split_once('-')
            && head != base_name
            && candidate.contains(base_name)
        {
            return None;
        }
        candidate.contains(base_name).then_some(workload)
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
