// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Orchestration logic for a full audit run.
//!
//! This module wires the four collectors and the reconciler into one
//! sequential pipeline:
//!
//! proxy config → DHCP reservations → DNS rewrites → live inventory →
//! reconcile.
//!
//! There is deliberately no concurrency and no retry: each stage runs to
//! completion before the next starts, each failure degrades to an empty
//! dataset, and the process always ends with a report.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::Local;

use tally_common::config::AuditConfig;
use tally_common::info;

use crate::reconcile::{self, AuditReport};
use crate::remote::RemoteShell;
use crate::collect::{dhcp, dns, inventory, proxy};

/// Number of collection stages a run walks through, for progress display.
pub const STAGE_COUNT: usize = 4;

static COMPLETED_STAGES: AtomicUsize = AtomicUsize::new(0);

pub fn completed_stages() -> usize {
    COMPLETED_STAGES.load(Ordering::Relaxed)
}

fn stage_done() {
    COMPLETED_STAGES.fetch_add(1, Ordering::Relaxed);
}

/// The primary entry point for the audit pipeline.
///
/// ### Integration Notes
/// - **State**: updates the stage counter read by the UI spinner.
/// - **Degradation**: an unreachable source shrinks coverage, it never
///   aborts the run; this function does not return errors.
pub async fn run(config: &AuditConfig, shell: &dyn RemoteShell) -> AuditReport {
    COMPLETED_STAGES.store(0, Ordering::Relaxed);

    info!("Parsing reverse proxy services...");
    let services = proxy::read(&config.proxy.services_path);
    stage_done();

    info!("Fetching DHCP reservations...");
    let reservations = dhcp::fetch(shell, &config.dhcp).await;
    stage_done();

    info!("Fetching DNS rewrites...");
    let rewrites = dns::fetch(
        &config.dns,
        &config.domain_suffix(),
        Duration::from_secs(config.timeouts.http_secs),
    )
    .await;
    stage_done();

    info!("Scanning live workload inventories...");
    let live = inventory::scan(shell, &config.inventory).await;
    stage_done();

    info!("Cross-referencing data sources...");
    let entries = reconcile::reconcile(&services, &reservations, &rewrites, &live, &config.audit);

    AuditReport {
        generated_at: Local::now(),
        entries,
        reservation_count: reservations.len(),
    }
}
