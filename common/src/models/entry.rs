// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Reconciliation Entry Model
//!
//! The derived, per-service record produced by the reconciler. Entries are
//! never persisted; they exist for one run, get bucketed by [`Status`] and
//! rendered into the report.

use std::fmt;

use serde::Serialize;

/// Consistency classification of a single declared service.
///
/// Priority is fixed: a missing reservation outranks any live-IP finding,
/// and the absence of a resolvable live IP counts as consistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    MissingReservation,
    IpMismatch,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Ok => "OK",
            Status::MissingReservation => "MISSING RESERVATION",
            Status::IpMismatch => "IP MISMATCH",
        };
        write!(f, "{label}")
    }
}

/// Everything the audit learned about one declared service, across all four
/// data sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub service: String,
    pub declared_ip: String,
    pub port: String,

    /// Whether a DHCP reservation exists at the declared IP (exact match).
    pub dhcp_reserved: bool,
    pub dhcp_hostname: Option<String>,

    /// The DNS domain derived from the service name.
    pub dns_domain: String,
    pub dns_target: Option<String>,

    /// Whether the DNS rewrite points at the reverse proxy. Reported for
    /// operator context; does not influence `status`.
    pub dns_points_at_proxy: bool,

    /// The observed workload IP, if any workload matched.
    pub live_ip: Option<String>,

    pub status: Status,
    pub issue: Option<String>,
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
