// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Live Workload Model
//!
//! A running container observed on a virtualization host, together with the
//! IP address it advertises through its tag string. Workloads are keyed by
//! lower-cased name; a later duplicate name overwrites an earlier one.

use serde::Serialize;

/// One running workload that reported an IP tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveWorkload {
    /// Workload name, lower-cased for matching.
    pub name: String,

    /// First address under the audited subnet found in the tag string.
    pub ip: String,

    /// The virtualization host the workload runs on.
    pub host: String,

    /// The host-local workload identifier.
    pub vmid: String,
}

impl LiveWorkload {
    pub fn new(name: &str, ip: String, host: &str, vmid: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            ip,
            host: host.to_string(),
            vmid: vmid.to_string(),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
