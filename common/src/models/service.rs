// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Declared Service Model
//!
//! A [`DeclaredService`] is one backend entry in the reverse proxy's static
//! configuration: the control plane's claim about where a service lives.
//!
//! ## Key Concepts
//! * **Identity**: the service name is the unique key for the whole audit.
//! * **Immutability**: built once by the proxy collector, read-only afterwards.

use serde::Serialize;

/// A backend declared in the reverse proxy's dynamic configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredService {
    /// Configured service name, e.g. `grafana-service`.
    pub name: String,

    /// Host portion of the first server URL. Usually an IPv4 address, but
    /// the proxy accepts hostnames too, so this deliberately stays a string.
    pub ip: String,

    /// Port portion of the URL, defaulted to "80" when absent.
    pub port: String,

    /// The raw server URL the fields above were extracted from.
    pub url: String,
}

impl DeclaredService {
    /// Derives the matching key used against DNS and live inventories:
    /// the service name minus the configured suffix, lower-cased.
    pub fn base_name(&self, suffix: &str) -> String {
        self.name
            .strip_suffix(suffix)
            .unwrap_or(&self.name)
            .to_lowercase()
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
