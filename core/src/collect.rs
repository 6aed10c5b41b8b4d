// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Data collection stage of the audit.
//!
//! Four independent collectors, one per source of truth:
//! - **proxy**: declared services from the reverse proxy's YAML config.
//! - **dhcp**: static reservations from the DHCP server's config, over SSH.
//! - **dns**: domain rewrites from the DNS service's HTTP API.
//! - **inventory**: running workloads and their IP tags, over SSH.
//!
//! All collectors are best-effort: a failing source logs and returns an
//! empty mapping so the reconciliation still runs on whatever was gathered.
//! Each collector returns a `BTreeMap`, which keeps every downstream scan in
//! a stable, sorted order.

pub mod dhcp;
pub mod dns;
pub mod inventory;
pub mod proxy;
