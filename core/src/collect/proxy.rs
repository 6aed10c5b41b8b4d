// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Reverse Proxy Collector
//!
//! Reads the proxy's dynamic configuration and extracts one
//! [`DeclaredService`] per configured HTTP backend. The document is well
//! structured YAML, so it is parsed with typed serde structs; only the
//! server URL inside it needs a pattern match.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use tally_common::models::service::DeclaredService;
use tally_common::{error, info};

/// Shape of a backend server URL, e.g. `http://192.168.1.74:8086`.
static URL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://([^:/]+)(?::(\d+))?").unwrap());

#[derive(Debug, Default, Deserialize)]
struct ProxyDocument {
    #[serde(default)]
    http: HttpSection,
}

#[derive(Debug, Default, Deserialize)]
struct HttpSection {
    #[serde(default)]
    services: BTreeMap<String, ServiceBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceBlock {
    #[serde(rename = "loadBalancer", default)]
    load_balancer: LoadBalancer,
}

#[derive(Debug, Default, Deserialize)]
struct LoadBalancer {
    #[serde(default)]
    servers: Vec<ServerEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerEntry {
    #[serde(default)]
    url: String,
}

/// Reads the service file at `path`. Missing or malformed documents yield an
/// empty mapping; downstream stages must tolerate empty inputs.
pub fn read(path: &Path) -> BTreeMap<String, DeclaredService> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            error!("Proxy services file not readable: {}: {e}", path.display());
            return BTreeMap::new();
        }
    };

    match parse(&text) {
        Ok(services) => {
            info!(
                "Parsed {} declared services from {}",
                services.len(),
                path.display()
            );
            services
        }
        Err(e) => {
            error!("Failed to parse proxy services file: {e}");
            BTreeMap::new()
        }
    }
}

/// Parses the YAML document into declared services.
///
/// For each backend the first listed server URL wins. Entries whose host is
/// the loopback name are dropped; ports default to "80".
pub fn parse(text: &str) -> anyhow::Result<BTreeMap<String, DeclaredService>> {
    let document: ProxyDocument = serde_yaml::from_str(text)?;

    let mut services = BTreeMap::new();
    for (name, block) in document.http.services {
        let Some(server) = block.load_balancer.servers.first() else {
            continue;
        };
        let Some(caps) = URL_SHAPE.captures(&server.url) else {
            continue;
        };

        let ip = caps[1].to_string();
        if ip == "localhost" {
            continue;
        }

        let port = caps
            .get(2)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| String::from("80"));

        services.insert(
            name.clone(),
            DeclaredService {
                name,
                ip,
                port,
                url: server.url.clone(),
            },
        );
    }

    Ok(services)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
