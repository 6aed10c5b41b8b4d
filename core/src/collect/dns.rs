// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # DNS Rewrite Collector
//!
//! Queries the DNS service's rewrite list over HTTP (Basic auth) and keeps
//! the entries living under the internal zone. Domains are case-folded so
//! the reconciler can look them up verbatim.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use tally_common::config::DnsSettings;
use tally_common::{error, info};

/// Fixed API path of the rewrite listing (AdGuard Home control API).
const REWRITE_LIST_PATH: &str = "/control/rewrite/list";

/// One rewrite as returned by the API.
#[derive(Debug, Deserialize)]
pub struct RewriteEntry {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub answer: String,
}

/// Fetches the rewrite list. Any HTTP failure (status, network, auth) is
/// non-fatal and yields an empty mapping.
pub async fn fetch(
    settings: &DnsSettings,
    domain_suffix: &str,
    http_timeout: Duration,
) -> BTreeMap<String, String> {
    match request(settings, http_timeout).await {
        Ok(entries) => {
            let rewrites = filter(entries, domain_suffix);
            info!(
                "Fetched {} DNS rewrites under '{domain_suffix}' from {}",
                rewrites.len(),
                settings.base_url
            );
            rewrites
        }
        Err(e) => {
            error!("Failed to fetch DNS rewrites: {e:#}");
            BTreeMap::new()
        }
    }
}

/// Keeps entries whose lower-cased domain ends with `suffix`, keyed by
/// domain. A duplicate domain overwrites the earlier answer.
pub fn filter(entries: Vec<RewriteEntry>, suffix: &str) -> BTreeMap<String, String> {
    let mut rewrites = BTreeMap::new();

    for entry in entries {
        let domain = entry.domain.to_lowercase();
        if domain.ends_with(suffix) {
            rewrites.insert(domain, entry.answer);
        }
    }

    rewrites
}

async fn request(
    settings: &DnsSettings,
    http_timeout: Duration,
) -> anyhow::Result<Vec<RewriteEntry>> {
    let client = reqwest::Client::builder().timeout(http_timeout).build()?;

    let url = format!(
        "{}{REWRITE_LIST_PATH}",
        settings.base_url.trim_end_matches('/')
    );

    let response = client
        .get(&url)
        .basic_auth(&settings.username, Some(&settings.password))
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json().await?)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(domain: &str, answer: &str) -> RewriteEntry {
        RewriteEntry {
            domain: domain.to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn keeps_only_internal_zone_entries() {
        let entries = vec![
            entry("grafana.internal.lab.lan", "192.168.1.110"),
            entry("public.example.com", "1.2.3.4"),
            entry("unifi.internal.lab.lan", "192.168.1.110"),
        ];

        let rewrites = filter(entries, ".internal.lab.lan");
        assert_eq!(rewrites.len(), 2);
        assert!(!rewrites.contains_key("public.example.com"));
    }

    #[test]
    fn domains_are_case_folded() {
        let entries = vec![entry("Grafana.Internal.Lab.Lan", "192.168.1.110")];
        let rewrites = filter(entries, ".internal.lab.lan");
        assert_eq!(
            rewrites.get("grafana.internal.lab.lan"),
            Some(&String::from("192.168.1.110"))
        );
    }

    #[test]
    fn decodes_api_payload() {
        let payload = r#"[{"domain": "a.internal.lab.lan", "answer": "192.168.1.110"}]"#;
        let entries: Vec<RewriteEntry> = serde_json::from_str(payload).unwrap();
        assert_eq!(entries[0].answer, "192.168.1.110");
    }

    #[tokio::test]
    async fn unreachable_endpoint_yields_empty_mapping() {
        let settings = DnsSettings {
            base_url: String::from("http://127.0.0.1:1"),
            username: String::from("root"),
            password: String::from("secret"),
        };

        let rewrites = fetch(&settings, ".internal.lab.lan", Duration::from_millis(250)).await;
        assert!(rewrites.is_empty());
    }
}
