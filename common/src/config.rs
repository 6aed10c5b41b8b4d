// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Configuration
//!
//! Two configuration layers live here:
//!
//! * [`Config`] — runtime/UI settings mapped from CLI flags, passed around by
//!   value. Mirrors what the user typed, nothing more.
//! * [`AuditConfig`] — the audited infrastructure itself: which hosts to ask,
//!   which credentials to use, which zone the services live in. Loaded from a
//!   TOML file so that no host name or password is ever baked into the binary.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Environment variable pointing at the audit configuration file.
pub const CONFIG_ENV: &str = "TALLY_CONFIG";

/// Global configuration options for a single CLI invocation.
///
/// This struct controls the runtime behavior of the application, mainly
/// UI verbosity. It is constructed from CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Toggles the display of the startup ASCII banner.
    ///
    /// If `true`, the application starts immediately with log output
    /// without printing the stylized branding. Useful for clean logs or
    /// frequent executions.
    pub no_banner: bool,

    /// Controls the visual density and formatting of the terminal output.
    ///
    /// This value is typically mapped from the `-q` or `--quiet` CLI flags.
    ///
    /// # Levels
    /// * **0** (Default): Full UI, including colors, headers and per-service trees.
    /// * **1**: Reduced styling. No banner art, summary only.
    /// * **2**: Raw mode. Progress logs are suppressed entirely; only the
    ///   report/JSON output and errors remain.
    pub quiet: u8,
}

/// Everything the auditor needs to know about the environment it audits.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuditConfig {
    pub proxy: ProxySettings,
    pub dhcp: DhcpSettings,
    pub dns: DnsSettings,
    pub inventory: InventorySettings,
    pub audit: AuditSettings,
    pub timeouts: TimeoutSettings,
}

/// Where the reverse proxy's dynamic service file lives on disk.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProxySettings {
    pub services_path: PathBuf,
}

/// The DHCP server holding static reservations, reached over SSH.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DhcpSettings {
    pub host: String,
    pub user: String,
    pub config_path: String,
}

/// The DNS rewrite API endpoint (AdGuard-style, Basic auth).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DnsSettings {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

/// Virtualization hosts whose running workloads carry an IP tag.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InventorySettings {
    pub hosts: Vec<String>,
    pub user: String,

    /// Dotted prefix of the audited subnet (e.g. "192.168.1"). Only tags
    /// containing an address under this prefix count as a workload IP.
    pub subnet_prefix: String,
}

/// Reconciliation constants.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuditSettings {
    /// The reverse proxy's own address. Every internal DNS rewrite is
    /// expected to point here; the comparison is reported but never gates
    /// the per-service status.
    pub proxy_ip: String,

    /// Suffix stripped from a service name to derive its DNS base name.
    pub service_suffix: String,

    /// The internal DNS zone the derived domains live in.
    pub internal_zone: String,

    /// Services backed by physical machines. Live-workload matching is
    /// skipped for these; a bare-metal NAS will never show up in `pct list`.
    pub physical_services: Vec<String>,

    /// Default report location, overridable with `--output`.
    pub report_path: PathBuf,
}

/// Upper bounds for the potentially slow remote operations. No retries
/// anywhere; a hung call blocks until its timeout fires.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimeoutSettings {
    pub connect_secs: u64,
    pub command_secs: u64,
    pub http_secs: u64,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            services_path: PathBuf::from("services.yml"),
        }
    }
}

impl Default for DhcpSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            user: String::from("root"),
            config_path: String::from("/etc/kea/kea-dhcp4.conf"),
        }
    }
}

impl Default for DnsSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            user: String::from("root"),
            subnet_prefix: String::from("192.168.1"),
        }
    }
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            proxy_ip: String::new(),
            service_suffix: String::from("-service"),
            internal_zone: String::from("internal.example.lan"),
            physical_services: Vec::new(),
            report_path: PathBuf::from("IP_AUDIT_REPORT.md"),
        }
    }
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            command_secs: 30,
            http_secs: 10,
        }
    }
}

impl AuditConfig {
    /// Reads and parses the audit configuration.
    ///
    /// An unreadable or malformed file is the one genuine usage error in the
    /// tool: without it there is nothing to audit, so this propagates instead
    /// of degrading like the collectors do.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = Self::resolve_path(explicit);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading audit config '{}'", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing audit config '{}'", path.display()))?;
        Ok(config)
    }

    /// Resolution order: `--config` flag, then `TALLY_CONFIG`, then
    /// `./tally.toml`.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("tally.toml"))
    }

    /// The filter suffix applied to DNS rewrite domains, derived from the
    /// internal zone (e.g. ".internal.example.lan").
    pub fn domain_suffix(&self) -> String {
        format!(".{}", self.audit.internal_zone)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_fills_defaults() {
        let cfg: AuditConfig = toml::from_str(
            r#"
            [dhcp]
            host = "10.0.0.5"

            [audit]
            internal_zone = "internal.lab.lan"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.dhcp.host, "10.0.0.5");
        assert_eq!(cfg.dhcp.user, "root");
        assert_eq!(cfg.dhcp.config_path, "/etc/kea/kea-dhcp4.conf");
        assert_eq!(cfg.audit.service_suffix, "-service");
        assert_eq!(cfg.timeouts.command_secs, 30);
        assert_eq!(cfg.domain_suffix(), ".internal.lab.lan");
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let cfg: AuditConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, AuditConfig::default());
    }

    #[test]
    fn explicit_path_wins() {
        let path = Path::new("/etc/tally/audit.toml");
        assert_eq!(AuditConfig::resolve_path(Some(path)), path);
    }

    #[test]
    fn fallback_path_is_local_toml() {
        // The env override is deliberately not exercised here; tests run in
        // parallel and process-global env mutation races between them.
        if env::var_os(CONFIG_ENV).is_none() {
            assert_eq!(AuditConfig::resolve_path(None), PathBuf::from("tally.toml"));
        }
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let result = AuditConfig::load(Some(Path::new("/nonexistent/tally.toml")));
        assert!(result.is_err());
    }
}
