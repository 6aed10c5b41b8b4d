// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! The `sources` subcommand: resolve and display the configured data
//! sources without contacting any of them. Useful as a dry-run before the
//! first audit against a freshly written config.

use std::process::ExitCode;

use colored::*;

use tally_common::config::AuditConfig;

use crate::commands::CommandLine;
use crate::terminal::colors;
use crate::terminal::print::{self, Print};

pub fn sources(cmd: &CommandLine) -> anyhow::Result<ExitCode> {
    let config = AuditConfig::load(cmd.config.as_deref())?;
    let resolved = AuditConfig::resolve_path(cmd.config.as_deref());

    Print::header("configured data sources");

    print::tree_head(0, "reverse proxy");
    print::as_tree(vec![
        (
            String::from("Services"),
            config
                .proxy
                .services_path
                .display()
                .to_string()
                .color(colors::SECONDARY),
        ),
        (
            String::from("Proxy IP"),
            config.audit.proxy_ip.color(colors::IPV4_ADDR),
        ),
    ]);

    print::tree_head(1, "dhcp server");
    print::as_tree(vec![
        (
            String::from("Target"),
            format!("{}@{}", config.dhcp.user, config.dhcp.host).color(colors::HOSTNAME),
        ),
        (
            String::from("Config"),
            config.dhcp.config_path.color(colors::SECONDARY),
        ),
    ]);

    print::tree_head(2, "dns rewrites");
    print::as_tree(vec![
        (
            String::from("Endpoint"),
            config.dns.base_url.color(colors::SECONDARY),
        ),
        (
            String::from("User"),
            config.dns.username.color(colors::HOSTNAME),
        ),
        (
            String::from("Zone"),
            config.audit.internal_zone.color(colors::SECONDARY),
        ),
    ]);

    print::tree_head(3, "live inventory");
    let mut details = vec![(
        String::from("Subnet"),
        format!("{}.0/24", config.inventory.subnet_prefix).color(colors::IPV4_ADDR),
    )];
    for host in &config.inventory.hosts {
        details.push((
            String::from("Host"),
            format!("{}@{}", config.inventory.user, host).color(colors::HOSTNAME),
        ));
    }
    print::as_tree(details);

    tprint_config_footer(&resolved);

    Ok(ExitCode::SUCCESS)
}

fn tprint_config_footer(resolved: &std::path::Path) {
    crate::tprint!();
    print::print_status(format!("Loaded from {}", resolved.display()));
}
