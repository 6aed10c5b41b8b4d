// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! The `audit` subcommand: run the full collection pipeline, render the
//! report and map the findings onto the process exit code.
//!
//! Exit codes carry meaning for cron and CI callers: an IP mismatch exits 1,
//! missing reservations and unreachable sources exit 0. Only a usage error
//! (unreadable config) aborts before a report exists.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use colored::*;
use tracing::info_span;

use tally_common::config::AuditConfig;
use tally_common::success;
use tally_core::audit::{STAGE_COUNT, completed_stages};
use tally_core::remote::SshShell;
use tally_core::report;

use crate::commands::CommandLine;
use crate::terminal::colors;
use crate::terminal::print::Print;
use crate::terminal::spinner::SpinnerGuard;

pub async fn audit(
    cmd: &CommandLine,
    output: Option<&Path>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let config = AuditConfig::load(cmd.config.as_deref())?;

    Print::header("auditing ip consistency");

    let shell = SshShell::new(&config.timeouts);
    let report = {
        let _guard = run_spinner();
        tally_core::audit::run(&config, &shell).await
    };

    if report.total() == 0 {
        Print::no_results();
    }

    if json {
        // The report goes to stdout; all UI output runs through tracing to
        // stderr, so piping into jq stays clean.
        println!("{}", report::json(&report)?);
    } else {
        let path: PathBuf = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.audit.report_path.clone());
        write_report(&path, &report::markdown(&report))?;

        success!("Report written to {}", path.display());
        Print::findings(&report);
    }

    Print::audit_summary(&report);

    Ok(if report.has_mismatches() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn write_report(path: &Path, markdown: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory '{}'", parent.display()))?;
    }
    fs::write(path, markdown).with_context(|| format!("writing report '{}'", path.display()))
}

fn run_spinner() -> SpinnerGuard {
    let span = info_span!("audit", indicatif.pb_show = true);
    let _enter = span.enter();

    SpinnerGuard::with_status(span.clone(), || {
        let done = completed_stages().to_string().green().bold();
        format!("Collected {done}/{STAGE_COUNT} data sources...")
            .color(colors::TEXT_DEFAULT)
            .italic()
    })
}
