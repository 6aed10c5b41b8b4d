// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::{cell::Cell, fmt::Display, sync::OnceLock};

use anyhow::bail;
use colored::*;
use tally_core::reconcile::AuditReport;
use unicode_width::UnicodeWidthStr;

use crate::terminal::{banner, colors};
use tally_common::{config::Config, models::entry::Status};

pub const TOTAL_WIDTH: usize = 64;

static PRINT: OnceLock<Print> = OnceLock::new();

thread_local! {
    pub static GLOBAL_KEY_WIDTH: Cell<usize> = const { Cell::new(0) }
}

type Detail = (String, ColoredString);

#[macro_export]
macro_rules! tprint {
    () => {
        $crate::tprint!("");
    };
    ($($arg:tt)*) => {
        tracing::info!(
            target: "tally::print",
            raw_msg = %format_args!($($arg)*)
        )
    };
}

pub trait WithDefaultColor {
    fn with_default(self, default_color: Color) -> ColoredString;
}

impl WithDefaultColor for &str {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for String {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for ColoredString {
    fn with_default(self, _default_color: Color) -> ColoredString {
        self
    }
}

pub struct Print {
    no_banner: bool,
    q_level: u8,
}

impl Print {
    fn new(cfg: &Config) -> Self {
        Self {
            no_banner: cfg.no_banner,
            q_level: cfg.quiet,
        }
    }

    pub fn init(cfg: &Config) -> anyhow::Result<()> {
        let term = Self::new(cfg);
        if PRINT.set(term).is_err() {
            bail!("terminal has already been initialized")
        }
        Ok(())
    }

    fn get() -> &'static Self {
        PRINT.get().expect("terminal has not been initialized")
    }

    pub fn banner() {
        let p = Self::get();
        if p.no_banner || p.q_level > 0 {
            return;
        }

        let text_content: String = format!("⟦ TALLY v{} ⟧ ", env!("CARGO_PKG_VERSION"));
        let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
        let text: ColoredString = text_content.bright_green().bold();
        let sep: ColoredString = "═"
            .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
            .bright_black();
        let output: String = format!("{}{}{}", sep, text, sep);

        tprint!("{}", output);
        banner::print();
    }

    pub fn header(msg: &str) {
        let p = Self::get();
        if p.q_level > 0 {
            tprint!();
            return;
        }

        let formatted: String = format!("⟦ {} ⟧", msg);
        let msg_len: usize = formatted.chars().count();

        let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
        let left: usize = dash_count / 2;
        let right: usize = dash_count - left;

        let line: ColoredString = format!(
            "{}{}{}",
            "─".repeat(left),
            formatted.to_uppercase().bright_green(),
            "─".repeat(right)
        )
        .bright_black();

        tprint!("{}", line);
    }

    /// One tree per problematic entry, most severe first. Consistent
    /// services are summarized, not listed.
    pub fn findings(report: &AuditReport) {
        let p = Self::get();
        if p.q_level > 0 {
            return;
        }

        let problems: Vec<_> = report
            .by_status(Status::IpMismatch)
            .chain(report.by_status(Status::MissingReservation))
            .collect();

        if problems.is_empty() {
            return;
        }

        Self::header("findings");
        for (idx, entry) in problems.iter().enumerate() {
            tree_head(idx, &entry.service);

            let status: ColoredString = match entry.status {
                Status::IpMismatch => entry.status.to_string().red().bold(),
                Status::MissingReservation => entry.status.to_string().yellow().bold(),
                Status::Ok => entry.status.to_string().green(),
            };

            let mut details: Vec<Detail> = vec![
                (String::from("Status"), status),
                (
                    String::from("Declared"),
                    entry.declared_ip.color(colors::IPV4_ADDR),
                ),
            ];

            if let Some(live_ip) = &entry.live_ip {
                details.push((String::from("Live"), live_ip.color(colors::IPV4_ADDR)));
            }

            if let Some(hostname) = &entry.dhcp_hostname {
                details.push((String::from("DHCP"), hostname.color(colors::HOSTNAME)));
            }

            details.push((
                String::from("Domain"),
                entry.dns_domain.color(colors::SECONDARY),
            ));

            if let Some(issue) = &entry.issue {
                details.push((String::from("Issue"), issue.color(colors::TEXT_DEFAULT)));
            }

            as_tree(details);
            if idx + 1 != problems.len() {
                tprint!();
            }
        }
    }

    pub fn audit_summary(report: &AuditReport) {
        let p = Self::get();

        if p.q_level == 0 {
            Self::header("audit summary");
        } else {
            tprint!();
        }

        GLOBAL_KEY_WIDTH.set("Reservations".len());

        aligned_line("Services", report.total().to_string().bold());
        aligned_line(
            "OK",
            format!("{}", report.count(Status::Ok)).green().bold(),
        );
        aligned_line(
            "Warnings",
            format!("{}", report.count(Status::MissingReservation))
                .yellow()
                .bold(),
        );
        aligned_line(
            "Errors",
            format!("{}", report.count(Status::IpMismatch)).red().bold(),
        );
        aligned_line("Reservations", report.reservation_count.to_string().normal());
        aligned_line("Coverage", format!("{}%", report.coverage_percent()).bold());

        let verdict: ColoredString = if report.has_mismatches() {
            "Critical issues found - see report for details".red().bold()
        } else if report.has_warnings() {
            "Warnings found - review recommended actions".yellow()
        } else {
            "All systems consistent!".green().bold()
        };

        match p.q_level {
            0 => {
                divider();
                centerln(&verdict.to_string());
            }
            _ => tprint!("{}", verdict),
        }
    }

    pub fn no_results() {
        let p = Self::get();
        if p.q_level == 0 && !p.no_banner {
            Self::header("ZERO SERVICES DECLARED");
            tprint!("{}", banner::NO_RESULTS_0.red().bold());
            return;
        }
        tally_common::warn!("Audit completed: 0 services declared in the proxy config.");
    }

    pub fn end_of_program() {
        let p = Self::get();
        if p.q_level > 0 {
            return;
        }
        tprint!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR));
    }
}

pub fn divider() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    tprint!("{}", sep);
}

pub fn aligned_line<V>(key: &str, value: V)
where
    V: Display + WithDefaultColor,
{
    let whitespace: String = ".".repeat((GLOBAL_KEY_WIDTH.get() + 1).saturating_sub(key.len()));
    let colon: String = format!(
        "{}{}",
        whitespace.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    );
    let value: ColoredString = value.with_default(colors::TEXT_DEFAULT);
    print_status(format!("{}{} {}", key.color(colors::PRIMARY), colon, value));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    tprint!(
        "{} {}",
        ">".color(colors::SEPARATOR),
        msg.as_ref().color(colors::TEXT_DEFAULT)
    );
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    tprint!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    );
}

pub fn as_tree(details: Vec<(String, ColoredString)>) {
    let padding_width: usize = details.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    for (i, (key, value)) in details.iter().enumerate() {
        let last: bool = i + 1 == details.len();
        let branch: ColoredString = if !last { "├─" } else { "└─" }.bright_black();

        let dots_count: usize = padding_width.saturating_sub(key.len());
        let dots: ColoredString = ".".repeat(dots_count).color(colors::SEPARATOR);

        tprint!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots,
            ":".color(colors::SEPARATOR),
            value
        );
    }
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    tprint!("{}{}{}", space, msg, space);
}
