// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use rand::rng;
use rand::seq::SliceRandom;

/// Operational guidance shown by the spinner while collectors run.
const AUDIT_TIPS: &[&str] = &[
    "A WARNING means the declared IP has no DHCP reservation",
    "An ERROR means a running workload disagrees with the proxy config",
    "Exit code 1 is reserved for IP mismatches, warnings exit 0",
    "Use '--json' to feed the findings into other tooling",
    "An unreachable source degrades coverage, it never aborts the audit",
    "Physical hosts are exempt from live-workload matching",
    "Set TALLY_CONFIG to keep the config out of the working directory",
];

/// Networking trivia to look at while SSH does its thing.
const TECH_TRIVIA: &[&str] = &[
    "DHCP leases were standardized in 1993, RFC 1541",
    "The first 'bug' was a literal moth in a Harvard Mark II",
    "Ping is named after the sound of a submarine's sonar",
    "RFC 1149: Standard for Avian IP (actual pigeons)",
    "Split-horizon DNS predates most of today's homelabs",
];

/// Generates a randomized list of UI messages, tips and trivia interleaved.
pub fn get_shuffled_insights() -> Vec<&'static str> {
    let mut rng = rng();

    let mut output: Vec<&'static str> = AUDIT_TIPS
        .iter()
        .chain(TECH_TRIVIA.iter())
        .copied()
        .collect();
    output.shuffle(&mut rng);
    output
}
