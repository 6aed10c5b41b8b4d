// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;

use crate::tprint;

const LOGO: &str = r#"
████████╗ █████╗ ██╗     ██╗     ██╗   ██╗
╚══██╔══╝██╔══██╗██║     ██║     ╚██╗ ██╔╝
   ██║   ███████║██║     ██║      ╚████╔╝
   ██║   ██╔══██║██║     ██║       ╚██╔╝
   ██║   ██║  ██║███████╗███████╗   ██║
   ╚═╝   ╚═╝  ╚═╝╚══════╝╚══════╝   ╚═╝"#;

pub const NO_RESULTS_0: &str = r#"
      ┌───────────────────────────────────┐
      │    ZERO SERVICES DECLARED  ¯\_    │
      │   nothing to cross-reference      │
      └───────────────────────────────────┘
"#;

pub fn print() {
    tprint!("{}", LOGO.bright_green());
    tprint!();
}
