// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

mod audit;

pub mod utils {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tally_core::remote::RemoteShell;

    /// Canned remote shell keyed by (target, command). Anything not scripted
    /// fails, the same way an unreachable host would.
    #[derive(Default)]
    pub struct FakeShell {
        responses: HashMap<(String, String), String>,
    }

    impl FakeShell {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, target: &str, command: &str, output: &str) -> Self {
            self.responses.insert(
                (target.to_string(), command.to_string()),
                output.to_string(),
            );
            self
        }
    }

    #[async_trait]
    impl RemoteShell for FakeShell {
        async fn run(&self, target: &str, command: &str) -> anyhow::Result<String> {
            self.responses
                .get(&(target.to_string(), command.to_string()))
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no scripted output for '{command}' on {target}"))
        }
    }
}
