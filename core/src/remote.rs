// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Remote Execution Channel
//!
//! The collectors that talk to DHCP and virtualization hosts do so by running
//! read-only commands over SSH. [`RemoteShell`] is the seam between that I/O
//! and the parsing logic: production code uses [`SshShell`], tests substitute
//! a canned implementation and never touch the network.
//!
//! ## Guarantees
//! * Every call is bounded by the configured command timeout; a hung remote
//!   never blocks the run past it.
//! * No retries. A failed call surfaces as an error and the caller decides
//!   how much of the audit degrades.

use std::process::Output;
use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use tally_common::config::TimeoutSettings;
use tally_common::debug;

#[async_trait]
pub trait RemoteShell: Send + Sync {
    /// Runs `command` on `target` (a `user@host` pair) and returns its
    /// stdout.
    ///
    /// A non-zero exit status, transport failure or timeout is an `Err`.
    async fn run(&self, target: &str, command: &str) -> anyhow::Result<String>;
}

/// [`RemoteShell`] implementation shelling out to the system `ssh` binary.
pub struct SshShell {
    connect_timeout: Duration,
    command_timeout: Duration,
}

impl SshShell {
    pub fn new(timeouts: &TimeoutSettings) -> Self {
        Self {
            connect_timeout: Duration::from_secs(timeouts.connect_secs),
            command_timeout: Duration::from_secs(timeouts.command_secs),
        }
    }
}

#[async_trait]
impl RemoteShell for SshShell {
    async fn run(&self, target: &str, command: &str) -> anyhow::Result<String> {
        debug!("Running '{command}' on {target}");

        let connect = format!("ConnectTimeout={}", self.connect_timeout.as_secs());

        // BatchMode keeps a missing key from degenerating into a password
        // prompt that would sit there until the timeout fires.
        let result = Command::new("ssh")
            .arg("-o")
            .arg(connect)
            .arg("-o")
            .arg("StrictHostKeyChecking=no")
            .arg("-o")
            .arg("BatchMode=yes")
            .arg(target)
            .arg(command)
            .output();

        let output: Output = timeout(self.command_timeout, result)
            .await
            .map_err(|_| {
                anyhow!(
                    "remote command timed out after {}s on {target}",
                    self.command_timeout.as_secs()
                )
            })?
            .with_context(|| format!("spawning ssh for {target}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("remote command failed on {target}: {}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
