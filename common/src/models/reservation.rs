// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # DHCP Reservation Model
//!
//! A static IP-to-hardware binding held by the DHCP server. Reservations are
//! keyed by IP address; a later duplicate IP silently overwrites an earlier
//! one, exactly as the server itself would behave when handing out the lease.

use serde::Serialize;

/// One static reservation extracted from the DHCP server's config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DhcpReservation {
    pub ip: String,
    /// Hardware address, lower-cased.
    pub mac: String,
    /// Reserved hostname, lower-cased. Synthesized from the MAC when the
    /// reservation block carries none.
    pub hostname: String,
}

impl DhcpReservation {
    pub fn new(ip: String, mac: &str, hostname: Option<&str>) -> Self {
        let mac = mac.to_lowercase();
        let hostname = match hostname {
            Some(name) if !name.is_empty() => name.to_lowercase(),
            _ => fallback_hostname(&mac),
        };
        Self { ip, mac, hostname }
    }
}

/// Derives a stable placeholder name from the last 6 hex digits of the MAC.
/// The tail is taken per character; the value comes from a remote config and
/// is not guaranteed to be ASCII.
fn fallback_hostname(mac: &str) -> String {
    let digits: Vec<char> = mac.chars().filter(|c| *c != ':' && *c != '-').collect();
    let tail: String = digits[digits.len().saturating_sub(6)..].iter().collect();
    format!("unknown-{tail}")
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
    use super::DhcpReservation;

    #[test]
    fn fields_are_lowercased() {
        let r = DhcpReservation::new(
            String::from("192.168.1.74"),
            "AA:BB:CC:DD:EE:FF",
            Some("InfluxDB"),
        );
        assert_eq!(r.mac, "aa:bb:cc:dd:ee:ff");
        assert_eq!(r.hostname, "influxdb");
    }

    #[test]
    fn missing_hostname_synthesizes_from_mac() {
        let r = DhcpReservation::new(String::from("192.168.1.74"), "AA:BB:CC:DD:EE:FF", None);
        assert_eq!(r.hostname, "unknown-ddeeff");
    }

    #[test]
    fn empty_hostname_synthesizes_from_mac() {
        let r = DhcpReservation::new(String::from("192.168.1.74"), "aa-bb-cc-dd-ee-ff", Some(""));
        assert_eq!(r.hostname, "unknown-ddeeff");
    }

    #[test]
    fn short_mac_does_not_panic() {
        let r = DhcpReservation::new(String::from("192.168.1.74"), "ff", None);
        assert_eq!(r.hostname, "unknown-ff");
    }

    #[test]
    fn non_ascii_mac_does_not_panic() {
        // Whatever sits between the quotes of a remote hw-address lands
        // here; a multi-byte character must not split the tail.
        let r = DhcpReservation::new(String::from("192.168.1.74"), "aé:aa:aa:a", None);
        assert_eq!(r.hostname, "unknown-éaaaaa");
    }
}
