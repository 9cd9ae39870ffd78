//! Bulk endpoint parser
//!
//! Reads the concatenated output of many endpoint lookups. The most recent
//! `vlan-<n>` token and `AEPg :` heading apply to the rows that follow them.

use log::{debug, trace};
use regex::Regex;
use std::sync::LazyLock;

use super::extract::{ipv4_loose, pattern, vlan_token};
use crate::models::AutoModeEndpoint;

static AEPG_HEADING: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)AEPg\s*:\s*([^\n]+)"));
static MAC: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"([0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5})"));
static VPC_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"([0-9()X]+-[0-9()X]+-VPC-[0-9()X]+-[0-9()X]+-PG)")
});
static ETH_PORT: LazyLock<Regex> = LazyLock::new(|| pattern(r"(eth[0-9]+/[0-9]+)"));
static ENCAP: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)(vlan-[0-9]+)"));

fn capture(re: &Regex, line: &str) -> Option<String> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Path on a data row; a VPC group takes precedence over a bare port
pub fn row_path(line: &str) -> Option<String> {
    [&*VPC_GROUP, &*ETH_PORT]
        .into_iter()
        .find_map(|re| capture(re, line))
}

/// Heading context carried from line to line
#[derive(Debug, Default)]
struct AutoScan {
    current_vlan: String,
    current_epg: String,
    endpoints: Vec<AutoModeEndpoint>,
}

impl AutoScan {
    fn step(mut self, line: &str) -> Self {
        if let Some(vlan) = vlan_token(line) {
            self.current_vlan = vlan;
        }
        if let Some(epg) = capture(&AEPG_HEADING, line) {
            self.current_epg = epg.trim().to_string();
        }

        let Some(mac) = capture(&MAC, line) else {
            return self;
        };
        let Some(ip) = ipv4_loose(line) else {
            return self;
        };
        let Some(path) = row_path(line) else {
            trace!("Endpoint row without a path: {}", line);
            return self;
        };
        if self.current_vlan.is_empty() {
            trace!("Endpoint row before any VLAN: {}", line);
            return self;
        }

        let encap = capture(&ENCAP, line).unwrap_or_else(|| format!("vlan-{}", self.current_vlan));

        self.endpoints.push(AutoModeEndpoint {
            ip,
            mac,
            path,
            vlan: self.current_vlan.clone(),
            encap,
            epg: self.current_epg.clone(),
        });
        self
    }
}

/// Parse concatenated endpoint output into one record per endpoint row.
///
/// A row needs a MAC, an IPv4 address and a path. Order follows the input.
pub fn parse_apic_endpoints_auto(input: &str) -> Vec<AutoModeEndpoint> {
    let endpoints = input
        .trim()
        .lines()
        .fold(AutoScan::default(), AutoScan::step)
        .endpoints;

    debug!("Parsed {} endpoint rows", endpoints.len());
    endpoints
}
