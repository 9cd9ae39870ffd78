//! Manual endpoint parser
//!
//! Reads the output of a single `show endpoints ip <addr>` lookup and
//! aggregates it into one [`EndpointData`]. The VLAN and default IP are
//! first-wins across lines; interfaces and VPC groups accumulate.

use indexmap::{IndexMap, IndexSet};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

use super::extract::{ipv4_word, pattern, vlan_token};
use crate::models::EndpointData;

/// `<node>  eth<a>/<b>  ...  vlan-<n>` on one line
static NODE_INTERFACE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)([0-9]+)\s+(eth[0-9]+/[0-9]+)\s+.*vlan-([0-9]+)"));

/// VPC policy group names, most specific first
static VPC_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        pattern(r"(?i)vpc\s+([0-9-]+-VPC-[0-9-]+-PG)"),
        pattern(r"(?i)(?-u:\b)([0-9]+-[0-9]+-VPC-[0-9]+-[0-9]+-PG)(?-u:\b)"),
        pattern(r"(?i)([0-9]+-[0-9]+-VPC-[0-9]+-[0-9]+-PG)"),
    ]
});

/// Header rows of the endpoint table
fn is_header(line: &str) -> bool {
    line.contains("Node") && line.contains("Interface")
}

/// Node number and interface from an interface row
pub fn node_interface(line: &str) -> Option<(String, String)> {
    let caps = NODE_INTERFACE.captures(line)?;
    Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
}

/// First VPC group name found by the ordered patterns
pub fn vpc_path(line: &str) -> Option<String> {
    VPC_PATTERNS
        .iter()
        .find_map(|re| re.captures(line).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str().to_string())
}

/// Accumulator threaded through the lines of one lookup
#[derive(Debug, Default)]
struct ManualScan {
    vlan: Option<String>,
    default_ip: Option<String>,
    paths: IndexSet<String>,
    nodes: IndexMap<String, String>,
    ips: IndexMap<String, String>,
}

impl ManualScan {
    fn add_path(&mut self, path: String, ip: Option<&String>) {
        if let Some(ip) = ip {
            self.ips.insert(path.clone(), ip.clone());
        }
        self.paths.insert(path);
    }

    fn step(mut self, line: &str) -> Self {
        if line.trim().is_empty() || is_header(line) {
            return self;
        }

        let line_ip = ipv4_word(line);
        if self.default_ip.is_none() {
            self.default_ip = line_ip.clone();
        }
        if self.vlan.is_none() {
            self.vlan = vlan_token(line);
        }

        if let Some((node, interface)) = node_interface(line) {
            self.nodes.insert(interface.clone(), node);
            self.add_path(interface, line_ip.as_ref());
        }

        if let Some(vpc) = vpc_path(line) {
            self.add_path(vpc, line_ip.as_ref());
        }

        self
    }

    fn finish(self) -> Option<EndpointData> {
        let vlan = self.vlan?;
        if self.paths.is_empty() {
            return None;
        }

        Some(EndpointData {
            vlan,
            ip: self.default_ip.unwrap_or_default(),
            paths: self.paths,
            paths_with_nodes: self.nodes,
            paths_with_ips: self.ips,
        })
    }
}

/// Parse one endpoint lookup.
///
/// Returns `None` when no VLAN was found or no path was recognised.
pub fn parse_endpoint_output(input: &str) -> Option<EndpointData> {
    let parsed = input
        .trim()
        .lines()
        .fold(ManualScan::default(), ManualScan::step)
        .finish();

    match &parsed {
        Some(data) => debug!(
            "Endpoint lookup: vlan {} with {} paths",
            data.vlan,
            data.paths.len()
        ),
        None => debug!("Endpoint lookup produced no usable data"),
    }
    parsed
}
