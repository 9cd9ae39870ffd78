//! Path-attachment parser
//!
//! Turns `moquery -c fvRsPathAtt` output into [`PathAttachment`] records.
//! Each useful line carries a DN such as
//! `uni/tn-T/ap-A/epg-E/rspathAtt-[topology/pod-2/paths-410/pathep-[eth1/1]]`.

use log::{debug, trace};
use regex::Regex;
use std::sync::LazyLock;

use super::extract::{pattern, resolve_vlan};
use crate::models::PathAttachment;

static VPC_DN: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)dn\s*:\s*uni/tn-[^/]+/ap-[^/]+/epg-([^/]+)/rspathAtt-\[topology/(pod-[0-9]+)/protpaths-([0-9()X-]+)/pathep-\[([^\]]+)\]\]",
    )
});

static SINGLE_DN: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)dn\s*:\s*uni/tn-[^/]+/ap-[^/]+/epg-([^/]+)/rspathAtt-\[topology/(pod-[0-9]+)/paths-([0-9()X]+)/pathep-\[([^\]]+)\]\]",
    )
});

/// Shape of the topology segment of a path DN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// `paths-<node>`
    Single,
    /// `protpaths-<node1>-<node2>`
    Vpc,
}

impl PathKind {
    /// Tried in this order; VPC first
    pub const ORDER: [PathKind; 2] = [PathKind::Vpc, PathKind::Single];

    pub fn segment(self) -> &'static str {
        match self {
            PathKind::Single => "paths",
            PathKind::Vpc => "protpaths",
        }
    }

    fn dn_pattern(self) -> &'static Regex {
        match self {
            PathKind::Single => &*SINGLE_DN,
            PathKind::Vpc => &*VPC_DN,
        }
    }
}

/// Canonical path string for a pod, node identifier and interface
pub fn format_full_path(pod: &str, kind: PathKind, nodes: &str, path: &str) -> String {
    format!("{}/{}-{}/pathep-[{}]", pod, kind.segment(), nodes, path)
}

/// Pieces of a path DN, before VLAN resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnMatch<'a> {
    pub kind: PathKind,
    pub epg: &'a str,
    pub pod: &'a str,
    pub nodes: &'a str,
    pub path: &'a str,
}

/// Match a line against the DN shapes in [`PathKind::ORDER`]
pub fn match_dn(line: &str) -> Option<DnMatch<'_>> {
    PathKind::ORDER.iter().find_map(|&kind| {
        let caps = kind.dn_pattern().captures(line)?;
        Some(DnMatch {
            kind,
            epg: caps.get(1)?.as_str(),
            pod: caps.get(2)?.as_str(),
            nodes: caps.get(3)?.as_str(),
            path: caps.get(4)?.as_str(),
        })
    })
}

/// Parse one line; `None` when it is not a path DN or has no VLAN
pub fn parse_moquery_line(line: &str) -> Option<PathAttachment> {
    let dn = match_dn(line)?;
    let vlan = resolve_vlan(line, dn.epg)?;

    if dn.path.is_empty() {
        return None;
    }

    Some(PathAttachment {
        vlan,
        epg: dn.epg.to_string(),
        path: dn.path.to_string(),
        full_path: format_full_path(dn.pod, dn.kind, dn.nodes, dn.path),
        pod: dn.pod.to_string(),
    })
}

/// Parse path-attachment query output.
///
/// Lines that do not match are skipped. Order follows the input and
/// duplicates are kept.
pub fn parse_moquery_output(input: &str) -> Vec<PathAttachment> {
    let attachments: Vec<PathAttachment> = input
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_moquery_line(line);
            if parsed.is_none() {
                trace!("Skipping path-attachment line: {}", line);
            }
            parsed
        })
        .collect();

    debug!("Parsed {} path attachments", attachments.len());
    attachments
}
