//! Best-effort EPG selection for auto mode
//!
//! When several EPGs share a VLAN, prefer the one whose name embeds the
//! endpoint's subnet. This is a heuristic: with no distinguishing signal
//! the first candidate is returned.

use regex::Regex;
use std::sync::LazyLock;

use crate::parser::extract::pattern;

static EMBEDDED_IPV4: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+"));

/// Score awarded when the EPG name contains the endpoint's first three octets
pub const SUBNET_MATCH_SCORE: u32 = 10;
/// Score awarded when the EPG name contains any dotted quad
pub const EMBEDDED_ADDRESS_SCORE: u32 = 5;

/// Everything before the last dot of an address
fn network_prefix(ip: &str) -> &str {
    ip.rfind('.').map_or("", |idx| &ip[..idx])
}

pub fn score_epg(endpoint_ip: &str, epg: &str) -> u32 {
    let mut score = 0;
    if epg.contains(network_prefix(endpoint_ip)) {
        score += SUBNET_MATCH_SCORE;
    }
    if EMBEDDED_IPV4.is_match(epg) {
        score += EMBEDDED_ADDRESS_SCORE;
    }
    score
}

/// Pick the EPG that best matches `endpoint_ip`.
///
/// Empty when there are no candidates; the sole candidate when there is
/// one; otherwise the first candidate with the strictly highest score.
/// `_paths` is accepted so callers can pass the endpoint's paths once
/// path-based scoring exists.
pub fn select_best_epg_match(endpoint_ip: &str, candidates: &[String], _paths: &[String]) -> String {
    match candidates {
        [] => String::new(),
        [only] => only.clone(),
        [first, ..] => {
            let mut best = first;
            let mut best_score = 0;
            for epg in candidates {
                let score = score_epg(endpoint_ip, epg);
                if score > best_score {
                    best_score = score;
                    best = epg;
                }
            }
            best.clone()
        }
    }
}
