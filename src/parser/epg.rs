//! EPG extraction from path-attachment output
//!
//! Groups the EPG names seen in path DNs by VLAN, independently of the
//! attachment parser, so that lines with unusual path segments still
//! contribute their EPG.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

use super::extract::{pattern, resolve_vlan};

static EPG_SEGMENT: LazyLock<Regex> = LazyLock::new(|| pattern(r"/epg-([^/]+)/"));

/// VLAN to EPG names, both in first-seen order
pub type EpgsByVlan = IndexMap<String, Vec<String>>;

/// Collect EPG names per VLAN, suppressing duplicates
pub fn extract_epg_names(input: &str) -> EpgsByVlan {
    let mut epgs_by_vlan = EpgsByVlan::new();

    for line in input.trim().lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(epg) = EPG_SEGMENT.captures(line).and_then(|caps| caps.get(1)) else {
            continue;
        };
        let epg = epg.as_str();
        let Some(vlan) = resolve_vlan(line, epg) else {
            continue;
        };

        let names = epgs_by_vlan.entry(vlan).or_default();
        if !names.iter().any(|name| name == epg) {
            names.push(epg.to_string());
        }
    }

    epgs_by_vlan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_by_vlan_in_first_seen_order() {
        let input = "\
dn : uni/tn-T/ap-A/epg-VLAN712-WEB/rspathAtt-[topology/pod-2/paths-410/pathep-[eth1/1]]
dn : uni/tn-T/ap-A/epg-VLAN623-10.1.1.0-27/rspathAtt-[topology/pod-2/paths-410/pathep-[eth1/2]]
dn : uni/tn-T/ap-A/epg-VLAN712-WEB/rspathAtt-[topology/pod-2/paths-411/pathep-[eth1/1]]
dn : uni/tn-T/ap-A/epg-APP-712-DB/rspathAtt-[topology/pod-2/paths-411/pathep-[eth1/3]]
";
        let epgs = extract_epg_names(input);
        let vlans: Vec<&str> = epgs.keys().map(String::as_str).collect();
        assert_eq!(vlans, vec!["712", "623"]);
        assert_eq!(epgs["712"], vec!["VLAN712-WEB", "APP-712-DB"]);
        assert_eq!(epgs["623"], vec!["VLAN623-10.1.1.0-27"]);
    }

    #[test]
    fn test_lines_without_vlan_are_ignored() {
        let input = "dn : uni/tn-T/ap-A/epg-WEB/rspathAtt-[topology/pod-2/paths-4/pathep-[eth1/1]]";
        assert!(extract_epg_names(input).is_empty());
    }

    #[test]
    fn test_encap_token_overrides_epg_digits() {
        let input = "uni/tn-T/ap-A/epg-VLAN712-WEB/ encap vlan-800";
        let epgs = extract_epg_names(input);
        assert_eq!(epgs["800"], vec!["VLAN712-WEB"]);
    }
}
