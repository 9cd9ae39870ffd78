//! VLAN allowance reconciliation
//!
//! Joins one endpoint aggregate with the path attachments of its VLAN.
//! A path is allowed exactly when its normalized name appears among the
//! normalized attachment paths for that VLAN.

use std::collections::HashSet;

use crate::models::{EndpointData, PathAttachment, ValidationResult};
use crate::parser::extract::{any_digits, epg_vlan_tag, three_digits};

pub mod epg_match;

pub use epg_match::select_best_epg_match;

/// Comparison key for path names: trimmed, brackets removed, lowercase
pub fn normalize_path(path: &str) -> String {
    path.trim()
        .chars()
        .filter(|c| !matches!(c, '[' | ']'))
        .collect::<String>()
        .trim()
        .to_lowercase()
}

/// VLAN number embedded in an EPG name, or empty when there is none.
///
/// Tries a `VLAN<digits>` tag, then the first three-digit run, then any
/// digit run.
pub fn extract_vlan_from_epg(epg_name: &str) -> String {
    epg_vlan_tag(epg_name)
        .or_else(|| three_digits(epg_name))
        .or_else(|| any_digits(epg_name))
        .unwrap_or_default()
}

/// Classify every endpoint path as allowed or not for the endpoint's VLAN.
///
/// Results follow the endpoint's path order.
pub fn validate_vlan_allowances(
    endpoint: &EndpointData,
    attachments: &[PathAttachment],
) -> Vec<ValidationResult> {
    let allowed: HashSet<String> = attachments
        .iter()
        .filter(|att| att.vlan == endpoint.vlan)
        .map(|att| normalize_path(&att.path))
        .collect();

    endpoint
        .paths
        .iter()
        .map(|path| ValidationResult::new(path.clone(), allowed.contains(&normalize_path(path))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationStatus;

    fn attachment(vlan: &str, path: &str) -> PathAttachment {
        PathAttachment {
            vlan: vlan.to_string(),
            epg: format!("VLAN{}", vlan),
            path: path.to_string(),
            full_path: format!("pod-1/paths-303/pathep-[{}]", path),
            pod: "pod-1".to_string(),
        }
    }

    fn endpoint(vlan: &str, paths: &[&str]) -> EndpointData {
        EndpointData {
            vlan: vlan.to_string(),
            paths: paths.iter().map(|p| p.to_string()).collect(),
            ..EndpointData::default()
        }
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("  [ETH1/5] "), "eth1/5");
        assert_eq!(normalize_path("425-426-VPC-31-32-PG"), "425-426-vpc-31-32-pg");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["  [Eth1/5]", "[ [x] ]", "", "425-426-VPC-31-32-PG", " a ]b[ "] {
            let once = normalize_path(input);
            assert_eq!(normalize_path(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_extract_vlan_from_epg() {
        assert_eq!(extract_vlan_from_epg("EPG-VLAN623-X"), "623");
        assert_eq!(extract_vlan_from_epg("EPG-610-ABC"), "610");
        assert_eq!(extract_vlan_from_epg("EPG-61-ABC"), "61");
        assert_eq!(extract_vlan_from_epg("no-digits"), "");
    }

    #[test]
    fn test_membership_is_per_vlan() {
        let attachments = vec![
            attachment("623", "eth1/1"),
            attachment("700", "eth1/5"),
            attachment("623", "[425-426-VPC-31-32-PG]"),
        ];
        let ep = endpoint("623", &["eth1/1", "eth1/5", "425-426-vpc-31-32-pg"]);

        let results = validate_vlan_allowances(&ep, &attachments);
        let statuses: Vec<(&str, ValidationStatus)> =
            results.iter().map(|r| (r.path.as_str(), r.status)).collect();
        assert_eq!(
            statuses,
            vec![
                ("eth1/1", ValidationStatus::Allowed),
                ("eth1/5", ValidationStatus::NotAllowed),
                ("425-426-vpc-31-32-pg", ValidationStatus::Allowed),
            ]
        );
        assert!(results.iter().all(|r| r.has_active_endpoint));
    }

    #[test]
    fn test_no_partial_matching() {
        let attachments = vec![attachment("623", "eth1/1")];
        let ep = endpoint("623", &["eth1/10", "eth1"]);
        let results = validate_vlan_allowances(&ep, &attachments);
        assert!(results.iter().all(|r| !r.is_vlan_allowed));
    }

    #[test]
    fn test_absent_path_is_not_allowed() {
        let attachments = vec![attachment("623", "eth1/1")];
        let ep = endpoint("623", &["eth1/5"]);
        let results = validate_vlan_allowances(&ep, &attachments);
        assert_eq!(results, vec![ValidationResult::new("eth1/5", false)]);
    }
}
