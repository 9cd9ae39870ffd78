//! Data models module
//!
//! Defines core data structures:
//! - PathAttachment: one EPG-to-path binding from a path-attachment query
//! - EndpointData: aggregated endpoint lookup for a single VLAN
//! - AutoModeEndpoint: one endpoint row from bulk endpoint output
//! - ValidationResult / ValidationEntry: reconciliation outcome per path
//! - ExportRow / RunSummary: remediation rows and run statistics

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};


/// A single EPG-to-path binding parsed from a path-attachment DN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathAttachment {
    /// VLAN number as a decimal string
    pub vlan: String,
    /// EPG name as it appears in the DN
    pub epg: String,
    /// Bare interface (`eth1/1`) or VPC policy group name
    pub path: String,
    /// Canonical `pod-N/{paths|protpaths}-.../pathep-[...]` string
    pub full_path: String,
    /// Pod identifier (`pod-N`)
    pub pod: String,
}

/// Endpoint lookup aggregated for one VLAN.
///
/// Paths keep first-seen order; the node and IP maps keep the position of
/// the first insertion and the value of the last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointData {
    pub vlan: String,
    /// First IP seen in the lookup output
    pub ip: String,
    pub paths: IndexSet<String>,
    pub paths_with_nodes: IndexMap<String, String>,
    pub paths_with_ips: IndexMap<String, String>,
}

impl EndpointData {
    /// IP recorded for `path`, falling back to the default IP
    pub fn ip_for_path(&self, path: &str) -> &str {
        self.paths_with_ips
            .get(path)
            .map(String::as_str)
            .unwrap_or(&self.ip)
    }
}

/// One endpoint row detected in bulk endpoint output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoModeEndpoint {
    pub ip: String,
    pub mac: String,
    pub path: String,
    pub vlan: String,
    /// Encapsulation token, e.g. `vlan-623`
    pub encap: String,
    /// Most recent `AEPg :` heading, empty when none was seen
    pub epg: String,
}

/// Whether a VLAN is deployed on a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Allowed,
    NotAllowed,
}

impl ValidationStatus {
    pub fn from_allowed(allowed: bool) -> Self {
        if allowed {
            ValidationStatus::Allowed
        } else {
            ValidationStatus::NotAllowed
        }
    }

    /// Short marker used in the VLAN matrix
    pub fn marker(self) -> &'static str {
        match self {
            ValidationStatus::Allowed => "OK",
            ValidationStatus::NotAllowed => "NOK",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationStatus::Allowed => write!(f, "Allowed"),
            ValidationStatus::NotAllowed => write!(f, "Not Allowed"),
        }
    }
}

/// Reconciliation outcome for one endpoint path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub path: String,
    /// Always true: endpoints are only reported for live entries
    pub has_active_endpoint: bool,
    pub is_vlan_allowed: bool,
    pub status: ValidationStatus,
}

impl ValidationResult {
    pub fn new(path: impl Into<String>, allowed: bool) -> Self {
        Self {
            path: path.into(),
            has_active_endpoint: true,
            is_vlan_allowed: allowed,
            status: ValidationStatus::from_allowed(allowed),
        }
    }
}

/// One validated endpoint lookup together with its chosen EPG
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationEntry {
    pub epg_name: String,
    pub endpoint_data: EndpointData,
    pub results: Vec<ValidationResult>,
}

impl ValidationEntry {
    pub fn vlan(&self) -> &str {
        &self.endpoint_data.vlan
    }

    pub fn allowed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == ValidationStatus::Allowed)
            .count()
    }

    pub fn not_allowed_count(&self) -> usize {
        self.results.len() - self.allowed_count()
    }

    pub fn not_allowed(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results
            .iter()
            .filter(|r| r.status == ValidationStatus::NotAllowed)
    }
}

/// A remediation row: VLAN, export EPG name and canonical path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub vlan: String,
    pub epg: String,
    pub path: String,
}

/// Summary statistics for a validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Path attachments parsed from the query output
    pub attachments: usize,
    /// Entries that produced results
    pub entries: usize,
    /// Manual entries left without results
    pub skipped_entries: usize,
    pub paths_checked: usize,
    pub allowed: usize,
    pub not_allowed: usize,
}

/// Complete output structure for JSON serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutput {
    pub entries: Vec<ValidationEntry>,
    pub summary: RunSummary,
}

/// Errors surfaced by a validation run or export
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Unable to parse moquery data. Please check your input.")]
    NoPathAttachments,
    #[error("Unable to parse APIC endpoint data. Please check your input.")]
    NoEndpoints,
    #[error("No validation issues to export.")]
    NothingToExport,
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to format export date: {0}")]
    Date(#[from] time::error::Format),
}
