//! Validation runs
//!
//! Ties the parsers, reconciler and EPG selection together for the two
//! entry modes:
//! - manual: one endpoint lookup per entry, EPG named by the operator
//! - auto: one bulk endpoint dump, grouped by VLAN, EPG picked from the
//!   path-attachment output

use indexmap::IndexMap;
use log::{debug, info};

use crate::config::PodConfig;
use crate::export::build_export_rows;
use crate::models::{
    AutoModeEndpoint, EndpointData, ExportRow, PathAttachment, RunSummary, ValidationEntry,
    ValidationError, ValidationOutput,
};
use crate::parser::{
    extract_epg_names, parse_apic_endpoints_auto, parse_endpoint_output, parse_moquery_output,
};
use crate::validate::{extract_vlan_from_epg, select_best_epg_match, validate_vlan_allowances};

/// Operator input for one manual validation entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualEntry {
    /// Raw `show endpoints` output
    pub endpoint_text: String,
    pub epg_name: String,
}

impl ManualEntry {
    pub fn new(endpoint_text: impl Into<String>, epg_name: impl Into<String>) -> Self {
        Self {
            endpoint_text: endpoint_text.into(),
            epg_name: epg_name.into(),
        }
    }
}

/// Outcome of one validation run
#[derive(Debug, Clone)]
pub struct ValidationRun {
    pub attachments: Vec<PathAttachment>,
    pub entries: Vec<ValidationEntry>,
    /// Manual entries that produced no results
    pub skipped_entries: usize,
}

impl ValidationRun {
    pub fn summary(&self) -> RunSummary {
        let allowed: usize = self.entries.iter().map(ValidationEntry::allowed_count).sum();
        let paths_checked: usize = self.entries.iter().map(|e| e.results.len()).sum();

        RunSummary {
            attachments: self.attachments.len(),
            entries: self.entries.len(),
            skipped_entries: self.skipped_entries,
            paths_checked,
            allowed,
            not_allowed: paths_checked - allowed,
        }
    }

    pub fn export_rows(&self, pods: &PodConfig) -> Vec<ExportRow> {
        build_export_rows(&self.entries, &self.attachments, pods)
    }

    pub fn to_output(&self) -> ValidationOutput {
        ValidationOutput {
            entries: self.entries.clone(),
            summary: self.summary(),
        }
    }
}

fn parse_attachments(moquery_text: &str) -> Result<Vec<PathAttachment>, ValidationError> {
    let attachments = parse_moquery_output(moquery_text);
    if attachments.is_empty() {
        return Err(ValidationError::NoPathAttachments);
    }
    Ok(attachments)
}

/// Validate one manual entry; `None` when it cannot be evaluated
fn validate_manual_entry(
    entry: &ManualEntry,
    attachments: &[PathAttachment],
) -> Option<ValidationEntry> {
    if entry.endpoint_text.trim().is_empty() {
        debug!("Skipping entry without endpoint data");
        return None;
    }
    let Some(parsed) = parse_endpoint_output(&entry.endpoint_text) else {
        info!("Endpoint data for EPG '{}' could not be parsed", entry.epg_name);
        return None;
    };
    let epg_name = entry.epg_name.trim();
    if epg_name.is_empty() {
        info!("Skipping entry without an EPG name");
        return None;
    }
    let vlan = extract_vlan_from_epg(epg_name);
    if vlan.is_empty() {
        info!("EPG '{}' does not name a VLAN", epg_name);
        return None;
    }

    // The operator's EPG decides which VLAN is checked
    let endpoint_data = EndpointData { vlan, ..parsed };
    let results = validate_vlan_allowances(&endpoint_data, attachments);

    Some(ValidationEntry {
        epg_name: entry.epg_name.clone(),
        endpoint_data,
        results,
    })
}

/// Validate operator-entered endpoint lookups against the attachments
pub fn run_manual(
    moquery_text: &str,
    entries: &[ManualEntry],
) -> Result<ValidationRun, ValidationError> {
    let attachments = parse_attachments(moquery_text)?;

    let validated: Vec<ValidationEntry> = entries
        .iter()
        .filter_map(|entry| validate_manual_entry(entry, &attachments))
        .collect();
    let skipped_entries = entries.len() - validated.len();

    info!(
        "Manual run: {} entries validated, {} skipped",
        validated.len(),
        skipped_entries
    );

    Ok(ValidationRun {
        attachments,
        entries: validated,
        skipped_entries,
    })
}

/// Endpoints grouped by VLAN in first-seen order
pub fn group_by_vlan(endpoints: &[AutoModeEndpoint]) -> IndexMap<&str, Vec<&AutoModeEndpoint>> {
    let mut groups: IndexMap<&str, Vec<&AutoModeEndpoint>> = IndexMap::new();
    for endpoint in endpoints {
        groups.entry(endpoint.vlan.as_str()).or_default().push(endpoint);
    }
    groups
}

/// Aggregate one VLAN's endpoints as if they came from a single lookup
pub fn aggregate_endpoints(vlan: &str, endpoints: &[&AutoModeEndpoint]) -> EndpointData {
    let mut data = EndpointData {
        vlan: vlan.to_string(),
        ip: endpoints.first().map(|ep| ep.ip.clone()).unwrap_or_default(),
        ..EndpointData::default()
    };
    for endpoint in endpoints {
        data.paths.insert(endpoint.path.clone());
        data.paths_with_ips
            .insert(endpoint.path.clone(), endpoint.ip.clone());
    }
    data
}

/// Validate a bulk endpoint dump, choosing EPGs from the attachment text
pub fn run_auto(moquery_text: &str, endpoint_text: &str) -> Result<ValidationRun, ValidationError> {
    let attachments = parse_attachments(moquery_text)?;

    let endpoints = parse_apic_endpoints_auto(endpoint_text);
    if endpoints.is_empty() {
        return Err(ValidationError::NoEndpoints);
    }

    let epgs_by_vlan = extract_epg_names(moquery_text);

    let entries: Vec<ValidationEntry> = group_by_vlan(&endpoints)
        .into_iter()
        .map(|(vlan, group)| {
            let endpoint_data = aggregate_endpoints(vlan, &group);
            let results = validate_vlan_allowances(&endpoint_data, &attachments);

            let fallback = format!("VLAN{}", vlan);
            let candidates = match epgs_by_vlan.get(vlan) {
                Some(names) => names.clone(),
                None => {
                    let heading = group.first().map(|ep| ep.epg.as_str()).unwrap_or_default();
                    if heading.is_empty() {
                        vec![fallback.clone()]
                    } else {
                        vec![heading.to_string()]
                    }
                }
            };

            let paths: Vec<String> = endpoint_data.paths.iter().cloned().collect();
            let best = select_best_epg_match(&endpoint_data.ip, &candidates, &paths);
            let epg_name = if !best.is_empty() {
                best
            } else {
                candidates.first().cloned().unwrap_or(fallback)
            };
            debug!("VLAN {}: {} candidate EPGs, chose '{}'", vlan, candidates.len(), epg_name);

            ValidationEntry {
                epg_name,
                endpoint_data,
                results,
            }
        })
        .collect();

    info!(
        "Auto run: {} endpoints across {} VLANs",
        endpoints.len(),
        entries.len()
    );

    Ok(ValidationRun {
        attachments,
        entries,
        skipped_entries: 0,
    })
}
