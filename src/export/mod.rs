//! Remediation export module
//!
//! Handles:
//! - Rebuilding canonical controller paths for not-allowed endpoint paths
//! - EPG and VLAN naming for export rows
//! - CSV rendering and the dated export filename

use log::{debug, warn};
use regex::Regex;
use std::sync::LazyLock;
use time::macros::format_description;
use time::Date;

use crate::config::PodConfig;
use crate::constants::{CSV_HEADER, EPG_EXPORT_PREFIX, EXPORT_FILE_PREFIX, UNKNOWN_NODE};
use crate::models::{EndpointData, ExportRow, PathAttachment, ValidationEntry, ValidationError};
use crate::parser::extract::pattern;
use crate::parser::moquery::{format_full_path, PathKind};
use crate::validate::{extract_vlan_from_epg, normalize_path};

static VPC_NODES: LazyLock<Regex> = LazyLock::new(|| pattern(r"([0-9]+)-([0-9]+)-VPC"));
static LEADING_NODE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^([0-9]+)[-/]"));
static ATTACHMENT_VPC_NODES: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"protpaths-([0-9()X]+)-([0-9()X]+)"));
static ATTACHMENT_NODE: LazyLock<Regex> = LazyLock::new(|| pattern(r"paths-([0-9()X]+)/"));

/// EPG name as written to the export, always carrying the `EPG-` prefix
pub fn export_epg_name(epg: &str) -> String {
    if epg.to_uppercase().starts_with(EPG_EXPORT_PREFIX) {
        epg.to_string()
    } else {
        format!("{}{}", EPG_EXPORT_PREFIX, epg)
    }
}

/// VLAN column for an entry: the EPG's VLAN, else the endpoint's
pub fn export_vlan(entry: &ValidationEntry) -> String {
    let from_epg = extract_vlan_from_epg(&entry.epg_name);
    if from_epg.is_empty() {
        entry.vlan().to_string()
    } else {
        from_epg
    }
}

/// Maps endpoint path names back to controller path strings
pub struct PathResolver<'a> {
    attachments: &'a [PathAttachment],
    pods: &'a PodConfig,
}

impl<'a> PathResolver<'a> {
    pub fn new(attachments: &'a [PathAttachment], pods: &'a PodConfig) -> Self {
        Self { attachments, pods }
    }

    /// First attachment, of any VLAN, carrying the same normalized path
    pub fn exact_match(&self, path: &str) -> Option<&'a PathAttachment> {
        let wanted = normalize_path(path);
        self.attachments
            .iter()
            .find(|att| normalize_path(&att.path) == wanted)
    }

    fn attachment_pod(&self, kind: PathKind, first: &str, second: Option<&str>) -> Option<&'a str> {
        self.attachments
            .iter()
            .find(|att| match kind {
                PathKind::Vpc => ATTACHMENT_VPC_NODES
                    .captures(&att.full_path)
                    .is_some_and(|caps| {
                        caps.get(1).map(|m| m.as_str()) == Some(first)
                            && caps.get(2).map(|m| m.as_str()) == second
                    }),
                PathKind::Single => ATTACHMENT_NODE
                    .captures(&att.full_path)
                    .is_some_and(|caps| caps.get(1).map(|m| m.as_str()) == Some(first)),
            })
            .map(|att| att.pod.as_str())
    }

    fn pod_for(&self, kind: PathKind, first: &str, second: Option<&str>) -> String {
        if self.pods.infer_from_attachments {
            if let Some(pod) = self.attachment_pod(kind, first, second) {
                return pod.to_string();
            }
        }
        self.pods.pod_for_node(first).to_string()
    }

    /// Canonical path for one endpoint path.
    ///
    /// An attachment with the same path is authoritative. Otherwise the
    /// path is rebuilt from the node(s) named in it or recorded for it by
    /// the endpoint lookup, with `XXX` when no node is known.
    pub fn full_path(&self, path: &str, endpoint: &EndpointData) -> String {
        if let Some(att) = self.exact_match(path) {
            return att.full_path.clone();
        }

        if let Some(caps) = VPC_NODES.captures(path) {
            let (n1, n2) = (&caps[1], &caps[2]);
            let pod = self.pod_for(PathKind::Vpc, n1, Some(n2));
            return format_full_path(&pod, PathKind::Vpc, &format!("{}-{}", n1, n2), path);
        }

        let node = LEADING_NODE
            .captures(path)
            .map(|caps| caps[1].to_string())
            .or_else(|| endpoint.paths_with_nodes.get(path).cloned());

        match node {
            Some(node) => {
                let pod = self.pod_for(PathKind::Single, &node, None);
                format_full_path(&pod, PathKind::Single, &node, path)
            }
            None => {
                warn!("No switch node known for path {}; exporting placeholder", path);
                format_full_path(&self.pods.default, PathKind::Single, UNKNOWN_NODE, path)
            }
        }
    }
}

/// One export row per not-allowed path, in entry order
pub fn build_export_rows(
    entries: &[ValidationEntry],
    attachments: &[PathAttachment],
    pods: &PodConfig,
) -> Vec<ExportRow> {
    let resolver = PathResolver::new(attachments, pods);
    let resolver = &resolver;

    let rows: Vec<ExportRow> = entries
        .iter()
        .flat_map(move |entry| {
            let vlan = export_vlan(entry);
            let epg = export_epg_name(&entry.epg_name);
            entry.not_allowed().map(move |result| ExportRow {
                vlan: vlan.clone(),
                epg: epg.clone(),
                path: resolver.full_path(&result.path, &entry.endpoint_data),
            })
        })
        .collect();

    debug!("Built {} export rows", rows.len());
    rows
}

/// Render rows as `VLAN,EPG,PATH` CSV
pub fn render_csv(rows: &[ExportRow]) -> Result<String, ValidationError> {
    if rows.is_empty() {
        return Err(ValidationError::NothingToExport);
    }

    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.write_record([&row.vlan, &row.epg, &row.path])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `vlan-validation-<YYYY-MM-DD>.csv`
pub fn export_filename(date: Date) -> Result<String, ValidationError> {
    let format = format_description!("[year]-[month]-[day]");
    Ok(format!("{}{}.csv", EXPORT_FILE_PREFIX, date.format(format)?))
}
