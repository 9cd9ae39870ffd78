//! VLAN matrix view
//!
//! One row per (IP, interface) pair across all entries, one column per
//! VLAN, each cell OK / NOK / blank.

use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Write;
use std::net::Ipv4Addr;

use crate::models::{ValidationEntry, ValidationStatus};
use crate::parser::extract::ipv4_loose;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub ip: String,
    pub interface: String,
    /// VLAN -> status for the VLANs this path was checked against
    pub cells: IndexMap<String, ValidationStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VlanMatrix {
    /// Numerically sorted
    pub vlans: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

impl VlanMatrix {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.vlans.is_empty()
    }
}

fn compare_ips(a: &str, b: &str) -> Ordering {
    match (a.parse::<Ipv4Addr>(), b.parse::<Ipv4Addr>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Rows with an IP first, by address; ties and IP-less rows by interface
fn compare_rows(a: &MatrixRow, b: &MatrixRow) -> Ordering {
    let by_ip = match (a.ip.is_empty(), b.ip.is_empty()) {
        (false, false) => compare_ips(&a.ip, &b.ip),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    };
    by_ip.then_with(|| a.interface.cmp(&b.interface))
}

/// IP shown for a path: per-path IP, entry default, else one from the EPG name
fn row_ip(entry: &ValidationEntry, path: &str) -> String {
    let ip = entry.endpoint_data.ip_for_path(path);
    if ip.is_empty() {
        ipv4_loose(&entry.epg_name).unwrap_or_default()
    } else {
        ip.to_string()
    }
}

pub fn build_matrix(entries: &[ValidationEntry]) -> VlanMatrix {
    let mut vlans: Vec<String> = Vec::new();
    let mut rows: IndexMap<(String, String), MatrixRow> = IndexMap::new();

    for entry in entries {
        let vlan = entry.vlan().to_string();
        if !vlans.contains(&vlan) {
            vlans.push(vlan.clone());
        }

        for result in &entry.results {
            let ip = row_ip(entry, &result.path);
            let row = rows
                .entry((ip.clone(), result.path.clone()))
                .or_insert_with(|| MatrixRow {
                    ip,
                    interface: result.path.clone(),
                    cells: IndexMap::new(),
                });
            row.cells.insert(vlan.clone(), result.status);
        }
    }

    vlans.sort_by_key(|vlan| vlan.parse::<u32>().unwrap_or(u32::MAX));
    let mut rows: Vec<MatrixRow> = rows.into_values().collect();
    rows.sort_by(compare_rows);

    VlanMatrix { vlans, rows }
}

/// Render the matrix as a fixed-width text table
pub fn render_matrix(matrix: &VlanMatrix) -> String {
    let mut out = String::new();
    if matrix.is_empty() {
        return out;
    }

    let ip_width = matrix
        .rows
        .iter()
        .map(|r| r.ip.len())
        .chain(["IP".len()])
        .max()
        .unwrap_or(2);
    let if_width = matrix
        .rows
        .iter()
        .map(|r| r.interface.len())
        .chain(["Interface".len()])
        .max()
        .unwrap_or(9);
    let col_width = matrix
        .vlans
        .iter()
        .map(String::len)
        .chain(["NOK".len()])
        .max()
        .unwrap_or(3);

    let _ = writeln!(out, "VLAN Validation Matrix:");
    let _ = write!(out, "  {:<ip_width$}  {:<if_width$}", "IP", "Interface");
    for vlan in &matrix.vlans {
        let _ = write!(out, "  {:^col_width$}", vlan);
    }
    out.push('\n');

    for row in &matrix.rows {
        let ip = if row.ip.is_empty() { "-" } else { row.ip.as_str() };
        let _ = write!(out, "  {:<ip_width$}  {:<if_width$}", ip, row.interface);
        for vlan in &matrix.vlans {
            let cell = row.cells.get(vlan).map_or("", |status| status.marker());
            let _ = write!(out, "  {:^col_width$}", cell);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "\n  OK - VLAN allowed on path, NOK - VLAN not allowed on path");
    out
}
