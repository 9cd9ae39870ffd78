//! APIC CLI text parsing module
//!
//! Handles:
//! - Path-attachment (`moquery -c fvRsPathAtt`) output
//! - Single endpoint lookups (manual entries)
//! - Concatenated endpoint lookups (auto mode)
//! - EPG names grouped by VLAN
//!
//! All parsers are pure functions over text; lines they cannot use are
//! skipped rather than reported as errors.

pub mod auto;
pub mod endpoint;
pub mod epg;
pub mod extract;
pub mod moquery;

pub use auto::parse_apic_endpoints_auto;
pub use endpoint::parse_endpoint_output;
pub use epg::{extract_epg_names, EpgsByVlan};
pub use moquery::{parse_moquery_output, PathKind};
