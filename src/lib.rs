//! vlancheck - APIC VLAN allowance validation library
//!
//! Parses pasted APIC CLI output (path-attachment queries and endpoint
//! lookups), reconciles which VLANs are deployed on which interfaces and
//! VPCs, and builds remediation rows for the paths that are missing them.

pub mod config;
pub mod constants;
pub mod export;
pub mod logging;
pub mod models;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod validate;
