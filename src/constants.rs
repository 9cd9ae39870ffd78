//! Global constants for vlancheck
//!
//! Centralized location for application-wide constants

/// Binary name, also used as the per-user config directory name
pub const APP_NAME: &str = "vlancheck";

/// Config file looked up inside the per-user config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Column headers of the remediation CSV
pub const CSV_HEADER: [&str; 3] = ["VLAN", "EPG", "PATH"];

/// Export files are named `<prefix><YYYY-MM-DD>.csv`
pub const EXPORT_FILE_PREFIX: &str = "vlan-validation-";

/// Prefix that export EPG names must carry
pub const EPG_EXPORT_PREFIX: &str = "EPG-";

/// Node placeholder when a path's switch cannot be determined
pub const UNKNOWN_NODE: &str = "XXX";
