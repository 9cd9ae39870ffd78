//! CLI argument parsing and validation module
//!
//! Handles command-line interface using clap, including:
//! - Path-attachment and endpoint inputs (files or stdin)
//! - Entry mode selection (manual/auto)
//! - Output format selection (human/JSON, matrix)
//! - CSV export target
//! - Verbosity and quiet modes

use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::Read;
use std::path::PathBuf;

/// Where a text blob is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    fn from_arg(value: &str) -> Self {
        if value == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(value))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    Manual,
    Auto,
}

/// One `--entry FILE=EPG` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySpec {
    pub source: InputSource,
    pub epg_name: String,
}

/// Destination of the remediation CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvTarget {
    /// `vlan-validation-<date>.csv` in the working directory
    Dated,
    Stdout,
    File(PathBuf),
}

/// Configuration for one invocation
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub moquery: InputSource,
    pub mode: EntryMode,
    pub entries: Vec<EntrySpec>,
    pub endpoints: Option<InputSource>,
    pub csv: Option<CsvTarget>,
    pub json_output: bool,
    pub show_matrix: bool,
    pub quiet_mode: bool,
    pub verbosity: u8,
    pub config_path: Option<PathBuf>,
}

pub fn build_command() -> Command {
    Command::new("vlancheck")
        .version(concat!(env!("VLANCHECK_VERSION"), " (", env!("GIT_HASH"), ")"))
        .about("Validate VLAN allowances on APIC fabric paths")
        .long_about(
            "Cross-references APIC endpoint lookups with path-attachment (moquery) output \
             to report which endpoint interfaces and VPCs are missing a VLAN, and exports \
             the missing bindings as VLAN,EPG,PATH CSV.",
        )
        .arg(
            Arg::new("moquery")
                .short('m')
                .long("moquery")
                .value_name("FILE")
                .required(true)
                .help("Path-attachment output (moquery -c fvRsPathAtt ... | grep dn), '-' for stdin"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_name("MODE")
                .value_parser(["manual", "auto"])
                .default_value("manual")
                .help("Entry mode: manual entries or one bulk endpoint dump"),
        )
        .arg(
            Arg::new("entry")
                .short('e')
                .long("entry")
                .value_name("FILE=EPG")
                .action(ArgAction::Append)
                .allow_hyphen_values(true)
                .help("Manual mode: endpoint lookup file and the EPG it belongs to, '-=EPG' for stdin"),
        )
        .arg(
            Arg::new("endpoints")
                .long("endpoints")
                .value_name("FILE")
                .help("Auto mode: concatenated 'show endpoints' output, '-' for stdin"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .value_name("PATH")
                .num_args(0..=1)
                .default_missing_value("")
                .help("Export not-allowed paths as CSV (default name vlan-validation-<date>.csv, '-' for stdout)"),
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("matrix")
                .long("matrix")
                .help("Also print the IP/interface by VLAN matrix")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("TOML configuration file (pod bands)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress warnings about skipped entries")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase diagnostic logging (repeatable)")
                .action(ArgAction::Count),
        )
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<RunConfig> {
    config_from_matches(&build_command().get_matches())
}

fn parse_entry(value: &str) -> Result<EntrySpec> {
    let (file, epg) = value
        .rsplit_once('=')
        .ok_or_else(|| anyhow!("Invalid entry '{}': expected FILE=EPG", value))?;
    if file.is_empty() || epg.trim().is_empty() {
        return Err(anyhow!("Invalid entry '{}': expected FILE=EPG", value));
    }
    Ok(EntrySpec {
        source: InputSource::from_arg(file),
        epg_name: epg.trim().to_string(),
    })
}

/// Validate matches into a [`RunConfig`]
pub fn config_from_matches(matches: &ArgMatches) -> Result<RunConfig> {
    let moquery = matches
        .get_one::<String>("moquery")
        .map(|v| InputSource::from_arg(v))
        .ok_or_else(|| anyhow!("--moquery is required"))?;

    let mode = match matches.get_one::<String>("mode").map(String::as_str) {
        Some("auto") => EntryMode::Auto,
        _ => EntryMode::Manual,
    };

    let entries = matches
        .get_many::<String>("entry")
        .map(|values| values.map(|v| parse_entry(v)).collect::<Result<Vec<_>>>())
        .transpose()?
        .unwrap_or_default();

    let endpoints = matches
        .get_one::<String>("endpoints")
        .map(|v| InputSource::from_arg(v));

    match mode {
        EntryMode::Manual => {
            if endpoints.is_some() {
                return Err(anyhow!("--endpoints is only used with --mode auto"));
            }
            if entries.is_empty() {
                return Err(anyhow!("Manual mode needs at least one --entry FILE=EPG"));
            }
        }
        EntryMode::Auto => {
            if !entries.is_empty() {
                return Err(anyhow!("--entry is only used with --mode manual"));
            }
            if endpoints.is_none() {
                return Err(anyhow!("Auto mode needs --endpoints FILE"));
            }
        }
    }

    let stdin_readers = std::iter::once(&moquery)
        .chain(endpoints.iter())
        .chain(entries.iter().map(|e| &e.source))
        .filter(|source| **source == InputSource::Stdin)
        .count();
    if stdin_readers > 1 {
        return Err(anyhow!("Only one input can be read from stdin"));
    }

    let csv = matches.get_one::<String>("csv").map(|v| match v.as_str() {
        "" => CsvTarget::Dated,
        "-" => CsvTarget::Stdout,
        path => CsvTarget::File(PathBuf::from(path)),
    });

    let json_output = matches.get_flag("json");
    if json_output && csv == Some(CsvTarget::Stdout) {
        return Err(anyhow!("--json cannot be combined with --csv -"));
    }

    Ok(RunConfig {
        moquery,
        mode,
        entries,
        endpoints,
        csv,
        json_output,
        show_matrix: matches.get_flag("matrix"),
        quiet_mode: matches.get_flag("quiet"),
        verbosity: matches.get_count("verbose"),
        config_path: matches.get_one::<PathBuf>("config").cloned(),
    })
}

/// Read a text input in full
pub fn read_input(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read from stdin")?;
            Ok(text)
        }
        InputSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
    }
}
