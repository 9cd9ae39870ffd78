#![forbid(unsafe_code)]

mod cli;

use anyhow::{Context, Result};
use apic_vlan_check::config::AppConfig;
use apic_vlan_check::export::{export_filename, render_csv};
use apic_vlan_check::logging::init_logging;
use apic_vlan_check::output::{format_human, format_json};
use apic_vlan_check::pipeline::{self, ManualEntry};
use cli::{CsvTarget, EntryMode};
use std::path::PathBuf;

fn main() -> Result<()> {
    let config = cli::parse_args()?;
    init_logging(config.verbosity, config.quiet_mode);

    let app_config = AppConfig::resolve(config.config_path.as_deref())?;
    let moquery = cli::read_input(&config.moquery)?;

    let run = match config.mode {
        EntryMode::Manual => {
            let entries = config
                .entries
                .iter()
                .map(|spec| {
                    Ok(ManualEntry::new(
                        cli::read_input(&spec.source)?,
                        spec.epg_name.clone(),
                    ))
                })
                .collect::<Result<Vec<_>>>()?;
            pipeline::run_manual(&moquery, &entries)?
        }
        EntryMode::Auto => {
            let source = config
                .endpoints
                .as_ref()
                .context("Auto mode needs --endpoints FILE")?;
            let endpoint_text = cli::read_input(source)?;
            pipeline::run_auto(&moquery, &endpoint_text)?
        }
    };

    if !config.quiet_mode && run.skipped_entries > 0 {
        eprintln!(
            "Warning: {} of {} entries could not be validated (no endpoint data, no VLAN in the EPG name, or unparsable lookup)",
            run.skipped_entries,
            config.entries.len()
        );
    }

    let output = run.to_output();
    if config.json_output {
        println!("{}", format_json(&output)?);
    } else if config.csv == Some(CsvTarget::Stdout) {
        // stdout carries only the CSV
        eprint!("{}", format_human(&output, config.show_matrix));
    } else {
        print!("{}", format_human(&output, config.show_matrix));
    }

    if let Some(target) = &config.csv {
        let rows = run.export_rows(&app_config.pods);
        let csv = render_csv(&rows)?;

        let path: PathBuf = match target {
            CsvTarget::Stdout => {
                print!("{}", csv);
                return Ok(());
            }
            CsvTarget::Dated => export_filename(time::OffsetDateTime::now_utc().date())?.into(),
            CsvTarget::File(path) => path.clone(),
        };

        std::fs::write(&path, csv)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if !config.quiet_mode {
            eprintln!("Exported {} paths to {}", rows.len(), path.display());
        }
    }

    Ok(())
}
