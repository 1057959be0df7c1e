//! Paths command handler.
//!
//! Prints the resolved service layout for diagnosing deployment issues.

use std::io::{self, Write};

use anyhow::Result;
use vocalis_core::ServicePaths;

use crate::commands::PathsArgs;

/// Execute the paths command.
pub fn execute(args: &PathsArgs) -> Result<()> {
    let paths = args.layout.resolve()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        write_json(&paths, &mut out)?;
    } else {
        write_report(&paths, &mut out)?;
    }
    Ok(())
}

/// Write `label = path (status)` lines, one per layout entry.
fn write_report(paths: &ServicePaths, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "root = {}", paths.root.display())?;
    for entry in paths.status() {
        let marker = if entry.exists { "ok" } else { "missing" };
        writeln!(out, "{} = {} ({marker})", entry.label, entry.path.display())?;
    }
    Ok(())
}

/// Write the layout and its existence report as one JSON document.
fn write_json(paths: &ServicePaths, out: &mut impl Write) -> Result<()> {
    let mut report = serde_json::Map::new();
    report.insert("paths".to_string(), serde_json::to_value(paths)?);
    report.insert("status".to_string(), serde_json::to_value(paths.status())?);
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
