// src/file/export.rs
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use chrono::prelude::*;
use csv::Writer;
use tracing::info;
use crate::config::CalculationRecord;

pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("fincalc_history_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Writes `records` into a timestamped CSV file inside `export_dir`.
pub fn export_to_dir(records: &[CalculationRecord], export_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(export_dir)
        .with_context(|| format!("Failed to create export directory: {}", export_dir.display()))?;

    let path = export_dir.join(export_file_name(Utc::now()));
    export_history_csv(records, &path)?;
    Ok(path)
}

pub fn export_history_csv<P: AsRef<Path>>(records: &[CalculationRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;

    writer.write_record(["id", "kind", "title", "inputs", "result", "note", "created_at"])?;

    for record in records {
        let inputs = record.inputs.iter()
            .map(|input| format!("{}={}", input.label, input.value))
            .collect::<Vec<_>>()
            .join("; ");
        let created_at = record.created_at_utc()
            .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default();

        writer.write_record([
            record.id.as_str(),
            record.kind.label(),
            record.title.as_str(),
            inputs.as_str(),
            record.result.to_string().as_str(),
            record.note.as_deref().unwrap_or(""),
            created_at.as_str(),
        ])?;
    }

    writer.flush()?;
    info!(count = records.len(), path = %path.display(), "exported history");
    Ok(())
}
