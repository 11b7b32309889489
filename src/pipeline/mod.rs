pub mod enrich;
pub mod normalize;
pub mod schema;
pub mod validate;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::geocoding::Geocoder;
use normalize::Record;
use schema::FieldIndex;

/// Result of one pipeline run over a row source.
#[derive(Debug)]
pub struct ImportOutcome {
    /// One record per data row, in source order.
    pub records: Vec<Record>,
    /// Every soft failure reported during the run.
    pub diagnostics: Vec<Diagnostic>,
    /// How many records carry coordinates.
    pub geocoded: usize,
}

/// Runs the full row pipeline: bind the schema to the first row once, then
/// normalize, validate and enrich every remaining row in source order.
///
/// Rows are processed one at a time; each geocoding call is awaited before
/// the next row starts, so requests never overlap. Nothing here aborts on
/// data content: malformed headers, domain violations and geocoding
/// failures all surface as diagnostics while the run completes.
pub async fn process_rows(rows: Vec<Vec<String>>, geocoder: &dyn Geocoder) -> ImportOutcome {
    let mut diagnostics = Vec::new();
    let mut records = Vec::new();
    let mut geocoded = 0;

    let mut rows = rows.into_iter();
    let Some(header) = rows.next() else {
        warn!("Source contained no rows, nothing to import");
        return ImportOutcome { records, diagnostics, geocoded };
    };

    let (index, schema_diagnostic) = FieldIndex::bind(&header);
    if let Some(diagnostic) = schema_diagnostic {
        diagnostic.report();
        diagnostics.push(diagnostic);
    }
    info!("Bound {} header columns", index.len());

    for cells in rows {
        let mut record = normalize::normalize_row(&cells, &index, &mut diagnostics);
        match enrich::enrich_record(&mut record, geocoder).await {
            Some(diagnostic) => diagnostics.push(diagnostic),
            None => geocoded += 1,
        }
        records.push(record);
    }

    info!("Processed {} data rows ({} geocoded)", records.len(), geocoded);
    ImportOutcome { records, diagnostics, geocoded }
}

/// Schema binding and validation only: no geocoding, no output writes.
/// Used to vet a workbook before a real import run.
pub fn check_rows(rows: Vec<Vec<String>>) -> ImportOutcome {
    let mut diagnostics = Vec::new();
    let mut records = Vec::new();

    let mut rows = rows.into_iter();
    let Some(header) = rows.next() else {
        warn!("Source contained no rows, nothing to check");
        return ImportOutcome { records, diagnostics, geocoded: 0 };
    };

    let (index, schema_diagnostic) = FieldIndex::bind(&header);
    if let Some(diagnostic) = schema_diagnostic {
        diagnostic.report();
        diagnostics.push(diagnostic);
    }

    for cells in rows {
        records.push(normalize::normalize_row(&cells, &index, &mut diagnostics));
    }

    ImportOutcome { records, diagnostics, geocoded: 0 }
}

/// Writes the record collection as pretty-printed JSON to the primary path
/// plus an identical timestamped backup alongside it.
///
/// Returns the `(primary, backup)` paths. A write failure here is fatal;
/// it is the only post-ingest error that terminates a run.
pub fn write_outputs(records: &[Record], primary: &Path) -> Result<(PathBuf, PathBuf)> {
    if let Some(parent) = primary.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let document = serde_json::to_string_pretty(records)?;
    fs::write(primary, &document)?;

    let backup = backup_path(primary, Local::now());
    fs::write(&backup, &document)?;

    info!(
        "Wrote {} records to '{}' (backup '{}')",
        records.len(),
        primary.display(),
        backup.display()
    );
    Ok((primary.to_path_buf(), backup))
}

/// Backup filename embeds a local-time, second-precision timestamp so each
/// run produces a distinct, non-overwriting artifact.
fn backup_path(primary: &Path, now: DateTime<Local>) -> PathBuf {
    let stem = primary
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = primary
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("json");
    let filename = format!("{stem}-{}.{extension}", now.format("%Y-%m-%d_%H-%M-%S"));
    primary.with_file_name(filename)
}
