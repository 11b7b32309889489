use crate::error::{ImportError, Result};
use calamine::{open_workbook, DataType, Reader, Xlsx};
use std::path::Path;
use tracing::info;

/// Reads the first worksheet of an xlsx workbook into rows of cell text.
///
/// Cells are rendered as display text; locale-aware numeric and date
/// formatting is the workbook's concern, not the pipeline's. A missing or
/// unreadable workbook is fatal.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::Source(format!("no worksheet found in '{}'", path.display())))??;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_string().unwrap_or_else(|| format!("{cell}")))
                .collect()
        })
        .collect();

    info!("Read {} rows from '{}'", rows.len(), path.display());
    Ok(rows)
}
