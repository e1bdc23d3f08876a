use crate::errors::{AppError, AppResult};
use crate::export::{RowExport, notify_export_success};
use crate::ui::messages::info;
use std::path::Path;

/// CSV with a header row, one record per grid row.
pub(crate) fn export_csv(rows: &[RowExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for item in rows {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}

/// Tab separated grid cells, no header and no trailing newline.
pub(crate) fn export_tsv(rows: &[(RowExport, bool)], path: &Path) -> AppResult<()> {
    info(format!("Exporting to TSV: {}", path.display()));

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Necessary)
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for (row, first_of_day) in rows {
        wtr.write_record(row.grid_cells(*first_of_day))
            .map_err(|e| AppError::Export(format!("TSV write error: {e}")))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(format!("TSV flush error: {e}")))?;
    let text = String::from_utf8_lossy(&bytes);

    std::fs::write(path, text.trim_end_matches('\n'))?;

    notify_export_success("TSV", path);
    Ok(())
}
