use crate::core::month_key::MonthKey;
use crate::core::repository::EntryRepository;
use crate::db::store::TimeRecordStore;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::csv::{export_csv, export_tsv};
use crate::export::fs_utils::ensure_writable;
use crate::export::json::export_json;
use crate::export::model::{RowExport, rows_from_view};
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write the rows of `key` to `file`, which must be an absolute path.
    ///
    /// The month must already be loaded in `repo`. Returns the number of
    /// rows written; an empty month writes nothing.
    pub fn export<S: TimeRecordStore>(
        repo: &EntryRepository<S>,
        key: MonthKey,
        format: ExportFormat,
        file: &str,
        decimal_comma: bool,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let rows = rows_from_view(repo, repo.month_view(key), decimal_comma);
        if rows.is_empty() {
            warning(format!("No entries found for {key}."));
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => {
                let flat: Vec<RowExport> = rows.iter().map(|(r, _)| r.clone()).collect();
                export_csv(&flat, path)?
            }
            ExportFormat::Json => {
                let flat: Vec<RowExport> = rows.iter().map(|(r, _)| r.clone()).collect();
                export_json(&flat, path)?
            }
            ExportFormat::Tsv => export_tsv(&rows, path)?,
        }

        Ok(rows.len())
    }
}
