use crate::error::Result;
use crate::models::RecordSet;
use crate::writers::layout::export_columns;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Debug, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// Write `table` to `path`. Returns `false` without creating the file
    /// when the table is empty.
    pub fn write_table<T: RecordSet + ?Sized>(&self, table: &T, path: &Path) -> Result<bool> {
        if table.is_empty() {
            return Ok(false);
        }

        self.write_to(table, File::create(path)?)?;
        info!(path = %path.display(), rows = table.len(), "wrote CSV export");
        Ok(true)
    }

    pub fn write_to<T: RecordSet + ?Sized, W: Write>(&self, table: &T, writer: W) -> Result<()> {
        let columns = export_columns(table.schema());
        let mut writer = csv::Writer::from_writer(writer);

        writer.write_record(columns.iter().map(|c| c.name()))?;
        for record in table.records() {
            writer.write_record(columns.iter().map(|c| c.text(record)))?;
        }
        writer.flush()?;

        Ok(())
    }
}
