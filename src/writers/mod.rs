pub mod csv_writer;
pub mod layout;
pub mod parquet_writer;

pub use csv_writer::CsvExporter;
pub use layout::{export_columns, ExportColumn};
pub use parquet_writer::{ParquetExporter, ParquetFileInfo};
