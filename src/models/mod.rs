pub mod filter_spec;
pub mod metric;
pub mod record;
pub mod source;
pub mod table;

pub use filter_spec::{FilterSpec, MetricRange};
pub use metric::Metric;
pub use record::Record;
pub use source::SourceConfig;
pub use table::{ColumnKind, FilteredTable, RecordSet, TableSchema, UnifiedTable};
