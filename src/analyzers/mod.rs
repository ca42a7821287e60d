pub mod distribution;
pub mod summary;

pub use distribution::{box_stats, histogram, scatter_pairs, BoxStats, Histogram, ScatterPoint};
pub use summary::{summarize, GroupSummary, SummaryView};
