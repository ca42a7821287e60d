use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::utils::constants::{
    BENIN_FILE, BENIN_SOURCE, SIERRA_LEONE_FILE, SIERRA_LEONE_SOURCE, TOGO_FILE, TOGO_SOURCE,
};

/// A named origin for a batch of records, e.g. one country's CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SourceConfig {
    #[validate(length(min = 1))]
    pub id: String,

    /// File name, resolved against the data directory unless absolute.
    pub file: PathBuf,
}

impl SourceConfig {
    pub fn new(id: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            file: file.into(),
        }
    }

    pub fn location(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.file)
    }

    /// The three country exports the dashboard was built around.
    pub fn defaults() -> Vec<SourceConfig> {
        vec![
            SourceConfig::new(BENIN_SOURCE, BENIN_FILE),
            SourceConfig::new(SIERRA_LEONE_SOURCE, SIERRA_LEONE_FILE),
            SourceConfig::new(TOGO_SOURCE, TOGO_FILE),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_joins_data_dir() {
        let source = SourceConfig::new("Benin", "benin.csv");
        assert_eq!(
            source.location(Path::new("data")),
            PathBuf::from("data/benin.csv")
        );
    }

    #[test]
    fn test_empty_id_rejected() {
        let source = SourceConfig::new("", "benin.csv");
        assert!(source.validate().is_err());
        assert!(SourceConfig::defaults().iter().all(|s| s.validate().is_ok()));
    }
}
