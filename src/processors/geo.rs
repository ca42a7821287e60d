use crate::error::{DashboardError, Result};
use crate::models::RecordSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub source: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Rows carrying both coordinates.
///
/// Callers check [`crate::models::TableSchema::has_coordinates`] first; a
/// schema without either column is reported as
/// [`DashboardError::CapabilityUnavailable`], never as an empty list.
pub fn geo_points<T: RecordSet + ?Sized>(table: &T) -> Result<Vec<GeoPoint>> {
    let schema = table.schema();
    if !schema.has_coordinates() {
        return Err(DashboardError::CapabilityUnavailable {
            view: "Map".to_string(),
            missing: schema.missing_coordinate_columns(),
        });
    }

    Ok(table
        .records()
        .iter()
        .filter_map(|r| {
            r.coordinates().map(|(latitude, longitude)| GeoPoint {
                source: r.source.clone(),
                latitude,
                longitude,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Metric, Record, TableSchema, UnifiedTable};

    fn table(headers: &[&str], records: Vec<Record>) -> UnifiedTable {
        UnifiedTable::from_records(
            vec!["Benin".to_string()],
            records,
            TableSchema::from_headers(headers.iter().copied()),
        )
        .unwrap()
    }

    #[test]
    fn test_rows_without_both_coordinates_are_dropped() {
        let mut partial = Record::new("Benin").with_metric(Metric::Ghi, 2.0);
        partial.latitude = Some(9.3);
        let records = vec![
            Record::new("Benin")
                .with_metric(Metric::Ghi, 1.0)
                .with_coordinates(9.3, 2.3),
            partial,
            Record::new("Benin").with_metric(Metric::Ghi, 3.0),
        ];

        let points = geo_points(&table(&["GHI", "latitude", "longitude"], records)).unwrap();

        assert_eq!(
            points,
            vec![GeoPoint {
                source: "Benin".to_string(),
                latitude: 9.3,
                longitude: 2.3,
            }]
        );
    }

    #[test]
    fn test_missing_longitude_column_is_capability_error() {
        let records = vec![Record::new("Benin").with_metric(Metric::Ghi, 1.0)];

        let result = geo_points(&table(&["GHI", "latitude"], records));

        match result {
            Err(DashboardError::CapabilityUnavailable { missing, .. }) => {
                assert_eq!(missing, vec!["longitude".to_string()]);
            }
            other => panic!("expected CapabilityUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_present_columns_without_values_yield_empty_points() {
        let records = vec![Record::new("Benin").with_metric(Metric::Ghi, 1.0)];

        let points = geo_points(&table(&["GHI", "latitude", "longitude"], records)).unwrap();

        assert!(points.is_empty());
    }
}
