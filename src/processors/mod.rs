pub mod data_unifier;
pub mod filter_engine;
pub mod geo;

pub use data_unifier::DataUnifier;
pub use filter_engine::FilterEngine;
pub use geo::{geo_points, GeoPoint};
