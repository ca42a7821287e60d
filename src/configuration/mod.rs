pub mod settings;

pub use settings::{FallbackRange, Settings};
