pub mod analyzers;
pub mod cli;
pub mod configuration;
pub mod context;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

pub use context::DashboardContext;
pub use error::{DashboardError, Result};
