pub mod analyses;
pub mod chart;
pub mod clients;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod process;
pub mod report;
pub mod stats;
pub mod store;

pub use config::InsightsConfig;
pub use error::InsightsError;
