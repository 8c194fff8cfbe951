pub mod error;
pub mod features;
pub mod forest;
pub mod linear;
pub mod metrics;
pub mod outcome;
pub mod split;
pub mod time_model;

pub use error::ModelError;
