//! CLI library components for the submission metadata validator.

pub mod logging;
pub mod validate;
