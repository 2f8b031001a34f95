//! Error types for the core crate

use thiserror::Error;

/// Errors raised while converting external strings into typed filter values.
///
/// The parse path itself never fails; these only surface when labels are read
/// from configuration files or other caller-provided data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown {field} label: {value:?}")]
    UnknownLabel { field: &'static str, value: String },

    #[error("Invalid audit year: {0:?}")]
    InvalidYear(String),
}

pub type Result<T> = std::result::Result<T, Error>;
