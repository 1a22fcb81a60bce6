//! Error types for module domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain module values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModuleDomainError {
    /// The module name is empty after trimming.
    #[error("module name must not be empty")]
    EmptyModuleName,

    /// The module name exceeds the persisted length limit.
    #[error("module name is {0} characters long, expected at most {1}")]
    ModuleNameTooLong(usize, usize),

    /// The target date precedes the start date.
    #[error("module target date {target} precedes start date {start}")]
    TargetBeforeStart {
        /// Requested start date.
        start: chrono::NaiveDate,
        /// Requested target date.
        target: chrono::NaiveDate,
    },
}

/// Error returned while parsing module statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown module status: {0}")]
pub struct ParseModuleStatusError(pub String);
