//! Error handling for allocation runs
//!
//! Every failure the allocator can report is a precondition violation detected
//! before any record is mutated, so a rejected call never leaves partial state.

use thiserror::Error;

/// Error type for allocation operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// Negative, non-finite or otherwise unusable input values
    #[error("Invalid input: {message}")]
    InvalidInput { message: String, customer: Option<String>, field: Option<String> },

    /// Allocator settings that cannot drive a run
    #[error("Configuration error: {message}")]
    Configuration { message: String, setting: Option<String> },
}

impl AllocationError {
    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AllocationError::InvalidInput { .. } => "invalid_input",
            AllocationError::Configuration { .. } => "configuration",
        }
    }

    /// Create an error for a bad field on a specific customer
    pub fn invalid_customer(customer: &str, field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            customer: Some(customer.to_string()),
            field: Some(field.to_string()),
        }
    }

    /// Create an error for a bad run-level argument such as the stock quantity
    pub fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into(), customer: None, field: Some(field.to_string()) }
    }

    /// Create a configuration error
    pub fn configuration(setting: &str, message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into(), setting: Some(setting.to_string()) }
    }

    /// Name of the offending customer, when the error concerns one
    pub fn customer(&self) -> Option<&str> {
        match self {
            AllocationError::InvalidInput { customer, .. } => customer.as_deref(),
            AllocationError::Configuration { .. } => None,
        }
    }
}

/// Result type alias for allocation operations
pub type AllocationResult<T> = Result<T, AllocationError>;
