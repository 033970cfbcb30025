//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when an item is not found.
//! - [`ExistingKey`] thrown when a unique key (registration number) collides.
//! - [`InvalidAmount`] thrown when a money text fails to parse.
//! - [`Validation`] thrown when an input field fails validation; it carries
//!   the offending field name so callers can report it.
//! - [`Store`] thrown when the upstream vehicle/expense read fails.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`Validation`]: EngineError::Validation
//!  [`Store`]: EngineError::Store
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("store error: {0}")]
    Store(String),
}

impl EngineError {
    /// Shorthand for a [`Validation`] error on `field`.
    ///
    /// [`Validation`]: EngineError::Validation
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (
                Self::Validation {
                    field: fa,
                    message: ma,
                },
                Self::Validation {
                    field: fb,
                    message: mb,
                },
            ) => fa == fb && ma == mb,
            (Self::Store(a), Self::Store(b)) => a == b,
            _ => false,
        }
    }
}
