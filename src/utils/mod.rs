//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code encoding
//! - [`url_validator`] - URL syntax validation
//! - [`db_error`] - SQLx error classification

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
