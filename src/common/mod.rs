//! Shared utilities: error types, result helpers and label truncation

pub mod error;
pub mod result;
pub mod truncate;
