//! Data layer - Schema and constants
//!
//! This module contains the static data used while rendering reports:
//! - Logical field names and column-name resolution
//! - Example categories
//! - Document boilerplate and default paths

pub mod columns;
pub mod constants;

// Re-export commonly used items
pub use columns::{ColumnMap, ColumnOverrides, Field, Source};
pub use constants::{ExampleType, DOCUMENT_CLOSING, DOCUMENT_PREAMBLE};
