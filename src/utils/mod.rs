//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types
//! - Output paths and file emission

pub mod error;
pub mod files;

// Re-export commonly used items
pub use error::{TopicbookError, TopicbookResult};
pub use files::{default_output_dir, write_output, OutputPaths};
