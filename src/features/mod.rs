//! Feature modules - Document generation
//!
//! This module contains the generators for each part of the output:
//! - BibTeX records for the reference table
//! - Summary tables
//! - Topic report body
//! - Document templates

pub mod bibtex;
pub mod report;
pub mod tables;
pub mod templates;

// Re-export commonly used types
pub use bibtex::{bibliography, MiscEntry};
pub use report::{render_report, RenderedReport};
pub use tables::{frame_table, table_to_latex, Table};
pub use templates::DocumentTemplate;
