//! BibTeX bibliography generation
//!
//! Every row of the reference table becomes one `@Misc` record, in table
//! order. Values are copied verbatim; blank cells give empty braces.
//!
//! ## Example
//!
//! ```rust
//! use topicbook::bibtex::MiscEntry;
//!
//! let entry = MiscEntry {
//!     key: "R1".to_string(),
//!     author: "Smith".to_string(),
//!     title: "Book A".to_string(),
//!     year: "2020".to_string(),
//!     ..Default::default()
//! };
//! let bib = entry.to_bibtex();
//! assert!(bib.starts_with("@Misc{R1,"));
//! assert!(bib.contains("howpublished = {\\url{}},"));
//! ```

use crate::core::frame::Frame;
use crate::data::columns::{ColumnMap, Field};
use std::fmt::Write;

/// A single `@Misc` record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiscEntry {
    /// Citation key (the reference id)
    pub key: String,
    pub author: String,
    /// Rendered inside `\url{...}`
    pub url: String,
    pub title: String,
    pub year: String,
    pub institution: String,
}

impl MiscEntry {
    /// Build the record for one reference row
    pub fn from_row(references: &Frame, row: usize, map: &ColumnMap) -> Self {
        let text = |field| references.get(row, field, map).as_text().into_owned();
        Self {
            key: text(Field::ReferenceId),
            author: text(Field::ReferenceAuthor),
            url: text(Field::ReferenceNotes),
            title: text(Field::ReferenceTitle),
            year: text(Field::ReferenceYear),
            institution: text(Field::ReferenceOrganization),
        }
    }

    /// Render in the fixed field order
    pub fn to_bibtex(&self) -> String {
        let mut bib = String::new();
        let _ = writeln!(bib, "@Misc{{{},", self.key);
        let _ = writeln!(bib, "  author       = {{{}}},", self.author);
        let _ = writeln!(bib, "  howpublished = {{\\url{{{}}}}},", self.url);
        let _ = writeln!(bib, "  title        = {{{}}},", self.title);
        let _ = writeln!(bib, "  year         = {{{}}},", self.year);
        let _ = writeln!(bib, "  institution  = {{{}}}", self.institution);
        bib.push_str("}\n");
        bib
    }
}

/// One entry per reference row, in row order
pub fn bib_entries(references: &Frame, map: &ColumnMap) -> Vec<MiscEntry> {
    (0..references.len())
        .map(|row| MiscEntry::from_row(references, row, map))
        .collect()
}

/// Full `.bib` file contents, records separated by a blank line
pub fn bibliography(references: &Frame, map: &ColumnMap) -> String {
    bib_entries(references, map)
        .iter()
        .map(MiscEntry::to_bibtex)
        .collect::<Vec<_>>()
        .join("\n")
}
