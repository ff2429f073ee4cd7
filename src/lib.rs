//! # topicbook
//!
//! Render topic, example and reference tables into a LaTeX report with a
//! BibTeX bibliography.
//!
//! ## Pipeline
//!
//! - **Load**: three CSV files become column-typed [`Frame`]s
//! - **Bibliography**: every reference row becomes an `@Misc` record
//! - **Join**: examples ⋈ references ⋈ topics, keeping every example
//! - **Render**: one section per topic that has examples, a summary table,
//!   and per-type subsections with detail blocks
//! - **Write**: `reference.bib` first, then `out.tex`
//!
//! Column names are resolved once through a [`ColumnMap`], so renamed CSV
//! headers need no code changes.
//!
//! ## Usage Example
//!
//! ```rust
//! use topicbook::{render_document, ColumnMap, DocumentTemplate, Frame, Source, Tables};
//!
//! let tables = Tables {
//!     topics: Frame::from_reader(
//!         "topic_id,topic_number,topic_title\nT1,1,Greeting\n".as_bytes(),
//!         Source::Topic,
//!         "topics.csv",
//!     )
//!     .unwrap(),
//!     references: Frame::from_reader(
//!         "reference_id,reference_title\nR1,Book A\n".as_bytes(),
//!         Source::Reference,
//!         "references.csv",
//!     )
//!     .unwrap(),
//!     examples: Frame::from_reader(
//!         "example_number,topic_id,reference_id,example_type,example_word\n1,T1,R1,Declaration,Hello\n"
//!             .as_bytes(),
//!         Source::Example,
//!         "examples.csv",
//!     )
//!     .unwrap(),
//! };
//!
//! let doc = render_document(&tables, &ColumnMap::default(), &DocumentTemplate::default()).unwrap();
//! assert!(doc.contains("\\section{Greeting}"));
//! assert!(doc.contains("\\subsection{Declaration list of Greeting}"));
//! ```

/// Core table modules
pub mod core;

/// Data layer - schema and constants
pub mod data;

/// Feature modules - document generation
pub mod features;

/// Utility modules
pub mod utils;

use log::{debug, info};
use std::path::PathBuf;

// Re-export core types
pub use crate::core::frame;
pub use crate::core::frame::{Column, ColumnKind, Frame, Value};
pub use crate::core::join;
pub use crate::core::join::join_tables;

// Re-export data modules
pub use data::columns;
pub use data::columns::{ColumnMap, ColumnOverrides, Field, Source};
pub use data::constants;
pub use data::constants::ExampleType;

// Re-export feature modules
pub use features::bibtex;
pub use features::report;
pub use features::tables;
pub use features::templates;
pub use features::templates::DocumentTemplate;

// Re-export utilities
pub use utils::error::{TopicbookError, TopicbookResult};
pub use utils::files;
pub use utils::files::OutputPaths;

/// Locations of the three input tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub topics: PathBuf,
    pub examples: PathBuf,
    pub references: PathBuf,
}

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            topics: PathBuf::from(constants::DEFAULT_TOPICS_PATH),
            examples: PathBuf::from(constants::DEFAULT_EXAMPLES_PATH),
            references: PathBuf::from(constants::DEFAULT_REFERENCES_PATH),
        }
    }
}

/// The three loaded input tables
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub topics: Frame,
    pub examples: Frame,
    pub references: Frame,
}

impl Tables {
    /// Load all three tables; the first failure aborts
    pub fn load(inputs: &InputPaths) -> TopicbookResult<Self> {
        Ok(Self {
            examples: Frame::from_path(&inputs.examples, Source::Example)?,
            references: Frame::from_path(&inputs.references, Source::Reference)?,
            topics: Frame::from_path(&inputs.topics, Source::Topic)?,
        })
    }

    /// Check that every join key column is present
    pub fn check_join_keys(&self, map: &ColumnMap) -> TopicbookResult<()> {
        self.examples.require(Field::ReferenceId, Source::Example, map)?;
        self.examples.require(Field::TopicId, Source::Example, map)?;
        self.references.require(Field::ReferenceId, Source::Reference, map)?;
        self.topics.require(Field::TopicId, Source::Topic, map)?;
        Ok(())
    }
}

/// Options for a full generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub inputs: InputPaths,
    /// Directory receiving `out.tex` and `reference.bib`; created if missing
    pub out_dir: PathBuf,
    pub columns: ColumnMap,
    pub template_prefix: Option<PathBuf>,
    pub template_postfix: Option<PathBuf>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            inputs: InputPaths::default(),
            out_dir: files::default_output_dir(&chrono::Local::now()),
            columns: ColumnMap::default(),
            template_prefix: None,
            template_postfix: None,
        }
    }
}

/// What a generation run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub paths: OutputPaths,
    /// Bibliography records written
    pub references: usize,
    /// Topic sections rendered
    pub sections: usize,
    /// Example rows rendered
    pub examples: usize,
}

/// Join and render the complete `out.tex` contents in memory
pub fn render_document(
    tables: &Tables,
    map: &ColumnMap,
    template: &DocumentTemplate,
) -> TopicbookResult<String> {
    let joined = join_tables(&tables.examples, &tables.references, &tables.topics, map)?;
    let report = report::render_report(&joined, &tables.topics, map)?;
    Ok(template.render(&report.body))
}

/// Run the whole pipeline: load, write the bibliography, join, render,
/// write the document.
///
/// Inputs, join key columns and templates are all checked before the
/// output directory is created.
///
/// The bibliography is on disk before rendering starts, so a rendering
/// failure leaves `reference.bib` without a matching `out.tex`.
pub fn generate(options: &GenerateOptions) -> TopicbookResult<GenerateSummary> {
    let map = &options.columns;
    let tables = Tables::load(&options.inputs)?;
    tables.check_join_keys(map)?;
    let template = DocumentTemplate::load(
        options.template_prefix.as_deref(),
        options.template_postfix.as_deref(),
    )?;

    let paths = OutputPaths::new(&options.out_dir);
    paths.create_dir()?;

    let bib = bibtex::bibliography(&tables.references, map);
    files::write_output(&paths.bibliography, &bib)?;

    let joined = join_tables(&tables.examples, &tables.references, &tables.topics, map)?;
    let report = report::render_report(&joined, &tables.topics, map)?;
    debug!(
        "event=report_rendered sections={} examples={} untyped={}",
        report.sections, report.examples, report.untyped
    );
    files::write_output(&paths.document, &template.render(&report.body))?;

    info!(
        "event=generate_done out_dir={} references={} sections={}",
        paths.dir.display(),
        tables.references.len(),
        report.sections
    );

    Ok(GenerateSummary {
        paths,
        references: tables.references.len(),
        sections: report.sections,
        examples: report.examples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn tables(examples: &str) -> Tables {
        Tables {
            topics: Frame::from_reader(
                "topic_id,topic_number,topic_title\nT1,1,Greeting\nT2,2,Farewell\n".as_bytes(),
                Source::Topic,
                "topics.csv",
            )
            .unwrap(),
            references: Frame::from_reader(
                "reference_id,reference_title\nR1,Book A\n".as_bytes(),
                Source::Reference,
                "references.csv",
            )
            .unwrap(),
            examples: Frame::from_reader(examples.as_bytes(), Source::Example, "examples.csv")
                .unwrap(),
        }
    }

    #[test]
    fn test_render_document_wraps_body() {
        let doc = render_document(
            &tables("example_number,topic_id,reference_id,example_type,example_word\n1,T1,R1,Declaration,Hello\n"),
            &ColumnMap::default(),
            &DocumentTemplate::default(),
        )
        .unwrap();
        assert!(doc.starts_with("\\documentclass"));
        let section = doc.find("\\section{Greeting}").unwrap();
        let closing = doc.find("\\bibliographystyle{plain}").unwrap();
        assert!(section < closing);
    }

    #[test]
    fn test_section_count_matches_distinct_topics() {
        let doc = render_document(
            &tables(
                "example_number,topic_id,reference_id,example_type,example_word\n\
                 1,T1,R1,Declaration,a\n\
                 2,T1,R1,Expression,b\n",
            ),
            &ColumnMap::default(),
            &DocumentTemplate::default(),
        )
        .unwrap();
        assert_eq!(doc.matches("\\section{").count(), 1);
        assert!(!doc.contains("Farewell"));
    }

    #[test]
    fn test_check_join_keys() {
        let map = ColumnMap::default();
        let complete = tables("example_number,topic_id,reference_id\n1,T1,R1\n");
        assert!(complete.check_join_keys(&map).is_ok());

        let err = tables("example_number,topic_id\n1,T1\n")
            .check_join_keys(&map)
            .unwrap_err();
        assert!(matches!(err, TopicbookError::Config { .. }));
        assert!(err.to_string().contains("examples table"));
    }

    #[test]
    fn test_default_input_paths() {
        let inputs = InputPaths::default();
        assert_eq!(inputs.topics, Path::new("data/lst_topics.csv"));
        assert_eq!(inputs.examples, Path::new("data/lst_ex.csv"));
        assert_eq!(inputs.references, Path::new("data/lst_ref.csv"));
    }
}
