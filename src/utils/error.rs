//! Error handling for Topicbook
//!
//! This module provides a unified error type and result type for every stage
//! of report generation: column configuration, table loading, rendering and
//! output emission.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Report generation error type
#[derive(Debug, Error)]
pub enum TopicbookError {
    /// Column override mapping could not be parsed
    #[error("Configuration error: {message}")]
    Config { message: String },
    /// IO error while reading an input or writing an output
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Delimited input could not be parsed
    #[error("{}", format_parse(path, *line, message))]
    Parse {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },
    /// An example references a topic id with no row in the topic table
    #[error("Referential integrity error: topic id '{topic_id}' has no matching topic row")]
    ReferentialIntegrity { topic_id: String },
}

fn format_parse(path: &Path, line: Option<u64>, message: &str) -> String {
    match line {
        Some(l) => format!("Parse error in {} at line {}: {}", path.display(), l, message),
        None => format!("Parse error in {}: {}", path.display(), message),
    }
}

/// Result type for report generation
pub type TopicbookResult<T> = Result<T, TopicbookError>;

// Convenience constructors for errors
impl TopicbookError {
    pub fn config(message: impl Into<String>) -> Self {
        TopicbookError::Config {
            message: message.into(),
        }
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        TopicbookError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        TopicbookError::Parse {
            path: path.as_ref().to_path_buf(),
            line: None,
            message: message.into(),
        }
    }

    pub fn parse_at(path: impl AsRef<Path>, line: u64, message: impl Into<String>) -> Self {
        TopicbookError::Parse {
            path: path.as_ref().to_path_buf(),
            line: Some(line),
            message: message.into(),
        }
    }

    pub fn missing_topic(topic_id: impl Into<String>) -> Self {
        TopicbookError::ReferentialIntegrity {
            topic_id: topic_id.into(),
        }
    }
}
