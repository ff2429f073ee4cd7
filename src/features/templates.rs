//! Document template assembly
//!
//! The generated body is wrapped as
//! `preamble + prefix + body + postfix + closing`. The preamble and closing
//! block are fixed; the prefix and postfix come from optional user files and
//! are inserted verbatim.
//!
//! ## Example
//!
//! ```rust
//! use topicbook::templates::DocumentTemplate;
//!
//! let doc = DocumentTemplate::default().render("\\section{Greeting}\n");
//! assert!(doc.starts_with("\\documentclass"));
//! assert!(doc.contains("\\section{Greeting}"));
//! assert!(doc.trim_end().ends_with("\\end{document}"));
//! ```

use crate::data::constants::{DOCUMENT_CLOSING, DOCUMENT_PREAMBLE};
use crate::utils::error::{TopicbookError, TopicbookResult};
use std::fs;
use std::path::Path;

/// User-supplied text around the generated body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTemplate {
    pub prefix: String,
    pub postfix: String,
}

impl DocumentTemplate {
    pub fn new(prefix: impl Into<String>, postfix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            postfix: postfix.into(),
        }
    }

    /// Read the optional prefix and postfix files. An unset path contributes
    /// nothing; a set path must be readable.
    pub fn load(prefix: Option<&Path>, postfix: Option<&Path>) -> TopicbookResult<Self> {
        Ok(Self {
            prefix: read_optional(prefix)?,
            postfix: read_optional(postfix)?,
        })
    }

    /// Complete document around `body`
    pub fn render(&self, body: &str) -> String {
        let mut doc = String::with_capacity(
            DOCUMENT_PREAMBLE.len()
                + self.prefix.len()
                + body.len()
                + self.postfix.len()
                + DOCUMENT_CLOSING.len(),
        );
        doc.push_str(DOCUMENT_PREAMBLE);
        doc.push_str(&self.prefix);
        doc.push_str(body);
        doc.push_str(&self.postfix);
        doc.push_str(DOCUMENT_CLOSING);
        doc
    }
}

fn read_optional(path: Option<&Path>) -> TopicbookResult<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| TopicbookError::io(path, e)),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_order() {
        let template = DocumentTemplate::new("PREFIX\n", "POSTFIX\n");
        let doc = template.render("BODY\n");

        let preamble = doc.find("\\begin{document}").unwrap();
        let prefix = doc.find("PREFIX").unwrap();
        let body = doc.find("BODY").unwrap();
        let postfix = doc.find("POSTFIX").unwrap();
        let closing = doc.find("\\bibliography{reference}").unwrap();
        assert!(preamble < prefix && prefix < body && body < postfix && postfix < closing);
    }

    #[test]
    fn test_default_adds_nothing() {
        let doc = DocumentTemplate::default().render("");
        assert_eq!(doc, format!("{}{}", DOCUMENT_PREAMBLE, DOCUMENT_CLOSING));
    }

    #[test]
    fn test_load_unset_paths() {
        let template = DocumentTemplate::load(None, None).unwrap();
        assert_eq!(template, DocumentTemplate::default());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = DocumentTemplate::load(Some(Path::new("/nonexistent/prefix.tex")), None);
        assert!(matches!(err, Err(TopicbookError::Io { .. })));
    }
}
