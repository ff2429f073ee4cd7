//! Fixed categories and document boilerplate

use std::fmt;

/// Example category, iterated in declared order when rendering subsections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExampleType {
    Declaration,
    Expression,
}

impl ExampleType {
    /// Declared rendering order
    pub const ALL: [ExampleType; 2] = [ExampleType::Declaration, ExampleType::Expression];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExampleType::Declaration => "Declaration",
            ExampleType::Expression => "Expression",
        }
    }

    /// Exact, case-sensitive match against the cell text
    pub fn parse(value: &str) -> Option<ExampleType> {
        ExampleType::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for ExampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default input locations, relative to the working directory
pub const DEFAULT_TOPICS_PATH: &str = "data/lst_topics.csv";
pub const DEFAULT_EXAMPLES_PATH: &str = "data/lst_ex.csv";
pub const DEFAULT_REFERENCES_PATH: &str = "data/lst_ref.csv";

/// Output file names inside the output directory
pub const DOCUMENT_FILE_NAME: &str = "out.tex";
pub const BIBLIOGRAPHY_FILE_NAME: &str = "reference.bib";

/// Parent of timestamped output directories
pub const DEFAULT_OUTPUT_ROOT: &str = "out";
pub const RUN_ID: &str = "topicbook";

/// Document preamble, up to and including the table of contents
pub const DOCUMENT_PREAMBLE: &str = r"\documentclass[a4paper,11pt]{ltjsarticle}
\usepackage{url}
\usepackage{array}
\usepackage{booktabs}
\usepackage[hidelinks]{hyperref}
\newcolumntype{P}[1]{>{\raggedright\arraybackslash}p{#1}}

\title{Topic Examples}
\author{}
\date{}

\begin{document}
\maketitle
\tableofcontents
\clearpage
";

/// Closing block after the generated body
pub const DOCUMENT_CLOSING: &str = r"
\bibliographystyle{plain}
\bibliography{reference}
\listoftables
\end{document}
";
