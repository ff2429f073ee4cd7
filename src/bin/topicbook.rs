//! Topicbook CLI - Render topic/example/reference CSV tables into LaTeX

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use topicbook::{
    columns::{ColumnMap, ColumnOverrides},
    constants::{DEFAULT_EXAMPLES_PATH, DEFAULT_REFERENCES_PATH, DEFAULT_TOPICS_PATH},
    files::default_output_dir,
    generate, GenerateOptions, InputPaths, TopicbookResult,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "topicbook")]
#[command(version)]
#[command(about = "Topicbook - Render topic/example/reference tables into a LaTeX report", long_about = None)]
struct Cli {
    /// Output directory (defaults to out/topicbook/<timestamp>)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Topics table
    #[arg(long, default_value = DEFAULT_TOPICS_PATH)]
    topics: PathBuf,

    /// Examples table
    #[arg(long, default_value = DEFAULT_EXAMPLES_PATH)]
    examples: PathBuf,

    /// References table
    #[arg(long, default_value = DEFAULT_REFERENCES_PATH)]
    references: PathBuf,

    /// JSON object mapping logical field names to column names.
    /// Replaces every --col-* option when given.
    #[arg(long, value_name = "JSON")]
    column_map: Option<String>,

    /// Column holding the topic id (topics and examples)
    #[arg(long, default_value = "topic_id")]
    col_topic_id: String,

    /// Column holding the topic number
    #[arg(long, default_value = "topic_number")]
    col_topic_number: String,

    /// Column holding the topic title
    #[arg(long, default_value = "topic_title")]
    col_topic_title: String,

    /// Column holding the reference id (references and examples)
    #[arg(long, default_value = "reference_id")]
    col_reference_id: String,

    /// Column holding the reference title
    #[arg(long, default_value = "reference_title")]
    col_reference_title: String,

    /// Column holding the example number
    #[arg(long, default_value = "example_number")]
    col_example_number: String,

    /// Column holding the example type
    #[arg(long, default_value = "example_type")]
    col_example_type: String,

    /// Column holding the example word
    #[arg(long, default_value = "example_word")]
    col_example_word: String,

    /// File inserted verbatim after the document preamble
    #[arg(long)]
    tex_template_prefix: Option<PathBuf>,

    /// File inserted verbatim before the closing block
    #[arg(long)]
    tex_template_postfix: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Quiet mode: suppress the summary on stderr
    #[arg(short, long)]
    quiet: bool,
}

#[cfg(feature = "cli")]
impl Cli {
    fn overrides(&self) -> ColumnOverrides {
        ColumnOverrides {
            topic_id: self.col_topic_id.clone(),
            topic_number: self.col_topic_number.clone(),
            topic_title: self.col_topic_title.clone(),
            reference_id: self.col_reference_id.clone(),
            reference_title: self.col_reference_title.clone(),
            example_number: self.col_example_number.clone(),
            example_type: self.col_example_type.clone(),
            example_word: self.col_example_word.clone(),
        }
    }

    fn into_options(self) -> TopicbookResult<GenerateOptions> {
        // Column configuration fails before any file is touched
        let columns = ColumnMap::resolve(self.column_map.as_deref(), &self.overrides())?;
        Ok(GenerateOptions {
            inputs: InputPaths {
                topics: self.topics,
                examples: self.examples,
                references: self.references,
            },
            out_dir: self
                .out_dir
                .unwrap_or_else(|| default_output_dir(&chrono::Local::now())),
            columns,
            template_prefix: self.tex_template_prefix,
            template_postfix: self.tex_template_postfix,
        })
    }
}

#[cfg(feature = "cli")]
fn init_logging(level: &str) -> Option<flexi_logger::LoggerHandle> {
    let started = flexi_logger::Logger::try_with_str(level)
        .and_then(|logger| logger.log_to_stderr().start());
    match started {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    }
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    let _logger = init_logging(&cli.log_level);
    let quiet = cli.quiet;

    let result = cli.into_options().and_then(|options| generate(&options));
    match result {
        Ok(summary) => {
            if !quiet {
                eprintln!("✓ Bibliography written to: {}", summary.paths.bibliography.display());
                eprintln!(
                    "✓ Document written to: {} ({} topic(s), {} example(s), {} reference(s))",
                    summary.paths.document.display(),
                    summary.sections,
                    summary.examples,
                    summary.references
                );
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install topicbook --features cli");
    eprintln!("  topicbook [OPTIONS]");
}
