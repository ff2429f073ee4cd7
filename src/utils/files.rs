//! Output locations and file emission
//!
//! Both artifacts are written with truncate-and-write semantics. There is no
//! atomic rename and no rollback: when the document fails after the
//! bibliography was written, the bibliography stays on disk.

use crate::data::constants::{
    BIBLIOGRAPHY_FILE_NAME, DEFAULT_OUTPUT_ROOT, DOCUMENT_FILE_NAME, RUN_ID,
};
use crate::utils::error::{TopicbookError, TopicbookResult};
use chrono::{DateTime, TimeZone};
use log::debug;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp format of default output directories
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// The two files a run produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub document: PathBuf,
    pub bibliography: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        Self {
            document: dir.join(DOCUMENT_FILE_NAME),
            bibliography: dir.join(BIBLIOGRAPHY_FILE_NAME),
            dir,
        }
    }

    /// Create the output directory and its parents
    pub fn create_dir(&self) -> TopicbookResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| TopicbookError::io(&self.dir, e))
    }
}

/// `out/topicbook/<YYYYmmddHHMMSS>` for the given instant
pub fn default_output_dir<Tz>(now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Path::new(DEFAULT_OUTPUT_ROOT)
        .join(RUN_ID)
        .join(now.format(TIMESTAMP_FORMAT).to_string())
}

/// Truncate and write a text file
pub fn write_output(path: impl AsRef<Path>, contents: &str) -> TopicbookResult<()> {
    let path = path.as_ref();
    fs::write(path, contents).map_err(|e| TopicbookError::io(path, e))?;
    debug!(
        "event=file_written path={} bytes={}",
        path.display(),
        contents.len()
    );
    Ok(())
}
