//! In-memory tables loaded from delimited files
//!
//! A [`Frame`] is a small column-typed table. Column kinds are inferred from
//! the cells as read: integer when every non-blank cell is an integer, float
//! when every non-blank cell is a number, text otherwise. Blank cells are
//! [`Value::Null`].
//!
//! ## Example
//!
//! ```rust
//! use topicbook::columns::Source;
//! use topicbook::frame::{ColumnKind, Frame, Value};
//!
//! let csv = "topic_id,topic_number\nT1,1\nT2,\n";
//! let frame = Frame::from_reader(csv.as_bytes(), Source::Topic, "topics.csv").unwrap();
//! assert_eq!(frame.len(), 2);
//! assert_eq!(frame.columns()[1].kind, ColumnKind::Integer);
//! assert_eq!(frame.rows()[1][1], Value::Null);
//! ```

use crate::data::columns::{ColumnMap, Field, Source};
use crate::utils::error::{TopicbookError, TopicbookResult};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

lazy_static! {
    static ref INTEGER_PATTERN: Regex = Regex::new(r"^[+-]?\d+$").unwrap();

    // Plain decimal and exponent notation only; `inf`/`NaN` stay text.
    static ref FLOAT_PATTERN: Regex =
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap();
}

static NULL: Value = Value::Null;

/// A single cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Display text; null renders as the empty string
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Text(s) => Cow::Borrowed(s.as_str()),
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::Float(x) => Cow::Owned(format!("{:?}", x)),
        }
    }

    /// Join/group key: rendered text, `None` for null
    pub fn key(&self) -> Option<Cow<'_, str>> {
        if self.is_null() {
            None
        } else {
            Some(self.as_text())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Inferred column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }
}

/// Column metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Name in this frame (may carry a `_x`/`_y` suffix after a join)
    pub name: String,
    /// Table the column was loaded from
    pub source: Source,
    /// Name in the source table
    pub source_name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, source: Source, kind: ColumnKind) -> Self {
        let name = name.into();
        Self {
            source_name: name.clone(),
            name,
            source,
            kind,
        }
    }
}

/// Column-typed table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    /// Assemble a frame; every row must have one value per column
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Load a delimited file
    pub fn from_path(path: impl AsRef<Path>, source: Source) -> TopicbookResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TopicbookError::io(path, e))?;
        let frame = Self::from_reader(BufReader::new(file), source, path)?;
        debug!(
            "event=table_loaded table={} path={} rows={} columns={}",
            source.as_str(),
            path.display(),
            frame.len(),
            frame.columns.len()
        );
        Ok(frame)
    }

    /// Load from any reader; `label` names the input in error messages
    pub fn from_reader<R: Read>(
        reader: R,
        source: Source,
        label: impl AsRef<Path>,
    ) -> TopicbookResult<Self> {
        let label = label.as_ref();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| map_csv_error(label, e))?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches('\u{feff}').to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(TopicbookError::parse(label, "missing header row"));
        }

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| map_csv_error(label, e))?;
            if record.len() > headers.len() {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                return Err(TopicbookError::parse_at(
                    label,
                    line,
                    format!(
                        "expected {} fields, saw {}",
                        headers.len(),
                        record.len()
                    ),
                ));
            }
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            row.resize(headers.len(), String::new());
            raw_rows.push(row);
        }

        let kinds: Vec<ColumnKind> = (0..headers.len())
            .map(|i| infer_kind(raw_rows.iter().map(|r| r[i].as_str())))
            .collect();

        let rows = raw_rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&kinds)
                    .map(|(cell, kind)| parse_cell(cell, *kind))
                    .collect()
            })
            .collect();

        let columns = headers
            .into_iter()
            .zip(kinds)
            .map(|(name, kind)| Column::new(name, source, kind))
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by its name in this frame
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Index of the column holding a logical field, regardless of join suffixes
    pub fn locate(&self, field: Field, map: &ColumnMap) -> Option<usize> {
        let physical = map.column(field);
        field.sources().iter().find_map(|source| {
            self.columns
                .iter()
                .position(|c| c.source == *source && c.source_name == physical)
        })
    }

    /// Index of a logical field's column taken from the `source` table.
    ///
    /// A missing column is a configuration error naming that table.
    pub fn require(&self, field: Field, source: Source, map: &ColumnMap) -> TopicbookResult<usize> {
        let physical = map.column(field);
        self.columns
            .iter()
            .position(|c| c.source == source && c.source_name == physical)
            .ok_or_else(|| {
                TopicbookError::config(format!(
                    "column '{}' ({}) not found in {} table",
                    physical,
                    field.canonical_name(),
                    source.as_str()
                ))
            })
    }

    /// Cell by row index and logical field; null when the column is absent
    pub fn get(&self, row: usize, field: Field, map: &ColumnMap) -> &Value {
        match self.locate(field, map) {
            Some(col) => &self.rows[row][col],
            None => &NULL,
        }
    }

    /// Keep the given rows, in the given order
    pub fn select_rows(&self, indices: &[usize]) -> Frame {
        Frame {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

fn map_csv_error(label: &Path, err: csv::Error) -> TopicbookError {
    match err.position() {
        Some(pos) => TopicbookError::parse_at(label, pos.line(), err.to_string()),
        None => TopicbookError::parse(label, err.to_string()),
    }
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut kind = ColumnKind::Integer;
    let mut seen = false;
    for cell in cells.filter(|c| !c.is_empty()) {
        seen = true;
        if kind == ColumnKind::Integer
            && !(INTEGER_PATTERN.is_match(cell) && cell.parse::<i64>().is_ok())
        {
            kind = ColumnKind::Float;
        }
        if kind == ColumnKind::Float && !FLOAT_PATTERN.is_match(cell) {
            return ColumnKind::Text;
        }
    }
    if seen {
        kind
    } else {
        ColumnKind::Text
    }
}

fn parse_cell(cell: String, kind: ColumnKind) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    match kind {
        ColumnKind::Integer => cell.parse().map(Value::Int).unwrap_or(Value::Text(cell)),
        ColumnKind::Float => match cell.parse() {
            Ok(x) => Value::Float(x),
            Err(_) => Value::Text(cell),
        },
        ColumnKind::Text => Value::Text(cell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> TopicbookResult<Frame> {
        Frame::from_reader(csv.as_bytes(), Source::Reference, "lst_ref.csv")
    }

    #[test]
    fn test_infers_column_kinds() {
        let frame = load("id,year,score,title\nR1,2020,1.5,Book\nR2,1999,2,Paper\n").unwrap();
        let kinds: Vec<_> = frame.columns().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ColumnKind::Text,
                ColumnKind::Integer,
                ColumnKind::Float,
                ColumnKind::Text
            ]
        );
        assert_eq!(frame.rows()[0][1], Value::Int(2020));
        assert_eq!(frame.rows()[1][2], Value::Float(2.0));
    }

    #[test]
    fn test_special_floats_stay_text() {
        let frame = load("x\ninf\nNaN\n").unwrap();
        assert_eq!(frame.columns()[0].kind, ColumnKind::Text);
    }

    #[test]
    fn test_blank_cells_are_null() {
        let frame = load("id,year\nR1,\nR2,2001\n").unwrap();
        assert!(frame.rows()[0][1].is_null());
        assert_eq!(frame.rows()[0][1].as_text(), "");
        assert_eq!(frame.columns()[1].kind, ColumnKind::Integer);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let frame = load("a,b,c\n1\n").unwrap();
        assert_eq!(frame.rows()[0].len(), 3);
        assert!(frame.rows()[0][2].is_null());
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let err = load("a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(err, TopicbookError::Parse { line: Some(2), .. }));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(load(""), Err(TopicbookError::Parse { .. })));
    }

    #[test]
    fn test_header_only_is_empty_frame() {
        let frame = load("reference_id,reference_title\n").unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame.columns().len(), 2);
    }

    #[test]
    fn test_strips_byte_order_mark() {
        let frame = load("\u{feff}reference_id\nR1\n").unwrap();
        assert_eq!(frame.position("reference_id"), Some(0));
    }

    #[test]
    fn test_missing_file() {
        let err = Frame::from_path("/nonexistent/lst_ref.csv", Source::Reference).unwrap_err();
        assert!(matches!(err, TopicbookError::Io { .. }));
    }

    #[test]
    fn test_float_display_keeps_decimal_point() {
        assert_eq!(Value::Float(2020.0).as_text(), "2020.0");
        assert_eq!(Value::Int(2020).as_text(), "2020");
    }

    #[test]
    fn test_get_by_field() {
        let map = ColumnMap::default();
        let frame = load("reference_id,reference_title\nR1,Book A\n").unwrap();
        assert_eq!(frame.get(0, Field::ReferenceTitle, &map).as_text(), "Book A");
        assert!(frame.get(0, Field::ReferenceAuthor, &map).is_null());
        assert_eq!(frame.require(Field::ReferenceId, Source::Reference, &map).unwrap(), 0);
        assert!(frame.require(Field::ReferenceAuthor, Source::Reference, &map).is_err());
    }

    #[test]
    fn test_require_names_searched_table() {
        let map = ColumnMap::default();
        let frame =
            Frame::from_reader("example_number\n1\n".as_bytes(), Source::Example, "examples.csv")
                .unwrap();
        let err = frame
            .require(Field::ReferenceId, Source::Example, &map)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: column 'reference_id' (reference_id) not found in examples table"
        );
    }
}
