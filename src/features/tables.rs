//! Table Formatting Module
//!
//! Turns a selection of frame columns into a captioned LaTeX `table` float.
//! Header labels are the column names with underscores replaced by hyphens.
//! Numeric columns are right-aligned and text columns left-aligned; when every
//! column is text, the trailing columns get fixed widths through the
//! preamble's `P{<width>}` column type so long prose wraps.

use crate::core::frame::{ColumnKind, Frame};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Column format produced for an all-text table with two or more columns
    static ref ALL_TEXT_FORMAT: Regex = Regex::new(r"^l{2,}$").unwrap();
}

/// Widths given to the trailing columns of an all-text table, last column last
const FIXED_WIDTHS: [&str; 3] = ["3cm", "4cm", "5cm"];

/// Cell alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

impl Alignment {
    /// Alignment for a column of the given kind
    pub fn for_kind(kind: ColumnKind) -> Self {
        if kind.is_numeric() {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }

    /// Convert to LaTeX alignment character
    pub fn to_latex_char(&self) -> char {
        match self {
            Alignment::Left => 'l',
            Alignment::Right => 'r',
        }
    }
}

/// Column width specification
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColWidth {
    /// Natural width
    #[default]
    Auto,
    /// Fixed paragraph width, e.g. `4cm`
    Fixed(String),
}

/// Column specification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColSpec {
    pub alignment: Alignment,
    pub width: ColWidth,
}

impl ColSpec {
    pub fn to_latex(&self) -> String {
        match &self.width {
            ColWidth::Fixed(w) => format!("P{{{}}}", w),
            ColWidth::Auto => self.alignment.to_latex_char().to_string(),
        }
    }
}

/// A table row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }
}

/// Complete table structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub colspecs: Vec<ColSpec>,
    pub header: Row,
    pub body: Vec<Row>,
    pub caption: Option<String>,
}

impl Table {
    pub fn num_cols(&self) -> usize {
        self.colspecs.len()
    }

    /// Column format string, e.g. `lrP{4cm}`
    pub fn column_format(&self) -> String {
        self.colspecs.iter().map(ColSpec::to_latex).collect()
    }

    /// Give trailing columns fixed widths when the table is all text
    pub fn apply_fixed_widths(&mut self) {
        if !ALL_TEXT_FORMAT.is_match(&self.column_format()) {
            return;
        }
        let n = self.colspecs.len();
        let count = FIXED_WIDTHS.len().min(n - 1);
        let widths = &FIXED_WIDTHS[FIXED_WIDTHS.len() - count..];
        for (spec, width) in self.colspecs[n - count..].iter_mut().zip(widths) {
            spec.width = ColWidth::Fixed(width.to_string());
        }
    }
}

/// Header label for a column name
pub fn header_label(name: &str) -> String {
    name.replace('_', "-")
}

/// Build a table from the named columns of a frame, in frame row order.
///
/// Names absent from the frame give a header with empty cells.
pub fn frame_table(frame: &Frame, columns: &[&str], caption: Option<String>) -> Table {
    let positions: Vec<Option<usize>> = columns.iter().map(|name| frame.position(name)).collect();

    let colspecs = positions
        .iter()
        .map(|pos| ColSpec {
            alignment: pos
                .map(|p| Alignment::for_kind(frame.columns()[p].kind))
                .unwrap_or_default(),
            width: ColWidth::Auto,
        })
        .collect();

    let header = Row::new(columns.iter().map(|name| header_label(name)).collect());

    let body = frame
        .rows()
        .iter()
        .map(|row| {
            Row::new(
                positions
                    .iter()
                    .map(|pos| pos.map(|p| row[p].as_text().into_owned()).unwrap_or_default())
                    .collect(),
            )
        })
        .collect();

    let mut table = Table {
        colspecs,
        header,
        body,
        caption,
    };
    table.apply_fixed_widths();
    table
}

/// Convert Table to LaTeX
pub fn table_to_latex(table: &Table) -> String {
    let mut output = String::new();

    if table.caption.is_some() {
        output.push_str("\\begin{table}[htbp]\n");
        output.push_str("\\centering\n");
    }

    output.push_str(&format!("\\begin{{tabular}}{{{}}}\n", table.column_format()));
    output.push_str("\\toprule\n");
    output.push_str(&row_to_latex(&table.header));
    output.push_str("\\midrule\n");
    for row in &table.body {
        output.push_str(&row_to_latex(row));
    }
    output.push_str("\\bottomrule\n");
    output.push_str("\\end{tabular}\n");

    if let Some(ref caption) = table.caption {
        output.push_str(&format!("\\caption{{{}}}\n", caption));
        output.push_str("\\end{table}\n");
    }

    output
}

/// Convert a row to LaTeX
fn row_to_latex(row: &Row) -> String {
    format!("{} \\\\\n", row.cells.join(" & "))
}
