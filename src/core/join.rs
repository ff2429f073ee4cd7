//! Stable left joins between frames
//!
//! Every left row survives. Matching right rows are appended in right-table
//! order; a left row without a match gets null right-hand cells. Clashing
//! column names are suffixed `_x` (left) and `_y` (right), and each column
//! keeps its source table and source name so logical lookups still resolve.

use crate::core::frame::{Column, Frame, Value};
use crate::data::columns::{ColumnMap, Field, Source};
use crate::utils::error::TopicbookResult;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

const LEFT_SUFFIX: &str = "_x";
const RIGHT_SUFFIX: &str = "_y";

/// Result of a left join
#[derive(Debug, Clone)]
pub struct LeftJoin {
    pub frame: Frame,
    /// Left rows that found no right-hand match
    pub unmatched: usize,
}

/// Left join `left` with `right` on the given key column indices.
///
/// The right key column is merged into the left one. Null keys never match.
pub fn left_join(left: &Frame, right: &Frame, left_key: usize, right_key: usize) -> LeftJoin {
    let key_name = &left.columns()[left_key].name;
    let merged_key = *key_name == right.columns()[right_key].name;

    let left_names: HashSet<&str> = left
        .columns()
        .iter()
        .enumerate()
        .filter(|(i, _)| !(merged_key && *i == left_key))
        .map(|(_, c)| c.name.as_str())
        .collect();

    let right_cols: Vec<usize> = (0..right.columns().len())
        .filter(|&i| i != right_key)
        .collect();
    let clashes: HashSet<&str> = right_cols
        .iter()
        .map(|&i| right.columns()[i].name.as_str())
        .filter(|name| left_names.contains(name))
        .collect();

    let mut columns: Vec<Column> = left
        .columns()
        .iter()
        .map(|c| suffixed(c, &clashes, LEFT_SUFFIX))
        .collect();
    columns.extend(
        right_cols
            .iter()
            .map(|&i| suffixed(&right.columns()[i], &clashes, RIGHT_SUFFIX)),
    );

    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, row) in right.rows().iter().enumerate() {
        if let Some(key) = row[right_key].key() {
            index.entry(key.into_owned()).or_default().push(i);
        }
    }

    let mut rows = Vec::with_capacity(left.len());
    let mut unmatched = 0;
    for row in left.rows() {
        let matches = row[left_key]
            .key()
            .and_then(|key| index.get(key.as_ref()))
            .filter(|m| !m.is_empty());

        match matches {
            Some(matches) => {
                for &m in matches {
                    let mut out = row.clone();
                    out.extend(right_cols.iter().map(|&i| right.rows()[m][i].clone()));
                    rows.push(out);
                }
            }
            None => {
                unmatched += 1;
                let mut out = row.clone();
                out.extend(right_cols.iter().map(|_| Value::Null));
                rows.push(out);
            }
        }
    }

    LeftJoin {
        frame: Frame::new(columns, rows),
        unmatched,
    }
}

fn suffixed(column: &Column, clashes: &HashSet<&str>, suffix: &str) -> Column {
    let mut column = column.clone();
    if clashes.contains(column.name.as_str()) {
        column.name.push_str(suffix);
    }
    column
}

/// Join examples with their references, then with their topics.
///
/// Output row order follows the example table.
pub fn join_tables(
    examples: &Frame,
    references: &Frame,
    topics: &Frame,
    map: &ColumnMap,
) -> TopicbookResult<Frame> {
    let ex_ref = left_join(
        examples,
        references,
        examples.require(Field::ReferenceId, Source::Example, map)?,
        references.require(Field::ReferenceId, Source::Reference, map)?,
    );
    if ex_ref.unmatched > 0 {
        warn!(
            "event=unmatched_reference rows={} key={}",
            ex_ref.unmatched,
            map.column(Field::ReferenceId)
        );
    }

    let joined = left_join(
        &ex_ref.frame,
        topics,
        ex_ref.frame.require(Field::TopicId, Source::Example, map)?,
        topics.require(Field::TopicId, Source::Topic, map)?,
    );
    if joined.unmatched > 0 {
        warn!(
            "event=unmatched_topic rows={} key={}",
            joined.unmatched,
            map.column(Field::TopicId)
        );
    }

    debug!(
        "event=tables_joined rows={} columns={}",
        joined.frame.len(),
        joined.frame.columns().len()
    );
    Ok(joined.frame)
}
