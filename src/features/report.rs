//! Topic report rendering
//!
//! Walks the joined example table grouped by topic id, in the order each
//! topic first appears, and emits for every group:
//!
//! 1. `\section{<topic title>}` with the topic's labeled fields
//! 2. a summary table of all examples in the group
//! 3. one `\subsection{<type> list of <topic title>}` per [`ExampleType`]
//!    that has rows, each followed by one detail block per example
//!
//! Topics without examples are not rendered. Examples whose type is not an
//! [`ExampleType`] appear only in the summary table.

use crate::core::frame::{Column, ColumnKind, Frame, Value};
use crate::data::columns::{ColumnMap, Field, Source};
use crate::data::constants::ExampleType;
use crate::features::tables::{frame_table, table_to_latex};
use crate::utils::error::{TopicbookError, TopicbookResult};
use indexmap::IndexMap;
use log::{debug, warn};
use std::fmt::Write;

/// Column name of the derived details string in summary tables
pub const DETAILS_COLUMN: &str = "details";

/// One row of a frame, addressed by logical field
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    frame: &'a Frame,
    row: usize,
    map: &'a ColumnMap,
}

impl<'a> RowView<'a> {
    pub fn new(frame: &'a Frame, row: usize, map: &'a ColumnMap) -> Self {
        Self { frame, row, map }
    }

    pub fn value(&self, field: Field) -> &'a Value {
        self.frame.get(self.row, field, self.map)
    }

    pub fn text(&self, field: Field) -> String {
        self.value(field).as_text().into_owned()
    }

    /// `<reference title>\cite{<reference id>}`
    pub fn title_with_citation(&self) -> String {
        format!(
            "{}\\cite{{{}}}",
            self.text(Field::ReferenceTitle),
            self.text(Field::ReferenceId)
        )
    }

    /// `<page> <reference title>\cite{<reference id>}`
    pub fn details(&self) -> String {
        format!(
            "{} {}",
            self.text(Field::ExamplePage),
            self.title_with_citation()
        )
    }

    /// `<example number>. <example word>`, the detail block heading
    pub fn heading(&self) -> String {
        format!(
            "{}. {}",
            self.text(Field::ExampleNumber),
            self.text(Field::ExampleWord)
        )
    }
}

/// A fixed label and the accessor producing its value
#[derive(Clone, Copy)]
pub struct LabeledField {
    pub label: &'static str,
    pub value: fn(&RowView<'_>) -> String,
}

/// Topic section header fields
pub const TOPIC_FIELDS: &[LabeledField] = &[
    LabeledField {
        label: "Topic number",
        value: |r| r.text(Field::TopicNumber),
    },
    LabeledField {
        label: "Title",
        value: |r| r.text(Field::TopicTitle),
    },
    LabeledField {
        label: "Words",
        value: |r| r.text(Field::TopicWords),
    },
    LabeledField {
        label: "Category",
        value: |r| r.text(Field::TopicCategory),
    },
    LabeledField {
        label: "Description (ja)",
        value: |r| r.text(Field::TopicDescriptionJa),
    },
    LabeledField {
        label: "Description (en)",
        value: |r| r.text(Field::TopicDescriptionEn),
    },
    LabeledField {
        label: "Registerer",
        value: |r| r.text(Field::TopicRegisterer),
    },
    LabeledField {
        label: "Notes",
        value: |r| r.text(Field::TopicNotes),
    },
];

/// Per-example detail block fields, listed under the example's heading
pub const DETAIL_FIELDS: &[LabeledField] = &[
    LabeledField {
        label: "Reference",
        value: |r| format!("{}, {}", r.title_with_citation(), r.text(Field::ExamplePage)),
    },
    LabeledField {
        label: "Excerpts",
        value: |r| r.text(Field::ExampleExcerpts),
    },
    LabeledField {
        label: "Translation",
        value: |r| r.text(Field::ExampleTranslation),
    },
    LabeledField {
        label: "Description (ja)",
        value: |r| r.text(Field::ExampleDescriptionJa),
    },
    LabeledField {
        label: "Description (en)",
        value: |r| r.text(Field::ExampleDescriptionEn),
    },
];

/// Summary table columns, by logical field; `None` is the details string
const SUMMARY_FIELDS: [Option<Field>; 4] = [
    Some(Field::ExampleType),
    Some(Field::ExampleWord),
    None,
    Some(Field::ExampleDescriptionJa),
];

/// Rendered body plus counts for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedReport {
    pub body: String,
    /// Topic sections emitted
    pub sections: usize,
    /// Example rows rendered across all summary tables
    pub examples: usize,
    /// Rows whose type matched no subsection
    pub untyped: usize,
}

/// Emit a `description` list for one row
pub fn render_fields(fields: &[LabeledField], row: &RowView<'_>) -> String {
    let mut out = String::from("\\begin{description}\n");
    for field in fields {
        let _ = writeln!(out, "  \\item[{}] {}", field.label, (field.value)(row));
    }
    out.push_str("\\end{description}\n");
    out
}

/// Group joined rows by topic id, in first-occurrence order.
///
/// A null topic id groups under the empty string.
pub fn group_by_topic(joined: &Frame, map: &ColumnMap) -> IndexMap<String, Vec<usize>> {
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for row in 0..joined.len() {
        let id = joined.get(row, Field::TopicId, map).as_text().into_owned();
        groups.entry(id).or_default().push(row);
    }
    groups
}

/// First topic row with the given id
pub fn find_topic(topics: &Frame, topic_id: &str, map: &ColumnMap) -> TopicbookResult<usize> {
    (0..topics.len())
        .find(|&row| {
            topics
                .get(row, Field::TopicId, map)
                .key()
                .is_some_and(|key| key == topic_id)
        })
        .ok_or_else(|| TopicbookError::missing_topic(topic_id))
}

/// Summary frame for one group: type, word, details, Japanese description
pub fn summary_frame(joined: &Frame, rows: &[usize], map: &ColumnMap) -> Frame {
    let columns = SUMMARY_FIELDS
        .iter()
        .map(|field| match field {
            Some(field) => {
                let kind = joined
                    .locate(*field, map)
                    .map(|p| joined.columns()[p].kind)
                    .unwrap_or(ColumnKind::Text);
                Column::new(map.column(*field), Source::Example, kind)
            }
            None => Column::new(DETAILS_COLUMN, Source::Example, ColumnKind::Text),
        })
        .collect();

    let body = rows
        .iter()
        .map(|&row| {
            let view = RowView::new(joined, row, map);
            SUMMARY_FIELDS
                .iter()
                .map(|field| match field {
                    Some(field) => view.value(*field).clone(),
                    None => Value::Text(view.details()),
                })
                .collect()
        })
        .collect();

    Frame::new(columns, body)
}

/// Render the document body for all topics that have examples
pub fn render_report(
    joined: &Frame,
    topics: &Frame,
    map: &ColumnMap,
) -> TopicbookResult<RenderedReport> {
    let mut report = RenderedReport::default();

    for (topic_id, rows) in group_by_topic(joined, map) {
        let topic_row = find_topic(topics, &topic_id, map)?;
        let topic = RowView::new(topics, topic_row, map);
        let title = topic.text(Field::TopicTitle);

        let _ = writeln!(report.body, "\\section{{{}}}", title);
        report.body.push_str(&render_fields(TOPIC_FIELDS, &topic));
        report.body.push('\n');

        let summary = summary_frame(joined, &rows, map);
        let names: Vec<&str> = summary.columns().iter().map(|c| c.name.as_str()).collect();
        let table = frame_table(&summary, &names, Some(format!("Example list of \"{}\"", title)));
        report.body.push_str(&table_to_latex(&table));
        report.body.push('\n');

        let mut typed = 0;
        for example_type in ExampleType::ALL {
            let matching: Vec<usize> = rows
                .iter()
                .copied()
                .filter(|&row| {
                    ExampleType::parse(&joined.get(row, Field::ExampleType, map).as_text())
                        == Some(example_type)
                })
                .collect();
            if matching.is_empty() {
                continue;
            }

            let _ = writeln!(report.body, "\\subsection{{{} list of {}}}", example_type, title);
            for &row in &matching {
                let view = RowView::new(joined, row, map);
                let _ = writeln!(report.body, "\\subsubsection{{{}}}", view.heading());
                report.body.push_str(&render_fields(DETAIL_FIELDS, &view));
                report.body.push('\n');
            }
            typed += matching.len();
        }

        for &row in &rows {
            let value = joined.get(row, Field::ExampleType, map);
            if ExampleType::parse(&value.as_text()).is_none() {
                warn!(
                    "event=unknown_example_type topic_id={} example_number={} type={}",
                    topic_id,
                    joined.get(row, Field::ExampleNumber, map),
                    value
                );
            }
        }

        debug!(
            "event=topic_rendered topic_id={} examples={} typed={}",
            topic_id,
            rows.len(),
            typed
        );
        report.sections += 1;
        report.examples += rows.len();
        report.untyped += rows.len() - typed;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::join::join_tables;
    use pretty_assertions::assert_eq;

    fn frame(csv: &str, source: Source) -> Frame {
        Frame::from_reader(csv.as_bytes(), source, "test.csv").unwrap()
    }

    fn fixture(examples: &str) -> (Frame, Frame, ColumnMap) {
        let map = ColumnMap::default();
        let topics = frame(
            "topic_id,topic_number,topic_title,topic_words\n\
             T1,1,Greeting,hello;hi\n\
             T2,2,Farewell,bye\n\
             T3,3,Unused,\n",
            Source::Topic,
        );
        let references = frame(
            "reference_id,reference_title,reference_author,reference_year\nR1,Book A,Smith,2020\n",
            Source::Reference,
        );
        let examples = frame(examples, Source::Example);
        let joined = join_tables(&examples, &references, &topics, &map).unwrap();
        (joined, topics, map)
    }

    #[test]
    fn test_single_example_scenario() {
        let (joined, topics, map) = fixture(
            "example_number,topic_id,reference_id,example_type,example_word,example_page\n\
             1,T1,R1,Declaration,Hello,12\n",
        );
        let report = render_report(&joined, &topics, &map).unwrap();

        assert_eq!(report.sections, 1);
        assert_eq!(report.body.matches("\\section{").count(), 1);
        assert!(report.body.contains("\\section{Greeting}\n"));
        assert!(report.body.contains("\\caption{Example list of \"Greeting\"}"));
        assert!(report.body.contains("\\subsection{Declaration list of Greeting}\n"));
        assert!(!report.body.contains("Expression list of"));
        assert!(report.body.contains(
            "\\subsubsection{1. Hello}\n\\begin{description}\n  \\item[Reference] Book A\\cite{R1}, 12\n"
        ));
        assert!(report.body.contains("Declaration & Hello & 12 Book A\\cite{R1} &  \\\\\n"));
    }

    #[test]
    fn test_topics_in_first_occurrence_order() {
        let (joined, topics, map) = fixture(
            "example_number,topic_id,reference_id,example_type,example_word\n\
             1,T2,R1,Expression,Bye\n\
             2,T1,R1,Declaration,Hello\n\
             3,T2,R1,Declaration,See you\n",
        );
        let report = render_report(&joined, &topics, &map).unwrap();
        let farewell = report.body.find("\\section{Farewell}").unwrap();
        let greeting = report.body.find("\\section{Greeting}").unwrap();
        assert!(farewell < greeting);
        assert!(!report.body.contains("Unused"));
        assert_eq!(report.sections, 2);

        let decl = report.body.find("\\subsection{Declaration list of Farewell}").unwrap();
        let expr = report.body.find("\\subsection{Expression list of Farewell}").unwrap();
        assert!(decl < expr);
    }

    #[test]
    fn test_unknown_type_only_in_summary() {
        let (joined, topics, map) = fixture(
            "example_number,topic_id,reference_id,example_type,example_word\n\
             1,T1,R1,Idiom,Howdy\n",
        );
        let report = render_report(&joined, &topics, &map).unwrap();
        assert!(report.body.contains("Idiom & Howdy"));
        assert!(!report.body.contains("\\subsection{"));
        assert!(!report.body.contains("\\subsubsection{"));
        assert_eq!(report.examples, 1);
        assert_eq!(report.untyped, 1);
    }

    #[test]
    fn test_unmatched_reference_renders_empty_fields() {
        let (joined, topics, map) = fixture(
            "example_number,topic_id,reference_id,example_type,example_word,example_page\n\
             1,T1,R404,Expression,Hey,3\n",
        );
        let report = render_report(&joined, &topics, &map).unwrap();
        // the id comes from the example row; the title is empty
        assert!(report.body.contains("  \\item[Reference] \\cite{R404}, 3\n"));
        assert!(report.body.contains("Expression & Hey & 3 \\cite{R404} &  \\\\\n"));
    }

    #[test]
    fn test_missing_topic_is_fatal() {
        let (joined, topics, map) = fixture(
            "example_number,topic_id,reference_id,example_type,example_word\n\
             1,T9,R1,Declaration,Lost\n",
        );
        let err = render_report(&joined, &topics, &map).unwrap_err();
        assert!(matches!(
            err,
            TopicbookError::ReferentialIntegrity { ref topic_id } if topic_id == "T9"
        ));
    }

    #[test]
    fn test_blank_topic_id_is_fatal() {
        let (joined, topics, map) = fixture(
            "example_number,topic_id,reference_id,example_type,example_word\n\
             1,,R1,Declaration,Orphan\n",
        );
        assert!(render_report(&joined, &topics, &map).is_err());
    }

    #[test]
    fn test_topic_fields_template() {
        let map = ColumnMap::default();
        let topics = frame(
            "topic_id,topic_number,topic_title,topic_category\nT1,1,Greeting,Basics\n",
            Source::Topic,
        );
        let block = render_fields(TOPIC_FIELDS, &RowView::new(&topics, 0, &map));
        assert_eq!(
            block,
            "\\begin{description}\n\
             \x20 \\item[Topic number] 1\n\
             \x20 \\item[Title] Greeting\n\
             \x20 \\item[Words] \n\
             \x20 \\item[Category] Basics\n\
             \x20 \\item[Description (ja)] \n\
             \x20 \\item[Description (en)] \n\
             \x20 \\item[Registerer] \n\
             \x20 \\item[Notes] \n\
             \\end{description}\n"
        );
    }

    #[test]
    fn test_detail_field_labels() {
        let labels: Vec<_> = DETAIL_FIELDS.iter().map(|f| f.label).collect();
        assert_eq!(
            labels,
            vec![
                "Reference",
                "Excerpts",
                "Translation",
                "Description (ja)",
                "Description (en)"
            ]
        );
    }

    #[test]
    fn test_summary_frame_columns() {
        let (joined, _, map) = fixture(
            "example_number,topic_id,reference_id,example_type,example_word,example_description_ja\n\
             1,T1,R1,Declaration,Hello,挨拶\n",
        );
        let summary = summary_frame(&joined, &[0], &map);
        let names: Vec<_> = summary.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["example_type", "example_word", "details", "example_description_ja"]
        );
        assert_eq!(summary.rows()[0][3].as_text(), "挨拶");
    }

    #[test]
    fn test_group_by_topic() {
        let (joined, _, map) = fixture(
            "example_number,topic_id,reference_id,example_type,example_word\n\
             1,T2,R1,Declaration,a\n\
             2,T1,R1,Declaration,b\n\
             3,T2,R1,Declaration,c\n",
        );
        let groups = group_by_topic(&joined, &map);
        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(keys, vec!["T2", "T1"]);
        assert_eq!(groups["T2"], vec![0, 2]);
    }
}
