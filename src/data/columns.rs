//! Logical field names and their physical column names
//!
//! Every stage that reads a cell addresses it through a [`Field`]. The
//! [`ColumnMap`] resolves a field to the column name actually present in the
//! input tables, so renamed CSV headers only need to be configured once.
//!
//! ## Example
//!
//! ```rust
//! use topicbook::columns::{ColumnMap, Field};
//!
//! let map = ColumnMap::from_json(r#"{"topic_title": "title"}"#).unwrap();
//! assert_eq!(map.column(Field::TopicTitle), "title");
//! assert_eq!(map.column(Field::TopicId), "topic_id");
//! ```

use crate::utils::error::{TopicbookError, TopicbookResult};
use log::warn;
use std::collections::{BTreeMap, HashMap};

/// Table a column was loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Topic,
    Reference,
    Example,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Topic => "topics",
            Source::Reference => "references",
            Source::Example => "examples",
        }
    }
}

macro_rules! fields {
    ($( $variant:ident => $name:literal, [$($source:ident),+] );+ $(;)?) => {
        /// Logical field of the canonical schema
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Field {
            $( $variant, )+
        }

        impl Field {
            /// Every field, in schema order
            pub const ALL: &'static [Field] = &[$( Field::$variant, )+];

            /// Canonical (default) column name, also the logical key in JSON overrides
            pub fn canonical_name(&self) -> &'static str {
                match self {
                    $( Field::$variant => $name, )+
                }
            }

            /// Tables carrying this field. Join keys are carried by two.
            pub fn sources(&self) -> &'static [Source] {
                match self {
                    $( Field::$variant => &[$(Source::$source),+], )+
                }
            }
        }
    };
}

fields! {
    TopicId => "topic_id", [Example, Topic];
    TopicNumber => "topic_number", [Topic];
    TopicTitle => "topic_title", [Topic];
    TopicCategory => "topic_category", [Topic];
    TopicWords => "topic_words", [Topic];
    TopicDescriptionJa => "topic_description_ja", [Topic];
    TopicDescriptionEn => "topic_description_en", [Topic];
    TopicNotes => "topic_notes", [Topic];
    TopicRegisterer => "topic_registerer", [Topic];
    TopicRegisteredAt => "topic_registered_at", [Topic];
    TopicUpdatedAt => "topic_updated_at", [Topic];

    ReferenceId => "reference_id", [Example, Reference];
    ReferenceNumber => "reference_number", [Reference];
    ReferenceTitle => "reference_title", [Reference];
    ReferenceAuthor => "reference_author", [Reference];
    ReferenceOrganization => "reference_organization", [Reference];
    ReferenceType => "reference_type", [Reference];
    ReferenceDescriptionJa => "reference_description_ja", [Reference];
    ReferenceDescriptionEn => "reference_description_en", [Reference];
    ReferenceYear => "reference_year", [Reference];
    ReferenceDate => "reference_date", [Reference];
    ReferencePublicationType => "reference_publication_type", [Reference];
    ReferenceCitation => "reference_citation", [Reference];
    ReferenceNotes => "reference_notes", [Reference];

    ExampleNumber => "example_number", [Example];
    ExampleType => "example_type", [Example];
    ExampleWord => "example_word", [Example];
    ExamplePage => "example_page", [Example];
    ExampleExcerpts => "example_excerpts", [Example];
    ExampleTranslation => "example_translation", [Example];
    ExampleDescriptionJa => "example_description_ja", [Example];
    ExampleDescriptionEn => "example_description_en", [Example];
    ExampleNotes => "example_notes", [Example];
}

impl Field {
    /// Look up a field by its canonical name
    pub fn from_canonical(name: &str) -> Option<Field> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.canonical_name() == name)
    }

    /// Table whose rows own this field (the right-hand side for join keys)
    pub fn home(&self) -> Source {
        let sources = self.sources();
        sources[sources.len() - 1]
    }
}

/// Resolved logical → physical column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    names: HashMap<Field, String>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            names: Field::ALL
                .iter()
                .map(|f| (*f, f.canonical_name().to_string()))
                .collect(),
        }
    }
}

impl ColumnMap {
    /// Physical column name for a field
    pub fn column(&self, field: Field) -> &str {
        self.names
            .get(&field)
            .map(|s| s.as_str())
            .unwrap_or_else(|| field.canonical_name())
    }

    /// Override the physical column name of one field
    pub fn set(&mut self, field: Field, column: impl Into<String>) {
        self.names.insert(field, column.into());
    }

    /// Build from a JSON object of logical name → column name.
    ///
    /// Fields absent from the object keep their canonical names; unknown
    /// keys are ignored.
    pub fn from_json(json: &str) -> TopicbookResult<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json).map_err(|e| {
            TopicbookError::config(format!("column map is not a string-to-string JSON object: {e}"))
        })?;

        let mut map = ColumnMap::default();
        for (key, column) in raw {
            match Field::from_canonical(&key) {
                Some(field) => map.set(field, column),
                None => warn!("event=column_map_unknown_key key={}", key),
            }
        }
        Ok(map)
    }

    /// Resolve the final map: a JSON mapping, when given, replaces the
    /// individual overrides entirely.
    pub fn resolve(json: Option<&str>, overrides: &ColumnOverrides) -> TopicbookResult<Self> {
        match json {
            Some(json) => Self::from_json(json),
            None => Ok(overrides.to_map()),
        }
    }
}

/// Individually configurable column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOverrides {
    pub topic_id: String,
    pub topic_number: String,
    pub topic_title: String,
    pub reference_id: String,
    pub reference_title: String,
    pub example_number: String,
    pub example_type: String,
    pub example_word: String,
}

impl Default for ColumnOverrides {
    fn default() -> Self {
        Self {
            topic_id: Field::TopicId.canonical_name().to_string(),
            topic_number: Field::TopicNumber.canonical_name().to_string(),
            topic_title: Field::TopicTitle.canonical_name().to_string(),
            reference_id: Field::ReferenceId.canonical_name().to_string(),
            reference_title: Field::ReferenceTitle.canonical_name().to_string(),
            example_number: Field::ExampleNumber.canonical_name().to_string(),
            example_type: Field::ExampleType.canonical_name().to_string(),
            example_word: Field::ExampleWord.canonical_name().to_string(),
        }
    }
}

impl ColumnOverrides {
    pub fn to_map(&self) -> ColumnMap {
        let mut map = ColumnMap::default();
        map.set(Field::TopicId, &self.topic_id);
        map.set(Field::TopicNumber, &self.topic_number);
        map.set(Field::TopicTitle, &self.topic_title);
        map.set(Field::ReferenceId, &self.reference_id);
        map.set(Field::ReferenceTitle, &self.reference_title);
        map.set(Field::ExampleNumber, &self.example_number);
        map.set(Field::ExampleType, &self.example_type);
        map.set(Field::ExampleWord, &self.example_word);
        map
    }
}
