//! Core data types: the flattened record and its rating grade.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::CATEGORY_DELIMITER;

/// Rodden rating: how reliable the recorded birth time is.
///
/// Unknown grades from the source are kept verbatim in [`RoddenRating::Other`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum RoddenRating {
    /// From birth certificate or record.
    AA,
    /// From memory or quoted by the person.
    A,
    /// Biography or autobiography.
    B,
    /// Caution, no source.
    C,
    /// Dirty data, conflicting sources.
    DD,
    /// Date without time.
    X,
    /// Date in question.
    XX,
    Other(String),
}

impl RoddenRating {
    /// Parse a grade code; never fails.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "AA" => Self::AA,
            "A" => Self::A,
            "B" => Self::B,
            "C" => Self::C,
            "DD" => Self::DD,
            "X" => Self::X,
            "XX" => Self::XX,
            _ => Self::Other(code.trim().to_string()),
        }
    }

    /// The code as it appears in the source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AA => "AA",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::DD => "DD",
            Self::X => "X",
            Self::XX => "XX",
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for RoddenRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RoddenRating {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<RoddenRating> for String {
    fn from(rating: RoddenRating) -> Self {
        rating.as_str().to_string()
    }
}

/// One flattened `adb_entry`.
///
/// Built once during load and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: Option<String>,
    /// Date and optional time joined by a space; empty when unknown.
    pub birth_date_time: String,
    pub birth_place: Option<String>,
    pub rodden_rating: Option<RoddenRating>,
    pub sun_sign: Option<String>,
    pub sun_degree: Option<i32>,
    pub moon_sign: Option<String>,
    pub moon_degree: Option<i32>,
    pub ascendant_sign: Option<String>,
    pub ascendant_degree: Option<i32>,
    pub categories: Vec<String>,
    /// Each category split on `" > "`.
    pub category_paths: Vec<Vec<String>>,
    pub biography: String,
    /// Label assigned by the session's classifier; empty until labelled.
    #[serde(default)]
    pub label: String,
}

impl Record {
    /// Create a record with only an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the categories and derive their paths.
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.category_paths = categories.iter().map(|c| split_category_path(c)).collect();
        self.categories = categories;
        self
    }

    /// Attach the classifier label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// First category, if any.
    #[must_use]
    pub fn first_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }
}

/// Split a category string into trimmed, non-empty path segments.
///
/// # Examples
/// ```
/// use astrodata_filter::types::split_category_path;
///
/// assert_eq!(
///     split_category_path("Entertainment > Actor > TV"),
///     vec!["Entertainment", "Actor", "TV"]
/// );
/// assert_eq!(split_category_path("Sports"), vec!["Sports"]);
/// ```
#[must_use]
pub fn split_category_path(category: &str) -> Vec<String> {
    category
        .split(CATEGORY_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}
