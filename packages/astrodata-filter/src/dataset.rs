//! The derived, read-only table a session browses.

use std::collections::BTreeSet;
use std::path::Path;

use roxmltree::Document;
use tracing::info;

use crate::classify::{classifier_for, CategoryClassifier};
use crate::config::{BrowserConfig, SignDisplay, ANY, DEGREE_MAX, DEGREE_MIN};
use crate::error::{AstroError, Result};
use crate::extract::extract_records;
use crate::filter::{apply, Criteria};
use crate::hierarchy::CategoryNode;
use crate::types::{Record, RoddenRating};

/// Distinct non-null values observed per filterable field, sorted.
///
/// Degree lists only carry values inside `DEGREE_MIN..=DEGREE_MAX`, so every
/// offered degree is one the filter accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub rodden_ratings: Vec<RoddenRating>,
    pub sun_signs: Vec<String>,
    pub moon_signs: Vec<String>,
    pub ascendant_signs: Vec<String>,
    pub sun_degrees: Vec<i32>,
    pub moon_degrees: Vec<i32>,
    pub ascendant_degrees: Vec<i32>,
    pub labels: Vec<String>,
}

impl FilterOptions {
    /// Collect options from the full record set.
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        fn distinct<'a, T, I>(values: I) -> Vec<T>
        where
            T: Ord + Clone + 'a,
            I: Iterator<Item = Option<&'a T>>,
        {
            values
                .flatten()
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        }

        fn in_bounds(degree: Option<&i32>) -> Option<&i32> {
            degree.filter(|d| (DEGREE_MIN..=DEGREE_MAX).contains(*d))
        }

        Self {
            rodden_ratings: distinct(records.iter().map(|r| r.rodden_rating.as_ref())),
            sun_signs: distinct(records.iter().map(|r| r.sun_sign.as_ref())),
            moon_signs: distinct(records.iter().map(|r| r.moon_sign.as_ref())),
            ascendant_signs: distinct(records.iter().map(|r| r.ascendant_sign.as_ref())),
            sun_degrees: distinct(records.iter().map(|r| in_bounds(r.sun_degree.as_ref()))),
            moon_degrees: distinct(records.iter().map(|r| in_bounds(r.moon_degree.as_ref()))),
            ascendant_degrees: distinct(records.iter().map(|r| in_bounds(r.ascendant_degree.as_ref()))),
            labels: distinct(records.iter().map(|r| Some(&r.label))),
        }
    }
}

/// Prefix a list of option values with the wildcard entry.
///
/// # Examples
/// ```
/// use astrodata_filter::dataset::with_any;
///
/// assert_eq!(with_any(&[3, 1]), vec!["any", "3", "1"]);
/// ```
pub fn with_any<T: ToString>(values: &[T]) -> Vec<String> {
    std::iter::once(ANY.to_string())
        .chain(values.iter().map(ToString::to_string))
        .collect()
}

/// Records with labels attached, plus everything derived from them.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    hierarchy: CategoryNode,
    options: FilterOptions,
    sign_display: SignDisplay,
}

impl Dataset {
    /// Label every record and derive the hierarchy and option lists.
    pub fn build(
        records: Vec<Record>,
        classifier: &dyn CategoryClassifier,
        sign_display: SignDisplay,
    ) -> Self {
        let records: Vec<Record> = records
            .into_iter()
            .map(|record| {
                let label = classifier.classify(&record.categories);
                record.with_label(label)
            })
            .collect();

        let hierarchy = CategoryNode::build(
            records
                .iter()
                .flat_map(|record| record.category_paths.iter()),
        );
        let options = FilterOptions::from_records(&records);

        Self {
            records,
            hierarchy,
            options,
            sign_display,
        }
    }

    /// Parse XML text and build a dataset for `config`.
    pub fn from_xml(xml: &str, config: &BrowserConfig) -> Result<Self> {
        let doc = Document::parse(xml)?;
        let records = extract_records(&doc, config.sign_display)?;
        let classifier = classifier_for(config.label_mode, config.keywords_path.as_deref())?;
        Ok(Self::build(records, classifier.as_ref(), config.sign_display))
    }

    /// Read and parse the configured source document.
    pub fn load(config: &BrowserConfig) -> Result<Self> {
        let xml = read_source(&config.data_path)?;
        let dataset = Self::from_xml(&xml, config)?;
        info!(
            path = %config.data_path.display(),
            records = dataset.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn hierarchy(&self) -> &CategoryNode {
        &self.hierarchy
    }

    #[must_use]
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    #[must_use]
    pub fn sign_display(&self) -> SignDisplay {
        self.sign_display
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Filter the full record set.
    #[must_use]
    pub fn filter(&self, criteria: &Criteria) -> Vec<&Record> {
        apply(&self.records, criteria)
    }

    /// Find a record by its identifier.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }
}

pub(crate) fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| AstroError::SourceRead {
        path: path.display().to_string(),
        source,
    })
}
