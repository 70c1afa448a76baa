//! AstroData Filter - Browse and filter AstroDatabank XML exports.
//!
//! This crate parses an AstroDatabank export once, flattens every
//! `adb_entry` into a [`Record`], labels and indexes the records, and
//! filters them by rating, sign, degree, label and category path.
//!
//! # Example
//!
//! ```
//! use astrodata_filter::{BrowserConfig, Criteria, Dataset, Selection};
//!
//! let xml = r#"<export>
//!   <adb_entry adb_id="1"><public_data><bdata>
//!     <positions sun_sign="leo" sun_degmin="15°30"/>
//!   </bdata></public_data></adb_entry>
//! </export>"#;
//!
//! let dataset = Dataset::from_xml(xml, &BrowserConfig::default()).unwrap();
//! let criteria = Criteria {
//!     sun_sign: Selection::Is("Лев".to_string()),
//!     ..Criteria::any()
//! };
//! assert_eq!(dataset.filter(&criteria).len(), 1);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, session settings and criterion validation
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML navigation helpers
//! - [`degree`]: Degree parsing from `*_degmin` attributes
//! - [`sign`]: Sign code translation
//! - [`types`]: Record and rating types
//! - [`extract`]: Record extraction from the document
//! - [`classify`]: Category classifiers
//! - [`hierarchy`]: Category path tree
//! - [`filter`]: Filter engine
//! - [`dataset`]: Labelled records with derived options and hierarchy
//! - [`cache`]: Content-keyed dataset cache
//! - [`session`]: Browsing state with hierarchical selection rules
//! - [`render`]: Text output for the CLI
//! - [`cli`]: Command-line interface

pub mod cache;
pub mod classify;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod degree;
pub mod error;
pub mod extract;
pub mod filter;
pub mod hierarchy;
pub mod render;
pub mod session;
pub mod sign;
pub mod types;
pub mod xml;

// Re-export commonly used items
pub use cache::DatasetCache;
pub use classify::{CategoryClassifier, FirstCategoryClassifier, KeywordClassifier};
pub use config::{BrowserConfig, LabelMode, SignDisplay};
pub use dataset::Dataset;
pub use degree::parse_degree;
pub use error::{AstroError, Result};
pub use extract::{extract_records, parse_records};
pub use filter::{apply, Criteria, DegreeConstraint, Selection};
pub use hierarchy::CategoryNode;
pub use session::BrowseSession;
pub use sign::translate_sign;
pub use types::{Record, RoddenRating};
