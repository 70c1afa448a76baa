//! Record extraction from an AstroDatabank export.
//!
//! The expected shape, per entry:
//!
//! ```text
//! adb_entry[@adb_id]
//! ├── public_data
//! │   ├── roddenrating
//! │   ├── name
//! │   ├── bio
//! │   └── bdata
//! │       ├── date
//! │       ├── time
//! │       ├── place
//! │       └── positions[@sun_sign @sun_degmin @moon_sign @moon_degmin @asc_sign @asc_degmin]
//! └── research_data
//!     └── categories
//!         └── category*
//! ```
//!
//! Any container may be missing; the fields below it are then `None`.

use roxmltree::{Document, Node};
use tracing::{debug, info};

use crate::config::SignDisplay;
use crate::degree::parse_degree;
use crate::error::{AstroError, Result};
use crate::sign::translate_sign;
use crate::types::{Record, RoddenRating};
use crate::xml::{attribute_text, child_text, find_by_path, find_children, get_tag_name, get_text};

/// Tag of a single entry element.
pub const ENTRY_TAG: &str = "adb_entry";

/// Parse XML text and extract all records.
pub fn parse_records(xml: &str, sign_display: SignDisplay) -> Result<Vec<Record>> {
    let doc = Document::parse(xml)?;
    extract_records(&doc, sign_display)
}

/// Extract one record per `adb_entry` child of the root element.
///
/// Fails only when the root holds no entries at all.
pub fn extract_records(doc: &Document<'_>, sign_display: SignDisplay) -> Result<Vec<Record>> {
    let root = doc.root_element();
    let records: Vec<Record> = find_children(root, ENTRY_TAG)
        .map(|entry| extract_entry(entry, sign_display))
        .collect();

    if records.is_empty() {
        return Err(AstroError::MissingElement {
            element: ENTRY_TAG.to_string(),
            context: get_tag_name(root).to_string(),
        });
    }

    info!(count = records.len(), "extracted records");
    Ok(records)
}

/// Flatten a single entry element.
pub fn extract_entry(entry: Node<'_, '_>, sign_display: SignDisplay) -> Record {
    let id = entry.attribute("adb_id").unwrap_or_default().trim().to_string();
    if id.is_empty() {
        debug!("entry without adb_id");
    }

    let public_data = find_by_path(entry, "public_data");
    let bdata = public_data.and_then(|p| find_by_path(p, "bdata"));
    let positions = bdata.and_then(|b| find_by_path(b, "positions"));

    let sign = |attr: &str| {
        let raw = positions.and_then(|p| attribute_text(p, attr))?;
        Some(match sign_display {
            SignDisplay::Raw => raw,
            SignDisplay::Translated => translate_sign(Some(&raw)),
        })
    };

    let degree = |attr: &str| {
        let raw = positions.and_then(|p| attribute_text(p, attr));
        let parsed = parse_degree(raw.as_deref());
        if raw.is_some() && parsed.is_none() {
            debug!(adb_id = %id, attribute = attr, value = ?raw, "unparseable degree");
        }
        parsed
    };

    let date = bdata.and_then(|b| child_text(b, "date"));
    let time = bdata.and_then(|b| child_text(b, "time"));
    let birth_date_time = [date, time]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    let categories = find_by_path(entry, "research_data/categories")
        .map(|container| {
            find_children(container, "category")
                .map(get_text)
                .filter(|text| !text.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Record {
        name: public_data.and_then(|p| child_text(p, "name")),
        birth_date_time,
        birth_place: bdata.and_then(|b| child_text(b, "place")),
        rodden_rating: public_data
            .and_then(|p| child_text(p, "roddenrating"))
            .map(|code| RoddenRating::from_code(&code)),
        sun_sign: sign("sun_sign"),
        sun_degree: degree("sun_degmin"),
        moon_sign: sign("moon_sign"),
        moon_degree: degree("moon_degmin"),
        ascendant_sign: sign("asc_sign"),
        ascendant_degree: degree("asc_degmin"),
        biography: public_data
            .and_then(|p| child_text(p, "bio"))
            .unwrap_or_default(),
        ..Record::new(id.clone())
    }
    .with_categories(categories)
}
