//! Text rendering for the command-line front end.
//!
//! All functions return strings so the CLI only decides where to print.

use console::{pad_str, style, Alignment};
use textwrap::{fill, Options};

use crate::config::DEGREE_SIGN;
use crate::dataset::{with_any, Dataset};
use crate::error::Result;
use crate::hierarchy::CategoryNode;
use crate::types::Record;

/// Width used when wrapping biographies.
pub const DETAIL_WRAP_WIDTH: usize = 80;

const TABLE_COLUMNS: [(&str, usize); 7] = [
    ("ID", 8),
    ("Name", 24),
    ("Rating", 6),
    ("Sun", 16),
    ("Moon", 16),
    ("Ascendant", 16),
    ("Label", 16),
];

/// Sign and degree as one cell, e.g. `Лев 15°`.
#[must_use]
pub fn position_cell(sign: Option<&str>, degree: Option<i32>) -> String {
    match (sign, degree) {
        (Some(s), Some(d)) => format!("{s} {d}{DEGREE_SIGN}"),
        (Some(s), None) => s.to_string(),
        (None, Some(d)) => format!("{d}{DEGREE_SIGN}"),
        (None, None) => "-".to_string(),
    }
}

/// Like [`position_cell`] but empty when nothing is known.
fn known_position(sign: Option<&str>, degree: Option<i32>) -> String {
    if sign.is_none() && degree.is_none() {
        String::new()
    } else {
        position_cell(sign, degree)
    }
}

/// Tabular summary, one line per record.
#[must_use]
pub fn render_table(records: &[&Record]) -> String {
    let mut out = String::new();

    let header: Vec<String> = TABLE_COLUMNS
        .iter()
        .map(|(title, width)| pad_str(title, *width, Alignment::Left, None).into_owned())
        .collect();
    out.push_str(&style(header.join(" ")).bold().to_string());
    out.push('\n');

    for record in records {
        let cells = [
            record.id.clone(),
            record.name.clone().unwrap_or_else(|| "-".to_string()),
            record
                .rodden_rating
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            position_cell(record.sun_sign.as_deref(), record.sun_degree),
            position_cell(record.moon_sign.as_deref(), record.moon_degree),
            position_cell(record.ascendant_sign.as_deref(), record.ascendant_degree),
            record.label.clone(),
        ];
        let line: Vec<String> = cells
            .iter()
            .zip(TABLE_COLUMNS.iter())
            .map(|(cell, (_, width))| {
                pad_str(cell, *width, Alignment::Left, Some("…")).into_owned()
            })
            .collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }

    out
}

/// Detail panel for one record.
#[must_use]
pub fn render_detail(record: &Record, width: usize) -> String {
    let mut out = String::new();
    let title = record.name.as_deref().unwrap_or("(unnamed)");
    out.push_str(&format!(
        "{} {}\n",
        style(title).bold().cyan(),
        style(format!("[{}]", record.id)).dim()
    ));

    let mut field = |label: &str, value: &str| {
        if !value.is_empty() {
            out.push_str(&format!("  {:<11} {value}\n", format!("{label}:")));
        }
    };

    field("Born", &record.birth_date_time);
    field("Place", record.birth_place.as_deref().unwrap_or_default());
    field(
        "Rating",
        &record
            .rodden_rating
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    );
    field("Sun", &known_position(record.sun_sign.as_deref(), record.sun_degree));
    field("Moon", &known_position(record.moon_sign.as_deref(), record.moon_degree));
    field(
        "Ascendant",
        &known_position(record.ascendant_sign.as_deref(), record.ascendant_degree),
    );
    field("Label", &record.label);
    field("Categories", &record.categories.join("; "));

    if !record.biography.is_empty() {
        let options = Options::new(width.saturating_sub(2).max(20))
            .initial_indent("  ")
            .subsequent_indent("  ");
        out.push('\n');
        out.push_str(&fill(&record.biography, options));
        out.push('\n');
    }

    out
}

/// Records as pretty-printed JSON.
pub fn render_json(records: &[&Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Every filter control with its choices.
#[must_use]
pub fn render_options(dataset: &Dataset) -> String {
    let options = dataset.options();
    let rows: [(&str, Vec<String>); 8] = [
        ("Rodden rating", with_any(&options.rodden_ratings)),
        ("Sun sign", with_any(&options.sun_signs)),
        ("Sun degree", with_any(&options.sun_degrees)),
        ("Moon sign", with_any(&options.moon_signs)),
        ("Moon degree", with_any(&options.moon_degrees)),
        ("Ascendant sign", with_any(&options.ascendant_signs)),
        ("Ascendant degree", with_any(&options.ascendant_degrees)),
        ("Label", with_any(&options.labels)),
    ];

    let mut out = String::new();
    for (title, values) in rows {
        out.push_str(&format!("{}\n  {}\n", style(title).bold(), values.join(", ")));
    }

    let level1: Vec<&str> = dataset.hierarchy().children_at(&[] as &[&str]);
    out.push_str(&format!(
        "{}\n  {}\n",
        style("Category (level 1)").bold(),
        with_any(&level1).join(", ")
    ));
    out
}

/// Indented category tree.
#[must_use]
pub fn render_tree(node: &CategoryNode) -> String {
    fn walk(node: &CategoryNode, depth: usize, out: &mut String) {
        for (segment, child) in node.iter() {
            out.push_str(&"  ".repeat(depth));
            out.push_str(segment);
            out.push('\n');
            walk(child, depth + 1, out);
        }
    }

    let mut out = String::new();
    walk(node, 0, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoddenRating;

    fn jane() -> Record {
        Record {
            name: Some("Jane Doe".into()),
            birth_date_time: "1970-08-10 14:30".into(),
            birth_place: Some("Paris".into()),
            rodden_rating: Some(RoddenRating::AA),
            sun_sign: Some("Лев".into()),
            sun_degree: Some(15),
            biography: "Played football for a long time and then wrote about it.".into(),
            ..Record::new("101")
        }
        .with_categories(vec!["Sports > Football".into()])
        .with_label("спортсмен")
    }

    #[test]
    fn test_position_cell() {
        assert_eq!(position_cell(Some("Лев"), Some(15)), "Лев 15°");
        assert_eq!(position_cell(Some("Лев"), None), "Лев");
        assert_eq!(position_cell(None, Some(3)), "3°");
        assert_eq!(position_cell(None, None), "-");
    }

    #[test]
    fn test_render_table_contains_rows() {
        let record = jane();
        let table = render_table(&[&record]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Ascendant"));
        assert!(lines[1].starts_with("101"));
        assert!(lines[1].contains("Jane Doe"));
        assert!(lines[1].contains("Лев 15°"));
        assert!(lines[1].contains("спортсмен"));
    }

    #[test]
    fn test_render_detail() {
        let detail = render_detail(&jane(), 40);
        assert!(detail.contains("Jane Doe"));
        assert!(detail.contains("1970-08-10 14:30"));
        assert!(detail.contains("Sports > Football"));
        assert!(detail.contains("  Played football"));
        assert!(!detail.contains("Moon:"));
        assert!(detail.lines().all(|line| console::measure_text_width(line) <= 60));
    }

    #[test]
    fn test_render_json() {
        let record = jane();
        let json = render_json(&[&record]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["id"], "101");
        assert_eq!(parsed[0]["rodden_rating"], "AA");
        assert_eq!(parsed[0]["category_paths"][0][1], "Football");
    }

    #[test]
    fn test_render_tree() {
        let tree = CategoryNode::build([vec!["Sports", "Football"], vec!["Actor"]]);
        assert_eq!(render_tree(&tree), "Actor\nSports\n  Football\n");
    }
}
