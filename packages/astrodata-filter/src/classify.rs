//! Category classification strategies.
//!
//! A classifier reduces a record's free-text categories to one label that
//! can be offered as an exact-match filter.

use std::path::Path;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::config::{LabelMode, UNCATEGORIZED, UNCLASSIFIED};
use crate::error::Result;

/// Trait for category labelling strategies.
pub trait CategoryClassifier {
    /// Produce the label for a record's categories.
    fn classify(&self, categories: &[String]) -> String;
}

/// One coarse label and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    #[must_use]
    pub fn new(label: impl Into<String>, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            label: label.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Case-insensitive keyword matching; rules are tried in declared order and
/// the first rule with any matching keyword wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordClassifier {
    rules: Vec<KeywordRule>,
}

impl KeywordClassifier {
    #[must_use]
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    /// Load rules from a YAML list of `{label, keywords}` entries.
    ///
    /// # Examples
    /// ```
    /// use astrodata_filter::classify::{CategoryClassifier, KeywordClassifier};
    ///
    /// let yaml = "- label: musician\n  keywords: [Music, Singer]\n";
    /// let classifier = KeywordClassifier::from_yaml(yaml).unwrap();
    /// assert_eq!(classifier.classify(&["Entertainment > Music".to_string()]), "musician");
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let rules: Vec<KeywordRule> = serde_yaml_ng::from_str(yaml)?;
        Ok(Self::new(rules))
    }

    /// Load rules from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Labels in declared order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.label.as_str())
    }
}

impl Default for KeywordClassifier {
    /// Sportsperson, actor and writer, in that order.
    fn default() -> Self {
        Self::new(vec![
            KeywordRule::new("спортсмен", ["Sports"]),
            KeywordRule::new("актёр", ["Actor", "TV", "Entertainment : Live Stage"]),
            KeywordRule::new(
                "писатель",
                ["Writer", "Autobiographer", "Journalist", "Poet", "Fiction"],
            ),
        ])
    }
}

impl CategoryClassifier for KeywordClassifier {
    fn classify(&self, categories: &[String]) -> String {
        let haystacks: Vec<String> = categories.iter().map(|c| fold(c)).collect();

        self.rules
            .iter()
            .find(|rule| {
                rule.keywords.iter().map(|k| fold(k)).any(|keyword| {
                    haystacks.iter().any(|category| category.contains(&keyword))
                })
            })
            .map_or_else(|| UNCLASSIFIED.to_string(), |rule| rule.label.clone())
    }
}

/// Uses the first category verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstCategoryClassifier;

impl CategoryClassifier for FirstCategoryClassifier {
    fn classify(&self, categories: &[String]) -> String {
        categories
            .first()
            .cloned()
            .unwrap_or_else(|| UNCATEGORIZED.to_string())
    }
}

/// Build the classifier for a label mode.
///
/// A keyword file, when given, replaces the default rules.
pub fn classifier_for(
    mode: LabelMode,
    keywords_path: Option<&Path>,
) -> Result<Box<dyn CategoryClassifier>> {
    Ok(match mode {
        LabelMode::FirstCategory => Box::new(FirstCategoryClassifier),
        LabelMode::Keyword => match keywords_path {
            Some(path) => Box::new(KeywordClassifier::from_file(path)?),
            None => Box::new(KeywordClassifier::default()),
        },
    })
}

/// NFC-normalize and lowercase for comparison.
fn fold(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keyword_live_stage_is_actor() {
        let classifier = KeywordClassifier::default();
        assert_eq!(
            classifier.classify(&cats(&["Entertainment : Live Stage"])),
            "актёр"
        );
    }

    #[test]
    fn test_keyword_first_declared_label_wins() {
        let classifier = KeywordClassifier::default();
        // Matches both "Sports" and "Writer"; sportsperson is declared first.
        assert_eq!(
            classifier.classify(&cats(&["Writers > Sports Journalist"])),
            "спортсмен"
        );
        // Category order does not matter, rule order does.
        assert_eq!(
            classifier.classify(&cats(&["Writer", "Sports > Tennis"])),
            "спортсмен"
        );
    }

    #[test]
    fn test_keyword_case_insensitive_substring() {
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.classify(&cats(&["vocation : poetry > poet"])), "писатель");
        assert_eq!(classifier.classify(&cats(&["Entertainment > TV host"])), "актёр");
    }

    #[test]
    fn test_keyword_unclassified() {
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.classify(&[]), UNCLASSIFIED);
        assert_eq!(classifier.classify(&cats(&["Medicine"])), UNCLASSIFIED);
    }

    #[test]
    fn test_keyword_matches_decomposed_text() {
        let classifier = KeywordClassifier::new(vec![KeywordRule::new("ё", ["актёр"])]);
        // "е" followed by combining diaeresis.
        let decomposed = "акте\u{0308}р".to_string();
        assert_eq!(classifier.classify(&[decomposed]), "ё");
    }

    #[test]
    fn test_keyword_from_yaml_keeps_order() {
        let yaml = r#"
- label: second
  keywords: [Foot]
- label: first
  keywords: [Football]
"#;
        let classifier = KeywordClassifier::from_yaml(yaml).unwrap();
        assert_eq!(classifier.labels().collect::<Vec<_>>(), vec!["second", "first"]);
        assert_eq!(classifier.classify(&cats(&["Sports > Football"])), "second");
    }

    #[test]
    fn test_keyword_from_yaml_invalid() {
        assert!(KeywordClassifier::from_yaml("label: [unterminated").is_err());
    }

    #[test]
    fn test_first_category() {
        let classifier = FirstCategoryClassifier;
        assert_eq!(
            classifier.classify(&cats(&["Sports > Football", "Actor"])),
            "Sports > Football"
        );
        assert_eq!(classifier.classify(&[]), UNCATEGORIZED);
    }

    #[test]
    fn test_classifier_for_modes() {
        let keyword = classifier_for(LabelMode::Keyword, None).unwrap();
        assert_eq!(keyword.classify(&cats(&["Sports"])), "спортсмен");

        let first = classifier_for(LabelMode::FirstCategory, None).unwrap();
        assert_eq!(first.classify(&cats(&["Sports"])), "Sports");
    }
}
