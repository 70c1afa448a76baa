//! Interactive browsing state: the current criteria over a shared dataset.

use std::sync::Arc;

use crate::dataset::Dataset;
use crate::error::{AstroError, Result};
use crate::filter::{Criteria, Selection};
use crate::types::Record;

/// One user's selections over a loaded dataset.
///
/// Every change re-evaluates against the full record set; the dataset
/// itself is never modified.
#[derive(Debug, Clone)]
pub struct BrowseSession {
    dataset: Arc<Dataset>,
    criteria: Criteria,
}

impl BrowseSession {
    #[must_use]
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            criteria: Criteria::any(),
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Replace all criteria at once.
    ///
    /// Sign values are normalized to the dataset's display form and the
    /// category path is cut back to the part present in the hierarchy.
    pub fn set_criteria(&mut self, criteria: Criteria) {
        let mut criteria = criteria.normalize_signs(self.dataset.sign_display());
        criteria.category_path = self
            .dataset
            .hierarchy()
            .valid_prefix(&criteria.category_path);
        self.criteria = criteria;
    }

    /// Select a value for category level `level` (1-based).
    ///
    /// Choosing `Any` clears this level and everything below it. Choosing a
    /// value keeps deeper selections only while they remain valid under the
    /// new value; the rest reset to `Any`.
    pub fn set_category_level(&mut self, level: usize, selection: Selection<String>) -> Result<()> {
        if level == 0 {
            return Err(AstroError::invalid_criterion(
                "category",
                "levels are numbered from 1",
            ));
        }

        let current = self.criteria.category_path.clone();
        if current.len() < level - 1 {
            return Err(AstroError::invalid_criterion(
                format!("category level {level}"),
                format!("select level {} first", current.len() + 1),
            ));
        }

        let value = match selection {
            Selection::Any => {
                self.criteria.category_path.truncate(level - 1);
                return Ok(());
            }
            Selection::Is(value) => value,
        };

        let mut candidate: Vec<String> = current[..level - 1].to_vec();
        candidate.push(value);
        if !self.dataset.hierarchy().contains_path(&candidate) {
            return Err(AstroError::invalid_criterion(
                format!("category level {level}"),
                format!("'{}' does not occur under the current selection", candidate[level - 1]),
            ));
        }
        candidate.extend(current.into_iter().skip(level));

        self.criteria.category_path = self.dataset.hierarchy().valid_prefix(&candidate);
        Ok(())
    }

    /// Choices offered for category level `level` (1-based) given the
    /// levels above it.
    #[must_use]
    pub fn category_choices(&self, level: usize) -> Vec<&str> {
        let path = &self.criteria.category_path;
        if level == 0 || path.len() < level - 1 {
            return Vec::new();
        }
        self.dataset.hierarchy().children_at(&path[..level - 1])
    }

    /// Records matching the current criteria, in source order.
    #[must_use]
    pub fn results(&self) -> Vec<&Record> {
        self.dataset.filter(&self.criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::KeywordClassifier;
    use crate::config::SignDisplay;
    use crate::filter::DegreeConstraint;

    fn session() -> BrowseSession {
        let records = vec![
            Record::new("1").with_categories(vec!["Sports > Football > Goalkeeper".into()]),
            Record::new("2").with_categories(vec!["Sports > Tennis".into()]),
            Record::new("3").with_categories(vec!["Entertainment > Actor > TV".into()]),
            Record {
                sun_sign: Some("Лев".into()),
                sun_degree: Some(12),
                ..Record::new("4")
            },
        ];
        let dataset = Dataset::build(records, &KeywordClassifier::default(), SignDisplay::Translated);
        BrowseSession::new(Arc::new(dataset))
    }

    fn ids(session: &BrowseSession) -> Vec<String> {
        session.results().iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_starts_with_everything() {
        let s = session();
        assert_eq!(ids(&s), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_level_choices_follow_selection() {
        let mut s = session();
        assert_eq!(s.category_choices(1), vec!["Entertainment", "Sports"]);
        assert!(s.category_choices(2).is_empty());

        s.set_category_level(1, Selection::Is("Sports".into())).unwrap();
        assert_eq!(s.category_choices(2), vec!["Football", "Tennis"]);

        s.set_category_level(2, Selection::Is("Football".into())).unwrap();
        assert_eq!(s.category_choices(3), vec!["Goalkeeper"]);
        assert_eq!(ids(&s), vec!["1"]);
    }

    #[test]
    fn test_changing_upper_level_resets_invalid_lower_levels() {
        let mut s = session();
        s.set_category_level(1, Selection::Is("Sports".into())).unwrap();
        s.set_category_level(2, Selection::Is("Football".into())).unwrap();

        s.set_category_level(1, Selection::Is("Entertainment".into())).unwrap();
        assert_eq!(s.criteria().category_path, vec!["Entertainment".to_string()]);
        assert_eq!(ids(&s), vec!["3"]);
    }

    #[test]
    fn test_reselecting_same_upper_level_keeps_lower_levels() {
        let mut s = session();
        s.set_category_level(1, Selection::Is("Sports".into())).unwrap();
        s.set_category_level(2, Selection::Is("Football".into())).unwrap();
        s.set_category_level(1, Selection::Is("Sports".into())).unwrap();
        assert_eq!(
            s.criteria().category_path,
            vec!["Sports".to_string(), "Football".to_string()]
        );
    }

    #[test]
    fn test_any_clears_level_and_below() {
        let mut s = session();
        s.set_category_level(1, Selection::Is("Sports".into())).unwrap();
        s.set_category_level(2, Selection::Is("Tennis".into())).unwrap();
        s.set_category_level(2, Selection::Any).unwrap();
        assert_eq!(s.criteria().category_path, vec!["Sports".to_string()]);
        s.set_category_level(1, Selection::Any).unwrap();
        assert!(s.criteria().category_path.is_empty());
    }

    #[test]
    fn test_invalid_level_selection() {
        let mut s = session();
        assert!(s.set_category_level(0, Selection::Is("Sports".into())).is_err());
        assert!(s.set_category_level(2, Selection::Is("Football".into())).is_err());
        assert!(s.set_category_level(1, Selection::Is("Politics".into())).is_err());
    }

    #[test]
    fn test_set_criteria_normalizes() {
        let mut s = session();
        s.set_criteria(Criteria {
            sun_sign: Selection::Is("leo".into()),
            sun_degree: DegreeConstraint::Range { low: 10, high: 20 },
            category_path: vec!["Nope".into()],
            ..Criteria::any()
        });
        assert_eq!(s.criteria().sun_sign, Selection::Is("Лев".into()));
        assert!(s.criteria().category_path.is_empty());
        assert_eq!(ids(&s), vec!["4"]);
    }
}
