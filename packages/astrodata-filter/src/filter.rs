//! Filter engine: a conjunction of per-field constraints over records.
//!
//! Each field is either a wildcard or a concrete constraint. A record with
//! a missing value never satisfies a concrete constraint on that field.
//! Results keep the input order.

use crate::config::{parse_degree_arg, validate_degree, DegreeArg, SignDisplay};
use crate::error::{AstroError, Result};
use crate::sign::{translate_sign, untranslate_sign};
use crate::types::{Record, RoddenRating};

/// A wildcard or an exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Any,
    Is(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::Any
    }
}

impl<T: PartialEq> Selection<T> {
    /// Whether a record's (optional) value satisfies this selection.
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Self::Any => true,
            Self::Is(expected) => value == Some(expected),
        }
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Selection satisfied exactly when both `self` and `other` are.
    ///
    /// # Arguments
    /// * `other` - Selection to combine with
    ///
    /// # Returns
    /// The combined selection, or `None` when the two name different values
    /// and nothing can satisfy both
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Self::Any, selection) | (selection, Self::Any) => Some(selection),
            (Self::Is(a), Self::Is(b)) => (a == b).then_some(Self::Is(a)),
        }
    }
}

impl<T> Selection<T> {
    /// Convert the concrete value, keeping wildcards as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Selection<U> {
        match self {
            Self::Any => Selection::Any,
            Self::Is(value) => Selection::Is(f(value)),
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Any, Self::Is)
    }
}

/// Constraint on a degree field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegreeConstraint {
    #[default]
    Any,
    Exact(i32),
    /// Inclusive on both ends.
    Range { low: i32, high: i32 },
}

impl DegreeConstraint {
    /// Build an exact constraint, checking bounds.
    pub fn exact(field: &str, degree: i32) -> Result<Self> {
        validate_degree(field, degree)?;
        Ok(Self::Exact(degree))
    }

    /// Build a range constraint, checking bounds and order.
    pub fn range(field: &str, low: i32, high: i32) -> Result<Self> {
        validate_degree(field, low)?;
        validate_degree(field, high)?;
        if low > high {
            return Err(AstroError::invalid_criterion(
                field,
                format!("range start {low} is greater than end {high}"),
            ));
        }
        Ok(Self::Range { low, high })
    }

    /// Parse `15` or `10..20` style input.
    ///
    /// # Arguments
    /// * `field` - Name of the filter, used in error messages
    /// * `input` - Exact degree or inclusive range
    ///
    /// # Returns
    /// The validated constraint
    pub fn parse(field: &str, input: &str) -> Result<Self> {
        Ok(match parse_degree_arg(field, input)? {
            DegreeArg::Exact(degree) => Self::Exact(degree),
            DegreeArg::Range(low, high) => Self::Range { low, high },
        })
    }

    #[must_use]
    pub fn matches(&self, value: Option<i32>) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (_, None) => false,
            (Self::Exact(expected), Some(v)) => v == *expected,
            (Self::Range { low, high }, Some(v)) => (*low..=*high).contains(&v),
        }
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Constraint satisfied exactly by the degrees both constraints accept.
    ///
    /// # Returns
    /// The overlap, or `None` when no degree satisfies both
    ///
    /// # Examples
    /// ```
    /// use astrodata_filter::DegreeConstraint;
    ///
    /// let a = DegreeConstraint::Range { low: 5, high: 20 };
    /// let b = DegreeConstraint::Range { low: 10, high: 25 };
    /// assert_eq!(a.intersect(b), Some(DegreeConstraint::Range { low: 10, high: 20 }));
    /// assert_eq!(a.intersect(DegreeConstraint::Exact(3)), None);
    /// ```
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Self::Any, constraint) | (constraint, Self::Any) => Some(constraint),
            (Self::Exact(degree), constraint) | (constraint, Self::Exact(degree)) => {
                constraint.matches(Some(degree)).then_some(Self::Exact(degree))
            }
            (Self::Range { low: l1, high: h1 }, Self::Range { low: l2, high: h2 }) => {
                let (low, high) = (l1.max(l2), h1.min(h2));
                (low <= high).then_some(Self::Range { low, high })
            }
        }
    }
}

/// The selected criteria for one filter evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Criteria {
    pub rodden_rating: Selection<RoddenRating>,
    pub sun_sign: Selection<String>,
    pub sun_degree: DegreeConstraint,
    pub moon_sign: Selection<String>,
    pub moon_degree: DegreeConstraint,
    pub ascendant_sign: Selection<String>,
    pub ascendant_degree: DegreeConstraint,
    /// Exact match on the classifier label.
    pub label: Selection<String>,
    /// Selected category levels; empty means any.
    pub category_path: Vec<String>,
    /// Further prefixes the record must also fall under, possibly through
    /// a different category. Filled by [`Criteria::intersect`].
    pub required_paths: Vec<Vec<String>>,
}

impl Criteria {
    /// Criteria that match everything.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.rodden_rating.is_any()
            && self.sun_sign.is_any()
            && self.sun_degree.is_any()
            && self.moon_sign.is_any()
            && self.moon_degree.is_any()
            && self.ascendant_sign.is_any()
            && self.ascendant_degree.is_any()
            && self.label.is_any()
            && self.category_path.is_empty()
            && self.required_paths.is_empty()
    }

    /// Conjunction of two criteria sets: a record matches the result
    /// exactly when it matches both `self` and `other`.
    ///
    /// # Arguments
    /// * `other` - Criteria to combine with
    ///
    /// # Returns
    /// The combined criteria, or `None` when the two contradict each other
    /// (different values for the same sign, rating or label, or disjoint
    /// degree constraints) and no record can match
    #[must_use]
    pub fn intersect(self, other: Criteria) -> Option<Self> {
        let mut prefixes: Vec<Vec<String>> = Vec::new();
        let candidates = std::iter::once(self.category_path)
            .chain(self.required_paths)
            .chain(std::iter::once(other.category_path))
            .chain(other.required_paths)
            .filter(|path| !path.is_empty());
        for path in candidates {
            if prefixes.iter().any(|kept| kept.starts_with(&path)) {
                continue;
            }
            prefixes.retain(|kept| !path.starts_with(kept));
            prefixes.push(path);
        }
        let mut prefixes = prefixes.into_iter();

        Some(Self {
            rodden_rating: self.rodden_rating.intersect(other.rodden_rating)?,
            sun_sign: self.sun_sign.intersect(other.sun_sign)?,
            sun_degree: self.sun_degree.intersect(other.sun_degree)?,
            moon_sign: self.moon_sign.intersect(other.moon_sign)?,
            moon_degree: self.moon_degree.intersect(other.moon_degree)?,
            ascendant_sign: self.ascendant_sign.intersect(other.ascendant_sign)?,
            ascendant_degree: self.ascendant_degree.intersect(other.ascendant_degree)?,
            label: self.label.intersect(other.label)?,
            category_path: prefixes.next().unwrap_or_default(),
            required_paths: prefixes.collect(),
        })
    }

    /// Rewrite sign selections into the session's display form, so users can
    /// type either `leo` or `Лев`.
    #[must_use]
    pub fn normalize_signs(self, display: SignDisplay) -> Self {
        let convert = |selection: Selection<String>| match selection {
            Selection::Any => Selection::Any,
            Selection::Is(value) => Selection::Is(match display {
                SignDisplay::Raw => untranslate_sign(Some(&value)),
                SignDisplay::Translated => translate_sign(Some(&value)),
            }),
        };
        Self {
            sun_sign: convert(self.sun_sign),
            moon_sign: convert(self.moon_sign),
            ascendant_sign: convert(self.ascendant_sign),
            ..self
        }
    }

    /// Whether a single record satisfies every constraint.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.rodden_rating.matches(record.rodden_rating.as_ref())
            && self.sun_sign.matches(record.sun_sign.as_ref())
            && self.sun_degree.matches(record.sun_degree)
            && self.moon_sign.matches(record.moon_sign.as_ref())
            && self.moon_degree.matches(record.moon_degree)
            && self.ascendant_sign.matches(record.ascendant_sign.as_ref())
            && self.ascendant_degree.matches(record.ascendant_degree)
            && self.label.matches(Some(&record.label))
            && matches_path_prefix(record, &self.category_path)
            && self
                .required_paths
                .iter()
                .all(|prefix| matches_path_prefix(record, prefix))
    }
}

/// Level-N category match: some path of the record starts with `prefix`.
///
/// # Arguments
/// * `record` - Record whose category paths are checked
/// * `prefix` - Selected levels, outermost first; empty matches everything
///
/// # Returns
/// `true` if any of the record's paths begins with `prefix`
#[must_use]
pub fn matches_path_prefix(record: &Record, prefix: &[String]) -> bool {
    prefix.is_empty()
        || record
            .category_paths
            .iter()
            .any(|path| path.starts_with(prefix))
}

/// Keep the records that satisfy `criteria`, in their original order.
///
/// Accepts any iterator of record references, so a previous result can be
/// filtered again.
pub fn apply<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    criteria: &Criteria,
) -> Vec<&'a Record> {
    records
        .into_iter()
        .filter(|record| criteria.matches(record))
        .collect()
}
