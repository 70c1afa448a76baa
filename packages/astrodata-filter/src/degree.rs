//! Degree extraction from `*_degmin` attributes such as `15°30`.

use crate::config::DEGREE_SIGN;

/// Return the whole-degree part of a degree-and-minutes string.
///
/// Everything before the first degree sign is trimmed and parsed as an
/// integer. Missing, empty or non-numeric input yields `None`. The value is
/// not range checked.
///
/// # Examples
/// ```
/// use astrodata_filter::degree::parse_degree;
///
/// assert_eq!(parse_degree(Some("15°30")), Some(15));
/// assert_eq!(parse_degree(Some("0°05'")), Some(0));
/// assert_eq!(parse_degree(Some("°30")), None);
/// assert_eq!(parse_degree(None), None);
/// ```
#[must_use]
pub fn parse_degree(degmin: Option<&str>) -> Option<i32> {
    let raw = degmin?;
    let leading = raw.split(DEGREE_SIGN).next()?.trim();
    leading.parse().ok()
}
