//! Configuration constants, session settings and criterion validation.

use regex::Regex;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{AstroError, Result};

/// Default source document, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "astrodata.xml";

/// Separator between degrees and minutes in `*_degmin` attributes (U+00B0).
pub const DEGREE_SIGN: char = '\u{00B0}';

/// Lowest degree within a sign.
pub const DEGREE_MIN: i32 = 0;

/// Highest degree within a sign.
///
/// The data encodes degree-within-sign as 0..=29. A 1..=30 slider has been
/// seen in older front ends; it is not honoured here.
pub const DEGREE_MAX: i32 = 29;

/// Delimiter between segments of a category path.
pub const CATEGORY_DELIMITER: &str = " > ";

/// Separator inside a cusp sign code such as `ari/tau`.
pub const CUSP_SEPARATOR: char = '/';

/// Label for records the keyword classifier could not place.
pub const UNCLASSIFIED: &str = "unclassified";

/// Label for records without any category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Display value of the wildcard option.
pub const ANY: &str = "any";

/// Environment variable naming the source document.
pub const ENV_DATA_PATH: &str = "ASTRODATA_PATH";

/// Environment variable selecting `raw` or `translated` sign display.
pub const ENV_SIGN_DISPLAY: &str = "ASTRODATA_SIGN_DISPLAY";

/// Environment variable selecting `keyword` or `first` labelling.
pub const ENV_LABEL_MODE: &str = "ASTRODATA_LABEL_MODE";

/// Environment variable pointing at a YAML keyword mapping.
pub const ENV_KEYWORDS: &str = "ASTRODATA_KEYWORDS";

/// Degree range syntax: `10..20`, `10-20` or `10..=20`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DEGREE_RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d+)\s*(?:\.\.=?|-)\s*(-?\d+)\s*$").expect("valid regex")
});

/// Single degree syntax.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DEGREE_EXACT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-?\d+)\s*$").expect("valid regex"));

/// How sign fields are stored for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignDisplay {
    /// Keep the short code from the source (`leo`, `ari/tau`).
    Raw,
    /// Store the translated name (`Лев`, `Овен/Телец`).
    #[default]
    Translated,
}

impl FromStr for SignDisplay {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "raw" | "code" => Ok(Self::Raw),
            "translated" | "name" => Ok(Self::Translated),
            other => Err(AstroError::Config(format!(
                "unknown sign display '{other}', expected raw or translated"
            ))),
        }
    }
}

/// Which classifier produces the record label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMode {
    /// Coarse label from a keyword mapping.
    #[default]
    Keyword,
    /// First category string verbatim.
    FirstCategory,
}

impl FromStr for LabelMode {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "keyword" | "keywords" => Ok(Self::Keyword),
            "first" | "first-category" => Ok(Self::FirstCategory),
            other => Err(AstroError::Config(format!(
                "unknown label mode '{other}', expected keyword or first"
            ))),
        }
    }
}

/// Settings that stay fixed for a browsing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    pub data_path: PathBuf,
    pub sign_display: SignDisplay,
    pub label_mode: LabelMode,
    pub keywords_path: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            sign_display: SignDisplay::default(),
            label_mode: LabelMode::default(),
            keywords_path: None,
        }
    }
}

impl BrowserConfig {
    /// Read settings from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let data_path = std::env::var(ENV_DATA_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE));

        let sign_display = match std::env::var(ENV_SIGN_DISPLAY) {
            Ok(v) => v.parse()?,
            Err(_) => SignDisplay::default(),
        };

        let label_mode = match std::env::var(ENV_LABEL_MODE) {
            Ok(v) => v.parse()?,
            Err(_) => LabelMode::default(),
        };

        let keywords_path = std::env::var(ENV_KEYWORDS).ok().map(PathBuf::from);

        Ok(Self {
            data_path,
            sign_display,
            label_mode,
            keywords_path,
        })
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_sign_display(mut self, sign_display: SignDisplay) -> Self {
        self.sign_display = sign_display;
        self
    }

    pub fn with_label_mode(mut self, label_mode: LabelMode) -> Self {
        self.label_mode = label_mode;
        self
    }

    pub fn with_keywords_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.keywords_path = Some(path.into());
        self
    }
}

/// Validate that a degree lies within a sign.
///
/// # Arguments
/// * `field` - Name of the filter, used in the error message
/// * `degree` - Degree to check
///
/// # Returns
/// `Ok(())` inside `DEGREE_MIN..=DEGREE_MAX`, otherwise `InvalidCriterion`
///
/// # Examples
/// ```
/// use astrodata_filter::config::validate_degree;
///
/// assert!(validate_degree("sun degree", 0).is_ok());
/// assert!(validate_degree("sun degree", 29).is_ok());
/// assert!(validate_degree("sun degree", 30).is_err());
/// ```
pub fn validate_degree(field: &str, degree: i32) -> Result<()> {
    if (DEGREE_MIN..=DEGREE_MAX).contains(&degree) {
        Ok(())
    } else {
        Err(AstroError::invalid_criterion(
            field,
            format!("{degree} is outside {DEGREE_MIN}..={DEGREE_MAX}"),
        ))
    }
}

/// Parsed form of a degree argument, before it becomes a filter constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeArg {
    Exact(i32),
    Range(i32, i32),
}

/// Parse a degree argument: a single value (`15`) or an inclusive range
/// (`10..20`, `10..=20`, `10-20`).
///
/// Both ends are validated against the degree bounds and `low <= high`.
///
/// # Arguments
/// * `field` - Name of the filter, used in error messages
/// * `input` - User input such as `15` or `10..20`
///
/// # Returns
/// The parsed argument, or `InvalidCriterion` for bad syntax or bounds
///
/// # Examples
/// ```
/// use astrodata_filter::config::{parse_degree_arg, DegreeArg};
///
/// assert_eq!(parse_degree_arg("sun", "15").unwrap(), DegreeArg::Exact(15));
/// assert_eq!(parse_degree_arg("sun", "10..20").unwrap(), DegreeArg::Range(10, 20));
/// assert!(parse_degree_arg("sun", "20..10").is_err());
/// ```
pub fn parse_degree_arg(field: &str, input: &str) -> Result<DegreeArg> {
    if let Some(caps) = DEGREE_RANGE_PATTERN.captures(input) {
        let low = parse_bound(field, &caps[1])?;
        let high = parse_bound(field, &caps[2])?;
        validate_degree(field, low)?;
        validate_degree(field, high)?;
        if low > high {
            return Err(AstroError::invalid_criterion(
                field,
                format!("range start {low} is greater than end {high}"),
            ));
        }
        return Ok(DegreeArg::Range(low, high));
    }

    if let Some(caps) = DEGREE_EXACT_PATTERN.captures(input) {
        let value = parse_bound(field, &caps[1])?;
        validate_degree(field, value)?;
        return Ok(DegreeArg::Exact(value));
    }

    Err(AstroError::invalid_criterion(
        field,
        format!("'{input}' is neither a degree nor a range like 10..20"),
    ))
}

fn parse_bound(field: &str, text: &str) -> Result<i32> {
    text.parse()
        .map_err(|_| AstroError::invalid_criterion(field, format!("'{text}' is not a number")))
}
