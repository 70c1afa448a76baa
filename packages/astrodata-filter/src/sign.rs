//! Zodiac sign codes and their display names.

use crate::config::CUSP_SEPARATOR;

/// The twelve signs in zodiac order, as `(code, display name)`.
pub const SIGN_TABLE: [(&str, &str); 12] = [
    ("ari", "Овен"),
    ("tau", "Телец"),
    ("gem", "Близнецы"),
    ("can", "Рак"),
    ("leo", "Лев"),
    ("vir", "Дева"),
    ("lib", "Весы"),
    ("sco", "Скорпион"),
    ("sag", "Стрелец"),
    ("cap", "Козерог"),
    ("aqu", "Водолей"),
    ("pis", "Рыбы"),
];

/// Look up the display name for a single code (case-insensitive).
#[must_use]
pub fn name_for_code(code: &str) -> Option<&'static str> {
    let code = code.trim();
    SIGN_TABLE
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

/// The canonical lowercase form of a known code (case-insensitive).
///
/// # Arguments
/// * `code` - Sign code as typed, e.g. `LEO`
///
/// # Returns
/// The code as stored in the source, or `None` if it is not a sign code
#[must_use]
pub fn canonical_code(code: &str) -> Option<&'static str> {
    let code = code.trim();
    SIGN_TABLE
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(c, _)| *c)
}

/// Reverse lookup: the code for a display name.
#[must_use]
pub fn code_for_name(name: &str) -> Option<&'static str> {
    let name = name.trim().to_lowercase();
    SIGN_TABLE
        .iter()
        .find(|(_, n)| n.to_lowercase() == name)
        .map(|(code, _)| *code)
}

/// Translate a sign code, including `a/b` cusp codes, to its display name.
///
/// Unknown codes pass through unchanged. `None` and empty input give an
/// empty string.
///
/// # Examples
/// ```
/// use astrodata_filter::sign::translate_sign;
///
/// assert_eq!(translate_sign(Some("leo")), "Лев");
/// assert_eq!(translate_sign(Some("ari/tau")), "Овен/Телец");
/// assert_eq!(translate_sign(Some("xyz")), "xyz");
/// assert_eq!(translate_sign(None), "");
/// ```
#[must_use]
pub fn translate_sign(code: Option<&str>) -> String {
    map_sign(code, |part| name_for_code(part).map(String::from))
}

/// Inverse of [`translate_sign`]: display names back to codes.
///
/// Codes given in any case come back in their canonical lowercase form.
///
/// # Examples
/// ```
/// use astrodata_filter::sign::untranslate_sign;
///
/// assert_eq!(untranslate_sign(Some("Лев")), "leo");
/// assert_eq!(untranslate_sign(Some("Овен/Телец")), "ari/tau");
/// assert_eq!(untranslate_sign(Some("LEO")), "leo");
/// ```
#[must_use]
pub fn untranslate_sign(name: Option<&str>) -> String {
    map_sign(name, |part| {
        code_for_name(part)
            .or_else(|| canonical_code(part))
            .map(String::from)
    })
}

fn map_sign(value: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> String {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return String::new();
    };

    let translate = |part: &str| lookup(part).unwrap_or_else(|| part.to_string());

    let mut parts = value.split(CUSP_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => {
            format!("{}{CUSP_SEPARATOR}{}", translate(first), translate(second))
        }
        _ => translate(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_codes_translate() {
        for (code, name) in SIGN_TABLE {
            assert_eq!(translate_sign(Some(code)), name);
        }
    }

    #[test]
    fn test_names_round_trip() {
        for (code, name) in SIGN_TABLE {
            assert_eq!(code_for_name(name), Some(code));
            assert_eq!(untranslate_sign(Some(&translate_sign(Some(code)))), code);
        }
    }

    #[test]
    fn test_code_lookup_ignores_case() {
        assert_eq!(translate_sign(Some("LEO")), "Лев");
        assert_eq!(name_for_code(" sco "), Some("Скорпион"));
    }

    #[test]
    fn test_cusp_codes() {
        assert_eq!(translate_sign(Some("ari/tau")), "Овен/Телец");
        assert_eq!(translate_sign(Some("pis/ari")), "Рыбы/Овен");
    }

    #[test]
    fn test_cusp_with_unknown_side_passes_through() {
        assert_eq!(translate_sign(Some("ari/zzz")), "Овен/zzz");
        assert_eq!(translate_sign(Some("zzz/")), "zzz/");
    }

    #[test]
    fn test_more_than_one_separator_is_not_a_cusp() {
        assert_eq!(translate_sign(Some("ari/tau/gem")), "ari/tau/gem");
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(translate_sign(Some("oph")), "oph");
        assert_eq!(translate_sign(Some("")), "");
        assert_eq!(translate_sign(None), "");
        assert_eq!(untranslate_sign(None), "");
        assert_eq!(untranslate_sign(Some("Змееносец")), "Змееносец");
    }

    #[test]
    fn test_untranslate_canonicalizes_code_case() {
        assert_eq!(untranslate_sign(Some("LEO")), "leo");
        assert_eq!(untranslate_sign(Some("Ari/TAU")), "ari/tau");
        assert_eq!(untranslate_sign(Some("Лев/VIR")), "leo/vir");
        assert_eq!(canonical_code(" Sco "), Some("sco"));
        assert_eq!(canonical_code("Лев"), None);
    }
}
