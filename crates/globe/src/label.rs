//! Human-readable tooltip text.

pub const LOADING_NOTICE: &str = "🌍 Loading countries…";
pub const UNAVAILABLE_NOTICE: &str = "⚠ Map data unavailable, check your internet connection";

const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// Regional-indicator flag for a 2-letter code, or a globe for anything else.
pub fn flag_glyph(iso2: Option<&str>) -> String {
    let Some(code) = iso2.filter(|c| c.len() == 2 && c.chars().all(|ch| ch.is_ascii_alphabetic()))
    else {
        return "🌐".to_string();
    };
    code.chars()
        .filter_map(|ch| {
            let offset = ch.to_ascii_uppercase() as u32 - 'A' as u32;
            char::from_u32(REGIONAL_INDICATOR_A + offset)
        })
        .collect()
}

pub fn country_label(iso2: Option<&str>, name: &str) -> String {
    format!("{} {name}", flag_glyph(iso2))
}

#[cfg(test)]
mod tests {
    use super::{country_label, flag_glyph};

    #[test]
    fn builds_regional_indicator_pairs() {
        assert_eq!(flag_glyph(Some("fr")), "🇫🇷");
        assert_eq!(flag_glyph(Some("JP")), "🇯🇵");
    }

    #[test]
    fn falls_back_to_globe() {
        assert_eq!(flag_glyph(None), "🌐");
        assert_eq!(flag_glyph(Some("")), "🌐");
        assert_eq!(flag_glyph(Some("USA")), "🌐");
        assert_eq!(flag_glyph(Some("1A")), "🌐");
        assert_eq!(country_label(None, "Atlantis"), "🌐 Atlantis");
    }
}
