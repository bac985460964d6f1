//! WMO weather code labels.
//! See: https://open-meteo.com/en/docs#weathervariables

/// Label used for any code missing from the table
pub const UNKNOWN_LABEL: &str = "मौसम की जानकारी उपलब्ध नहीं (Unknown)";

/// Static mapping from WMO code to a bilingual label, Hindi with English in parentheses.
pub struct WeatherCodeTable {
    entries: &'static [(i32, &'static str)],
}

pub static WEATHER_CODES: WeatherCodeTable = WeatherCodeTable {
    entries: &[
        (0, "साफ आकाश (Clear sky)"),
        (1, "मुख्यतः साफ (Mainly clear)"),
        (2, "आंशिक बादल (Partly cloudy)"),
        (3, "बादल छाए (Overcast)"),
        (45, "कोहरा (Fog)"),
        (48, "जमने वाला कोहरा (Depositing fog)"),
        (51, "हल्की बूंदाबांदी (Light drizzle)"),
        (53, "बूंदाबांदी (Moderate drizzle)"),
        (55, "तेज बूंदाबांदी (Dense drizzle)"),
        (61, "हल्की बारिश (Slight rain)"),
        (63, "बारिश (Moderate rain)"),
        (65, "भारी बारिश (Heavy rain)"),
        (71, "हल्की बर्फबारी (Slight snow)"),
        (73, "बर्फबारी (Moderate snow)"),
        (75, "भारी बर्फबारी (Heavy snow)"),
        (77, "बर्फ के दाने (Snow grains)"),
        (80, "हल्की वर्षा (Slight rain showers)"),
        (81, "वर्षा (Moderate rain showers)"),
        (82, "तीव्र वर्षा (Violent rain showers)"),
        (85, "हल्की हिमवर्षा (Slight snow showers)"),
        (86, "भारी हिमवर्षा (Heavy snow showers)"),
        (95, "तूफान (Thunderstorm)"),
        (96, "ओलावृष्टि के साथ तूफान (Thunderstorm with hail)"),
        (99, "भारी ओलावृष्टि के साथ तूफान (Thunderstorm with heavy hail)"),
    ],
};

impl WeatherCodeTable {
    /// Label for `code`, or `None` if the table has no entry
    pub fn get(&self, code: i32) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| *label)
    }

    /// Label for `code`, falling back to [`UNKNOWN_LABEL`]
    pub fn label(&self, code: i32) -> &'static str {
        self.get(code).unwrap_or(UNKNOWN_LABEL)
    }

    pub fn codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.iter().map(|(c, _)| *c)
    }
}

/// Convenience wrapper over [`WEATHER_CODES`]
pub fn condition_label(code: i32) -> &'static str {
    WEATHER_CODES.label(code)
}

/// The English portion of a bilingual label: the text inside the last
/// parentheses, or the whole label if it has none.
pub fn english_part(label: &str) -> &str {
    match (label.rfind('('), label.rfind(')')) {
        (Some(open), Some(close)) if open < close => &label[open + 1..close],
        _ => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_clear() {
        assert_eq!(condition_label(0), "साफ आकाश (Clear sky)");
    }

    #[test]
    fn test_code_partly_cloudy() {
        assert_eq!(english_part(condition_label(2)), "Partly cloudy");
    }

    #[test]
    fn test_code_overcast() {
        assert_eq!(english_part(condition_label(3)), "Overcast");
    }

    #[test]
    fn test_code_thunderstorm_variants() {
        assert_eq!(english_part(condition_label(95)), "Thunderstorm");
        assert_eq!(english_part(condition_label(96)), "Thunderstorm with hail");
        assert_eq!(english_part(condition_label(99)), "Thunderstorm with heavy hail");
    }

    #[test]
    fn test_codes_not_in_table_are_unknown() {
        // WMO defines these but the table does not
        for code in [56, 57, 66, 67] {
            assert_eq!(condition_label(code), UNKNOWN_LABEL);
        }
        assert_eq!(condition_label(999), UNKNOWN_LABEL);
        assert_eq!(condition_label(-1), UNKNOWN_LABEL);
    }

    #[test]
    fn test_every_entry_is_bilingual() {
        for code in WEATHER_CODES.codes() {
            let label = condition_label(code);
            assert_ne!(english_part(label), label, "code {} has no English part", code);
        }
    }

    #[test]
    fn test_table_has_no_duplicate_codes() {
        let codes: Vec<i32> = WEATHER_CODES.codes().collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(codes.len(), sorted.len());
        assert_eq!(codes.len(), 24);
    }

    #[test]
    fn test_english_part_without_parentheses() {
        assert_eq!(english_part("Sunny"), "Sunny");
        assert_eq!(english_part(")odd("), ")odd(");
    }
}
