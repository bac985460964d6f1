//! Seasonal advisory selection.
//!
//! The rules are an ordered table evaluated first-match-wins. Order matters:
//! a hot rainy day gets the rain advisory, not the heat one.

use serde::{Deserialize, Serialize};

use crate::codes::english_part;

/// One of the six fixed advisories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    Rain,
    Heat,
    Cold,
    PleasantCloudy,
    PleasantClear,
    Pleasant,
}

impl Advisory {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Rain => "☔ बारिश होने की संभावना है। कृपया छाता साथ रखें और सावधानी से बाहर जाएं। जय भोले नाथ! 🙏",
            Self::Heat => "☀️ बहुत गर्मी है। पर्याप्त पानी पिएं और धूप से बचें। ठंडे स्थान पर रहें। हर हर महादेव! 🙏",
            Self::Cold => "🧥 बहुत ठंड है। गर्म कपड़े पहनें और गर्म चीजें खाएं। अपना ध्यान रखें। ओम नमः शिवाय! 🙏",
            Self::PleasantCloudy => "☁️ बादल छाए हुए हैं। मौसम सुहावना है। बाहर जाने का अच्छा समय है। भोलेनाथ की कृपा आप पर बनी रहे! 🙏",
            Self::PleasantClear => "🌞 मौसम साफ और सुंदर है। बाहर का आनंद लें लेकिन धूप से बचें। जय शिव शंकर! 🙏",
            Self::Pleasant => "🌈 मौसम अच्छा है। अपना ध्यान रखें और खुश रहें। महादेव की कृपा सदा आप पर बनी रहे! 🙏",
        }
    }
}

/// Inputs an advisory rule can look at
#[derive(Debug, Clone, Copy)]
pub struct AdvisoryInput<'a> {
    pub temperature_celsius: f64,
    pub condition_label: &'a str,
    pub precipitation_probability: f64,
}

impl AdvisoryInput<'_> {
    fn condition_mentions(&self, words: &[&str]) -> bool {
        let english = english_part(self.condition_label).to_lowercase();
        words.iter().any(|w| english.contains(w))
    }
}

pub struct AdvisoryRule {
    pub applies: fn(&AdvisoryInput<'_>) -> bool,
    pub advisory: Advisory,
}

pub const RAIN_THRESHOLD_PERCENT: f64 = 60.0;
pub const HEAT_THRESHOLD_CELSIUS: f64 = 35.0;
pub const COLD_THRESHOLD_CELSIUS: f64 = 10.0;

/// Evaluated in order; the last rule always applies.
pub static ADVISORY_RULES: &[AdvisoryRule] = &[
    AdvisoryRule {
        applies: |i| i.precipitation_probability > RAIN_THRESHOLD_PERCENT,
        advisory: Advisory::Rain,
    },
    AdvisoryRule {
        applies: |i| i.temperature_celsius > HEAT_THRESHOLD_CELSIUS,
        advisory: Advisory::Heat,
    },
    AdvisoryRule {
        applies: |i| i.temperature_celsius < COLD_THRESHOLD_CELSIUS,
        advisory: Advisory::Cold,
    },
    AdvisoryRule {
        applies: |i| i.condition_mentions(&["cloud", "overcast"]),
        advisory: Advisory::PleasantCloudy,
    },
    AdvisoryRule {
        applies: |i| i.condition_mentions(&["clear", "sunny"]),
        advisory: Advisory::PleasantClear,
    },
    AdvisoryRule {
        applies: |_| true,
        advisory: Advisory::Pleasant,
    },
];

/// Pick the advisory for the given conditions. Pure: same inputs, same advisory.
pub fn select_advisory(
    temperature_celsius: f64,
    condition_label: &str,
    precipitation_probability: f64,
) -> Advisory {
    let input = AdvisoryInput {
        temperature_celsius,
        condition_label,
        precipitation_probability,
    };

    ADVISORY_RULES
        .iter()
        .find(|rule| (rule.applies)(&input))
        .map(|rule| rule.advisory)
        .unwrap_or(Advisory::Pleasant)
}
