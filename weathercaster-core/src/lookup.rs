//! Static Sager Forecast Table
//!
//! ## Format
//!
//! The table ships as `data/sager_table.txt`, compiled into the binary and
//! parsed once on first use. Each line maps a four character key to a
//! forecast code:
//!
//! ```text
//! N331 aU6
//! │││└ cloud level 1-5          a  forecast letter (a..y)
//! ││└─ pressure trend 1-5       U  wind velocity letter
//! │└── pressure level 1-8       6  wind direction digit 1-8
//! └─── wind letter A-X, Z calm
//! ```
//!
//! Forecast letters whose meaning involves showers carry a `1` suffix
//! (`g1F2`). The suffix becomes `2` (flurries) after temperature
//! refinement.
//!
//! ## Forecast letters
//!
//! ```text
//! a  Fair                        m  Rain
//! b  Fair and warmer             n  Rain and warmer
//! c  Fair and cooler             p  Rain, cooler, improving in 24 h
//! d  Unsettled                   r  Rain or showers, improving in 12 h
//! e  Unsettled and warmer        s  ... improving in 12 h, cooler
//! f  Unsettled and cooler        t  ... improving within 6 h
//! g  Increasing cloud, then rain u  ... improving within 6 h, cooler
//! h  ... and warmer              w  ... fair within 6 h, cooler
//! j  Showers                     x  Unsettled followed by fair
//! k  Showers and warmer          y  Unsettled, fair within 6 h, cooler
//! l  Showers and cooler
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const TABLE_SOURCE: &str = include_str!("../data/sager_table.txt");

/// Forecast letters in table order
pub const FORECAST_LETTERS: &str = "abcdefghjklmnprstuwxy";

/// Letters whose forecast involves showers
pub const SHOWER_LETTERS: &str = "ghjklrstuw";

/// Expected temperature change implied by a forecast letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tendency {
    Warmer,
    Steady,
    Cooler,
}

struct ForecastInfo {
    letter: char,
    text: &'static str,
    tendency: Tendency,
}

const FORECASTS: [ForecastInfo; 21] = [
    ForecastInfo { letter: 'a', text: "Fair", tendency: Tendency::Steady },
    ForecastInfo { letter: 'b', text: "Fair and warmer", tendency: Tendency::Warmer },
    ForecastInfo { letter: 'c', text: "Fair and cooler", tendency: Tendency::Cooler },
    ForecastInfo { letter: 'd', text: "Unsettled", tendency: Tendency::Steady },
    ForecastInfo { letter: 'e', text: "Unsettled and warmer", tendency: Tendency::Warmer },
    ForecastInfo { letter: 'f', text: "Unsettled and cooler", tendency: Tendency::Cooler },
    ForecastInfo {
        letter: 'g',
        text: "Increasing cloudiness or overcast followed by rain or showers",
        tendency: Tendency::Steady,
    },
    ForecastInfo {
        letter: 'h',
        text: "Increasing cloudiness or overcast followed by rain or showers and warmer",
        tendency: Tendency::Warmer,
    },
    ForecastInfo { letter: 'j', text: "Showers", tendency: Tendency::Steady },
    ForecastInfo { letter: 'k', text: "Showers and warmer", tendency: Tendency::Warmer },
    ForecastInfo { letter: 'l', text: "Showers and cooler", tendency: Tendency::Cooler },
    ForecastInfo { letter: 'm', text: "Rain", tendency: Tendency::Steady },
    ForecastInfo { letter: 'n', text: "Rain and warmer", tendency: Tendency::Warmer },
    ForecastInfo {
        letter: 'p',
        text: "Rain and turning cooler; improvement likely within 24 hours",
        tendency: Tendency::Cooler,
    },
    ForecastInfo {
        letter: 'r',
        text: "Rain or showers followed by improvement within 12 hours",
        tendency: Tendency::Steady,
    },
    ForecastInfo {
        letter: 's',
        text: "Rain or showers followed by improvement within 12 hours and turning cooler",
        tendency: Tendency::Cooler,
    },
    ForecastInfo {
        letter: 't',
        text: "Rain or showers followed by improvement within 6 hours",
        tendency: Tendency::Steady,
    },
    ForecastInfo {
        letter: 'u',
        text: "Rain or showers followed by improvement within 6 hours and turning cooler",
        tendency: Tendency::Cooler,
    },
    ForecastInfo {
        letter: 'w',
        text: "Rain or showers followed by fair within 6 hours and turning cooler",
        tendency: Tendency::Cooler,
    },
    ForecastInfo { letter: 'x', text: "Unsettled followed by fair", tendency: Tendency::Steady },
    ForecastInfo {
        letter: 'y',
        text: "Unsettled followed by fair within 6 hours and turning cooler",
        tendency: Tendency::Cooler,
    },
];

fn forecast_info(letter: char) -> Option<&'static ForecastInfo> {
    FORECASTS.iter().find(|f| f.letter == letter)
}

/// English description of a forecast letter
pub fn forecast_text(letter: char) -> Option<&'static str> {
    forecast_info(letter).map(|f| f.text)
}

/// Temperature tendency of a forecast letter, steady if unknown
pub fn tendency(letter: char) -> Tendency {
    forecast_info(letter).map(|f| f.tendency).unwrap_or(Tendency::Steady)
}

pub fn is_shower_letter(letter: char) -> bool {
    SHOWER_LETTERS.contains(letter)
}

/// Forecast wind strength category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Velocity {
    ProbablyIncreasing,
    ModerateToFresh,
    Strong,
    Gale,
    WholeGale,
    Hurricane,
    Diminishing,
    NoSignificantChange,
}

impl Velocity {
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'N' => Velocity::ProbablyIncreasing,
            'F' => Velocity::ModerateToFresh,
            'S' => Velocity::Strong,
            'G' => Velocity::Gale,
            'W' => Velocity::WholeGale,
            'H' => Velocity::Hurricane,
            'D' => Velocity::Diminishing,
            'U' => Velocity::NoSignificantChange,
            _ => return None,
        })
    }

    pub fn letter(self) -> char {
        match self {
            Velocity::ProbablyIncreasing => 'N',
            Velocity::ModerateToFresh => 'F',
            Velocity::Strong => 'S',
            Velocity::Gale => 'G',
            Velocity::WholeGale => 'W',
            Velocity::Hurricane => 'H',
            Velocity::Diminishing => 'D',
            Velocity::NoSignificantChange => 'U',
        }
    }

    /// Stable identifier for presentation layers
    pub fn key(self) -> &'static str {
        match self {
            Velocity::ProbablyIncreasing => "probably_increasing",
            Velocity::ModerateToFresh => "moderate_to_fresh",
            Velocity::Strong => "strong",
            Velocity::Gale => "gale",
            Velocity::WholeGale => "whole_gale",
            Velocity::Hurricane => "hurricane",
            Velocity::Diminishing => "diminishing",
            Velocity::NoSignificantChange => "no_significant_change",
        }
    }

    /// Absolute speed target (km/h) for Beaufort-style categories
    pub fn target_kmh(self) -> Option<f64> {
        match self {
            Velocity::ModerateToFresh => Some(30.0),
            Velocity::Strong => Some(51.0),
            Velocity::Gale => Some(75.0),
            Velocity::WholeGale => Some(100.0),
            Velocity::Hurricane => Some(125.0),
            _ => None,
        }
    }

    /// Relative change over 24 h for categories without an absolute target
    pub fn relative_change(self) -> f64 {
        match self {
            Velocity::ProbablyIncreasing => 0.5,
            Velocity::Diminishing => -0.5,
            _ => 0.0,
        }
    }

    pub fn is_gale_or_worse(self) -> bool {
        matches!(self, Velocity::Gale | Velocity::WholeGale | Velocity::Hurricane)
    }
}

/// Parsed forecast code of a table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SagerCode {
    pub forecast: char,
    pub shower: bool,
    pub velocity: Velocity,
    /// Wind direction digit 1..=8
    pub direction: u8,
}

impl SagerCode {
    /// Parse `aU6` / `g1F2`
    pub fn parse(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let forecast = chars.next().filter(|c| FORECAST_LETTERS.contains(*c))?;
        let mut next = chars.next()?;
        let shower = next == '1';
        if shower {
            next = chars.next()?;
        }
        let velocity = Velocity::from_letter(next)?;
        let direction = chars.next()?.to_digit(10).filter(|d| (1..=8).contains(d))? as u8;
        if chars.next().is_some() {
            return None;
        }
        Some(Self { forecast, shower, velocity, direction })
    }

    /// Forecast letter plus shower suffix, e.g. `g1`
    pub fn forecast_code(&self) -> String {
        if self.shower {
            format!("{}1", self.forecast)
        } else {
            self.forecast.to_string()
        }
    }

    /// Full table notation, e.g. `g1F2`
    pub fn table_code(&self) -> String {
        format!("{}{}{}", self.forecast_code(), self.velocity.letter(), self.direction)
    }
}

fn parse_table(source: &'static str) -> HashMap<&'static str, SagerCode> {
    let mut table = HashMap::with_capacity(5000);
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next().and_then(SagerCode::parse)) {
            (Some(key), Some(code)) if key.len() == 4 => {
                table.insert(key, code);
            }
            _ => log::warn!("Skipping malformed forecast table line: {}", line),
        }
    }
    table
}

lazy_static::lazy_static! {
    /// Sager forecast table keyed by the four character observation key
    pub static ref SAGER_TABLE: HashMap<&'static str, SagerCode> = parse_table(TABLE_SOURCE);
}

/// Look up a key in the forecast table
pub fn lookup(key: &str) -> Option<&'static SagerCode> {
    SAGER_TABLE.get(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_complete() {
        // 24 wind letters × 200 combinations, calm misses 10 deep-low falling keys
        assert_eq!(SAGER_TABLE.len(), 4990);
        assert!(lookup("Z845").is_none());
        assert!(lookup("Y111").is_none());
    }

    #[test]
    fn known_entries() {
        let code = lookup("N331").unwrap();
        assert_eq!(code.forecast, 'a');
        assert_eq!(code.velocity, Velocity::NoSignificantChange);
        assert_eq!(code.direction, 6);
        assert_eq!(code.table_code(), "aU6");
    }

    #[test]
    fn shower_codes_round_trip() {
        let code = SagerCode::parse("g1F2").unwrap();
        assert!(code.shower);
        assert_eq!(code.forecast_code(), "g1");
        assert_eq!(code.table_code(), "g1F2");
    }

    #[test]
    fn malformed_codes_are_rejected() {
        assert!(SagerCode::parse("").is_none());
        assert!(SagerCode::parse("zU1").is_none());
        assert!(SagerCode::parse("aQ1").is_none());
        assert!(SagerCode::parse("aU9").is_none());
        assert!(SagerCode::parse("aU12").is_none());
    }

    #[test]
    fn every_shower_entry_uses_a_shower_letter() {
        for code in SAGER_TABLE.values() {
            assert_eq!(code.shower, is_shower_letter(code.forecast), "{:?}", code);
        }
    }

    #[test]
    fn every_forecast_letter_is_reachable() {
        for letter in FORECAST_LETTERS.chars() {
            assert!(
                SAGER_TABLE.values().any(|code| code.forecast == letter),
                "no key forecasts {letter}"
            );
        }
        // cooler variants behind a veering polar wind
        assert_eq!(lookup("C351").map(|c| c.table_code()).as_deref(), Some("l1N8"));
        assert_eq!(lookup("C314").map(|c| c.table_code()).as_deref(), Some("yU8"));
    }

    #[test]
    fn letter_metadata() {
        assert_eq!(forecast_text('a'), Some("Fair"));
        assert_eq!(tendency('b'), Tendency::Warmer);
        assert_eq!(tendency('w'), Tendency::Cooler);
        assert_eq!(forecast_text('q'), None);
    }
}
