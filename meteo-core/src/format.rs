//! Pure display helpers: WMO weather codes and forecast dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DateFormatError;

/// Symbol shown for codes outside the classification table.
pub const DEFAULT_SYMBOL: &str = "🌤️";

/// Weather condition categories for Open-Meteo WMO codes.
/// See: https://open-meteo.com/en/docs#weathervariables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCategory {
    Clear,
    #[default]
    PartlyCloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    RainShowers,
    Thunderstorm,
}

impl WeatherCategory {
    /// Total: unknown codes fall back to the default category.
    pub fn from_code(code: i32) -> Self {
        Self::classify(code).unwrap_or_default()
    }

    fn classify(code: i32) -> Option<Self> {
        let category = match code {
            0 => Self::Clear,
            1..=3 => Self::PartlyCloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 | 56 | 57 => Self::Drizzle,
            61 | 63 | 65 | 66 | 67 => Self::Rain,
            71 | 73 | 75 | 77 => Self::Snow,
            80..=82 => Self::RainShowers,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => return None,
        };
        Some(category)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::PartlyCloudy => "⛅️",
            Self::Fog => "🌫️",
            Self::Drizzle => "🌦️",
            Self::Rain | Self::RainShowers => "🌧️",
            Self::Snow => "❄️",
            Self::Thunderstorm => "⛈️",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::RainShowers => "Rain showers",
            Self::Thunderstorm => "Thunderstorm",
        }
    }
}

/// Symbol for a raw code, with a distinct fallback for unrecognized codes.
pub fn symbol_for_code(code: i32) -> &'static str {
    WeatherCategory::classify(code)
        .map(|c| c.symbol())
        .unwrap_or(DEFAULT_SYMBOL)
}

/// `YYYY-MM-DD` -> `DD/MM`, reusing the input segments verbatim.
pub fn format_display_date(iso: &str) -> Result<String, DateFormatError> {
    let malformed = || DateFormatError {
        input: iso.to_string(),
    };

    let segments: Vec<&str> = iso.split('-').collect();
    let [year, month, day] = segments.as_slice() else {
        return Err(malformed());
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if ![year, month, day].into_iter().all(|s| all_digits(s)) {
        return Err(malformed());
    }

    NaiveDate::parse_from_str(iso, "%Y-%m-%d").map_err(|_| malformed())?;

    Ok(format!("{day}/{month}"))
}
