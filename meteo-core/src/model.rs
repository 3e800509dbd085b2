use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::EmptyCityName, format::WeatherCategory};

/// User-facing city identifier: trimmed and never empty.
///
/// No case or diacritics folding is done, so "Paris" and "paris" are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CityName(String);

impl CityName {
    pub fn new(raw: &str) -> Result<Self, EmptyCityName> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmptyCityName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for CityName {
    type Error = EmptyCityName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for CityName {
    type Error = EmptyCityName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CityName> for String {
    fn from(value: CityName) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// One forecast day. Null upstream values stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastRow {
    /// Display date, `DD/MM`.
    pub date: String,
    pub temp_max: Option<f64>,
    pub weather_code: Option<i32>,
}

impl DailyForecastRow {
    pub fn category(&self) -> WeatherCategory {
        self.weather_code
            .map(WeatherCategory::from_code)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastResult {
    pub current_apparent_temperature: Option<f64>,
    pub current_weather_code: Option<i32>,
    /// Chronological, in upstream order.
    pub daily_rows: Vec<DailyForecastRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_name_is_trimmed() {
        let city = CityName::new("  Lyon \n").expect("non-empty");
        assert_eq!(city.as_str(), "Lyon");
    }

    #[test]
    fn city_name_rejects_blank_input() {
        assert_eq!(CityName::new("   "), Err(EmptyCityName));
        assert_eq!(CityName::try_from(""), Err(EmptyCityName));
    }

    #[test]
    fn city_name_keeps_case() {
        let upper = CityName::new("Paris").unwrap();
        let lower = CityName::new("paris").unwrap();
        assert_ne!(upper, lower);
    }

    #[test]
    fn city_name_deserialization_validates() {
        let city: CityName = serde_json::from_str("\" Nice \"").unwrap();
        assert_eq!(city.as_str(), "Nice");
        assert!(serde_json::from_str::<CityName>("\"  \"").is_err());
    }

    #[test]
    fn row_without_code_uses_default_category() {
        let row = DailyForecastRow {
            date: "01/01".into(),
            temp_max: None,
            weather_code: None,
        };
        assert_eq!(row.category(), WeatherCategory::default());
    }
}
