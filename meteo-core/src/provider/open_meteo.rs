use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    Config,
    error::ForecastError,
    format::format_display_date,
    model::{CityName, DailyForecastRow, ForecastResult, GeoCoordinate},
};

use super::ForecastProvider;

const GEOCODING: &str = "Open-Meteo geocoding";
const FORECAST: &str = "Open-Meteo forecast";

const DAILY_FIELDS: &str = "weather_code,apparent_temperature_max";
const CURRENT_FIELDS: &str = "weather_code,apparent_temperature";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoding_url: String,
    forecast_url: String,
    language: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            language: config.language.clone(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ForecastError> {
        tracing::debug!(endpoint, url, ?query, "Sending request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| ForecastError::Network { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ForecastError::Network { endpoint, source })?;

        if !status.is_success() {
            return Err(ForecastError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ForecastError::Decode { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodeResponse {
    results: Option<Vec<OmPlace>>,
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    apparent_temperature: Option<f64>,
    weather_code: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    apparent_temperature_max: Vec<Option<f64>>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: Option<OmCurrent>,
    daily: Option<OmDaily>,
}

impl OmGeocodeResponse {
    fn first_coordinate(self) -> Option<GeoCoordinate> {
        let place = self.results?.into_iter().next()?;
        Some(GeoCoordinate {
            latitude: place.latitude?,
            longitude: place.longitude?,
        })
    }
}

impl TryFrom<OmForecastResponse> for ForecastResult {
    type Error = ForecastError;

    fn try_from(value: OmForecastResponse) -> Result<Self, Self::Error> {
        let (current_apparent_temperature, current_weather_code) = value
            .current
            .map(|c| (c.apparent_temperature, c.weather_code))
            .unwrap_or_default();

        let daily_rows = match value.daily {
            Some(daily) => daily.into_rows()?,
            None => Vec::new(),
        };

        Ok(ForecastResult {
            current_apparent_temperature,
            current_weather_code,
            daily_rows,
        })
    }
}

impl OmDaily {
    /// Zips the parallel arrays positionally, refusing to truncate.
    fn into_rows(self) -> Result<Vec<DailyForecastRow>, ForecastError> {
        let (time, temps, codes) = (
            self.time.len(),
            self.apparent_temperature_max.len(),
            self.weather_code.len(),
        );
        if time != temps || time != codes {
            return Err(ForecastError::MismatchedDaily { time, temps, codes });
        }

        self.time
            .iter()
            .zip(self.apparent_temperature_max)
            .zip(self.weather_code)
            .map(|((date, temp_max), weather_code)| -> Result<_, ForecastError> {
                Ok(DailyForecastRow {
                    date: format_display_date(date)?,
                    temp_max: temp_max.filter(|t| t.is_finite()),
                    weather_code,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn geocode(&self, city: &CityName) -> Result<Option<GeoCoordinate>, ForecastError> {
        let parsed: OmGeocodeResponse = self
            .get_json(
                GEOCODING,
                &self.geocoding_url,
                &[
                    ("name", city.as_str()),
                    ("count", "1"),
                    ("language", self.language.as_str()),
                    ("format", "json"),
                ],
            )
            .await?;

        Ok(parsed.first_coordinate())
    }

    async fn fetch_forecast(&self, coord: GeoCoordinate) -> Result<ForecastResult, ForecastError> {
        let latitude = coord.latitude.to_string();
        let longitude = coord.longitude.to_string();

        let parsed: OmForecastResponse = self
            .get_json(
                FORECAST,
                &self.forecast_url,
                &[
                    ("latitude", latitude.as_str()),
                    ("longitude", longitude.as_str()),
                    ("daily", DAILY_FIELDS),
                    ("current", CURRENT_FIELDS),
                ],
            )
            .await?;

        ForecastResult::try_from(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: serde_json::Value) -> Result<ForecastResult, ForecastError> {
        let parsed: OmForecastResponse = serde_json::from_value(json).unwrap();
        ForecastResult::try_from(parsed)
    }

    #[test]
    fn zips_daily_arrays_in_order() {
        let result = decode(serde_json::json!({
            "current": { "apparent_temperature": 3.2, "weather_code": 2 },
            "daily": {
                "time": ["2024-01-01", "2024-01-02"],
                "apparent_temperature_max": [5.4, 6.1],
                "weather_code": [0, 61]
            }
        }))
        .unwrap();

        assert_eq!(result.current_apparent_temperature, Some(3.2));
        assert_eq!(result.current_weather_code, Some(2));
        assert_eq!(
            result.daily_rows,
            vec![
                DailyForecastRow {
                    date: "01/01".into(),
                    temp_max: Some(5.4),
                    weather_code: Some(0),
                },
                DailyForecastRow {
                    date: "02/01".into(),
                    temp_max: Some(6.1),
                    weather_code: Some(61),
                },
            ]
        );
    }

    #[test]
    fn nulls_stay_absent() {
        let result = decode(serde_json::json!({
            "current": { "apparent_temperature": null },
            "daily": {
                "time": ["2024-01-01"],
                "apparent_temperature_max": [null],
                "weather_code": [null]
            }
        }))
        .unwrap();

        assert_eq!(result.current_apparent_temperature, None);
        assert_eq!(result.daily_rows[0].temp_max, None);
        assert_eq!(result.daily_rows[0].weather_code, None);
    }

    #[test]
    fn missing_sections_give_empty_result() {
        let result = decode(serde_json::json!({})).unwrap();
        assert_eq!(result, ForecastResult::default());
    }

    #[test]
    fn mismatched_lengths_fail() {
        let err = decode(serde_json::json!({
            "daily": {
                "time": ["2024-01-01", "2024-01-02"],
                "apparent_temperature_max": [5.4],
                "weather_code": [0, 61]
            }
        }))
        .unwrap_err();

        assert!(matches!(
            err,
            ForecastError::MismatchedDaily {
                time: 2,
                temps: 1,
                codes: 2
            }
        ));
    }

    #[test]
    fn malformed_date_fails() {
        let err = decode(serde_json::json!({
            "daily": {
                "time": ["01/01/2024"],
                "apparent_temperature_max": [5.4],
                "weather_code": [0]
            }
        }))
        .unwrap_err();

        assert!(matches!(err, ForecastError::Date(_)));
    }

    #[test]
    fn geocode_takes_first_result() {
        let parsed: OmGeocodeResponse = serde_json::from_value(serde_json::json!({
            "results": [
                { "latitude": 45.75, "longitude": 4.85 },
                { "latitude": 1.0, "longitude": 2.0 }
            ]
        }))
        .unwrap();

        assert_eq!(
            parsed.first_coordinate(),
            Some(GeoCoordinate {
                latitude: 45.75,
                longitude: 4.85
            })
        );
    }

    #[test]
    fn geocode_without_results_is_absent() {
        for json in [
            serde_json::json!({}),
            serde_json::json!({ "results": [] }),
            serde_json::json!({ "results": [{ "latitude": 1.0 }] }),
        ] {
            let parsed: OmGeocodeResponse = serde_json::from_value(json).unwrap();
            assert_eq!(parsed.first_coordinate(), None);
        }
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
