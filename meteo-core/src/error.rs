use std::path::PathBuf;

use reqwest::StatusCode;

/// Failures while resolving a city or fetching its forecast.
///
/// A city that geocodes to nothing is not an error: it surfaces as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Request to {endpoint} failed: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse {endpoint} JSON: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Daily forecast arrays differ in length \
         (time={time}, apparent_temperature_max={temps}, weather_code={codes})"
    )]
    MismatchedDaily {
        time: usize,
        temps: usize,
        codes: usize,
    },

    #[error(transparent)]
    Date(#[from] DateFormatError),
}

/// A date string that is not `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed date '{input}': expected YYYY-MM-DD")]
pub struct DateFormatError {
    pub input: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("City name must not be empty")]
pub struct EmptyCityName;

/// Key-value persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to access storage file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file {} is not a JSON object of strings: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}
