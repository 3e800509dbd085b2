//! Core library for the `meteo` app.
//!
//! This crate defines:
//! - City geocoding and forecast retrieval (Open-Meteo)
//! - The favorites list and its key-value persistence
//! - Display helpers for weather codes and dates
//! - The lookup state a screen renders from
//!
//! It is used by `meteo-cli`, but any other shell can drive the same operations.

pub mod config;
pub mod error;
pub mod favorites;
pub mod format;
pub mod model;
pub mod provider;
pub mod session;
pub mod storage;

pub use config::Config;
pub use error::{DateFormatError, EmptyCityName, ForecastError, StorageError};
pub use favorites::{FAVORITES_KEY, FavoritesStore};
pub use format::{WeatherCategory, format_display_date, symbol_for_code};
pub use model::{CityName, DailyForecastRow, ForecastResult, GeoCoordinate};
pub use provider::{ForecastProvider, ForecastService};
pub use session::{CityLookupSession, LookupState, LookupTicket};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
