//! City lookup state for a single screen.
//!
//! A lookup is split into [`CityLookupSession::begin`] and
//! [`CityLookupSession::complete`] so shells that run lookups concurrently can
//! hold the ticket across the await. Only the newest ticket may complete;
//! older outcomes are dropped, so a slow response for a previous city cannot
//! overwrite the current one.

use crate::{
    model::{CityName, ForecastResult},
    provider::ForecastService,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Loading {
        city: CityName,
    },
    Loaded {
        city: CityName,
        forecast: ForecastResult,
    },
    /// The lookup came back with nothing: no location, or a failed request.
    Empty {
        city: CityName,
    },
}

impl LookupState {
    pub fn city(&self) -> Option<&CityName> {
        match self {
            Self::Idle => None,
            Self::Loading { city } | Self::Loaded { city, .. } | Self::Empty { city } => Some(city),
        }
    }

    pub fn forecast(&self) -> Option<&ForecastResult> {
        match self {
            Self::Loaded { forecast, .. } => Some(forecast),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Proof that a lookup was started; hand it back to `complete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    city: CityName,
}

impl LookupTicket {
    pub fn city(&self) -> &CityName {
        &self.city
    }
}

#[derive(Debug, Default)]
pub struct CityLookupSession {
    state: LookupState,
    generation: u64,
}

impl CityLookupSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn active_city(&self) -> Option<&CityName> {
        self.state.city()
    }

    /// Switches to `Loading` when `raw` names a different, non-blank city.
    pub fn begin(&mut self, raw: &str) -> Option<LookupTicket> {
        let city = CityName::new(raw).ok()?;
        if self.active_city() == Some(&city) {
            return None;
        }

        self.generation += 1;
        tracing::debug!(city = %city, generation = self.generation, "Starting lookup");
        self.state = LookupState::Loading { city: city.clone() };

        Some(LookupTicket {
            generation: self.generation,
            city,
        })
    }

    /// Applies the outcome unless a newer lookup has started since.
    /// Returns whether it was applied.
    pub fn complete(&mut self, ticket: LookupTicket, outcome: Option<ForecastResult>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                city = %ticket.city,
                stale = ticket.generation,
                current = self.generation,
                "Discarding stale lookup result"
            );
            return false;
        }

        self.state = match outcome {
            Some(forecast) => LookupState::Loaded {
                city: ticket.city,
                forecast,
            },
            None => LookupState::Empty { city: ticket.city },
        };
        true
    }

    /// Sequential begin + lookup + complete.
    pub async fn load(&mut self, service: &ForecastService, raw: &str) -> &LookupState {
        if let Some(ticket) = self.begin(raw) {
            let outcome = service.lookup(ticket.city()).await;
            self.complete(ticket, outcome);
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ForecastError,
        model::GeoCoordinate,
        provider::ForecastProvider,
    };
    use async_trait::async_trait;

    fn forecast(temp: f64) -> ForecastResult {
        ForecastResult {
            current_apparent_temperature: Some(temp),
            ..ForecastResult::default()
        }
    }

    #[test]
    fn starts_idle() {
        let session = CityLookupSession::new();
        assert_eq!(session.state(), &LookupState::Idle);
        assert_eq!(session.active_city(), None);
    }

    #[test]
    fn blank_input_does_not_start_lookup() {
        let mut session = CityLookupSession::new();
        assert!(session.begin("   ").is_none());
        assert_eq!(session.state(), &LookupState::Idle);
    }

    #[test]
    fn begin_then_complete_loads() {
        let mut session = CityLookupSession::new();
        let ticket = session.begin(" Lyon ").unwrap();
        assert!(session.state().is_loading());
        assert_eq!(ticket.city().as_str(), "Lyon");

        assert!(session.complete(ticket, Some(forecast(4.0))));
        assert_eq!(session.state().forecast(), Some(&forecast(4.0)));
        assert_eq!(session.active_city().map(CityName::as_str), Some("Lyon"));
    }

    #[test]
    fn absent_outcome_is_empty() {
        let mut session = CityLookupSession::new();
        let ticket = session.begin("Nowhere").unwrap();
        session.complete(ticket, None);

        assert!(matches!(session.state(), LookupState::Empty { city } if city.as_str() == "Nowhere"));
        assert_eq!(session.state().forecast(), None);
    }

    #[test]
    fn same_city_does_not_restart() {
        let mut session = CityLookupSession::new();
        let ticket = session.begin("Lyon").unwrap();
        session.complete(ticket, Some(forecast(1.0)));

        assert!(session.begin("Lyon").is_none());
        assert!(session.begin("  Lyon").is_none());
        assert!(session.begin("lyon").is_some());
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut session = CityLookupSession::new();
        let first = session.begin("Paris").unwrap();
        let second = session.begin("Lyon").unwrap();

        assert!(session.complete(second, Some(forecast(9.0))));
        assert!(!session.complete(first, Some(forecast(1.0))));

        match session.state() {
            LookupState::Loaded { city, forecast: f } => {
                assert_eq!(city.as_str(), "Lyon");
                assert_eq!(f, &forecast(9.0));
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn stale_result_does_not_end_newer_loading() {
        let mut session = CityLookupSession::new();
        let first = session.begin("Paris").unwrap();
        let _second = session.begin("Lyon").unwrap();

        assert!(!session.complete(first, None));
        assert!(session.state().is_loading());
        assert_eq!(session.active_city().map(CityName::as_str), Some("Lyon"));
    }

    #[derive(Debug)]
    struct FixedProvider(Option<GeoCoordinate>);

    #[async_trait]
    impl ForecastProvider for FixedProvider {
        async fn geocode(&self, _city: &CityName) -> Result<Option<GeoCoordinate>, ForecastError> {
            Ok(self.0)
        }

        async fn fetch_forecast(
            &self,
            _coord: GeoCoordinate,
        ) -> Result<ForecastResult, ForecastError> {
            Ok(forecast(7.0))
        }
    }

    #[tokio::test]
    async fn load_runs_lookup_through_service() {
        let service = ForecastService::new(Box::new(FixedProvider(Some(GeoCoordinate {
            latitude: 45.75,
            longitude: 4.85,
        }))));
        let mut session = CityLookupSession::new();

        let state = session.load(&service, "Lyon").await;
        assert_eq!(state.forecast(), Some(&forecast(7.0)));
    }

    #[tokio::test]
    async fn load_of_unknown_city_is_empty() {
        let service = ForecastService::new(Box::new(FixedProvider(None)));
        let mut session = CityLookupSession::new();

        let state = session.load(&service, "Nonexistentplacexyz").await;
        assert!(matches!(state, LookupState::Empty { .. }));
    }
}
