use std::fmt::Write;

use meteo_core::{CityName, LookupState, symbol_for_code};

const PLACEHOLDER: &str = "--";

fn temperature(value: Option<f64>) -> String {
    match value {
        Some(t) => format!("{}°C", t.round() as i64),
        None => format!("{PLACEHOLDER}°C"),
    }
}

/// City view: header with favorite star, current apparent temperature, daily table.
pub fn city_view(city: &CityName, favorite: bool, state: &LookupState) -> String {
    let star = if favorite { "⭐" } else { "☆" };
    let mut out = format!("{city} {star}\n\n");

    let forecast = state.forecast();
    let current = forecast.and_then(|f| f.current_apparent_temperature);
    let _ = writeln!(out, "{}", temperature(current));

    match state {
        LookupState::Loaded { forecast, .. } if !forecast.daily_rows.is_empty() => {
            let _ = writeln!(out, "\n{:<8}{:>12}  {}", "Date", "Temperature", "Weather");
            for row in &forecast.daily_rows {
                let symbol = row.weather_code.map(symbol_for_code).unwrap_or(PLACEHOLDER);
                let _ = writeln!(
                    out,
                    "{:<8}{:>12}  {}",
                    row.date,
                    temperature(row.temp_max),
                    symbol
                );
            }
        }
        LookupState::Loaded { .. } | LookupState::Empty { .. } => {
            out.push_str("\nNo forecast available.\n");
        }
        LookupState::Idle | LookupState::Loading { .. } => {}
    }

    out
}

pub fn favorites_list(favorites: &[String]) -> String {
    if favorites.is_empty() {
        return "No favorites yet.\n".to_string();
    }

    favorites.iter().fold(String::new(), |mut out, city| {
        let _ = writeln!(out, "- {city}");
        out
    })
}
