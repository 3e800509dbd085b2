use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Text;
use meteo_core::{
    CityLookupSession, CityName, Config, FavoritesStore, ForecastService, JsonFileStore,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "City weather lookup with favorites")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current temperature and daily forecast for a city.
    Show {
        /// City name, e.g. "Lyon".
        city: String,
    },

    /// List favorite cities.
    Favorites,

    /// Add a city to favorites, or remove it if already there.
    Toggle {
        city: String,
    },

    /// Interactively set the geocoding language and API endpoints.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Show { city } => show(&config, &city).await?,
            Command::Favorites => {
                let favorites = favorites_store(&config)?;
                print!("{}", render::favorites_list(&favorites.load()));
            }
            Command::Toggle { city } => {
                let city = parse_city(&city)?;
                let now_favorite = favorites_store(&config)?
                    .toggle(&city)
                    .context("Failed to save favorites")?;

                if now_favorite {
                    println!("Added {city} to favorites.");
                } else {
                    println!("Removed {city} from favorites.");
                }
            }
            Command::Configure => configure(config)?,
        }

        Ok(())
    }
}

fn parse_city(raw: &str) -> anyhow::Result<CityName> {
    CityName::new(raw).context("Please enter a city name")
}

fn favorites_store(config: &Config) -> anyhow::Result<FavoritesStore<JsonFileStore>> {
    let path = config.storage_file_path()?;
    tracing::debug!(path = %path.display(), "Using favorites store");
    Ok(FavoritesStore::new(JsonFileStore::new(path)))
}

async fn show(config: &Config, raw: &str) -> anyhow::Result<()> {
    let city = parse_city(raw)?;
    let service = ForecastService::from_config(config);
    let favorites = favorites_store(config)?;

    let mut session = CityLookupSession::new();
    let state = session.load(&service, city.as_str()).await;

    print!("{}", render::city_view(&city, favorites.is_favorite(&city), state));
    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let language = Text::new("Geocoding language:")
        .with_default(&config.language)
        .prompt()
        .context("Failed to read language")?;

    let geocoding_url = Text::new("Geocoding endpoint:")
        .with_default(&config.geocoding_url)
        .prompt()
        .context("Failed to read geocoding endpoint")?;

    let forecast_url = Text::new("Forecast endpoint:")
        .with_default(&config.forecast_url)
        .prompt()
        .context("Failed to read forecast endpoint")?;

    config.language = language;
    config.geocoding_url = geocoding_url;
    config.forecast_url = forecast_url;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
