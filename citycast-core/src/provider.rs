use crate::{
    Config,
    error::{LookupError, SuggestionError},
    model::{CitySuggestion, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Maximum number of city suggestions requested and kept.
pub const SUGGESTION_LIMIT: usize = 5;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a free-text city, optionally "City, CountryCode".
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, LookupError>;

    /// Up to `limit` cities whose name matches `query`.
    async fn city_suggestions(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<CitySuggestion>, SuggestionError>;
}

/// Construct the OpenWeather provider from config.
///
/// `env_api_key` is the value of [`crate::config::API_KEY_ENV`], if set.
pub fn provider_from_config(
    config: &Config,
    env_api_key: Option<String>,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key(env_api_key)?;
    let provider = OpenWeatherProvider::with_base_url(api_key, config.base_url());

    Ok(Box::new(provider))
}
