//! Core library for the `citycast` weather front-end.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider (current weather, city geocoding)
//! - Shared domain models and their rendering
//! - The controller that wires input events to lookups and a display surface
//!
//! It is used by `citycast-cli`, but can also back other front-ends through
//! the [`WeatherView`] trait.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod view;

pub use config::Config;
pub use controller::{ResponseOrder, WeatherUiController};
pub use error::{LookupError, SuggestionError};
pub use model::{CitySuggestion, UnitPreference, WeatherSnapshot};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use render::{RenderedWeather, render_weather};
pub use view::{MemoryView, ResultRegion, WeatherView};
