use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last successfully fetched weather payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub temperature_c: f64,
    pub condition: String,
    /// Observation time reported by the provider, if any.
    pub observed_at: Option<DateTime<Utc>>,
}

/// Temperature unit selected by the unit toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    Celsius,
    Fahrenheit,
}

impl UnitPreference {
    /// The toggle's checked state selects Celsius; unchecked selects Fahrenheit.
    pub fn from_toggle(checked: bool) -> Self {
        if checked { Self::Celsius } else { Self::Fahrenheit }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    /// Convert a Celsius reading into this unit.
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }
}

/// One autocomplete candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    pub country: String,
}

impl CitySuggestion {
    /// Display value, e.g. "Paris, FR".
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}
