//! Presentation of a [`WeatherSnapshot`] under a [`UnitPreference`].

use crate::model::{UnitPreference, WeatherSnapshot};

/// Display strings for the weather result region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedWeather {
    pub location: String,
    /// Temperature with one decimal and the unit symbol, e.g. "15.0°C".
    pub temperature: String,
    pub condition: String,
}

/// Pure: the output depends only on `snapshot` and `unit`.
pub fn render_weather(snapshot: &WeatherSnapshot, unit: UnitPreference) -> RenderedWeather {
    let value = unit.convert(snapshot.temperature_c);

    RenderedWeather {
        location: snapshot.location_name.clone(),
        temperature: format!("{}{}", one_decimal(value), unit.symbol()),
        condition: snapshot.condition.clone(),
    }
}

/// One decimal place, with exact ties rounded away from zero.
///
/// `{:.1}` alone sends ties to the even digit. A tie at one decimal is only
/// representable when `value * 4` is an odd integer (a fraction of .25 or .75).
fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    let is_tie = quarters.fract() == 0.0 && quarters % 2.0 != 0.0;

    if is_tie {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{value:.1}")
    }
}
