//! Wires user input to the weather provider and renders into a [`WeatherView`].

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{
    model::{CitySuggestion, UnitPreference, WeatherSnapshot},
    provider::{SUGGESTION_LIMIT, WeatherProvider},
    render::render_weather,
    view::WeatherView,
};

/// Minimum query length before suggestions are requested.
pub const MIN_SUGGESTION_QUERY: usize = 2;

/// Which of several overlapping responses ends up displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseOrder {
    /// The response that arrives last wins, even for an older request.
    #[default]
    Arrival,
    /// Responses older than the last applied one are dropped.
    Issue,
}

/// Request tickets for one endpoint.
#[derive(Debug, Default)]
struct Sequence {
    issued: u64,
    applied: u64,
}

impl Sequence {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether a response for `ticket` may be applied; records it if so.
    fn accept(&mut self, ticket: u64, order: ResponseOrder) -> bool {
        if order == ResponseOrder::Issue && ticket < self.applied {
            return false;
        }
        self.applied = ticket;
        true
    }
}

#[derive(Debug, Default)]
struct State {
    snapshot: Option<WeatherSnapshot>,
    suggestions: Vec<CitySuggestion>,
    weather_seq: Sequence,
    suggestion_seq: Sequence,
}

pub struct WeatherUiController<V> {
    provider: Box<dyn WeatherProvider>,
    view: V,
    order: ResponseOrder,
    state: Mutex<State>,
}

impl<V: WeatherView> WeatherUiController<V> {
    pub fn new(provider: Box<dyn WeatherProvider>, view: V) -> Self {
        Self::with_order(provider, view, ResponseOrder::default())
    }

    pub fn with_order(provider: Box<dyn WeatherProvider>, view: V, order: ResponseOrder) -> Self {
        Self { provider, view, order, state: Mutex::new(State::default()) }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn snapshot(&self) -> Option<WeatherSnapshot> {
        self.state.lock().snapshot.clone()
    }

    pub fn suggestions(&self) -> Vec<CitySuggestion> {
        self.state.lock().suggestions.clone()
    }

    /// Look up `city_query` and display the result or a single error message.
    ///
    /// Blank input does nothing. A failure leaves the stored snapshot in place.
    pub async fn request_weather(&self, city_query: &str) {
        let city = city_query.trim();
        if city.is_empty() {
            return;
        }

        let ticket = self.state.lock().weather_seq.issue();
        let result = self.provider.current_weather(city).await;

        let mut state = self.state.lock();
        if !state.weather_seq.accept(ticket, self.order) {
            tracing::debug!(city, ticket, "discarding stale weather response");
            return;
        }

        match result {
            Ok(snapshot) => {
                self.render(&snapshot);
                state.snapshot = Some(snapshot);
            }
            Err(e) => {
                tracing::info!(city, error = %e, "weather lookup failed");
                self.view.show_error(&e.to_string());
            }
        }
    }

    /// Refresh the suggestion list for a partial city name.
    ///
    /// Queries shorter than two characters do nothing. Failures are logged and
    /// the previous list stays displayed.
    pub async fn request_city_suggestions(&self, query_text: &str) {
        if query_text.chars().count() < MIN_SUGGESTION_QUERY {
            return;
        }

        let ticket = self.state.lock().suggestion_seq.issue();
        let result = self.provider.city_suggestions(query_text, SUGGESTION_LIMIT).await;

        let mut state = self.state.lock();
        if !state.suggestion_seq.accept(ticket, self.order) {
            tracing::debug!(query = query_text, ticket, "discarding stale suggestions");
            return;
        }

        match result {
            Ok(mut list) => {
                list.truncate(SUGGESTION_LIMIT);
                let labels: Vec<String> = list.iter().map(CitySuggestion::label).collect();
                self.view.show_suggestions(&labels);
                state.suggestions = list;
            }
            Err(e) => {
                tracing::warn!(query = query_text, error = %e, "error fetching city suggestions");
            }
        }
    }

    /// Re-render the stored snapshot after the unit toggle changed.
    pub fn on_unit_preference_changed(&self) {
        let state = self.state.lock();
        if let Some(snapshot) = &state.snapshot {
            self.render(snapshot);
        }
    }

    fn render(&self, snapshot: &WeatherSnapshot) {
        let unit = UnitPreference::from_toggle(self.view.unit_toggle_checked());
        self.view.show_weather(&render_weather(snapshot, unit));
    }
}
