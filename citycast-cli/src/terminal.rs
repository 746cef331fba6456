use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use citycast_core::{CitySuggestion, RenderedWeather, WeatherUiController, WeatherView};
use crossterm::style::Stylize;
use inquire::{CustomUserError, autocompletion::{Autocomplete, Replacement}};
use tokio::runtime::Handle;

/// Writes the weather display to stdout.
#[derive(Debug)]
pub struct TerminalView {
    toggle_checked: AtomicBool,
    print_suggestions: bool,
}

impl TerminalView {
    pub fn new(toggle_checked: bool, print_suggestions: bool) -> Self {
        Self {
            toggle_checked: AtomicBool::new(toggle_checked),
            print_suggestions,
        }
    }

    /// Flip the unit toggle, returning the new checked state.
    pub fn flip_toggle(&self) -> bool {
        !self.toggle_checked.fetch_xor(true, Ordering::SeqCst)
    }
}

impl WeatherView for TerminalView {
    fn unit_toggle_checked(&self) -> bool {
        self.toggle_checked.load(Ordering::SeqCst)
    }

    fn show_weather(&self, weather: &RenderedWeather) {
        println!();
        println!("{}", weather.location.as_str().bold());
        println!("Temperature: {}", weather.temperature);
        println!("Weather: {}", weather.condition);
    }

    fn show_error(&self, message: &str) {
        println!();
        println!("{}", message.red());
    }

    fn show_suggestions(&self, labels: &[String]) {
        if self.print_suggestions {
            for label in labels {
                println!("{label}");
            }
        }
    }
}

/// Feeds the city prompt from the geocoding endpoint as the user types.
#[derive(Clone)]
pub struct CityAutocomplete {
    controller: Arc<WeatherUiController<TerminalView>>,
    runtime: Handle,
}

impl CityAutocomplete {
    pub fn new(controller: Arc<WeatherUiController<TerminalView>>, runtime: Handle) -> Self {
        Self { controller, runtime }
    }
}

impl Autocomplete for CityAutocomplete {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        if input.starts_with(':') {
            return Ok(Vec::new());
        }

        self.runtime.block_on(self.controller.request_city_suggestions(input));
        Ok(self.controller.suggestions().iter().map(CitySuggestion::label).collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_toggle_alternates() {
        let view = TerminalView::new(true, false);

        assert!(!view.flip_toggle());
        assert!(!view.unit_toggle_checked());
        assert!(view.flip_toggle());
        assert!(view.unit_toggle_checked());
    }

    #[test]
    fn autocomplete_lists_controller_suggestions() {
        use citycast_core::{OpenWeatherProvider, ResponseOrder};
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/geo/1.0/direct"))
                .and(query_param("q", "Par"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                    { "name": "Paris", "country": "FR" },
                    { "name": "Parma", "country": "IT" }
                ])))
                .expect(1)
                .mount(&server)
                .await;
            server
        });

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &server.uri());
        let controller = Arc::new(WeatherUiController::with_order(
            Box::new(provider),
            TerminalView::new(true, false),
            ResponseOrder::Arrival,
        ));
        let mut autocomplete = CityAutocomplete::new(controller, runtime.handle().clone());

        assert_eq!(autocomplete.get_suggestions(":unit").unwrap(), Vec::<String>::new());
        assert_eq!(
            autocomplete.get_suggestions("Par").unwrap(),
            vec!["Paris, FR".to_string(), "Parma, IT".to_string()]
        );

        runtime.block_on(server.verify());
    }
}
