use std::{fmt, process::ExitCode, sync::Arc};

use anyhow::Context;
use chrono::Local;
use citycast_core::{
    Config, ResponseOrder, WeatherUiController, WeatherView,
    config::API_KEY_ENV,
    provider::provider_from_config,
};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use tokio::runtime::Handle;

use crate::terminal::{CityAutocomplete, TerminalView};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "Current weather for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and response ordering.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, optionally "City, CountryCode".
        city: String,

        /// Display temperatures in Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,
    },

    /// List city names matching a partial query.
    Suggest {
        query: String,
    },

    /// Search repeatedly with live city suggestions.
    Interactive {
        /// Start with the unit toggle on Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,
    },
}

impl Cli {
    /// Runs the command; a `show` that displays no weather exits with failure.
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure().map(|()| ExitCode::SUCCESS),
            Command::Show { city, fahrenheit } => {
                let controller = build_controller(fahrenheit, false)?;
                controller.request_weather(&city).await;

                if let Some(observed) = controller.snapshot().and_then(|s| s.observed_at) {
                    let local = observed.with_timezone(&Local).format("%Y-%m-%d %H:%M");
                    println!("{}", format!("Observed {local}").dim());
                }

                Ok(if has_weather(&controller) { ExitCode::SUCCESS } else { ExitCode::FAILURE })
            }
            Command::Suggest { query } => {
                let controller = build_controller(false, true)?;
                controller.request_city_suggestions(&query).await;
                Ok(ExitCode::SUCCESS)
            }
            Command::Interactive { fahrenheit } => {
                let controller = Arc::new(build_controller(fahrenheit, false)?);
                let runtime = Handle::current();

                tokio::task::spawn_blocking(move || interactive(controller, runtime))
                    .await
                    .context("Interactive session panicked")??;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn build_controller(
    fahrenheit: bool,
    print_suggestions: bool,
) -> anyhow::Result<WeatherUiController<TerminalView>> {
    let config = Config::load()?;
    let provider = provider_from_config(&config, std::env::var(API_KEY_ENV).ok())?;
    let view = TerminalView::new(!fahrenheit, print_suggestions);

    Ok(WeatherUiController::with_order(provider, view, config.response_order))
}

fn has_weather<V: WeatherView>(controller: &WeatherUiController<V>) -> bool {
    controller.snapshot().is_some()
}

#[derive(Debug, Clone, Copy)]
struct OrderChoice(ResponseOrder);

impl fmt::Display for OrderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ResponseOrder::Arrival => f.write_str("show whichever response arrives last"),
            ResponseOrder::Issue => f.write_str("show the most recent search only"),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let choices = vec![OrderChoice(ResponseOrder::Arrival), OrderChoice(ResponseOrder::Issue)];
    let start = usize::from(config.response_order == ResponseOrder::Issue);
    let order = Select::new("When searches overlap:", choices).with_starting_cursor(start).prompt()?;

    config.api_key = Some(api_key.trim().to_string());
    config.response_order = order.0;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

/// What a line typed at the city prompt asks for.
#[derive(Debug, PartialEq, Eq)]
enum SessionInput<'a> {
    Quit,
    ToggleUnit,
    Search(&'a str),
}

fn parse_session_input(line: &str) -> SessionInput<'_> {
    match line.trim() {
        ":quit" | ":q" => SessionInput::Quit,
        ":unit" | ":u" => SessionInput::ToggleUnit,
        other => SessionInput::Search(other),
    }
}

fn interactive(
    controller: Arc<WeatherUiController<TerminalView>>,
    runtime: Handle,
) -> anyhow::Result<()> {
    println!("Type a city and press Enter. `:unit` switches °C/°F, `:quit` exits.");

    loop {
        let line = Text::new("City:")
            .with_autocomplete(CityAutocomplete::new(controller.clone(), runtime.clone()))
            .prompt();

        let line = match line {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match parse_session_input(&line) {
            SessionInput::Quit => break,
            SessionInput::ToggleUnit => {
                let checked = controller.view().flip_toggle();
                println!("{}", format!("Unit: {}", if checked { "°C" } else { "°F" }).dim());
                controller.on_unit_preference_changed();
            }
            SessionInput::Search(city) => runtime.block_on(controller.request_weather(city)),
        }
    }

    Ok(())
}
