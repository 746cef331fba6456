//! Display surface the controller writes to.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::render::RenderedWeather;

/// A front-end the controller renders into: a result region, a suggestion
/// list, and the unit toggle it reads back.
///
/// Implementations must not call back into the controller from these methods.
pub trait WeatherView: Send + Sync {
    /// Checked means Celsius.
    fn unit_toggle_checked(&self) -> bool;

    /// Replace the result region with weather details.
    fn show_weather(&self, weather: &RenderedWeather);

    /// Replace the result region with a single error message.
    fn show_error(&self, message: &str);

    /// Replace the suggestion list.
    fn show_suggestions(&self, labels: &[String]);
}

/// What the result region currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultRegion {
    #[default]
    Empty,
    Weather(RenderedWeather),
    Error(String),
}

/// Headless view that keeps the displayed state in memory.
#[derive(Debug)]
pub struct MemoryView {
    toggle_checked: AtomicBool,
    region: Mutex<ResultRegion>,
    suggestions: Mutex<Vec<String>>,
    writes: AtomicUsize,
}

impl MemoryView {
    pub fn new(toggle_checked: bool) -> Self {
        Self {
            toggle_checked: AtomicBool::new(toggle_checked),
            region: Mutex::new(ResultRegion::Empty),
            suggestions: Mutex::new(Vec::new()),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn set_toggle(&self, checked: bool) {
        self.toggle_checked.store(checked, Ordering::SeqCst);
    }

    pub fn region(&self) -> ResultRegion {
        self.region.lock().clone()
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.suggestions.lock().clone()
    }

    /// Number of writes to the result region so far.
    pub fn region_writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new(true)
    }
}

impl WeatherView for MemoryView {
    fn unit_toggle_checked(&self) -> bool {
        self.toggle_checked.load(Ordering::SeqCst)
    }

    fn show_weather(&self, weather: &RenderedWeather) {
        *self.region.lock() = ResultRegion::Weather(weather.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    fn show_error(&self, message: &str) {
        *self.region.lock() = ResultRegion::Error(message.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    fn show_suggestions(&self, labels: &[String]) {
        *self.suggestions.lock() = labels.to_vec();
    }
}
