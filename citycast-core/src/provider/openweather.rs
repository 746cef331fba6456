use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::DEFAULT_BASE_URL,
    error::{LookupError, SuggestionError},
    model::{CitySuggestion, WeatherSnapshot},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    name: String,
    country: String,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, LookupError> {
        tracing::debug!(city, "requesting current weather");

        let res = self
            .http
            .get(self.endpoint("/data/2.5/weather"))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "weather lookup rejected");
            return Err(LookupError::CityNotFound);
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(error = %e, "weather payload missing expected fields");
            LookupError::CityNotFound
        })?;

        let condition = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or(LookupError::CityNotFound)?;

        Ok(WeatherSnapshot {
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            condition,
            observed_at: parsed.dt.and_then(unix_to_utc),
        })
    }

    async fn city_suggestions(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<CitySuggestion>, SuggestionError> {
        tracing::debug!(query, "requesting city suggestions");

        let limit_param = limit.to_string();
        let res = self
            .http
            .get(self.endpoint("/geo/1.0/direct"))
            .query(&[
                ("q", query),
                ("limit", limit_param.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "geocoding rejected");
            return Err(SuggestionError::Status(status));
        }

        let entries: Vec<OwGeoEntry> = serde_json::from_str(&body)?;

        Ok(entries
            .into_iter()
            .take(limit)
            .map(|e| CitySuggestion { name: e.name, country: e.country })
            .collect())
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::with_base_url("KEY".into(), &server.uri())
    }

    #[tokio::test]
    async fn current_weather_parses_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "London"))
            .and(query_param("appid", "KEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "London",
                "dt": 1_700_000_000,
                "main": { "temp": 15.0, "humidity": 80 },
                "weather": [{ "description": "clear sky", "main": "Clear" }]
            })))
            .mount(&server)
            .await;

        let snap = provider(&server).current_weather("London").await.unwrap();

        assert_eq!(snap.location_name, "London");
        assert_eq!(snap.temperature_c, 15.0);
        assert_eq!(snap.condition, "clear sky");
        assert_eq!(snap.observed_at.map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[tokio::test]
    async fn non_success_status_is_city_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&server)
            .await;

        let err = provider(&server).current_weather("Atlantis").await.unwrap_err();
        assert!(matches!(err, LookupError::CityNotFound));
        assert_eq!(err.to_string(), "City not found");
    }

    #[tokio::test]
    async fn missing_field_is_city_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Nowhere",
                "main": { "temp": 1.0 },
                "weather": []
            })))
            .mount(&server)
            .await;

        let err = provider(&server).current_weather("Nowhere").await.unwrap_err();
        assert!(matches!(err, LookupError::CityNotFound));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let provider = OpenWeatherProvider::with_base_url("KEY".into(), "http://127.0.0.1:9");
        let err = provider.current_weather("London").await.unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)));
    }

    #[tokio::test]
    async fn suggestions_are_limited() {
        let server = MockServer::start().await;

        let cities: Vec<_> = (0..7)
            .map(|i| serde_json::json!({ "name": format!("Springfield {i}"), "country": "US" }))
            .collect();

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Spri"))
            .and(query_param("limit", "5"))
            .and(query_param("appid", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(cities))
            .mount(&server)
            .await;

        let list = provider(&server).city_suggestions("Spri", 5).await.unwrap();

        assert_eq!(list.len(), 5);
        assert_eq!(list[0].label(), "Springfield 0, US");
    }

    #[tokio::test]
    async fn suggestion_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = provider(&server).city_suggestions("Pa", 5).await.unwrap_err();
        assert!(matches!(err, SuggestionError::Status(s) if s.as_u16() == 401));
    }

    #[tokio::test]
    async fn suggestion_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "oops": 1 })))
            .mount(&server)
            .await;

        let err = provider(&server).city_suggestions("Pa", 5).await.unwrap_err();
        assert!(matches!(err, SuggestionError::Decode(_)));
    }

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("short"), "short");
        assert_eq!(truncate_body(&"x".repeat(300)).len(), 200);
    }
}
