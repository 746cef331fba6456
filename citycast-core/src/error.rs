use thiserror::Error;

/// A weather lookup failed. The `Display` text is what the user sees.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Non-success status, or a payload missing an expected field.
    #[error("City not found")]
    CityNotFound,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// A city-suggestion lookup failed. Only ever logged.
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("geocoding request failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to parse geocoding response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("geocoding request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_not_found_message() {
        assert_eq!(LookupError::CityNotFound.to_string(), "City not found");
    }

    #[test]
    fn suggestion_status_message() {
        let err = SuggestionError::Status(reqwest::StatusCode::UNAUTHORIZED);
        assert!(err.to_string().contains("401"));
    }
}
