/// Value shipped in the sample `.env` that must be replaced before use.
pub const PLACEHOLDER_API_KEY: &str = "your_actual_google_ai_studio_api_key_here";

/// Coarse classification of the configured API key, reported at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyStatus {
    Missing,
    Placeholder,
    Configured,
}

impl ApiKeyStatus {
    pub fn of(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            None | Some("") => ApiKeyStatus::Missing,
            Some(PLACEHOLDER_API_KEY) => ApiKeyStatus::Placeholder,
            Some(_) => ApiKeyStatus::Configured,
        }
    }
}
