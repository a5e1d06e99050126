use std::env;

/// Where the backend lives and what context chat questions carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the advisory backend, without a trailing slash.
    pub api_url: String,
    /// Farm attached to chat questions and advice requests.
    pub farm_id: Option<String>,
}

impl ClientConfig {
    pub const DEFAULT_API_URL: &'static str = "http://127.0.0.1:5000";

    /// Reads `ADVISOR_API_URL` and `ADVISOR_FARM_ID`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("ADVISOR_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_API_URL.to_string());
        let farm_id = lookup("ADVISOR_FARM_ID").filter(|v| !v.trim().is_empty());
        Self {
            api_url: normalize_base_url(&api_url),
            farm_id,
        }
    }

    /// Applies command-line values on top of the environment.
    pub fn with_overrides(mut self, api_url: Option<String>, farm_id: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = normalize_base_url(&url);
        }
        if farm_id.is_some() {
            self.farm_id = farm_id;
        }
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            farm_id: None,
        }
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
