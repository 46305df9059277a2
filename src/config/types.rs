use serde::Deserialize;

/// Desktop browser identifier; some restaurant sites reject default client identifiers
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36";

/// Main configuration structure for Menu-Scout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(rename = "content-service", default)]
    pub content_service: ContentServiceConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of link classifications in flight at once
    #[serde(rename = "max-concurrent-classifications", default = "default_max_concurrent")]
    pub max_concurrent_classifications: u32,

    /// Timeout for a single page fetch (seconds)
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Timeout for a single content service call (seconds)
    #[serde(rename = "classify-timeout-secs", default = "default_classify_timeout")]
    pub classify_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_classifications: default_max_concurrent(),
            fetch_timeout_secs: default_fetch_timeout(),
            classify_timeout_secs: default_classify_timeout(),
        }
    }
}

/// User agent sent with every page fetch
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

/// Generative content service settings
#[derive(Debug, Clone, Deserialize)]
pub struct ContentServiceConfig {
    /// Base endpoint; derived from the location when absent
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Cloud project; falls back to `GOOGLE_CLOUD_PROJECT`
    #[serde(default)]
    pub project: Option<String>,

    /// Cloud location; falls back to `GOOGLE_CLOUD_LOCATION`
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the bearer token
    #[serde(rename = "access-token-env", default = "default_access_token_env")]
    pub access_token_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(rename = "top-p", default = "default_top_p")]
    pub top_p: f32,

    #[serde(rename = "max-output-tokens", default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Transport timeout for one generate call (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ContentServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            project: None,
            location: None,
            model: default_model(),
            access_token_env: default_access_token_env(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_max_concurrent() -> u32 {
    8
}

fn default_fetch_timeout() -> u64 {
    20
}

/// Longer than the default content service request timeout
fn default_classify_timeout() -> u64 {
    180
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_access_token_env() -> String {
    "GOOGLE_CLOUD_ACCESS_TOKEN".to_string()
}

fn default_temperature() -> f32 {
    1.0
}

fn default_top_p() -> f32 {
    0.95
}

fn default_max_output_tokens() -> u32 {
    65535
}

fn default_request_timeout() -> u64 {
    120
}
