use crate::config::types::{Config, ContentServiceConfig, CrawlerConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_content_service_config(&config.content_service)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_classifications < 1 || config.max_concurrent_classifications > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_classifications must be between 1 and 100, got {}",
            config.max_concurrent_classifications
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "fetch_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.classify_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "classify_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }

    // Header values cannot carry control characters
    if config.value.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(
            "user agent contains control characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates generative content service configuration
fn validate_content_service_config(config: &ContentServiceConfig) -> Result<(), ConfigError> {
    if let Some(endpoint) = &config.endpoint {
        let url = Url::parse(endpoint).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid endpoint '{}': {}", endpoint, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Endpoint '{}' must use http or https",
                endpoint
            )));
        }
    }

    if config.model.is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    if config.access_token_env.is_empty() {
        return Err(ConfigError::Validation(
            "access_token_env cannot be empty".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ConfigError::Validation(format!(
            "temperature must be between 0.0 and 2.0, got {}",
            config.temperature
        )));
    }

    if !(0.0..=1.0).contains(&config.top_p) {
        return Err(ConfigError::Validation(format!(
            "top_p must be between 0.0 and 1.0, got {}",
            config.top_p
        )));
    }

    if config.max_output_tokens < 1 {
        return Err(ConfigError::Validation(
            "max_output_tokens must be >= 1".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}
