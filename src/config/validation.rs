use crate::config::types::{Config, OutputConfig, SelectorConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use reqwest::header::HeaderValue;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_selectors(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.start_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "start-path cannot be empty".to_string(),
        ));
    }

    base.join(&config.start_path).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "start-path '{}' does not resolve against base-url: {}",
            config.start_path, e
        ))
    })?;

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent value cannot be empty".to_string(),
        ));
    }

    HeaderValue::from_str(&config.value).map_err(|_| {
        ConfigError::Validation(format!(
            "user-agent '{}' is not a valid header value",
            config.value
        ))
    })?;

    Ok(())
}

/// Validates that every selector compiles
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    for (field, selector) in config.fields() {
        compile_selector(field, selector)?;
    }
    Ok(())
}

/// Compiles one CSS selector, naming the config field on failure
pub(crate) fn compile_selector(field: &'static str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
        field,
        selector: selector.to_string(),
    })
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
