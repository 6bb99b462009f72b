use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::url::normalize_url;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// An invalid seed URL is the only truly fatal crawl condition, so it is
/// rejected here, before any fetching starts.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let seed = normalize_url(&config.seed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed-url '{}': {}", config.seed_url, e)))?;

    if seed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "seed-url '{}' has no host to derive a root domain from",
            config.seed_url
        )));
    }

    if let Some(max_pages) = config.max_pages {
        if max_pages < 1 {
            return Err(ConfigError::Validation(format!(
                "max-pages must be >= 1 when set, got {}",
                max_pages
            )));
        }
    }

    if let Some(override_domain) = &config.root_domain_override {
        if override_domain.is_empty() {
            return Err(ConfigError::Validation(
                "root-domain-override cannot be empty when set".to_string(),
            ));
        }

        // Must parse as a bare host when given a scheme prefix
        let probe = format!("https://{}/", override_domain);
        Url::parse(&probe).map_err(|e| {
            ConfigError::Validation(format!(
                "root-domain-override '{}' is not a valid host: {}",
                override_domain, e
            ))
        })?;
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.document_path.is_empty() {
        return Err(ConfigError::Validation(
            "document-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email shape check: one `@` with non-empty local part and a domain
/// containing a dot
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "contact-email '{}' is not a valid email address",
            email
        )));
    }

    Ok(())
}
