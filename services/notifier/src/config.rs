use platewatch_pipeline::QueueConfig;
use serde::Deserialize;

/// Main configuration for the notifier stage
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,
    /// Queue transport configuration
    #[serde(default)]
    pub queue: QueueConfig,
    /// Translation collaborator configuration
    #[serde(default)]
    pub translation: TranslationConfig,
    /// SMTP submission configuration
    pub smtp: SmtpConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Service name for logging
    #[serde(default = "default_service_name")]
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Translation collaborator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationConfig {
    /// AWS region for the translation service
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint URL
    pub endpoint_url: Option<String>,
}

/// SMTP submission configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// SMTP relay host
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// SMTP submission port
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Relay username
    pub username: String,
    /// Relay password
    pub password: String,
    /// Fixed sender address on every notification
    #[serde(default = "default_sender")]
    pub sender: String,
    /// Fixed subject line on every notification
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_service_name() -> String {
    "notifier-service".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_sender() -> String {
    "citations@platewatch.example".to_string()
}

fn default_subject() -> String {
    "You just got served".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
        }
    }
}

impl Config {
    /// Load configuration from environment and config files
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .set_default("smtp.host", default_smtp_host())?
            .add_source(config::File::with_name("config/notifier").required(false))
            .add_source(config::File::with_name("/etc/platewatch/notifier").required(false))
            // NOTIFIER__SMTP__PASSWORD -> smtp.password
            .add_source(
                config::Environment::with_prefix("NOTIFIER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_smtp_port(), 587);
        assert_eq!(default_subject(), "You just got served");
    }
}
