//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - issuer: url scheme, path shape, timeout
//! - countdown: tick interval vs token lifetime
//! - logging level

use tracing::{error, info};

use crate::config::settings::{CountdownConfig, IssuerConfig, LoggingConfig};
use crate::config::types::ServiceConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_issuer(&cfg.issuer, &mut errors);
    validate_countdown(&cfg.countdown, &mut errors);
    if let Some(logging) = &cfg.settings.logging {
        validate_logging(logging, &mut errors);
    }

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        Err(errors)
    }
}

fn validate_issuer(issuer: &IssuerConfig, errors: &mut Vec<String>) {
    let base_url = issuer.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(format!(
            "issuer.base_url '{}' must start with http:// or https://",
            issuer.base_url
        ));
    }
    if !issuer.path.starts_with('/') {
        errors.push(format!("issuer.path '{}' must start with '/'", issuer.path));
    }
    if issuer.timeout_ms == 0 {
        errors.push("issuer.timeout_ms must be > 0".to_string());
    }
}

fn validate_countdown(countdown: &CountdownConfig, errors: &mut Vec<String>) {
    if countdown.tick_interval_ms == 0 {
        errors.push("countdown.tick_interval_ms must be > 0".to_string());
    }
    if countdown.token_ttl_seconds == 0 {
        errors.push("countdown.token_ttl_seconds must be > 0".to_string());
    }
    match countdown.token_ttl_seconds.checked_mul(1000) {
        None => errors.push(format!(
            "countdown.token_ttl_seconds ({}) is too large",
            countdown.token_ttl_seconds
        )),
        Some(ttl_ms)
            if countdown.tick_interval_ms > 0
                && ttl_ms > 0
                && countdown.tick_interval_ms >= ttl_ms =>
        {
            errors.push(format!(
                "countdown.tick_interval_ms ({}) must be shorter than token_ttl_seconds ({}s)",
                countdown.tick_interval_ms, countdown.token_ttl_seconds
            ));
        }
        Some(_) => {}
    }
}

fn validate_logging(logging: &LoggingConfig, errors: &mut Vec<String>) {
    if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        errors.push(format!(
            "settings.logging.level '{}' must be one of {:?}",
            logging.level, LOG_LEVELS
        ));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::settings::{LogFormat, SettingsConfig};

    fn config() -> ServiceConfig {
        ServiceConfig {
            settings: SettingsConfig {
                logging: Some(LoggingConfig::default()),
            },
            issuer: IssuerConfig {
                base_url: "https://kiosk.example".to_owned(),
                path: "/dashboard/generate-token/".to_owned(),
                csrf_token: None,
                timeout_ms: 5000,
            },
            countdown: CountdownConfig::default(),
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate_service_config(&config()).is_ok());
    }

    #[test]
    fn tick_interval_must_fit_in_token_lifetime() {
        let mut cfg = config();
        cfg.countdown.tick_interval_ms = 30_000;

        let errors = validate_service_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("must be shorter"));
    }

    #[test]
    fn oversized_token_lifetime_is_reported_not_panicking() {
        let mut cfg = config();
        cfg.countdown.token_ttl_seconds = u64::MAX;

        let errors = validate_service_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("countdown.token_ttl_seconds"));
        assert!(errors[0].contains("too large"));
    }

    #[test]
    fn unknown_log_level_is_reported() {
        let mut cfg = config();
        cfg.settings.logging = Some(LoggingConfig::new("loud".to_owned(), LogFormat::Json));
        cfg.issuer.timeout_ms = 0;

        let errors = validate_service_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("settings.logging.level 'loud'")));
        assert!(errors.iter().any(|e| e.contains("issuer.timeout_ms")));
    }
}
