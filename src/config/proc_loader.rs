use std::sync::LazyLock;
use std::{fs, path::Path};

use anyhow::{anyhow, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::proc_validator;
use crate::config::settings::LoggingConfig;
use crate::config::types::ServiceConfig;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}").expect("env var pattern must compile")
});

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow!("cannot read config '{}': {}", path.display(), e))?;

    let expanded = expand_env_vars(&content);
    parse_config(expanded).await
}

pub async fn parse_config(content: String) -> Result<ServiceConfig> {
    let mut service_config: ServiceConfig = serde_yaml::from_str(&content)
        .inspect_err(|e| error!("parse config error: {}", e))?;

    // Apply defaults
    if service_config.settings.logging.is_none() {
        service_config.settings.logging = Some(LoggingConfig::default());
    }

    debug!("validation config ...");
    proc_validator::validate_service_config(&service_config).map_err(|errors| {
        anyhow!(
            "config is not valid, total errors: {}\n{}",
            errors.len(),
            errors.join("\n")
        )
    })?;

    Ok(service_config)
}

/// Replaces `${VAR}` and `${VAR:default}` with the environment value.
fn expand_env_vars(input: &str) -> String {
    ENV_VAR_PATTERN
        .replace_all(input, |caps: &regex::Captures| {
            let var = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var).unwrap_or_else(|_| default.to_string())
        })
        .to_string()
}
