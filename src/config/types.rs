use serde::Deserialize;

use crate::config::settings::{CountdownConfig, IssuerConfig, SettingsConfig};

/// ================================
/// Full client configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    pub issuer: IssuerConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
}
