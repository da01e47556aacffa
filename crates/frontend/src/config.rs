use crate::shared::remote::DEFAULT_DEBOUNCE;
use contracts::domain::common::ValidationRules;
use leptos::prelude::*;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub revalidate: RevalidateConfig,
    #[serde(default)]
    pub validation: ValidationRules,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    /// 0 - без ограничения
    #[serde(default)]
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct RevalidateConfig {
    /// 0 - периодическая перезагрузка выключена
    #[serde(default)]
    pub interval_ms: u64,
}

impl AppConfig {
    pub fn timeout(&self) -> Option<Duration> {
        non_zero(self.api.timeout_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    pub fn revalidate_interval(&self) -> Option<Duration> {
        non_zero(self.revalidate.interval_ms)
    }
}

fn non_zero(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// localStorage key for a browser-side override (same TOML shape)
pub const CONFIG_OVERRIDE_KEY: &str = "app_config";

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:3000/api/be"
timeout_ms = 0

[search]
debounce_ms = 300

[revalidate]
interval_ms = 0

[validation.brand]
name_min = 3
name_max = 255

[validation.product]
price_min = 100.0
price_max = 100000000.0
quantity_min = 0
quantity_max = 100000
description_max = 2000
"#;

pub fn default_config() -> AppConfig {
    toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!("Embedded configuration is invalid: {}", e);
        AppConfig {
            api: ApiConfig {
                base_url: "http://localhost:3000/api/be".to_string(),
                timeout_ms: 0,
            },
            search: SearchConfig::default(),
            revalidate: RevalidateConfig::default(),
            validation: ValidationRules::default(),
        }
    })
}

/// Parse configuration, falling back to the embedded default
///
/// Search order:
/// 1. Override passed in (read from localStorage in the browser)
/// 2. Embedded default config
pub fn load_config(override_toml: Option<&str>) -> AppConfig {
    if let Some(contents) = override_toml {
        match toml::from_str::<AppConfig>(contents) {
            Ok(config) => {
                log::info!("Loading config from localStorage[{}]", CONFIG_OVERRIDE_KEY);
                return config;
            }
            Err(e) => log::warn!("Config override ignored: {}", e),
        }
    }

    log::info!("Using default embedded configuration");
    default_config()
}

pub fn provide_app_config(config: AppConfig) {
    provide_context(StoredValue::new(config));
}

pub fn use_app_config() -> AppConfig {
    use_context::<StoredValue<AppConfig>>()
        .map(|config| config.get_value())
        .unwrap_or_else(default_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<AppConfig, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000/api/be");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.revalidate_interval(), None);
        assert_eq!(config.validation, ValidationRules::default());
    }

    #[test]
    fn test_override_replaces_sections() {
        let config = load_config(Some(
            r#"
[api]
base_url = "https://shop.example/api/be"
timeout_ms = 8000

[revalidate]
interval_ms = 30000
"#,
        ));
        assert_eq!(config.api.base_url, "https://shop.example/api/be");
        assert_eq!(config.timeout(), Some(Duration::from_secs(8)));
        assert_eq!(config.revalidate_interval(), Some(Duration::from_secs(30)));
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.validation.brand.name_min, 3);
    }

    #[test]
    fn test_broken_override_falls_back() {
        let config = load_config(Some("[api"));
        assert_eq!(config, default_config());
    }
}
