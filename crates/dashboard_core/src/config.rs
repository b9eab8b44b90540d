use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{error::SettingsError, render::ReferencePrices};

pub const DEFAULT_ANALYSIS_URL: &str = "http://localhost:8000/analyze";
pub const DEFAULT_SETTINGS_FILE: &str = "dashboard.toml";

pub const ENV_ANALYSIS_URL: &str = "RFP_ZERO_ANALYSIS_URL";
pub const ENV_PREMIUM_ALTERNATIVE_PRICE: &str = "RFP_ZERO_PREMIUM_ALTERNATIVE_PRICE";
pub const ENV_MARKET_HIGH_PRICE: &str = "RFP_ZERO_MARKET_HIGH_PRICE";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub analysis_url: Url,
    pub reference_prices: ReferencePrices,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    analysis_url: Option<String>,
    premium_alternative_price: Option<f64>,
    market_high_price: Option<f64>,
}

/// Defaults, then the settings file, then the environment.
///
/// An explicit `path` must exist; the default `dashboard.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };

    let raw = match fs::read_to_string(&path) {
        Ok(raw) => {
            debug!(path = %path.display(), "loaded dashboard settings file");
            Some(raw)
        }
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => None,
        Err(source) => return Err(SettingsError::Read { path, source }),
    };

    resolve_settings(raw.as_deref(), |key| std::env::var(key).ok())
}

pub fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, SettingsError> {
    let mut settings = Settings {
        analysis_url: parse_analysis_url(DEFAULT_ANALYSIS_URL)?,
        reference_prices: ReferencePrices::default(),
    };

    if let Some(raw) = file {
        let file_cfg: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file_cfg.analysis_url {
            settings.analysis_url = parse_analysis_url(&v)?;
        }
        if let Some(v) = file_cfg.premium_alternative_price {
            settings.reference_prices.premium_alternative =
                check_price("premium_alternative_price", v)?;
        }
        if let Some(v) = file_cfg.market_high_price {
            settings.reference_prices.market_high = check_price("market_high_price", v)?;
        }
    }

    if let Some(v) = env(ENV_ANALYSIS_URL) {
        settings.analysis_url = parse_analysis_url(&v)?;
    }
    if let Some(v) = env(ENV_PREMIUM_ALTERNATIVE_PRICE) {
        settings.reference_prices.premium_alternative =
            parse_price(ENV_PREMIUM_ALTERNATIVE_PRICE, &v)?;
    }
    if let Some(v) = env(ENV_MARKET_HIGH_PRICE) {
        settings.reference_prices.market_high = parse_price(ENV_MARKET_HIGH_PRICE, &v)?;
    }

    Ok(settings)
}

pub fn parse_analysis_url(value: &str) -> Result<Url, SettingsError> {
    Url::parse(value.trim()).map_err(|source| SettingsError::InvalidUrl {
        value: value.to_string(),
        source,
    })
}

fn parse_price(key: &'static str, value: &str) -> Result<f64, SettingsError> {
    let parsed = value
        .trim()
        .parse::<f64>()
        .map_err(|_| SettingsError::InvalidPrice {
            key,
            value: value.to_string(),
        })?;
    check_price(key, parsed)
}

fn check_price(key: &'static str, value: f64) -> Result<f64, SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SettingsError::InvalidPrice {
            key,
            value: value.to_string(),
        })
    }
}
