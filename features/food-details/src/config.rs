//! Configuration for the food details service.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unlike a missing variable, a variable that is set but unusable is an
//! error rather than silently replaced by the default.

use crate::error::ConfigError;
use crate::pricing::CurrencyFormat;
use crate::types::DishId;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default base URL of the food API
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodDetailsConfig {
    /// Base URL of the catalog and favorites API (`FOOD_API_URL`)
    pub api_url: String,
    /// Per-request timeout (`FOOD_API_TIMEOUT_SECS`)
    pub request_timeout: Duration,
    /// Price display format (`FOOD_CURRENCY`: `brl` or `plain`)
    pub currency: CurrencyFormat,
    /// Dish the demo binary opens (`FOOD_DISH_ID`)
    pub dish_id: DishId,
}

impl Default for FoodDetailsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            currency: CurrencyFormat::brl(),
            dish_id: DishId::new(1),
        }
    }
}

impl FoodDetailsConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is set to an
    /// unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("FOOD_API_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_url);

        let request_timeout = parse(&lookup, "FOOD_API_TIMEOUT_SECS", "expected whole seconds")?
            .filter(|secs: &u64| *secs > 0)
            .map_or(defaults.request_timeout, Duration::from_secs);

        let currency = match lookup("FOOD_CURRENCY") {
            Some(code) => CurrencyFormat::from_code(&code)?,
            None => defaults.currency,
        };

        let dish_id = parse(&lookup, "FOOD_DISH_ID", "expected a dish id")?
            .map_or(defaults.dish_id, DishId::new);

        Ok(Self {
            api_url,
            request_timeout,
            currency,
            dish_id,
        })
    }
}

fn parse<F, T>(lookup: &F, var: &'static str, reason: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(var)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::Invalid {
                var,
                value: value.clone(),
                reason,
            })
        })
        .transpose()
}
