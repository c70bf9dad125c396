//! Error types for the food details screen.
//!
//! Every error that travels inside a [`FoodDetailsAction`](crate::FoodDetailsAction)
//! is `Clone` so actions can be broadcast to observers.

use crate::types::DishId;
use thiserror::Error;

/// Failure of a catalog read (dish record or favorite status)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has no dish with this identifier
    #[error("dish {0} not found")]
    NotFound(DishId),

    /// Transport failure (connection refused, timeout, ...)
    #[error("network error: {0}")]
    Network(String),

    /// The catalog answered with an unexpected status
    #[error("catalog returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The response body could not be decoded
    #[error("invalid catalog response: {0}")]
    Decode(String),
}

/// Screen initialization failed; no composition is exposed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The dish record could not be fetched
    #[error("failed to load dish: {0}")]
    Dish(CatalogError),

    /// The favorite status could not be fetched
    #[error("failed to load favorite status: {0}")]
    FavoriteStatus(CatalogError),
}

/// Adding or removing a favorite failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Transport failure
    #[error("network error: {0}")]
    Network(String),

    /// The registry refused the change
    #[error("favorite registry returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },
}

/// Handing a finished order to the order sink failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The sink refused the order
    #[error("order rejected: {0}")]
    Rejected(String),
}

/// A decimal amount that cannot be represented as [`Money`](crate::Money)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    /// Prices and extra values are never negative
    #[error("amount must not be negative")]
    Negative,

    /// NaN or infinity
    #[error("amount must be a finite number")]
    NotFinite,

    /// Too large to count in cents
    #[error("amount is out of range")]
    OutOfRange,
}

/// Invalid configuration value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is set but cannot be used
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// Raw value found
        value: String,
        /// What was expected
        reason: &'static str,
    },
}
