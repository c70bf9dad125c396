//! Collaborators injected into the food details reducer.

use crate::error::{CatalogError, OrderError, RegistryError};
use crate::pricing::{CurrencyFormat, PriceFormatter};
use crate::types::{Dish, DishId, OrderSummary};
use composer_core::environment::{Clock, SystemClock};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by collaborator traits
pub type BoxedResult<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

/// Source of dish records and favorite status
pub trait Catalog: Send + Sync {
    /// Fetches a dish with its extras
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] for unknown identifiers, other variants for
    /// transport or decoding failures.
    fn dish(&self, id: DishId) -> BoxedResult<Dish, CatalogError>;

    /// Whether the dish is currently a favorite
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the status cannot be read. An unknown
    /// favorite is `Ok(false)`, not an error.
    fn favorite_status(&self, id: DishId) -> BoxedResult<bool, CatalogError>;
}

/// Persisted set of favorite dishes
pub trait FavoriteRegistry: Send + Sync {
    /// Adds a dish to the favorites
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the registry did not accept the change.
    fn add(&self, dish: &Dish) -> BoxedResult<(), RegistryError>;

    /// Removes a dish from the favorites
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the registry did not accept the change.
    fn remove(&self, id: DishId) -> BoxedResult<(), RegistryError>;
}

/// Receives confirmed orders
pub trait OrderSink: Send + Sync {
    /// Hands over a confirmed order
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] if the order was not taken.
    fn submit(&self, order: OrderSummary) -> BoxedResult<(), OrderError>;
}

/// Order sink that only logs: nothing is submitted anywhere
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardingOrderSink;

impl OrderSink for DiscardingOrderSink {
    fn submit(&self, order: OrderSummary) -> BoxedResult<(), OrderError> {
        Box::pin(async move {
            tracing::info!(
                dish_id = %order.dish_id,
                quantity = order.quantity,
                extras = order.extras.len(),
                total_cents = order.total.cents(),
                "Order composed (not submitted)"
            );
            Ok(())
        })
    }
}

/// Environment for the food details reducer
#[derive(Clone)]
pub struct FoodDetailsEnvironment {
    /// Dish records and favorite status
    pub catalog: Arc<dyn Catalog>,
    /// Favorite add/remove
    pub favorites: Arc<dyn FavoriteRegistry>,
    /// Destination of finished orders
    pub orders: Arc<dyn OrderSink>,
    /// Display formatting for prices
    pub formatter: Arc<dyn PriceFormatter>,
    /// Timestamps for order summaries
    pub clock: Arc<dyn Clock>,
}

impl FoodDetailsEnvironment {
    /// Creates an environment with the discarding order sink, BRL
    /// formatting and the system clock
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>, favorites: Arc<dyn FavoriteRegistry>) -> Self {
        Self {
            catalog,
            favorites,
            orders: Arc::new(DiscardingOrderSink),
            formatter: Arc::new(CurrencyFormat::brl()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the order sink
    #[must_use]
    pub fn with_orders(mut self, orders: Arc<dyn OrderSink>) -> Self {
        self.orders = orders;
        self
    }

    /// Replaces the price formatter
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn PriceFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Replaces the clock
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
