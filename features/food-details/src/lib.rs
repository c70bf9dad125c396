//! # Food Details
//!
//! Order composition engine behind a food details screen: one dish, the
//! quantities of its extras, the dish quantity, a favorite flag and a total
//! price that always follows from the current selection.
//!
//! The engine is a [`FoodDetailsReducer`] run by a
//! [`Store`](composer_runtime::Store):
//!
//! - `Load` reads the dish and its favorite status concurrently. The screen
//!   is ready only once both succeed; either failure leaves it in an error
//!   state that `Retry` recovers from.
//! - Quantity intents apply immediately and in order. The dish quantity
//!   never drops below 1 and no extra below 0.
//! - `ToggleFavorite` only flips the flag once the registry confirms the
//!   change, and ignores further taps while the change is in flight.
//! - `FinishOrder` hands an [`OrderSummary`] to the configured
//!   [`OrderSink`].
//!
//! ## Example
//!
//! ```ignore
//! let api = Arc::new(FoodApiClient::new(config.api_url, config.request_timeout)?);
//! let store = food_details_store(FoodDetailsEnvironment::new(api.clone(), api));
//!
//! store.send(FoodDetailsAction::Load { dish_id: DishId::new(1) }).await?.wait().await;
//! store.send(FoodDetailsAction::IncrementFood).await?;
//! let view = store.state(|s| s.view(&CurrencyFormat::brl())).await;
//! ```

pub mod actions;
pub mod config;
pub mod environment;
pub mod error;
pub mod http;
pub mod mocks;
pub mod pricing;
pub mod reducer;
pub mod types;
pub mod view;

pub use actions::FoodDetailsAction;
pub use config::FoodDetailsConfig;
pub use environment::{
    Catalog, DiscardingOrderSink, FavoriteRegistry, FoodDetailsEnvironment, OrderSink,
};
pub use error::{AmountError, CatalogError, ConfigError, LoadError, OrderError, RegistryError};
pub use http::FoodApiClient;
pub use pricing::{CurrencyFormat, PriceFormatter};
pub use reducer::FoodDetailsReducer;
pub use types::{
    Dish, DishId, Extra, ExtraId, ExtraOption, FavoriteStatus, FoodDetailsState, LoadPhase,
    LoadToken, Money, OrderComposition, OrderLine, OrderOutcome, OrderSummary,
};
pub use view::{CompositionView, ExtraView, FoodDetailsView, ViewStatus};

use composer_runtime::Store;

/// Store running the food details reducer
pub type FoodDetailsStore =
    Store<FoodDetailsState, FoodDetailsAction, FoodDetailsEnvironment, FoodDetailsReducer>;

/// Creates a store for a screen that has not loaded anything yet
#[must_use]
pub fn food_details_store(environment: FoodDetailsEnvironment) -> FoodDetailsStore {
    Store::new(FoodDetailsState::new(), FoodDetailsReducer::new(), environment)
}
