//! Actions for the food details screen.

use crate::error::{CatalogError, OrderError, RegistryError};
use crate::types::{Dish, DishId, ExtraId, FavoriteStatus, LoadToken, OrderSummary};

/// Everything that can happen to a food details screen
///
/// The first group is what the presentation layer sends. The second group
/// is feedback produced by effects; the presentation layer never sends it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FoodDetailsAction {
    // Intents
    /// Start (or restart) the screen for a dish
    Load {
        /// Dish to show
        dish_id: DishId,
    },
    /// Load the last requested dish again after a failure
    Retry,
    /// One more unit of an extra
    IncrementExtra {
        /// Extra to change
        extra_id: ExtraId,
    },
    /// One less unit of an extra (stops at 0)
    DecrementExtra {
        /// Extra to change
        extra_id: ExtraId,
    },
    /// One more dish
    IncrementFood,
    /// One less dish (stops at 1)
    DecrementFood,
    /// Add the dish to or remove it from the favorites
    ToggleFavorite,
    /// Confirm the composition
    FinishOrder,

    // Feedback
    /// The dish read completed
    DishFetched {
        /// Load this result belongs to
        token: LoadToken,
        /// Dish record or failure
        result: Result<Dish, CatalogError>,
    },
    /// The favorite status read completed
    FavoriteStatusFetched {
        /// Load this result belongs to
        token: LoadToken,
        /// Status or failure
        result: Result<FavoriteStatus, CatalogError>,
    },
    /// The registry confirmed the change
    FavoriteUpdated {
        /// Load the toggle was issued under
        token: LoadToken,
        /// Confirmed status
        favorite: FavoriteStatus,
    },
    /// The registry change failed
    FavoriteUpdateFailed {
        /// Load the toggle was issued under
        token: LoadToken,
        /// Failure
        error: RegistryError,
    },
    /// The order sink accepted the order
    OrderFinished {
        /// What was ordered
        summary: OrderSummary,
    },
    /// The order sink failed
    OrderFailed {
        /// Failure
        error: OrderError,
    },
}
