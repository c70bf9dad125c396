//! Reducer for the food details screen.
//!
//! Quantity changes are applied synchronously and return no effects. Loading,
//! toggling the favorite and finishing the order describe their remote calls
//! as effects; the results come back as feedback actions carrying the
//! [`LoadToken`] they were issued under, so feedback from a superseded load
//! never touches the current composition.

use crate::actions::FoodDetailsAction;
use crate::environment::FoodDetailsEnvironment;
use crate::error::{CatalogError, LoadError};
use crate::types::{
    Dish, DishId, FavoriteStatus, FoodDetailsState, LoadPhase, LoadToken, OrderComposition,
    OrderOutcome, PartialLoad,
};
use composer_core::async_effect;
use composer_core::effect::Effect;
use composer_core::reducer::Reducer;
use composer_core::{SmallVec, smallvec};
use std::sync::Arc;

/// Reducer implementing the order composition rules
#[derive(Clone, Copy, Debug, Default)]
pub struct FoodDetailsReducer;

impl FoodDetailsReducer {
    /// Creates a new food details reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn load(
        state: &mut FoodDetailsState,
        dish_id: DishId,
        env: &FoodDetailsEnvironment,
    ) -> Effect<FoodDetailsAction> {
        let token = state.token.next();

        state.dish_id = Some(dish_id);
        state.token = token;
        state.phase = LoadPhase::Pending;
        state.partial = PartialLoad::default();
        state.favorite_in_flight = false;
        state.last_registry_error = None;
        state.last_order = None;

        tracing::debug!(%dish_id, ?token, "Loading dish");

        let catalog = Arc::clone(&env.catalog);
        let fetch_dish = async_effect! {
            let result = catalog.dish(dish_id).await;
            Some(FoodDetailsAction::DishFetched { token, result })
        };

        let catalog = Arc::clone(&env.catalog);
        let fetch_status = async_effect! {
            let result = catalog
                .favorite_status(dish_id)
                .await
                .map(FavoriteStatus::from);
            Some(FoodDetailsAction::FavoriteStatusFetched { token, result })
        };

        Effect::merge(vec![fetch_dish, fetch_status])
    }

    /// Whether a catalog result still belongs to the running load
    fn accepts_load_result(state: &FoodDetailsState, token: LoadToken) -> bool {
        if token != state.token {
            tracing::debug!(?token, current = ?state.token, "Ignoring result of superseded load");
            return false;
        }
        if !matches!(state.phase, LoadPhase::Pending) {
            tracing::debug!(?token, "Ignoring result of settled load");
            return false;
        }
        true
    }

    fn fail_load(state: &mut FoodDetailsState, error: LoadError) {
        tracing::warn!(dish_id = ?state.dish_id, error = %error, "Failed to load food details");
        state.partial = PartialLoad::default();
        state.phase = LoadPhase::Failed(error);
    }

    fn complete_load(state: &mut FoodDetailsState, env: &FoodDetailsEnvironment) {
        if state.partial.dish.is_none() || state.partial.favorite.is_none() {
            return;
        }
        let PartialLoad { dish, favorite } = std::mem::take(&mut state.partial);
        let (Some(dish), Some(favorite)) = (dish, favorite) else {
            return;
        };

        tracing::info!(
            dish_id = %dish.id,
            extras = dish.extras.len(),
            favorite = favorite.is_favorite(),
            "Food details ready"
        );

        let formatted_price = env.formatter.format(dish.price);
        state.phase = LoadPhase::Ready(OrderComposition::new(dish, favorite, formatted_price));
    }

    fn dish_fetched(
        state: &mut FoodDetailsState,
        result: Result<Dish, CatalogError>,
        env: &FoodDetailsEnvironment,
    ) {
        match result {
            Ok(dish) => {
                state.partial.dish = Some(dish);
                Self::complete_load(state, env);
            },
            Err(error) => Self::fail_load(state, LoadError::Dish(error)),
        }
    }

    fn favorite_status_fetched(
        state: &mut FoodDetailsState,
        result: Result<FavoriteStatus, CatalogError>,
        env: &FoodDetailsEnvironment,
    ) {
        match result {
            Ok(favorite) => {
                state.partial.favorite = Some(favorite);
                Self::complete_load(state, env);
            },
            Err(error) => Self::fail_load(state, LoadError::FavoriteStatus(error)),
        }
    }

    fn toggle_favorite(
        state: &mut FoodDetailsState,
        env: &FoodDetailsEnvironment,
    ) -> Effect<FoodDetailsAction> {
        if state.favorite_in_flight {
            tracing::debug!("Favorite toggle already in flight");
            return Effect::None;
        }
        let token = state.token;
        let Some(composition) = state.composition() else {
            tracing::debug!("Favorite toggle ignored: not ready");
            return Effect::None;
        };

        let target = composition.favorite().toggled();
        let dish = composition.dish().clone();
        tracing::debug!(dish_id = %dish.id, ?target, "Updating favorite");

        state.favorite_in_flight = true;
        state.last_registry_error = None;

        let favorites = Arc::clone(&env.favorites);
        async_effect! {
            let result = match target {
                FavoriteStatus::Favorite => favorites.add(&dish).await,
                FavoriteStatus::NotFavorite => favorites.remove(dish.id).await,
            };
            match result {
                Ok(()) => Some(FoodDetailsAction::FavoriteUpdated { token, favorite: target }),
                Err(error) => Some(FoodDetailsAction::FavoriteUpdateFailed { token, error }),
            }
        }
    }

    fn finish_order(
        state: &FoodDetailsState,
        env: &FoodDetailsEnvironment,
    ) -> Effect<FoodDetailsAction> {
        let Some(composition) = state.composition() else {
            tracing::debug!("Finish order ignored: not ready");
            return Effect::None;
        };

        let summary = composition.summary(env.clock.now());
        tracing::info!(
            dish_id = %summary.dish_id,
            quantity = summary.quantity,
            total_cents = summary.total.cents(),
            "Finishing order"
        );

        let orders = Arc::clone(&env.orders);
        async_effect! {
            match orders.submit(summary.clone()).await {
                Ok(()) => Some(FoodDetailsAction::OrderFinished { summary }),
                Err(error) => Some(FoodDetailsAction::OrderFailed { error }),
            }
        }
    }
}

impl Reducer for FoodDetailsReducer {
    type State = FoodDetailsState;
    type Action = FoodDetailsAction;
    type Environment = FoodDetailsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FoodDetailsAction::Load { dish_id } => smallvec![Self::load(state, dish_id, env)],

            FoodDetailsAction::Retry => match (state.load_error().is_some(), state.dish_id) {
                (true, Some(dish_id)) => {
                    tracing::info!(%dish_id, "Retrying load");
                    smallvec![Self::load(state, dish_id, env)]
                },
                _ => {
                    tracing::debug!("Retry ignored: no failed load");
                    smallvec![Effect::None]
                },
            },

            FoodDetailsAction::IncrementExtra { extra_id } => {
                match state.composition_mut() {
                    Some(composition) => {
                        if !composition.increment_extra(extra_id) {
                            tracing::debug!(%extra_id, "Unknown extra");
                        }
                    },
                    None => tracing::debug!(%extra_id, "Extra change ignored: not ready"),
                }
                smallvec![Effect::None]
            },

            FoodDetailsAction::DecrementExtra { extra_id } => {
                match state.composition_mut() {
                    Some(composition) => {
                        if !composition.decrement_extra(extra_id) {
                            tracing::debug!(%extra_id, "Extra already at zero or unknown");
                        }
                    },
                    None => tracing::debug!(%extra_id, "Extra change ignored: not ready"),
                }
                smallvec![Effect::None]
            },

            FoodDetailsAction::IncrementFood => {
                match state.composition_mut() {
                    Some(composition) => composition.increment_quantity(),
                    None => tracing::debug!("Quantity change ignored: not ready"),
                }
                smallvec![Effect::None]
            },

            FoodDetailsAction::DecrementFood => {
                match state.composition_mut() {
                    Some(composition) => {
                        if !composition.decrement_quantity() {
                            tracing::debug!("Quantity already at one");
                        }
                    },
                    None => tracing::debug!("Quantity change ignored: not ready"),
                }
                smallvec![Effect::None]
            },

            FoodDetailsAction::ToggleFavorite => smallvec![Self::toggle_favorite(state, env)],

            FoodDetailsAction::FinishOrder => smallvec![Self::finish_order(state, env)],

            FoodDetailsAction::DishFetched { token, result } => {
                if Self::accepts_load_result(state, token) {
                    Self::dish_fetched(state, result, env);
                }
                smallvec![Effect::None]
            },

            FoodDetailsAction::FavoriteStatusFetched { token, result } => {
                if Self::accepts_load_result(state, token) {
                    Self::favorite_status_fetched(state, result, env);
                }
                smallvec![Effect::None]
            },

            FoodDetailsAction::FavoriteUpdated { token, favorite } => {
                if token == state.token {
                    state.favorite_in_flight = false;
                    if let Some(composition) = state.composition_mut() {
                        tracing::info!(dish_id = %composition.dish().id, ?favorite, "Favorite updated");
                        composition.set_favorite(favorite);
                    }
                } else {
                    tracing::debug!(?token, "Ignoring favorite update of superseded load");
                }
                smallvec![Effect::None]
            },

            FoodDetailsAction::FavoriteUpdateFailed { token, error } => {
                if token == state.token {
                    tracing::warn!(error = %error, "Failed to update favorite");
                    state.favorite_in_flight = false;
                    state.last_registry_error = Some(error);
                } else {
                    tracing::debug!(?token, "Ignoring favorite failure of superseded load");
                }
                smallvec![Effect::None]
            },

            FoodDetailsAction::OrderFinished { summary } => {
                state.last_order = Some(OrderOutcome::Finished(summary));
                smallvec![Effect::None]
            },

            FoodDetailsAction::OrderFailed { error } => {
                tracing::warn!(error = %error, "Failed to finish order");
                state.last_order = Some(OrderOutcome::Failed(error));
                smallvec![Effect::None]
            },
        }
    }
}
