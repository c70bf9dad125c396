//! Read-only snapshot for the presentation layer.

use crate::pricing::PriceFormatter;
use crate::types::{DishId, ExtraId, FoodDetailsState, LoadPhase, OrderOutcome};
use serde::Serialize;
use std::fmt;

/// What the screen shows as a whole
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewStatus {
    /// Catalog reads are outstanding
    Loading,
    /// The composition is shown
    Ready,
    /// Loading failed; the screen offers a retry
    Error {
        /// Human readable failure
        message: String,
    },
}

/// One extra row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExtraView {
    /// Identifier to send back with intents
    pub id: ExtraId,
    /// Name
    pub name: String,
    /// Formatted unit value
    pub value: String,
    /// Selected quantity
    pub quantity: u32,
}

/// The loaded composition as displayed
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompositionView {
    /// Dish identifier
    pub dish_id: DishId,
    /// Dish name
    pub name: String,
    /// Dish description
    pub description: String,
    /// Image URI
    pub image_url: String,
    /// Formatted unit price of the dish
    pub price: String,
    /// Extras in display order
    pub extras: Vec<ExtraView>,
    /// Number of dishes
    pub quantity: u32,
    /// Favorite flag
    pub favorite: bool,
    /// Formatted total
    pub total: String,
}

/// Snapshot of the food details screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FoodDetailsView {
    /// Overall status
    #[serde(flatten)]
    pub status: ViewStatus,
    /// Present once ready
    pub composition: Option<CompositionView>,
    /// A favorite change is awaiting the registry
    pub favorite_pending: bool,
    /// Why the last favorite change failed
    pub favorite_error: Option<String>,
    /// Result of the last finish-order request
    pub order: Option<String>,
}

impl FoodDetailsState {
    /// Builds the snapshot the presentation layer renders
    ///
    /// The total is computed from the current quantities on every call.
    #[must_use]
    pub fn view(&self, formatter: &dyn PriceFormatter) -> FoodDetailsView {
        let status = match self.phase() {
            LoadPhase::Pending => ViewStatus::Loading,
            LoadPhase::Ready(_) => ViewStatus::Ready,
            LoadPhase::Failed(error) => ViewStatus::Error {
                message: error.to_string(),
            },
        };

        let composition = self.composition().map(|composition| {
            let dish = composition.dish();
            CompositionView {
                dish_id: dish.id,
                name: dish.name.clone(),
                description: dish.description.clone(),
                image_url: dish.image_url.clone(),
                price: composition.formatted_price().to_string(),
                extras: composition
                    .extras()
                    .iter()
                    .map(|extra| ExtraView {
                        id: extra.id(),
                        name: extra.name().to_string(),
                        value: formatter.format(extra.value()),
                        quantity: extra.quantity(),
                    })
                    .collect(),
                quantity: composition.quantity(),
                favorite: composition.favorite().is_favorite(),
                total: formatter.format(composition.total()),
            }
        });

        let order = self.last_order().map(|outcome| match outcome {
            OrderOutcome::Finished(summary) => {
                format!("order confirmed: {}", formatter.format(summary.total))
            },
            OrderOutcome::Failed(error) => format!("order failed: {error}"),
        });

        FoodDetailsView {
            status,
            composition,
            favorite_pending: self.favorite_in_flight(),
            favorite_error: self.last_registry_error().map(ToString::to_string),
            order,
        }
    }
}

impl fmt::Display for FoodDetailsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let composition = match (&self.status, &self.composition) {
            (ViewStatus::Loading, _) => return writeln!(f, "Loading..."),
            (ViewStatus::Error { message }, _) => {
                return writeln!(f, "Error: {message}\n(type `retry` to try again)");
            },
            (ViewStatus::Ready, None) => return Ok(()),
            (ViewStatus::Ready, Some(composition)) => composition,
        };

        let heart = match (composition.favorite, self.favorite_pending) {
            (_, true) => "(...)",
            (true, false) => "[♥]",
            (false, false) => "[♡]",
        };
        writeln!(f, "{} {heart}", composition.name)?;
        writeln!(f, "  {}", composition.description)?;
        writeln!(f, "  {}", composition.price)?;

        if !composition.extras.is_empty() {
            writeln!(f, "Extras:")?;
        }
        for extra in &composition.extras {
            writeln!(
                f,
                "  [{}] {:<20} {:>12}  x{}",
                extra.id, extra.name, extra.value, extra.quantity
            )?;
        }

        writeln!(f, "Quantity: {}", composition.quantity)?;
        writeln!(f, "Total: {}", composition.total)?;

        if let Some(error) = &self.favorite_error {
            writeln!(f, "Favorite not updated: {error}")?;
        }
        if let Some(order) = &self.order {
            writeln!(f, "{order}")?;
        }
        Ok(())
    }
}
