//! Domain types for the food details screen.
//!
//! The catalog describes a [`Dish`] and the extras it can carry. Once both
//! catalog reads succeed the screen owns an [`OrderComposition`]: the dish,
//! one [`Extra`] per catalog extra with a selected quantity, the dish
//! quantity and the favorite flag. The total price is always derived from
//! the composition, never stored.

use crate::error::{AmountError, LoadError, OrderError, RegistryError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier of a dish
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DishId(u64);

impl DishId {
    /// Creates a new `DishId`
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an extra, unique within one dish
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraId(u64);

impl ExtraId {
    /// Creates a new `ExtraId`
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExtraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Money amount in cents
///
/// The catalog speaks decimal numbers (`"price": 19.9`); they are rounded
/// to the nearest cent when decoded so totals add up exactly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money(i64);

impl Money {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Creates a new money amount from cents
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the value in cents
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Creates a money amount from a decimal number, rounding half away
    /// from zero to the nearest cent
    ///
    /// # Errors
    ///
    /// Returns [`AmountError`] for negative, non-finite or huge amounts.
    #[allow(clippy::cast_possible_truncation)] // range checked before the cast
    pub fn from_decimal(amount: f64) -> Result<Self, AmountError> {
        if !amount.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if amount < 0.0 {
            return Err(AmountError::Negative);
        }
        let cents = (amount * 100.0).round();
        if cents > 9.0e15 {
            return Err(AmountError::OutOfRange);
        }
        Ok(Self(cents as i64))
    }

    /// Returns the value as a decimal number
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // exact for every amount `from_decimal` accepts
    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Adds two amounts, saturating at the numeric bounds
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiplies by a quantity, saturating at the numeric bounds
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl TryFrom<f64> for Money {
    type Error = AmountError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Self::from_decimal(amount)
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.to_decimal()
    }
}

/// An extra as the catalog defines it: no selected quantity yet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraOption {
    /// Identifier, unique within the dish
    pub id: ExtraId,
    /// Display name
    pub name: String,
    /// Price of one unit of this extra
    pub value: Money,
}

/// A dish record from the catalog
///
/// Immutable for the lifetime of a screen session; a new load replaces it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    /// Catalog identifier
    pub id: DishId,
    /// Display name
    pub name: String,
    /// Description text
    pub description: String,
    /// Price of one dish without extras
    pub price: Money,
    /// Image URI
    pub image_url: String,
    /// Extras the dish can carry, in display order
    #[serde(default)]
    pub extras: Vec<ExtraOption>,
}

/// An extra with the quantity the user selected
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extra {
    id: ExtraId,
    name: String,
    value: Money,
    quantity: u32,
}

impl Extra {
    fn unselected(option: &ExtraOption) -> Self {
        Self {
            id: option.id,
            name: option.name.clone(),
            value: option.value,
            quantity: 0,
        }
    }

    /// Identifier
    #[must_use]
    pub const fn id(&self) -> ExtraId {
        self.id
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price of one unit
    #[must_use]
    pub const fn value(&self) -> Money {
        self.value
    }

    /// Selected quantity
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `quantity × value`
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.value.times(self.quantity)
    }
}

/// Whether the dish is in the user's favorites
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FavoriteStatus {
    /// Not in the favorites registry
    NotFavorite,
    /// In the favorites registry
    Favorite,
}

impl FavoriteStatus {
    /// The state a toggle leads to
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::NotFavorite => Self::Favorite,
            Self::Favorite => Self::NotFavorite,
        }
    }

    /// `true` for [`FavoriteStatus::Favorite`]
    #[must_use]
    pub const fn is_favorite(self) -> bool {
        matches!(self, Self::Favorite)
    }
}

impl From<bool> for FavoriteStatus {
    fn from(favorite: bool) -> Self {
        if favorite { Self::Favorite } else { Self::NotFavorite }
    }
}

/// The selection state of one screen session
///
/// Fields are private: only the reducer changes a composition, through the
/// crate-private mutators below. The mutators keep the invariants:
/// the dish quantity never drops below 1, extra quantities never go below 0,
/// and the extras sequence keeps exactly the dish's extras in catalog order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderComposition {
    dish: Dish,
    extras: Vec<Extra>,
    quantity: u32,
    favorite: FavoriteStatus,
    formatted_price: String,
}

impl OrderComposition {
    /// Starts a composition for a freshly loaded dish: quantity 1, every
    /// extra at 0
    ///
    /// A catalog that repeats an extra identifier keeps only the first entry.
    pub(crate) fn new(dish: Dish, favorite: FavoriteStatus, formatted_price: String) -> Self {
        let mut extras: Vec<Extra> = Vec::with_capacity(dish.extras.len());
        for option in &dish.extras {
            if extras.iter().any(|extra| extra.id == option.id) {
                tracing::warn!(dish_id = %dish.id, extra_id = %option.id, "Duplicate extra ignored");
                continue;
            }
            extras.push(Extra::unselected(option));
        }

        Self {
            dish,
            extras,
            quantity: 1,
            favorite,
            formatted_price,
        }
    }

    /// The loaded dish
    #[must_use]
    pub const fn dish(&self) -> &Dish {
        &self.dish
    }

    /// Extras in display order
    #[must_use]
    pub fn extras(&self) -> &[Extra] {
        &self.extras
    }

    /// Looks up an extra by identifier
    #[must_use]
    pub fn extra(&self, id: ExtraId) -> Option<&Extra> {
        self.extras.iter().find(|extra| extra.id == id)
    }

    /// Number of dishes ordered (at least 1)
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Favorite flag
    #[must_use]
    pub const fn favorite(&self) -> FavoriteStatus {
        self.favorite
    }

    /// Unit price of the dish, formatted when the dish was loaded
    #[must_use]
    pub fn formatted_price(&self) -> &str {
        &self.formatted_price
    }

    /// Σ `extra.quantity × extra.value`
    #[must_use]
    pub fn extras_total(&self) -> Money {
        self.extras
            .iter()
            .fold(Money::ZERO, |total, extra| total.saturating_add(extra.subtotal()))
    }

    /// Price of one dish carrying the selected extras
    #[must_use]
    pub fn unit_total(&self) -> Money {
        self.dish.price.saturating_add(self.extras_total())
    }

    /// `(dish.price + extras_total) × quantity`, computed from current state
    #[must_use]
    pub fn total(&self) -> Money {
        self.unit_total().times(self.quantity)
    }

    /// Snapshot for order submission: extras with a positive quantity only
    #[must_use]
    pub fn summary(&self, composed_at: DateTime<Utc>) -> OrderSummary {
        OrderSummary {
            dish_id: self.dish.id,
            dish_name: self.dish.name.clone(),
            extras: self
                .extras
                .iter()
                .filter(|extra| extra.quantity > 0)
                .map(|extra| OrderLine {
                    extra_id: extra.id,
                    name: extra.name.clone(),
                    quantity: extra.quantity,
                    value: extra.value,
                })
                .collect(),
            quantity: self.quantity,
            total: self.total(),
            composed_at,
        }
    }

    /// Adds one unit of an extra. Returns `false` if the dish has no such extra.
    pub(crate) fn increment_extra(&mut self, id: ExtraId) -> bool {
        match self.extras.iter_mut().find(|extra| extra.id == id) {
            Some(extra) => {
                extra.quantity = extra.quantity.saturating_add(1);
                true
            },
            None => false,
        }
    }

    /// Removes one unit of an extra, stopping at 0. Returns `false` if
    /// nothing changed.
    pub(crate) fn decrement_extra(&mut self, id: ExtraId) -> bool {
        match self.extras.iter_mut().find(|extra| extra.id == id) {
            Some(extra) if extra.quantity > 0 => {
                extra.quantity -= 1;
                true
            },
            _ => false,
        }
    }

    pub(crate) const fn increment_quantity(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Removes one dish, stopping at 1. Returns `false` if nothing changed.
    pub(crate) const fn decrement_quantity(&mut self) -> bool {
        if self.quantity > 1 {
            self.quantity -= 1;
            true
        } else {
            false
        }
    }

    pub(crate) const fn set_favorite(&mut self, favorite: FavoriteStatus) {
        self.favorite = favorite;
    }
}

/// One extra line of a finished order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Extra identifier
    pub extra_id: ExtraId,
    /// Extra name
    pub name: String,
    /// Selected quantity (always positive)
    pub quantity: u32,
    /// Unit value
    pub value: Money,
}

/// What the user confirmed on the screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Dish identifier
    pub dish_id: DishId,
    /// Dish name
    pub dish_name: String,
    /// Extras with a positive quantity, in display order
    pub extras: Vec<OrderLine>,
    /// Number of dishes
    pub quantity: u32,
    /// Total price
    pub total: Money,
    /// When the order was confirmed
    pub composed_at: DateTime<Utc>,
}

/// Outcome of the last `FinishOrder`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderOutcome {
    /// The order sink accepted the order
    Finished(OrderSummary),
    /// The order sink failed
    Failed(OrderError),
}

/// Identifies one load request; feedback carrying an older token is stale
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LoadToken(u64);

impl LoadToken {
    #[must_use]
    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Two-phase initialization result
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Catalog reads not complete (or not started)
    #[default]
    Pending,
    /// Both reads succeeded
    Ready(OrderComposition),
    /// A read failed; nothing from the attempt is kept
    Failed(LoadError),
}

/// Catalog results collected while the other read is still outstanding
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct PartialLoad {
    pub(crate) dish: Option<Dish>,
    pub(crate) favorite: Option<FavoriteStatus>,
}

/// State of the food details screen
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FoodDetailsState {
    pub(crate) dish_id: Option<DishId>,
    pub(crate) token: LoadToken,
    pub(crate) phase: LoadPhase,
    pub(crate) partial: PartialLoad,
    pub(crate) favorite_in_flight: bool,
    pub(crate) last_registry_error: Option<RegistryError>,
    pub(crate) last_order: Option<OrderOutcome>,
}

impl FoodDetailsState {
    /// Creates the state of a screen that has not loaded anything yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dish identifier of the current (or last attempted) load
    #[must_use]
    pub const fn dish_id(&self) -> Option<DishId> {
        self.dish_id
    }

    /// Token of the current load
    #[must_use]
    pub const fn token(&self) -> LoadToken {
        self.token
    }

    /// Initialization phase
    #[must_use]
    pub const fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    /// The composition, once loaded
    #[must_use]
    pub const fn composition(&self) -> Option<&OrderComposition> {
        match &self.phase {
            LoadPhase::Ready(composition) => Some(composition),
            LoadPhase::Pending | LoadPhase::Failed(_) => None,
        }
    }

    /// The load failure, if initialization failed
    #[must_use]
    pub const fn load_error(&self) -> Option<&LoadError> {
        match &self.phase {
            LoadPhase::Failed(error) => Some(error),
            LoadPhase::Pending | LoadPhase::Ready(_) => None,
        }
    }

    /// `true` once the composition is available
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.phase, LoadPhase::Ready(_))
    }

    /// `true` while a favorite add/remove is awaiting the registry
    #[must_use]
    pub const fn favorite_in_flight(&self) -> bool {
        self.favorite_in_flight
    }

    /// Failure of the last favorite toggle, cleared by the next toggle
    #[must_use]
    pub const fn last_registry_error(&self) -> Option<&RegistryError> {
        self.last_registry_error.as_ref()
    }

    /// Outcome of the last finish-order request
    #[must_use]
    pub const fn last_order(&self) -> Option<&OrderOutcome> {
        self.last_order.as_ref()
    }

    pub(crate) const fn composition_mut(&mut self) -> Option<&mut OrderComposition> {
        match &mut self.phase {
            LoadPhase::Ready(composition) => Some(composition),
            LoadPhase::Pending | LoadPhase::Failed(_) => None,
        }
    }
}
