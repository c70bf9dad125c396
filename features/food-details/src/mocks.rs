//! In-memory collaborators for tests and offline runs.
//!
//! Calls do their work when the returned future is polled, like a real
//! request: a future that is dropped unpolled leaves no trace. Every executed
//! call is counted, and reads or writes can be switched to fail to exercise
//! error paths.

use crate::environment::{BoxedResult, Catalog, FavoriteRegistry, OrderSink};
use crate::error::{CatalogError, OrderError, RegistryError};
use crate::types::{Dish, DishId, ExtraId, ExtraOption, Money, OrderSummary};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct ApiState {
    dishes: Mutex<HashMap<DishId, Dish>>,
    favorites: Mutex<HashSet<DishId>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    dish_calls: AtomicUsize,
    status_calls: AtomicUsize,
    add_calls: AtomicUsize,
    remove_calls: AtomicUsize,
}

impl ApiState {
    fn read_failure(&self) -> Option<CatalogError> {
        self.fail_reads
            .load(Ordering::SeqCst)
            .then(|| CatalogError::Network("simulated outage".to_string()))
    }

    fn write_failure(&self) -> Option<RegistryError> {
        self.fail_writes
            .load(Ordering::SeqCst)
            .then_some(RegistryError::Status { status: 503 })
    }
}

/// Catalog and favorites registry over one shared in-memory favorites set
#[derive(Debug, Default)]
pub struct InMemoryFoodApi {
    state: Arc<ApiState>,
}

impl InMemoryFoodApi {
    /// Creates an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding these dishes
    #[must_use]
    pub fn with_dishes(dishes: impl IntoIterator<Item = Dish>) -> Self {
        let api = Self::new();
        lock(&api.state.dishes).extend(dishes.into_iter().map(|dish| (dish.id, dish)));
        api
    }

    /// Puts a dish in the favorites set
    pub fn mark_favorite(&self, id: DishId) {
        lock(&self.state.favorites).insert(id);
    }

    /// Whether a dish is in the favorites set
    #[must_use]
    pub fn is_favorite(&self, id: DishId) -> bool {
        lock(&self.state.favorites).contains(&id)
    }

    /// Makes catalog reads fail with a network error
    pub fn fail_reads(&self, fail: bool) {
        self.state.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes favorite writes fail with status 503
    pub fn fail_writes(&self, fail: bool) {
        self.state.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of dish reads
    #[must_use]
    pub fn dish_calls(&self) -> usize {
        self.state.dish_calls.load(Ordering::SeqCst)
    }

    /// Number of favorite status reads
    #[must_use]
    pub fn status_calls(&self) -> usize {
        self.state.status_calls.load(Ordering::SeqCst)
    }

    /// Number of favorite adds
    #[must_use]
    pub fn add_calls(&self) -> usize {
        self.state.add_calls.load(Ordering::SeqCst)
    }

    /// Number of favorite removes
    #[must_use]
    pub fn remove_calls(&self) -> usize {
        self.state.remove_calls.load(Ordering::SeqCst)
    }
}

impl Catalog for InMemoryFoodApi {
    fn dish(&self, id: DishId) -> BoxedResult<Dish, CatalogError> {
        let state = Arc::clone(&self.state);
        Box::pin(async move {
            state.dish_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(error) = state.read_failure() {
                return Err(error);
            }
            lock(&state.dishes)
                .get(&id)
                .cloned()
                .ok_or(CatalogError::NotFound(id))
        })
    }

    fn favorite_status(&self, id: DishId) -> BoxedResult<bool, CatalogError> {
        let state = Arc::clone(&self.state);
        Box::pin(async move {
            state.status_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(error) = state.read_failure() {
                return Err(error);
            }
            Ok(lock(&state.favorites).contains(&id))
        })
    }
}

impl FavoriteRegistry for InMemoryFoodApi {
    fn add(&self, dish: &Dish) -> BoxedResult<(), RegistryError> {
        let state = Arc::clone(&self.state);
        let id = dish.id;
        Box::pin(async move {
            state.add_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(error) = state.write_failure() {
                return Err(error);
            }
            lock(&state.favorites).insert(id);
            Ok(())
        })
    }

    fn remove(&self, id: DishId) -> BoxedResult<(), RegistryError> {
        let state = Arc::clone(&self.state);
        Box::pin(async move {
            state.remove_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(error) = state.write_failure() {
                return Err(error);
            }
            lock(&state.favorites).remove(&id);
            Ok(())
        })
    }
}

/// Order sink that keeps every order it receives
#[derive(Debug, Default)]
pub struct RecordingOrderSink {
    orders: Arc<Mutex<Vec<OrderSummary>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingOrderSink {
    /// Creates an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes submissions fail
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Orders received so far, oldest first
    #[must_use]
    pub fn orders(&self) -> Vec<OrderSummary> {
        lock(&self.orders).clone()
    }
}

impl OrderSink for RecordingOrderSink {
    fn submit(&self, order: OrderSummary) -> BoxedResult<(), OrderError> {
        let orders = Arc::clone(&self.orders);
        let fail = Arc::clone(&self.fail);
        Box::pin(async move {
            if fail.load(Ordering::SeqCst) {
                return Err(OrderError::Rejected("kitchen closed".to_string()));
            }
            lock(&orders).push(order);
            Ok(())
        })
    }
}

fn extra(id: u64, name: &str, cents: i64) -> ExtraOption {
    ExtraOption {
        id: ExtraId::new(id),
        name: name.to_string(),
        value: Money::from_cents(cents),
    }
}

/// Dish 1: price 10.00 with a single 2.00 extra
#[must_use]
pub fn sample_dish() -> Dish {
    Dish {
        id: DishId::new(1),
        name: "Ao molho".to_string(),
        description: "Macarrão ao molho branco, fughi e cheiro verde das montanhas.".to_string(),
        price: Money::from_cents(1000),
        image_url: "https://storage.googleapis.com/golden-wind/bootcamp-gostack/desafio-food/food1.png"
            .to_string(),
        extras: vec![extra(1, "Bacon", 200)],
    }
}

/// A small menu for offline runs, starting with [`sample_dish`]
#[must_use]
pub fn sample_menu() -> Vec<Dish> {
    vec![
        sample_dish(),
        Dish {
            id: DishId::new(2),
            name: "Veggie".to_string(),
            description: "Macarrão com pimentão, ervilha e ervas finas colhidas no himalaia."
                .to_string(),
            price: Money::from_cents(2190),
            image_url:
                "https://storage.googleapis.com/golden-wind/bootcamp-gostack/desafio-food/food2.png"
                    .to_string(),
            extras: vec![extra(2, "Ervilha", 150), extra(3, "Queijo ralado", 250)],
        },
        Dish {
            id: DishId::new(3),
            name: "A la Camarón".to_string(),
            description: "Macarrão com vegetais de primeira linha e camarão dos 7 mares."
                .to_string(),
            price: Money::from_cents(2590),
            image_url:
                "https://storage.googleapis.com/golden-wind/bootcamp-gostack/desafio-food/food3.png"
                    .to_string(),
            extras: vec![extra(4, "Camarão extra", 600), extra(5, "Limão", 50)],
        },
    ]
}
