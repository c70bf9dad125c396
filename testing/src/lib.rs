//! # Composer Testing
//!
//! Testing utilities and helpers for reducers built on `composer-core`.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given/When/Then harness for reducers
//! - Effect assertions and an effect driver that runs futures inline
//! - Deterministic clocks
//!
//! ## Example
//!
//! ```ignore
//! use composer_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(FoodDetailsReducer::new())
//!     .with_env(test_environment())
//!     .given_state(ready_state())
//!     .when_action(FoodDetailsAction::IncrementFood)
//!     .then_state(|state| assert_eq!(state.composition().map(OrderComposition::quantity), Some(2)))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use composer_core::environment::Clock;

/// Fluent Given/When/Then testing for reducers
pub mod reducer_test;

/// Mock implementations of core Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// # Example
    ///
    /// ```
    /// use composer_testing::mocks::FixedClock;
    /// use composer_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}

/// Driving effects without a Store
pub mod helpers {
    use composer_core::effect::Effect;
    use futures::future::{BoxFuture, FutureExt, join_all};

    /// Run every effect to completion and collect the actions they produce
    ///
    /// Futures inside a `Parallel` are awaited together; the returned
    /// actions follow the order the effects were declared in, not the
    /// order they finished in.
    pub async fn run_effects<A: Send + 'static>(effects: Vec<Effect<A>>) -> Vec<A> {
        join_all(effects.into_iter().map(run_effect))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    fn run_effect<A: Send + 'static>(effect: Effect<A>) -> BoxFuture<'static, Vec<A>> {
        match effect {
            Effect::None => async { Vec::new() }.boxed(),
            Effect::Parallel(effects) => run_effects(effects).boxed(),
            Effect::Future(fut) => async move { fut.await.into_iter().collect() }.boxed(),
        }
    }
}

// Re-export commonly used items
pub use helpers::run_effects;
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
