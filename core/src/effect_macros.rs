//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The block evaluates to `Option<Action>`; `Some` is fed back into the
/// reducer by the runtime.
///
/// # Example
///
/// ```rust,ignore
/// use composer_core::async_effect;
///
/// let catalog = Arc::clone(&env.catalog);
/// async_effect! {
///     let result = catalog.dish(dish_id).await;
///     Some(FoodDetailsAction::DishFetched { token, result })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
