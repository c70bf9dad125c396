//! HTTP client for the food catalog and favorites API.
//!
//! | call | request |
//! |------|---------|
//! | dish | `GET {base}/foods/{id}` |
//! | favorite status | `GET {base}/favorites/{id}` |
//! | add favorite | `POST {base}/favorites` with the dish as JSON |
//! | remove favorite | `DELETE {base}/favorites/{id}` |

use crate::environment::{BoxedResult, Catalog, FavoriteRegistry};
use crate::error::{CatalogError, RegistryError};
use crate::types::{Dish, DishId};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Client for the food API
#[derive(Clone, Debug)]
pub struct FoodApiClient {
    client: Client,
    base_url: String,
}

impl FoodApiClient {
    /// Creates a client for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a client sharing an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// A favorite record counts as present unless the body is `null`, `false`,
/// zero or an empty string
fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl Catalog for FoodApiClient {
    fn dish(&self, id: DishId) -> BoxedResult<Dish, CatalogError> {
        let request = self.client.get(self.url(&format!("/foods/{id}")));

        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| CatalogError::Network(e.to_string()))?;

            match response.status() {
                StatusCode::OK => response
                    .json::<Dish>()
                    .await
                    .map_err(|e| CatalogError::Decode(e.to_string())),
                StatusCode::NOT_FOUND => Err(CatalogError::NotFound(id)),
                status => Err(CatalogError::Status {
                    status: status.as_u16(),
                }),
            }
        })
    }

    fn favorite_status(&self, id: DishId) -> BoxedResult<bool, CatalogError> {
        let request = self.client.get(self.url(&format!("/favorites/{id}")));

        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| CatalogError::Network(e.to_string()))?;

            match response.status() {
                StatusCode::NOT_FOUND => Ok(false),
                status if status.is_success() => {
                    let body = response
                        .bytes()
                        .await
                        .map_err(|e| CatalogError::Network(e.to_string()))?;
                    if body.iter().all(u8::is_ascii_whitespace) {
                        return Ok(false);
                    }
                    let value: serde_json::Value = serde_json::from_slice(&body)
                        .map_err(|e| CatalogError::Decode(e.to_string()))?;
                    Ok(is_truthy(&value))
                },
                status => Err(CatalogError::Status {
                    status: status.as_u16(),
                }),
            }
        })
    }
}

impl FavoriteRegistry for FoodApiClient {
    fn add(&self, dish: &Dish) -> BoxedResult<(), RegistryError> {
        let request = self.client.post(self.url("/favorites")).json(dish);

        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| RegistryError::Network(e.to_string()))?;

            if response.status().is_success() {
                Ok(())
            } else {
                Err(RegistryError::Status {
                    status: response.status().as_u16(),
                })
            }
        })
    }

    fn remove(&self, id: DishId) -> BoxedResult<(), RegistryError> {
        let request = self.client.delete(self.url(&format!("/favorites/{id}")));

        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| RegistryError::Network(e.to_string()))?;

            if response.status().is_success() {
                Ok(())
            } else {
                Err(RegistryError::Status {
                    status: response.status().as_u16(),
                })
            }
        })
    }
}
