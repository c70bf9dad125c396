//! HTTP adapter tests against a mock food API.

#![allow(clippy::unwrap_used)] // Test code
#![allow(clippy::panic)] // Test code

use food_details::{
    Catalog, CatalogError, DishId, ExtraId, FavoriteRegistry, FoodApiClient, Money,
    RegistryError,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> FoodApiClient {
    FoodApiClient::new(server.uri(), Duration::from_secs(2)).unwrap()
}

fn dish_json() -> serde_json::Value {
    json!({
        "id": 1,
        "name": "Ao molho",
        "description": "Macarrão ao molho branco, fughi e cheiro verde das montanhas.",
        "price": 19.9,
        "category": 1,
        "image_url": "https://example.com/food1.png",
        "thumbnail_url": "https://example.com/food1-thumb.png",
        "extras": [
            {"id": 1, "name": "Bacon", "value": 1.5},
            {"id": 2, "name": "Frango", "value": 2}
        ]
    })
}

#[tokio::test]
async fn test_dish_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foods/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dish_json()))
        .expect(1)
        .mount(&server)
        .await;

    let dish = client(&server).dish(DishId::new(1)).await.unwrap();

    assert_eq!(dish.name, "Ao molho");
    assert_eq!(dish.price, Money::from_cents(1990));
    assert_eq!(dish.extras.len(), 2);
    assert_eq!(dish.extras[1].id, ExtraId::new(2));
    assert_eq!(dish.extras[1].value, Money::from_cents(200));
}

#[tokio::test]
async fn test_dish_errors_are_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foods/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/foods/500"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/foods/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2})))
        .mount(&server)
        .await;

    let client = client(&server);

    assert_eq!(
        client.dish(DishId::new(404)).await,
        Err(CatalogError::NotFound(DishId::new(404)))
    );
    assert_eq!(
        client.dish(DishId::new(500)).await,
        Err(CatalogError::Status { status: 500 })
    );
    assert!(matches!(
        client.dish(DishId::new(2)).await,
        Err(CatalogError::Decode(_))
    ));
}

#[tokio::test]
async fn test_network_failure_is_reported() {
    // Nothing listens on port 1
    let client = FoodApiClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();

    assert!(matches!(
        client.dish(DishId::new(1)).await,
        Err(CatalogError::Network(_))
    ));
    assert!(matches!(
        client.remove(DishId::new(1)).await,
        Err(RegistryError::Network(_))
    ));
}

#[tokio::test]
async fn test_favorite_status_presence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/favorites/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dish_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/favorites/2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/favorites/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/favorites/4"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/favorites/5"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    for (id, body) in [(6, "false"), (7, "0"), (8, "\"\""), (9, "{}")] {
        Mock::given(method("GET"))
            .and(path(format!("/favorites/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }

    let client = client(&server);

    assert_eq!(client.favorite_status(DishId::new(1)).await, Ok(true));
    assert_eq!(client.favorite_status(DishId::new(6)).await, Ok(false));
    assert_eq!(client.favorite_status(DishId::new(7)).await, Ok(false));
    assert_eq!(client.favorite_status(DishId::new(8)).await, Ok(false));
    assert_eq!(client.favorite_status(DishId::new(9)).await, Ok(true));
    assert_eq!(client.favorite_status(DishId::new(2)).await, Ok(false));
    assert_eq!(client.favorite_status(DishId::new(3)).await, Ok(false));
    assert_eq!(client.favorite_status(DishId::new(4)).await, Ok(false));
    assert_eq!(
        client.favorite_status(DishId::new(5)).await,
        Err(CatalogError::Status { status: 503 })
    );
}

#[tokio::test]
async fn test_add_posts_the_dish() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foods/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dish_json()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/favorites"))
        .and(body_json(json!({
            "id": 1,
            "name": "Ao molho",
            "description": "Macarrão ao molho branco, fughi e cheiro verde das montanhas.",
            "price": 19.9,
            "image_url": "https://example.com/food1.png",
            "extras": [
                {"id": 1, "name": "Bacon", "value": 1.5},
                {"id": 2, "name": "Frango", "value": 2.0}
            ]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let dish = client.dish(DishId::new(1)).await.unwrap();

    client.add(&dish).await.unwrap();
}

#[tokio::test]
async fn test_remove_deletes_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/favorites/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/favorites/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server);

    client.remove(DishId::new(1)).await.unwrap();
    assert_eq!(
        client.remove(DishId::new(2)).await,
        Err(RegistryError::Status { status: 500 })
    );
}
