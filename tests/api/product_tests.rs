//! Product API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{product_body, TestApp};

#[tokio::test]
async fn test_create_product_and_read_with_category() {
    let app = TestApp::new();
    let category_id = app.create_category("Electronics").await;

    let response = app
        .server
        .post("/api/v1/products")
        .json(&json!({
            "name": "Phone",
            "description": "Smartphone",
            "sku": "P-1",
            "price": 199.99,
            "stock": 5,
            "imageUrl": "https://cdn.example.com/phone.png",
            "categoryId": category_id,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let product_id = response.json::<Value>()["id"]
        .as_str()
        .expect("id in body")
        .to_string();

    let response = app
        .server
        .get(&format!("/api/v1/products/{}", product_id))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["id"], product_id.as_str());
    assert_eq!(body["name"], "Phone");
    assert_eq!(body["sku"], "P-1");
    assert_eq!(body["price"], 199.99);
    assert_eq!(body["stock"], 5);
    assert_eq!(body["imageUrl"], "https://cdn.example.com/phone.png");
    assert_eq!(body["categoryId"], category_id.as_str());
    assert_eq!(body["category"]["id"], category_id.as_str());
    assert_eq!(body["category"]["name"], "Electronics");
}

#[tokio::test]
async fn test_create_product_with_missing_category() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/v1/products")
        .json(&product_body("Phone", "P-1", 199.99, "missing"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error_code"], "NOT_FOUND");
    assert_eq!(app.products.len(), 0);
}

#[tokio::test]
async fn test_create_product_rejects_negative_stock() {
    let app = TestApp::new();
    let category_id = app.create_category("Electronics").await;

    let mut body = product_body("Phone", "P-1", 199.99, &category_id);
    body["stock"] = json!(-1);

    let response = app.server.post("/api/v1/products").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error_code"], "INVALID_ARGUMENT");
    assert_eq!(body["message"], "Validation error: stock: Stock cannot be negative");
    assert_eq!(app.products.len(), 0);
}

#[tokio::test]
async fn test_get_missing_product_is_not_found() {
    let app = TestApp::new();

    app.server
        .get("/api/v1/products/missing")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inverted_price_range_is_rejected() {
    let app = TestApp::new();

    let response = app
        .server
        .get("/api/v1/products")
        .add_query_param("minPrice", 100)
        .add_query_param("maxPrice", 50)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error_code"], "INVALID_ARGUMENT");
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("min price cannot be greater than max price"));
    assert!(app.products.last_filter().is_none());
}

#[tokio::test]
async fn test_nan_price_bound_is_rejected() {
    let app = TestApp::new();

    let response = app
        .server
        .get("/api/v1/products")
        .add_query_param("minPrice", "NaN")
        .add_query_param("maxPrice", 50)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error_code"], "INVALID_ARGUMENT");
    assert_eq!(body["message"], "price bounds must be finite numbers");
    assert!(app.products.last_filter().is_none());
}

#[tokio::test]
async fn test_list_applies_every_filter() {
    let app = TestApp::new();
    let electronics = app.create_category("Electronics").await;
    let books = app.create_category("Books").await;

    app.create_product("Phone", "P-1", 199.99, &electronics).await;
    app.create_product("Phone Case", "P-2", 19.99, &electronics).await;
    app.create_product("Tablet", "T-1", 399.0, &electronics).await;
    app.create_product("Phone Book", "B-1", 25.0, &books).await;

    let response = app
        .server
        .get("/api/v1/products")
        .add_query_param("name", "phone")
        .add_query_param("categoryId", &electronics)
        .add_query_param("minPrice", 20)
        .add_query_param("maxPrice", 200)
        .await;

    response.assert_status_ok();
    let products = response.json::<Vec<Value>>();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["sku"], "P-1");
    assert_eq!(products[0]["category"]["name"], "Electronics");
}

#[tokio::test]
async fn test_list_normalizes_pagination() {
    let app = TestApp::new();

    app.server
        .get("/api/v1/products")
        .add_query_param("limit", 500)
        .add_query_param("offset", -3)
        .await
        .assert_status_ok();

    let filter = app.products.last_filter().expect("repository invoked");
    assert_eq!(filter.pagination.limit, 100);
    assert_eq!(filter.pagination.offset, 0);
}

#[tokio::test]
async fn test_partial_update_keeps_untouched_fields() {
    let app = TestApp::new();
    let category_id = app.create_category("Electronics").await;
    let product_id = app.create_product("Phone", "P-1", 199.99, &category_id).await;

    let response = app
        .server
        .put(&format!("/api/v1/products/{}", product_id))
        .json(&json!({ "description": "", "price": 149.5 }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "updated" }));

    let body: Value = app
        .server
        .get(&format!("/api/v1/products/{}", product_id))
        .await
        .json();
    assert_eq!(body["name"], "Phone");
    assert_eq!(body["description"], "");
    assert_eq!(body["price"], 149.5);
    assert_eq!(body["sku"], "P-1");
}

#[tokio::test]
async fn test_update_can_clear_image() {
    let app = TestApp::new();
    let category_id = app.create_category("Electronics").await;

    let mut body = product_body("Phone", "P-1", 199.99, &category_id);
    body["imageUrl"] = json!("https://cdn.example.com/phone.png");
    let response = app.server.post("/api/v1/products").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    let product_id = response.json::<Value>()["id"]
        .as_str()
        .expect("id in body")
        .to_string();

    app.server
        .put(&format!("/api/v1/products/{}", product_id))
        .json(&json!({ "imageUrl": null }))
        .await
        .assert_status_ok();

    let body: Value = app
        .server
        .get(&format!("/api/v1/products/{}", product_id))
        .await
        .json();
    assert_eq!(body["imageUrl"], Value::Null);
}

#[tokio::test]
async fn test_update_with_empty_image_url_clears_image() {
    let app = TestApp::new();
    let category_id = app.create_category("Electronics").await;

    let mut body = product_body("Phone", "P-1", 199.99, &category_id);
    body["imageUrl"] = json!("https://cdn.example.com/phone.png");
    let response = app.server.post("/api/v1/products").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    let product_id = response.json::<Value>()["id"]
        .as_str()
        .expect("id in body")
        .to_string();

    app.server
        .put(&format!("/api/v1/products/{}", product_id))
        .json(&json!({ "imageUrl": "" }))
        .await
        .assert_status_ok();

    let body: Value = app
        .server
        .get(&format!("/api/v1/products/{}", product_id))
        .await
        .json();
    assert_eq!(body["imageUrl"], Value::Null);
}

#[tokio::test]
async fn test_update_rejects_long_image_url() {
    let app = TestApp::new();
    let category_id = app.create_category("Electronics").await;
    let product_id = app.create_product("Phone", "P-1", 199.99, &category_id).await;

    let url = format!("https://cdn.example.com/{}", "a".repeat(300));
    let response = app
        .server
        .put(&format!("/api/v1/products/{}", product_id))
        .json(&json!({ "imageUrl": url }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error_code"], "INVALID_ARGUMENT");
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("Image URL must be at most 255 characters"));
}

#[tokio::test]
async fn test_update_to_missing_category_is_not_found() {
    let app = TestApp::new();
    let category_id = app.create_category("Electronics").await;
    let product_id = app.create_product("Phone", "P-1", 199.99, &category_id).await;

    let response = app
        .server
        .put(&format!("/api/v1/products/{}", product_id))
        .json(&json!({ "name": "Phone 2", "categoryId": "missing" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = app
        .server
        .get(&format!("/api/v1/products/{}", product_id))
        .await
        .json();
    assert_eq!(body["name"], "Phone");
    assert_eq!(body["categoryId"], category_id.as_str());
}

#[tokio::test]
async fn test_empty_update_is_invalid_argument() {
    let app = TestApp::new();
    let category_id = app.create_category("Electronics").await;
    let product_id = app.create_product("Phone", "P-1", 199.99, &category_id).await;

    let response = app
        .server
        .put(&format!("/api/v1/products/{}", product_id))
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "product update cannot be empty"
    );
}

#[tokio::test]
async fn test_delete_product_keeps_category() {
    let app = TestApp::new();
    let category_id = app.create_category("Electronics").await;
    let product_id = app.create_product("Phone", "P-1", 199.99, &category_id).await;

    let response = app
        .server
        .delete(&format!("/api/v1/products/{}", product_id))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "deleted" }));

    app.server
        .get(&format!("/api/v1/products/{}", product_id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&format!("/api/v1/categories/{}", category_id))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_product_outlives_deleted_category() {
    let app = TestApp::new();
    let category_id = app.create_category("Electronics").await;
    let product_id = app.create_product("Phone", "P-1", 199.99, &category_id).await;

    app.server
        .delete(&format!("/api/v1/categories/{}", category_id))
        .await
        .assert_status_ok();

    let response = app
        .server
        .get(&format!("/api/v1/products/{}", product_id))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["categoryId"], category_id.as_str());
    assert!(body.get("category").is_none());
}
