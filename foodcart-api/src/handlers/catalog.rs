use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{delete, post, put},
};
use foodcart_catalog::catalog;
use foodcart_catalog::models::{NewProductCategory, NewRestaurant, NewRestaurantMenuItem};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::models::*;

use super::{AppState, with_store};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/restaurants", post(create_restaurant))
        .route("/api/restaurants/{id}/menu", post(add_menu_item))
        .route(
            "/api/restaurants/{id}/menu/{product_id}",
            put(update_menu_item),
        )
        .route("/api/categories", post(create_category))
        .route("/api/categories/{id}", delete(delete_category))
        .route("/api/products", post(create_product))
        .route("/api/products/{id}", delete(delete_product))
}

#[utoipa::path(
    post,
    path = "/api/restaurants",
    request_body = CreateRestaurantRequest,
    responses(
        (status = 201, description = "Restaurant created", body = RestaurantResponse),
        (status = 400, description = "Invalid restaurant", body = ApiErrorResponse),
    ),
    tag = "catalog"
)]
#[instrument(skip(state))]
pub async fn create_restaurant(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateRestaurantRequest>,
) -> Result<(StatusCode, Json<RestaurantResponse>), ApiError> {
    let restaurant = with_store(&state, move |store| {
        catalog::create_restaurant(
            store,
            NewRestaurant {
                name: payload.name,
                address: payload.address,
                contact_phone: payload.contact_phone,
            },
        )
    })
    .await?;

    info!(restaurant_id = restaurant.id, "restaurant created");
    Ok((StatusCode::CREATED, Json(restaurant.into())))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid category", body = ApiErrorResponse),
    ),
    tag = "catalog"
)]
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let category = with_store(&state, move |store| {
        catalog::create_category(store, NewProductCategory { name: payload.name })
    })
    .await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// Products of the category stay in the catalog without a category.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    tag = "catalog"
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    with_store(&state, move |store| store.delete_category(category_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = CatalogProductResponse),
        (status = 400, description = "Invalid product", body = ApiErrorResponse),
        (status = 404, description = "Category not found", body = ApiErrorResponse),
    ),
    tag = "catalog"
)]
#[instrument(skip(state))]
pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<CatalogProductResponse>), ApiError> {
    let product = with_store(&state, move |store| {
        catalog::create_product(store, payload.into())
    })
    .await?;

    info!(product_id = product.id, "product created");
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// Menu items and order lines referencing the product are deleted with it.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    tag = "catalog"
)]
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    ApiPath(product_id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    with_store(&state, move |store| store.delete_product(product_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/restaurants/{id}/menu",
    request_body = CreateMenuItemRequest,
    responses(
        (status = 201, description = "Product added to the menu", body = MenuItemResponse),
        (status = 404, description = "Restaurant or product not found", body = ApiErrorResponse),
        (status = 409, description = "The restaurant already lists the product", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "catalog"
)]
#[instrument(skip(state))]
pub async fn add_menu_item(
    State(state): State<AppState>,
    ApiPath(restaurant_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItemResponse>), ApiError> {
    let item = with_store(&state, move |store| {
        catalog::add_menu_item(
            store,
            NewRestaurantMenuItem {
                restaurant_id,
                product_id: payload.product,
                availability: payload.availability,
            },
        )
    })
    .await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

#[utoipa::path(
    put,
    path = "/api/restaurants/{id}/menu/{product_id}",
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Availability updated", body = MenuItemResponse),
        (status = 404, description = "The restaurant does not list the product", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    tag = "catalog"
)]
#[instrument(skip(state))]
pub async fn update_menu_item(
    State(state): State<AppState>,
    ApiPath((restaurant_id, product_id)): ApiPath<(i32, i32)>,
    ApiJson(payload): ApiJson<UpdateMenuItemRequest>,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let item = with_store(&state, move |store| {
        store.set_menu_item_availability(restaurant_id, product_id, payload.availability)
    })
    .await?;

    info!(
        restaurant_id,
        product_id,
        availability = item.availability,
        "menu item updated"
    );
    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{Value, json};

    use super::super::testing::*;

    async fn post(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send_json(app, Method::POST, uri, Some(body)).await
    }

    #[tokio::test]
    async fn test_menu_management_drives_product_listing() {
        let (app, _) = test_app();

        let (status, restaurant) = post(&app, "/api/restaurants", json!({"name": "Star Burger"})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(restaurant["address"], json!(""));

        let (status, category) = post(&app, "/api/categories", json!({"name": "Burgers"})).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, product) = post(
            &app,
            "/api/products",
            json!({
                "name": "Cheeseburger",
                "category": category["id"],
                "price": "350.00",
                "image": "cheeseburger.png",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(product["price"], json!("350.00"));
        assert_eq!(product["category"], category["id"]);
        assert_eq!(product["special_status"], json!(false));

        let menu_uri = format!("/api/restaurants/{}/menu", restaurant["id"]);
        let (status, item) = post(&app, &menu_uri, json!({"product": product["id"]})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(item["availability"], json!(true));

        let (_, listed) = send_json(&app, Method::GET, "/api/products/", None).await;
        assert_eq!(listed[0]["id"], product["id"]);
        assert_eq!(listed[0]["category"]["name"], json!("Burgers"));

        let (status, item) = send_json(
            &app,
            Method::PUT,
            &format!("{menu_uri}/{}", product["id"]),
            Some(json!({"availability": false})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(item["availability"], json!(false));

        let (_, listed) = send_json(&app, Method::GET, "/api/products/", None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_duplicate_menu_item_conflicts() {
        let (app, _) = test_app();
        let (_, restaurant) = post(&app, "/api/restaurants", json!({"name": "Star Burger"})).await;
        let (_, product) = post(
            &app,
            "/api/products",
            json!({"name": "Fries", "price": 120, "image": "fries.png"}),
        )
        .await;
        assert_eq!(product["price"], json!("120.00"));
        let menu_uri = format!("/api/restaurants/{}/menu", restaurant["id"]);

        let (status, _) = post(&app, &menu_uri, json!({"product": product["id"]})).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = post(
            &app,
            &menu_uri,
            json!({"product": product["id"], "availability": false}),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({"error": "menu item already exists"}));
    }

    #[tokio::test]
    async fn test_invalid_catalog_writes() {
        let (app, _) = test_app();

        let (status, body) = post(&app, "/api/restaurants", json!({"name": " "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "name must not be empty"}));

        let (status, body) = post(
            &app,
            "/api/products",
            json!({"name": "Fries", "price": "-1", "image": "fries.png"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "price must not be negative"}));

        let (status, body) = post(&app, "/api/restaurants/42/menu", json!({"product": 1})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "restaurant 42 not found"}));
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_bad_requests() {
        let (app, store) = test_app();

        for (uri, body) in [
            ("/api/restaurants", json!({})),
            (
                "/api/products",
                json!({"name": "Fries", "price": "abc", "image": "fries.png"}),
            ),
            ("/api/categories", json!({"name": 7})),
        ] {
            let (status, body) = post(&app, uri, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"].is_string(), "{uri}: {body}");
        }

        let (_, body) = post(&app, "/api/restaurants", json!({})).await;
        assert!(body["error"].as_str().unwrap().contains("missing field `name`"));
        assert!(store.products().is_empty());
    }

    #[tokio::test]
    async fn test_non_integer_path_id_is_bad_request() {
        let (app, _) = test_app();

        let (status, body) = send_json(&app, Method::DELETE, "/api/products/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = send_json(
            &app,
            Method::PUT,
            "/api/restaurants/1/menu/x",
            Some(json!({"availability": true})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_update_unlisted_menu_item_names_both_ids() {
        let (app, _) = test_app();
        let (_, restaurant) = post(&app, "/api/restaurants", json!({"name": "Star Burger"})).await;
        let uri = format!("/api/restaurants/{}/menu/7", restaurant["id"]);

        let (status, body) =
            send_json(&app, Method::PUT, &uri, Some(json!({"availability": false}))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"error": format!("restaurant {} does not list product 7", restaurant["id"])})
        );
    }

    #[tokio::test]
    async fn test_deletes() {
        let (app, store) = test_app();
        let (_, category) = post(&app, "/api/categories", json!({"name": "Burgers"})).await;
        let (_, product) = post(
            &app,
            "/api/products",
            json!({
                "name": "Cheeseburger",
                "category": category["id"],
                "price": "350",
                "image": "cheeseburger.png",
            }),
        )
        .await;

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/categories/{}", category["id"]),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(store.products()[0].category_id, None);

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/products/{}", product["id"]),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(store.products().is_empty());

        let (status, _) = send(&app, Method::DELETE, "/api/products/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
