use axum::{Router, extract::State, routing::get};
use foodcart_catalog::catalog;
use tracing::instrument;

use crate::error::ApiError;
use crate::json::PrettyJson;
use crate::models::*;

use super::{AppState, with_store};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/products/", get(list_products))
}

#[utoipa::path(
    get,
    path = "/api/products/",
    responses(
        (status = 200, description = "Products at least one restaurant has available", body = [ProductResponse]),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "products"
)]
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<PrettyJson<Vec<ProductResponse>>, ApiError> {
    let products = with_store(&state, catalog::available_products).await?;

    Ok(PrettyJson(
        products
            .into_iter()
            .map(|p| ProductResponse::new(p, &state.config))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use axum::http::{Method, StatusCode};
    use bigdecimal::BigDecimal;
    use foodcart_catalog::CatalogStore;
    use foodcart_catalog::models::{
        NewProduct, NewProductCategory, NewRestaurant, NewRestaurantMenuItem,
    };
    use serde_json::json;

    use super::super::testing::*;

    #[tokio::test]
    async fn test_list_products_only_available() {
        let (app, store) = test_app();
        let restaurant = store
            .create_restaurant(NewRestaurant {
                name: "Star Burger".to_string(),
                address: String::new(),
                contact_phone: String::new(),
            })
            .unwrap();
        let category = store
            .create_category(NewProductCategory {
                name: "Бургеры".to_string(),
            })
            .unwrap();
        let burger = store
            .create_product(NewProduct {
                name: "Чизбургер".to_string(),
                category_id: Some(category.id),
                price: BigDecimal::from_str("350.00").unwrap(),
                image: "cheeseburger.png".to_string(),
                special_status: true,
                description: "Classic".to_string(),
            })
            .unwrap();
        let fries = store
            .create_product(NewProduct {
                name: "Fries".to_string(),
                category_id: None,
                price: BigDecimal::from_str("120.50").unwrap(),
                image: "fries.png".to_string(),
                special_status: false,
                description: String::new(),
            })
            .unwrap();
        for (product_id, availability) in [(burger.id, true), (fries.id, false)] {
            store
                .add_menu_item(NewRestaurantMenuItem {
                    restaurant_id: restaurant.id,
                    product_id,
                    availability,
                })
                .unwrap();
        }

        let (status, body) = send(&app, Method::GET, "/api/products/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"name\": \"Чизбургер\""));
        let products: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            products,
            json!([{
                "id": burger.id,
                "name": "Чизбургер",
                "price": "350.00",
                "special_status": true,
                "description": "Classic",
                "category": {"id": category.id, "name": "Бургеры"},
                "image": "/media/cheeseburger.png",
            }])
        );
    }

    #[tokio::test]
    async fn test_list_products_empty_catalog() {
        let (app, _) = test_app();

        let (status, products) = send_json(&app, Method::GET, "/api/products/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(products, json!([]));
    }
}
