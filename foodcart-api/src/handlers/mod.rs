pub mod banner;
pub mod catalog;
pub mod order;
pub mod product;

use std::sync::Arc;

use axum::Router;
use foodcart_catalog::CatalogStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Runs a store operation on the blocking thread pool.
async fn with_store<T, E, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn CatalogStore) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || f(&*store))
        .await
        .map_err(|e| ApiError::InternalError(format!("store task failed: {e}")))?
        .map_err(Into::into)
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(banner::router())
        .merge(product::router())
        .merge(order::router())
        .merge(catalog::router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        banner::list_banners,
        product::list_products,
        order::register_order,
        order::get_order,
        catalog::create_restaurant,
        catalog::create_category,
        catalog::delete_category,
        catalog::create_product,
        catalog::delete_product,
        catalog::add_menu_item,
        catalog::update_menu_item,
    ),
    components(
        schemas(
            crate::models::Banner,
            crate::models::ProductResponse,
            crate::models::CategoryResponse,
            crate::models::RegisterOrderRequest,
            crate::models::RegisterOrderResponse,
            crate::models::OrderItemRequest,
            crate::models::OrderResponse,
            crate::models::OrderLineResponse,
            crate::models::CreateRestaurantRequest,
            crate::models::RestaurantResponse,
            crate::models::CreateCategoryRequest,
            crate::models::CreateProductRequest,
            crate::models::CatalogProductResponse,
            crate::models::CreateMenuItemRequest,
            crate::models::UpdateMenuItemRequest,
            crate::models::MenuItemResponse,
            crate::models::ApiErrorResponse
        )
    ),
    tags(
        (name = "banners", description = "Landing page banners"),
        (name = "products", description = "Products available for ordering"),
        (name = "orders", description = "Order registration"),
        (name = "catalog", description = "Restaurant, product and menu management")
    ),
    info(
        title = "Foodcart API",
        description = "Food ordering backend",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
