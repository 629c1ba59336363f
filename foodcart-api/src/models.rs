use bigdecimal::BigDecimal;
use foodcart_catalog::models as catalog;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Config;

#[derive(Debug, Serialize, ToSchema)]
pub struct Banner {
    pub title: String,
    /// Static asset URL of the banner image
    pub src: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
}

impl From<catalog::ProductCategory> for CategoryResponse {
    fn from(c: catalog::ProductCategory) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

/// A product customers can currently order.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    /// Price as a decimal string, e.g. "350.00"
    #[schema(value_type = String)]
    pub price: BigDecimal,
    pub special_status: bool,
    pub description: String,
    pub category: Option<CategoryResponse>,
    /// Media URL of the product image
    pub image: String,
}

impl ProductResponse {
    pub fn new(p: catalog::AvailableProduct, config: &Config) -> Self {
        Self {
            id: p.product.id,
            image: config.media_asset(&p.product.image),
            name: p.product.name,
            price: p.product.price,
            special_status: p.product.special_status,
            description: p.product.description,
            category: p.category.map(CategoryResponse::from),
        }
    }
}

/// Order submission. Documented shape only: the handler validates the raw
/// JSON itself so that every malformed field gets its own error message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterOrderRequest {
    pub firstname: String,
    pub lastname: String,
    /// International phone number, e.g. "+15555550123"
    pub phonenumber: String,
    pub address: String,
    pub products: Vec<OrderItemRequest>,
}

/// Echo of an accepted submission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterOrderResponse {
    /// ID of the created order
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub phonenumber: String,
    pub address: String,
    pub products: Vec<OrderItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    /// Product ID
    pub product: i32,
    /// Positive number of items
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub phonenumber: String,
    pub address: String,
    pub products: Vec<OrderLineResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineResponse {
    pub id: i32,
    pub product: i32,
    pub quantity: i32,
    #[schema(value_type = Option<String>)]
    pub fixed_price: Option<BigDecimal>,
}

impl From<(catalog::Order, Vec<catalog::OrderDetails>)> for OrderResponse {
    fn from((order, details): (catalog::Order, Vec<catalog::OrderDetails>)) -> Self {
        Self {
            id: order.id,
            firstname: order.first_name,
            lastname: order.last_name,
            phonenumber: order.phonenumber,
            address: order.address,
            products: details
                .into_iter()
                .map(|d| OrderLineResponse {
                    id: d.id,
                    product: d.product_id,
                    quantity: d.quantity,
                    fixed_price: d.fixed_price,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRestaurantRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_phone: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub contact_phone: String,
}

impl From<catalog::Restaurant> for RestaurantResponse {
    fn from(r: catalog::Restaurant) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
            contact_phone: r.contact_phone,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    /// Category ID
    pub category: Option<i32>,
    /// Non-negative price with at most two decimal places
    #[schema(value_type = String)]
    pub price: BigDecimal,
    /// Image path relative to the media root
    pub image: String,
    #[serde(default)]
    pub special_status: bool,
    #[serde(default)]
    pub description: String,
}

impl From<CreateProductRequest> for catalog::NewProduct {
    fn from(p: CreateProductRequest) -> Self {
        Self {
            name: p.name,
            category_id: p.category,
            price: p.price,
            image: p.image,
            special_status: p.special_status,
            description: p.description,
        }
    }
}

/// A catalog product as stored, regardless of availability.
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogProductResponse {
    pub id: i32,
    pub name: String,
    pub category: Option<i32>,
    #[schema(value_type = String)]
    pub price: BigDecimal,
    pub image: String,
    pub special_status: bool,
    pub description: String,
}

impl From<catalog::Product> for CatalogProductResponse {
    fn from(p: catalog::Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            category: p.category_id,
            price: p.price,
            image: p.image,
            special_status: p.special_status,
            description: p.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMenuItemRequest {
    /// Product ID
    pub product: i32,
    #[serde(default = "default_availability")]
    pub availability: bool,
}

fn default_availability() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateMenuItemRequest {
    pub availability: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuItemResponse {
    pub id: i32,
    pub restaurant: i32,
    pub product: i32,
    pub availability: bool,
}

impl From<catalog::RestaurantMenuItem> for MenuItemResponse {
    fn from(m: catalog::RestaurantMenuItem) -> Self {
        Self {
            id: m.id,
            restaurant: m.restaurant_id,
            product: m.product_id,
            availability: m.availability,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}
