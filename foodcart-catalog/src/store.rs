use diesel::result::DatabaseErrorKind;

use crate::models::{
    AvailableProduct, NewOrder, NewProduct, NewProductCategory, NewRestaurant,
    NewRestaurantMenuItem, Order, OrderDetails, OrderLine, Product, ProductCategory, Restaurant,
    RestaurantMenuItem,
};

pub mod memory;
pub mod pg;

pub use memory::MemoryStore;
pub use pg::{PgPool, PgStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("restaurant {restaurant_id} does not list product {product_id}")]
    NotListed { restaurant_id: i32, product_id: i32 },
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        StoreError::NotFound { entity, id }
    }
}

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                StoreError::Conflict(info.message().to_string())
            }
            e => StoreError::Database(e),
        }
    }
}

/// Persistent catalog and order records.
///
/// Every method is a single unit of work: it either applies all of its writes
/// or none of them.
pub trait CatalogStore: Send + Sync {
    /// Products with at least one available menu item, ordered by id.
    fn available_products(&self) -> Result<Vec<AvailableProduct>, StoreError>;

    fn create_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, StoreError>;

    fn create_category(&self, category: NewProductCategory)
        -> Result<ProductCategory, StoreError>;

    /// Products of the category are kept with their category cleared.
    fn delete_category(&self, id: i32) -> Result<(), StoreError>;

    fn create_product(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Menu items and order lines of the product are deleted with it.
    fn delete_product(&self, id: i32) -> Result<(), StoreError>;

    /// Fails with [`StoreError::Conflict`] when the restaurant already lists the product.
    fn add_menu_item(
        &self,
        item: NewRestaurantMenuItem,
    ) -> Result<RestaurantMenuItem, StoreError>;

    fn set_menu_item_availability(
        &self,
        restaurant_id: i32,
        product_id: i32,
        availability: bool,
    ) -> Result<RestaurantMenuItem, StoreError>;

    /// Writes the order header and one detail row per line. An unknown product
    /// aborts the whole order.
    fn create_order(
        &self,
        order: NewOrder,
        lines: &[OrderLine],
    ) -> Result<(Order, Vec<OrderDetails>), StoreError>;

    fn get_order(&self, id: i32) -> Result<(Order, Vec<OrderDetails>), StoreError>;
}
