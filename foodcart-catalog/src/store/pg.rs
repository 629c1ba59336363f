use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{insert_into, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

use crate::models::{
    AvailableProduct, NewOrder, NewOrderDetails, NewProduct, NewProductCategory, NewRestaurant,
    NewRestaurantMenuItem, Order, OrderDetails, OrderLine, Product, ProductCategory, Restaurant,
    RestaurantMenuItem,
};
use crate::schema::{
    order_details, orders, product_categories, products, restaurant_menu_items, restaurants,
};

use super::{CatalogStore, StoreError};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// PostgreSQL-backed store over an r2d2 connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn connect(database_url: &str, pool_size: u32) -> Result<Self, StoreError> {
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(ConnectionManager::<PgConnection>::new(database_url))?;
        Ok(Self::new(pool))
    }

    pub fn run_migrations(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut pooled = self.pool.get()?;
        let conn: &mut PgConnection = &mut pooled;
        let applied = conn.run_pending_migrations(MIGRATIONS)?;
        info!(count = applied.len(), "applied pending migrations");
        Ok(())
    }
}

impl CatalogStore for PgStore {
    fn available_products(&self) -> Result<Vec<AvailableProduct>, StoreError> {
        let conn = &mut self.pool.get()?;

        let available = restaurant_menu_items::table
            .filter(restaurant_menu_items::availability.eq(true))
            .select(restaurant_menu_items::product_id);

        let rows = products::table
            .left_join(product_categories::table)
            .filter(products::id.eq_any(available))
            .order(products::id)
            .select((Product::as_select(), Option::<ProductCategory>::as_select()))
            .load::<(Product, Option<ProductCategory>)>(conn)?;

        Ok(rows
            .into_iter()
            .map(|(product, category)| AvailableProduct { product, category })
            .collect())
    }

    fn create_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, StoreError> {
        let conn = &mut self.pool.get()?;
        Ok(insert_into(restaurants::table)
            .values(&restaurant)
            .returning(Restaurant::as_returning())
            .get_result(conn)?)
    }

    fn create_category(
        &self,
        category: NewProductCategory,
    ) -> Result<ProductCategory, StoreError> {
        let conn = &mut self.pool.get()?;
        Ok(insert_into(product_categories::table)
            .values(&category)
            .returning(ProductCategory::as_returning())
            .get_result(conn)?)
    }

    fn delete_category(&self, id: i32) -> Result<(), StoreError> {
        let conn = &mut self.pool.get()?;
        match diesel::delete(product_categories::table.find(id)).execute(conn)? {
            0 => Err(StoreError::not_found("category", id)),
            _ => Ok(()),
        }
    }

    fn create_product(&self, product: NewProduct) -> Result<Product, StoreError> {
        let conn = &mut self.pool.get()?;
        conn.transaction::<_, StoreError, _>(|conn| {
            if let Some(category_id) = product.category_id {
                product_categories::table
                    .find(category_id)
                    .select(product_categories::id)
                    .first::<i32>(conn)
                    .optional()?
                    .ok_or(StoreError::not_found("category", category_id))?;
            }
            Ok(insert_into(products::table)
                .values(&product)
                .returning(Product::as_returning())
                .get_result(conn)?)
        })
    }

    fn delete_product(&self, id: i32) -> Result<(), StoreError> {
        let conn = &mut self.pool.get()?;
        match diesel::delete(products::table.find(id)).execute(conn)? {
            0 => Err(StoreError::not_found("product", id)),
            _ => Ok(()),
        }
    }

    fn add_menu_item(
        &self,
        item: NewRestaurantMenuItem,
    ) -> Result<RestaurantMenuItem, StoreError> {
        let conn = &mut self.pool.get()?;
        conn.transaction::<_, StoreError, _>(|conn| {
            restaurants::table
                .find(item.restaurant_id)
                .select(restaurants::id)
                .first::<i32>(conn)
                .optional()?
                .ok_or(StoreError::not_found("restaurant", item.restaurant_id))?;
            products::table
                .find(item.product_id)
                .select(products::id)
                .first::<i32>(conn)
                .optional()?
                .ok_or(StoreError::not_found("product", item.product_id))?;

            insert_into(restaurant_menu_items::table)
                .values(&item)
                .returning(RestaurantMenuItem::as_returning())
                .get_result(conn)
                .map_err(|e| match StoreError::from(e) {
                    StoreError::Conflict(_) => {
                        StoreError::Conflict("menu item already exists".to_string())
                    }
                    e => e,
                })
        })
    }

    fn set_menu_item_availability(
        &self,
        restaurant_id: i32,
        product_id: i32,
        availability: bool,
    ) -> Result<RestaurantMenuItem, StoreError> {
        let conn = &mut self.pool.get()?;
        diesel::update(
            restaurant_menu_items::table
                .filter(restaurant_menu_items::restaurant_id.eq(restaurant_id))
                .filter(restaurant_menu_items::product_id.eq(product_id)),
        )
        .set(restaurant_menu_items::availability.eq(availability))
        .returning(RestaurantMenuItem::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or(StoreError::NotListed {
            restaurant_id,
            product_id,
        })
    }

    fn create_order(
        &self,
        order: NewOrder,
        lines: &[OrderLine],
    ) -> Result<(Order, Vec<OrderDetails>), StoreError> {
        let conn = &mut self.pool.get()?;
        conn.build_transaction()
            .serializable()
            .run::<_, StoreError, _>(|conn| {
                let order = insert_into(orders::table)
                    .values(&order)
                    .returning(Order::as_returning())
                    .get_result(conn)?;

                let mut details = Vec::with_capacity(lines.len());
                for line in lines {
                    let product_id = products::table
                        .find(line.product_id)
                        .select(products::id)
                        .first::<i32>(conn)
                        .optional()?
                        .ok_or(StoreError::not_found("product", line.product_id))?;

                    let row = insert_into(order_details::table)
                        .values(NewOrderDetails {
                            order_id: order.id,
                            product_id,
                            quantity: line.quantity,
                            fixed_price: None,
                        })
                        .returning(OrderDetails::as_returning())
                        .get_result(conn)?;
                    details.push(row);
                }

                Ok((order, details))
            })
    }

    fn get_order(&self, id: i32) -> Result<(Order, Vec<OrderDetails>), StoreError> {
        let conn = &mut self.pool.get()?;
        let order = orders::table
            .find(id)
            .select(Order::as_select())
            .first(conn)
            .optional()?
            .ok_or(StoreError::not_found("order", id))?;
        let details = OrderDetails::belonging_to(&order)
            .select(OrderDetails::as_select())
            .order(order_details::id)
            .load(conn)?;
        Ok((order, details))
    }
}
