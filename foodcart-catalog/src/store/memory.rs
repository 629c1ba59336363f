use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::{
    AvailableProduct, NewOrder, NewProduct, NewProductCategory, NewRestaurant,
    NewRestaurantMenuItem, Order, OrderDetails, OrderLine, Product, ProductCategory, Restaurant,
    RestaurantMenuItem,
};

use super::{CatalogStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    next_id: i32,
    restaurants: Vec<Restaurant>,
    categories: Vec<ProductCategory>,
    products: Vec<Product>,
    menu_items: Vec<RestaurantMenuItem>,
    orders: Vec<Order>,
    order_details: Vec<OrderDetails>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn has_product(&self, id: i32) -> bool {
        self.products.iter().any(|p| p.id == id)
    }
}

/// In-process store with the same integrity rules as the PostgreSQL schema.
///
/// Every operation holds one lock for its whole duration, so concurrent
/// writers are serialized.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn orders(&self) -> Vec<Order> {
        self.tables().orders.clone()
    }

    pub fn order_details(&self) -> Vec<OrderDetails> {
        self.tables().order_details.clone()
    }

    pub fn menu_items(&self) -> Vec<RestaurantMenuItem> {
        self.tables().menu_items.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.tables().products.clone()
    }
}

impl CatalogStore for MemoryStore {
    fn available_products(&self) -> Result<Vec<AvailableProduct>, StoreError> {
        let tables = self.tables();
        let mut products = tables
            .products
            .iter()
            .filter(|p| {
                tables
                    .menu_items
                    .iter()
                    .any(|m| m.product_id == p.id && m.availability)
            })
            .map(|p| AvailableProduct {
                product: p.clone(),
                category: p
                    .category_id
                    .and_then(|cid| tables.categories.iter().find(|c| c.id == cid).cloned()),
            })
            .collect::<Vec<_>>();
        products.sort_by_key(|p| p.product.id);
        Ok(products)
    }

    fn create_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, StoreError> {
        let mut tables = self.tables();
        let restaurant = Restaurant {
            id: tables.next_id(),
            name: restaurant.name,
            address: restaurant.address,
            contact_phone: restaurant.contact_phone,
        };
        tables.restaurants.push(restaurant.clone());
        Ok(restaurant)
    }

    fn create_category(
        &self,
        category: NewProductCategory,
    ) -> Result<ProductCategory, StoreError> {
        let mut tables = self.tables();
        let category = ProductCategory {
            id: tables.next_id(),
            name: category.name,
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    fn delete_category(&self, id: i32) -> Result<(), StoreError> {
        let mut tables = self.tables();
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        if tables.categories.len() == before {
            return Err(StoreError::not_found("category", id));
        }
        for product in tables.products.iter_mut() {
            if product.category_id == Some(id) {
                product.category_id = None;
            }
        }
        Ok(())
    }

    fn create_product(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut tables = self.tables();
        if let Some(category_id) = product.category_id {
            if !tables.categories.iter().any(|c| c.id == category_id) {
                return Err(StoreError::not_found("category", category_id));
            }
        }
        let product = Product {
            id: tables.next_id(),
            name: product.name,
            category_id: product.category_id,
            price: product.price,
            image: product.image,
            special_status: product.special_status,
            description: product.description,
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    fn delete_product(&self, id: i32) -> Result<(), StoreError> {
        let mut tables = self.tables();
        if !tables.has_product(id) {
            return Err(StoreError::not_found("product", id));
        }
        tables.products.retain(|p| p.id != id);
        tables.menu_items.retain(|m| m.product_id != id);
        tables.order_details.retain(|d| d.product_id != id);
        Ok(())
    }

    fn add_menu_item(
        &self,
        item: NewRestaurantMenuItem,
    ) -> Result<RestaurantMenuItem, StoreError> {
        let mut tables = self.tables();
        if !tables.restaurants.iter().any(|r| r.id == item.restaurant_id) {
            return Err(StoreError::not_found("restaurant", item.restaurant_id));
        }
        if !tables.has_product(item.product_id) {
            return Err(StoreError::not_found("product", item.product_id));
        }
        if tables
            .menu_items
            .iter()
            .any(|m| m.restaurant_id == item.restaurant_id && m.product_id == item.product_id)
        {
            return Err(StoreError::Conflict("menu item already exists".to_string()));
        }
        let item = RestaurantMenuItem {
            id: tables.next_id(),
            restaurant_id: item.restaurant_id,
            product_id: item.product_id,
            availability: item.availability,
        };
        tables.menu_items.push(item.clone());
        Ok(item)
    }

    fn set_menu_item_availability(
        &self,
        restaurant_id: i32,
        product_id: i32,
        availability: bool,
    ) -> Result<RestaurantMenuItem, StoreError> {
        let mut tables = self.tables();
        let item = tables
            .menu_items
            .iter_mut()
            .find(|m| m.restaurant_id == restaurant_id && m.product_id == product_id)
            .ok_or(StoreError::NotListed {
                restaurant_id,
                product_id,
            })?;
        item.availability = availability;
        Ok(item.clone())
    }

    fn create_order(
        &self,
        order: NewOrder,
        lines: &[OrderLine],
    ) -> Result<(Order, Vec<OrderDetails>), StoreError> {
        let mut tables = self.tables();
        if let Some(missing) = lines.iter().find(|l| !tables.has_product(l.product_id)) {
            return Err(StoreError::not_found("product", missing.product_id));
        }

        let order = Order {
            id: tables.next_id(),
            first_name: order.first_name,
            last_name: order.last_name,
            phonenumber: order.phonenumber,
            address: order.address,
        };
        let mut details = Vec::with_capacity(lines.len());
        for line in lines {
            details.push(OrderDetails {
                id: tables.next_id(),
                order_id: order.id,
                product_id: line.product_id,
                quantity: line.quantity,
                fixed_price: None,
            });
        }

        tables.orders.push(order.clone());
        tables.order_details.extend(details.iter().cloned());
        Ok((order, details))
    }

    fn get_order(&self, id: i32) -> Result<(Order, Vec<OrderDetails>), StoreError> {
        let tables = self.tables();
        let order = tables
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(StoreError::not_found("order", id))?;
        let details = tables
            .order_details
            .iter()
            .filter(|d| d.order_id == id)
            .cloned()
            .collect();
        Ok((order, details))
    }
}
