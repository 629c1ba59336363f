//! Catalog reads and restaurant-facing catalog writes.
//!
//! Writes are checked against the column limits of the catalog tables before
//! they reach the store.

use bigdecimal::BigDecimal;

use crate::models::{
    AvailableProduct, NewProduct, NewProductCategory, NewRestaurant, NewRestaurantMenuItem,
    Product, ProductCategory, Restaurant, RestaurantMenuItem,
};
use crate::store::{CatalogStore, StoreError};

pub const NAME_MAX_LEN: usize = 50;
pub const ADDRESS_MAX_LEN: usize = 100;
pub const CONTACT_PHONE_MAX_LEN: usize = 50;
pub const IMAGE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 200;

/// Prices are `NUMERIC(8, 2)`.
const PRICE_INTEGER_DIGITS: u32 = 6;
const PRICE_SCALE: i64 = 2;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Products that at least one restaurant currently sells.
pub fn available_products(store: &dyn CatalogStore) -> Result<Vec<AvailableProduct>, StoreError> {
    store.available_products()
}

pub fn create_restaurant(
    store: &dyn CatalogStore,
    restaurant: NewRestaurant,
) -> Result<Restaurant, CatalogError> {
    validate_required_text(&restaurant.name, "name", NAME_MAX_LEN)?;
    validate_optional_text(&restaurant.address, "address", ADDRESS_MAX_LEN)?;
    validate_optional_text(
        &restaurant.contact_phone,
        "contact_phone",
        CONTACT_PHONE_MAX_LEN,
    )?;
    Ok(store.create_restaurant(restaurant)?)
}

pub fn create_category(
    store: &dyn CatalogStore,
    category: NewProductCategory,
) -> Result<ProductCategory, CatalogError> {
    validate_required_text(&category.name, "name", NAME_MAX_LEN)?;
    Ok(store.create_category(category)?)
}

/// The price is stored at the column scale, so "120" becomes "120.00".
pub fn create_product(
    store: &dyn CatalogStore,
    mut product: NewProduct,
) -> Result<Product, CatalogError> {
    validate_required_text(&product.name, "name", NAME_MAX_LEN)?;
    validate_required_text(&product.image, "image", IMAGE_MAX_LEN)?;
    validate_optional_text(&product.description, "description", DESCRIPTION_MAX_LEN)?;
    validate_price(&product.price)?;
    product.price = product.price.with_scale(PRICE_SCALE);
    Ok(store.create_product(product)?)
}

pub fn add_menu_item(
    store: &dyn CatalogStore,
    item: NewRestaurantMenuItem,
) -> Result<RestaurantMenuItem, CatalogError> {
    Ok(store.add_menu_item(item)?)
}

fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::Invalid(format!("{field} must not be empty")));
    }
    validate_optional_text(value, field, max_len)
}

fn validate_optional_text(value: &str, field: &str, max_len: usize) -> Result<(), CatalogError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(CatalogError::Invalid(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

fn validate_price(price: &BigDecimal) -> Result<(), CatalogError> {
    if *price < BigDecimal::from(0) {
        return Err(CatalogError::Invalid("price must not be negative".to_string()));
    }
    if *price >= BigDecimal::from(10u64.pow(PRICE_INTEGER_DIGITS)) {
        return Err(CatalogError::Invalid("price is too large".to_string()));
    }
    if price.with_scale(PRICE_SCALE) != *price {
        return Err(CatalogError::Invalid(
            "price must have at most 2 decimal places".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::store::MemoryStore;

    fn new_product(name: &str, price: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category_id: None,
            price: BigDecimal::from_str(price).unwrap(),
            image: "product.png".to_string(),
            special_status: false,
            description: String::new(),
        }
    }

    fn seed_restaurant(store: &MemoryStore, name: &str) -> Restaurant {
        create_restaurant(
            store,
            NewRestaurant {
                name: name.to_string(),
                address: String::new(),
                contact_phone: String::new(),
            },
        )
        .unwrap()
    }

    fn list(store: &MemoryStore, restaurant: &Restaurant, product: &Product, available: bool) {
        add_menu_item(
            store,
            NewRestaurantMenuItem {
                restaurant_id: restaurant.id,
                product_id: product.id,
                availability: available,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_available_products_filters_by_menu_availability() {
        let store = MemoryStore::new();
        let north = seed_restaurant(&store, "North");
        let south = seed_restaurant(&store, "South");

        let burger = create_product(&store, new_product("Burger", "350.00")).unwrap();
        let fries = create_product(&store, new_product("Fries", "120.50")).unwrap();
        let shake = create_product(&store, new_product("Shake", "200")).unwrap();
        let _unlisted = create_product(&store, new_product("Salad", "180")).unwrap();

        list(&store, &north, &burger, true);
        list(&store, &south, &burger, true);
        list(&store, &north, &fries, false);
        list(&store, &south, &fries, false);
        list(&store, &north, &shake, false);
        list(&store, &south, &shake, true);

        let ids = available_products(&store)
            .unwrap()
            .into_iter()
            .map(|p| p.product.id)
            .collect::<Vec<_>>();

        assert_eq!(ids, vec![burger.id, shake.id]);
    }

    #[test]
    fn test_available_products_embeds_category() {
        let store = MemoryStore::new();
        let restaurant = seed_restaurant(&store, "North");
        let category = create_category(
            &store,
            NewProductCategory {
                name: "Burgers".to_string(),
            },
        )
        .unwrap();
        let mut burger = new_product("Burger", "350");
        burger.category_id = Some(category.id);
        let burger = create_product(&store, burger).unwrap();
        let fries = create_product(&store, new_product("Fries", "120")).unwrap();
        list(&store, &restaurant, &burger, true);
        list(&store, &restaurant, &fries, true);

        let products = available_products(&store).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].category.as_ref(), Some(&category));
        assert_eq!(products[1].category, None);
    }

    #[test]
    fn test_toggling_availability_updates_listing() {
        let store = MemoryStore::new();
        let restaurant = seed_restaurant(&store, "North");
        let burger = create_product(&store, new_product("Burger", "350")).unwrap();
        list(&store, &restaurant, &burger, true);

        store
            .set_menu_item_availability(restaurant.id, burger.id, false)
            .unwrap();

        assert!(available_products(&store).unwrap().is_empty());
    }

    #[test]
    fn test_create_product_rejects_invalid_fields() {
        let store = MemoryStore::new();

        for (product, message) in [
            (new_product("", "1"), "name must not be empty"),
            (new_product("Burger", "-0.01"), "price must not be negative"),
            (new_product("Burger", "1000000"), "price is too large"),
            (
                new_product("Burger", "1.005"),
                "price must have at most 2 decimal places",
            ),
            (
                NewProduct {
                    description: "x".repeat(DESCRIPTION_MAX_LEN + 1),
                    ..new_product("Burger", "1")
                },
                "description is too long (201 chars, max 200)",
            ),
        ] {
            match create_product(&store, product) {
                Err(CatalogError::Invalid(m)) => assert_eq!(m, message),
                other => panic!("unexpected result: {other:?}"),
            }
        }
        assert!(store.products().is_empty());
    }

    #[test]
    fn test_create_product_stores_price_at_column_scale() {
        let store = MemoryStore::new();

        let fries = create_product(&store, new_product("Fries", "120")).unwrap();
        let shake = create_product(&store, new_product("Shake", "99.5")).unwrap();

        assert_eq!(fries.price.to_string(), "120.00");
        assert_eq!(shake.price.to_string(), "99.50");
        assert_eq!(store.products()[0].price.to_string(), "120.00");
    }

    #[test]
    fn test_create_product_with_unknown_category() {
        let store = MemoryStore::new();
        let mut product = new_product("Burger", "350");
        product.category_id = Some(42);

        let result = create_product(&store, product);

        assert!(matches!(
            result,
            Err(CatalogError::Store(StoreError::NotFound {
                entity: "category",
                id: 42
            }))
        ));
    }

    #[test]
    fn test_add_menu_item_twice_conflicts() {
        let store = MemoryStore::new();
        let restaurant = seed_restaurant(&store, "North");
        let burger = create_product(&store, new_product("Burger", "350")).unwrap();
        list(&store, &restaurant, &burger, true);

        let result = add_menu_item(
            &store,
            NewRestaurantMenuItem {
                restaurant_id: restaurant.id,
                product_id: burger.id,
                availability: false,
            },
        );

        assert!(matches!(
            result,
            Err(CatalogError::Store(StoreError::Conflict(_)))
        ));
    }
}
