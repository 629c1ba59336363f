use bigdecimal::BigDecimal;
use diesel::prelude::*;

use crate::schema::{
    order_details, orders, product_categories, products, restaurant_menu_items, restaurants,
};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub contact_phone: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
    pub contact_phone: String,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = product_categories)]
pub struct ProductCategory {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = product_categories)]
pub struct NewProductCategory {
    pub name: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(ProductCategory, foreign_key = category_id))]
#[diesel(table_name = products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category_id: Option<i32>,
    pub price: BigDecimal,
    pub image: String,
    pub special_status: bool,
    pub description: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = products)]
pub struct NewProduct {
    pub name: String,
    pub category_id: Option<i32>,
    pub price: BigDecimal,
    pub image: String,
    pub special_status: bool,
    pub description: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Product))]
#[diesel(table_name = restaurant_menu_items)]
pub struct RestaurantMenuItem {
    pub id: i32,
    pub restaurant_id: i32,
    pub product_id: i32,
    pub availability: bool,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurant_menu_items)]
pub struct NewRestaurantMenuItem {
    pub restaurant_id: i32,
    pub product_id: i32,
    pub availability: bool,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = orders)]
pub struct Order {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phonenumber: String,
    pub address: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub first_name: String,
    pub last_name: String,
    pub phonenumber: String,
    pub address: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Order))]
#[diesel(belongs_to(Product))]
#[diesel(table_name = order_details)]
pub struct OrderDetails {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub fixed_price: Option<BigDecimal>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = order_details)]
pub struct NewOrderDetails {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub fixed_price: Option<BigDecimal>,
}

/// A line of an order that has not been written yet.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product_id: i32,
    pub quantity: i32,
}

/// A product as listed to customers, with its category resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableProduct {
    pub product: Product,
    pub category: Option<ProductCategory>,
}
