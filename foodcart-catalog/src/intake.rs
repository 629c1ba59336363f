//! Order intake: turns a submitted JSON payload into an order with its line
//! items.
//!
//! The payload is parsed into an [`OrderRequest`] before anything is written.
//! Persisting happens in a single store call, so a rejected line leaves no
//! order behind.

use serde_json::Value;
use tracing::info;

use crate::models::{NewOrder, Order, OrderDetails, OrderLine};
use crate::phone::PhoneNumber;
use crate::store::{CatalogStore, StoreError};

pub const FIRST_NAME_MAX_LEN: usize = 30;
pub const LAST_NAME_MAX_LEN: usize = 30;
pub const PHONENUMBER_MAX_LEN: usize = 128;
pub const ADDRESS_MAX_LEN: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("no products")]
    NoProducts,
    #[error("products key empty")]
    ProductsNull,
    #[error("products list empty")]
    ProductsEmpty,
    #[error("products key not list")]
    ProductsNotList,
    #[error("{0}: key missing")]
    MissingField(String),
    #[error("{0}: key empty")]
    NullField(String),
    #[error("{field}: {problem}")]
    WrongShape { field: String, problem: &'static str },
    #[error("phonenumber: invalid phone number")]
    PhoneFormatInvalid,
    #[error("product {0} not found")]
    ProductNotFound(i32),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for IntakeError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound {
                entity: "product",
                id,
            } => IntakeError::ProductNotFound(id),
            e => IntakeError::Store(e),
        }
    }
}

impl IntakeError {
    /// Whether the payload itself was unacceptable, as opposed to the
    /// catalog lookup or the store failing.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, IntakeError::ProductNotFound(_) | IntakeError::Store(_))
    }
}

/// A payload that passed every shape and format check.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub first_name: String,
    pub last_name: String,
    pub phonenumber: PhoneNumber,
    pub address: String,
    pub lines: Vec<OrderLine>,
}

impl OrderRequest {
    pub fn parse(payload: &Value) -> Result<Self, IntakeError> {
        let products = match payload.get("products") {
            None => return Err(IntakeError::NoProducts),
            Some(Value::Null) => return Err(IntakeError::ProductsNull),
            Some(v) if is_blank(v) => return Err(IntakeError::ProductsEmpty),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(IntakeError::ProductsNotList),
        };

        let first_name = required_text(payload, "firstname", FIRST_NAME_MAX_LEN)?;
        let last_name = required_text(payload, "lastname", LAST_NAME_MAX_LEN)?;
        let phonenumber = required_text(payload, "phonenumber", PHONENUMBER_MAX_LEN)?
            .parse::<PhoneNumber>()
            .map_err(|_| IntakeError::PhoneFormatInvalid)?;
        let address = required_text(payload, "address", ADDRESS_MAX_LEN)?;

        let lines = products
            .iter()
            .enumerate()
            .map(|(i, item)| parse_line(i, item))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            first_name,
            last_name,
            phonenumber,
            address,
            lines,
        })
    }

    fn new_order(&self) -> NewOrder {
        NewOrder {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phonenumber: self.phonenumber.to_string(),
            address: self.address.clone(),
        }
    }
}

/// Empty containers, empty strings, `false` and zero all count as "nothing
/// submitted".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn field<'a>(payload: &'a Value, name: &str) -> Result<&'a Value, IntakeError> {
    match payload.get(name) {
        None => Err(IntakeError::MissingField(name.to_string())),
        Some(Value::Null) => Err(IntakeError::NullField(name.to_string())),
        Some(value) => Ok(value),
    }
}

fn required_text(payload: &Value, name: &str, max_len: usize) -> Result<String, IntakeError> {
    let text = match field(payload, name)? {
        Value::String(s) if !s.trim().is_empty() => s,
        _ => {
            return Err(IntakeError::WrongShape {
                field: name.to_string(),
                problem: "must be a non-empty string",
            })
        }
    };
    if text.chars().count() > max_len {
        return Err(IntakeError::WrongShape {
            field: name.to_string(),
            problem: "too long",
        });
    }
    Ok(text.clone())
}

fn parse_line(index: usize, item: &Value) -> Result<OrderLine, IntakeError> {
    let label = format!("products[{index}]");
    if !item.is_object() {
        return Err(IntakeError::WrongShape {
            field: label,
            problem: "must be an object",
        });
    }

    let product_id = integer(field(item, "product").map_err(|e| qualify(e, &label))?)
        .ok_or_else(|| IntakeError::WrongShape {
            field: format!("{label}.product"),
            problem: "must be an integer id",
        })?;

    let quantity = integer(field(item, "quantity").map_err(|e| qualify(e, &label))?)
        .filter(|q| *q >= 1)
        .ok_or_else(|| IntakeError::WrongShape {
            field: format!("{label}.quantity"),
            problem: "must be a positive integer",
        })?;

    Ok(OrderLine {
        product_id,
        quantity,
    })
}

fn integer(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|n| i32::try_from(n).ok())
}

/// Prefixes a line field error with the line it came from.
fn qualify(e: IntakeError, label: &str) -> IntakeError {
    match e {
        IntakeError::MissingField(name) => IntakeError::MissingField(format!("{label}.{name}")),
        IntakeError::NullField(name) => IntakeError::NullField(format!("{label}.{name}")),
        e => e,
    }
}

/// Validates the payload and records the order with all of its lines.
pub fn register_order(
    store: &dyn CatalogStore,
    payload: &Value,
) -> Result<(Order, Vec<OrderDetails>), IntakeError> {
    let request = OrderRequest::parse(payload)?;
    let (order, details) = store.create_order(request.new_order(), &request.lines)?;
    info!(order_id = order.id, lines = details.len(), "order registered");
    Ok((order, details))
}
