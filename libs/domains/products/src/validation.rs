//! Field validation for create and update payloads.
//!
//! Payload fields are untyped JSON so that a wrong type is reported as a
//! validation message rather than a deserialization failure. JSON `null`
//! is treated the same as a missing key.

use axum_helpers::ValidatePayload;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::{CreateProduct, UpdateProduct};

pub const EMPTY_UPDATE: &str = "At least one field must be provided for update";

/// Request body as received, before any checks
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub in_stock: Option<Value>,
}

impl ProductPayload {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.in_stock.is_none()
    }
}

#[derive(Clone, Copy)]
enum Field {
    Name,
    Description,
    Price,
    Category,
    InStock,
}

impl Field {
    fn required_message(self) -> &'static str {
        match self {
            Field::Name => "Name is required",
            Field::Description => "Description is required",
            Field::Price => "Price is required",
            Field::Category => "Category is required",
            Field::InStock => "inStock is required",
        }
    }

    fn invalid_message(self) -> &'static str {
        match self {
            Field::Name => "Name must be a non-empty string",
            Field::Description => "Description must be a non-empty string",
            Field::Price => "Price must be a positive number",
            Field::Category => "Category must be a non-empty string",
            Field::InStock => "inStock must be a boolean value",
        }
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

fn non_negative_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite() && *n >= 0.0)
}

fn boolean(value: &Value) -> Option<bool> {
    value.as_bool()
}

/// Collects one message per offending field, in field order.
struct Checker {
    errors: Vec<String>,
}

impl Checker {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn optional<T>(
        &mut self,
        field: Field,
        value: Option<Value>,
        parse: fn(&Value) -> Option<T>,
    ) -> Option<T> {
        let value = value?;
        let parsed = parse(&value);
        if parsed.is_none() {
            self.errors.push(field.invalid_message().to_string());
        }
        parsed
    }

    fn required<T>(
        &mut self,
        field: Field,
        value: Option<Value>,
        parse: fn(&Value) -> Option<T>,
    ) -> Option<T> {
        if value.is_none() {
            self.errors.push(field.required_message().to_string());
            return None;
        }
        self.optional(field, value, parse)
    }

    /// Blank text counts as missing on create.
    fn required_text(&mut self, field: Field, value: Option<Value>) -> Option<String> {
        let value = value.filter(|v| v.as_str().is_none_or(|s| !s.trim().is_empty()));
        self.required(field, value, non_empty_text)
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, Vec<String>> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }
}

/// All five fields must be present and valid.
pub fn validate_create(payload: ProductPayload) -> Result<CreateProduct, Vec<String>> {
    let mut checker = Checker::new();

    let name = checker.required_text(Field::Name, payload.name);
    let description = checker.required_text(Field::Description, payload.description);
    let price = checker.required(Field::Price, payload.price, non_negative_number);
    let category = checker.required_text(Field::Category, payload.category);
    let in_stock = checker.required(Field::InStock, payload.in_stock, boolean);

    let product = match (name, description, price, category, in_stock) {
        (Some(name), Some(description), Some(price), Some(category), Some(in_stock)) => {
            Some(CreateProduct {
                name,
                description,
                price,
                category,
                in_stock,
            })
        }
        _ => None,
    };
    checker.finish(product)
}

/// At least one field must be present; present fields must be valid.
pub fn validate_update(payload: ProductPayload) -> Result<UpdateProduct, Vec<String>> {
    if payload.is_empty() {
        return Err(vec![EMPTY_UPDATE.to_string()]);
    }

    let mut checker = Checker::new();

    let update = UpdateProduct {
        name: checker.optional(Field::Name, payload.name, non_empty_text),
        description: checker.optional(Field::Description, payload.description, non_empty_text),
        price: checker.optional(Field::Price, payload.price, non_negative_number),
        category: checker.optional(Field::Category, payload.category, non_empty_text),
        in_stock: checker.optional(Field::InStock, payload.in_stock, boolean),
    };
    checker.finish(Some(update))
}

impl ValidatePayload for CreateProduct {
    type Payload = ProductPayload;

    fn validate_payload(payload: ProductPayload) -> Result<Self, Vec<String>> {
        validate_create(payload)
    }
}

impl ValidatePayload for UpdateProduct {
    type Payload = ProductPayload;

    fn validate_payload(payload: ProductPayload) -> Result<Self, Vec<String>> {
        validate_update(payload)
    }
}
