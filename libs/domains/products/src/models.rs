use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Product entity as exposed over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Assigned on creation, never changes
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new product with a fresh id and timestamps.
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            in_stock: input.in_stock,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields present in `update` and bump `updated_at`.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(in_stock) = update.in_stock {
            self.in_stock = in_stock;
        }
        self.updated_at = Utc::now();
    }
}

/// Checked input for creating a product
#[derive(Debug, Clone, PartialEq, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(custom(function = "not_blank"))]
    pub category: String,
    pub in_stock: bool,
}

/// Checked partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(custom(function = "not_blank"))]
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// One page of the product listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Number of products on this page
    pub count: usize,
    /// Number of products matching the filter
    pub total: u64,
    pub current_page: i64,
    pub total_pages: u64,
    pub data: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> CreateProduct {
        CreateProduct {
            name: "Pen".to_string(),
            description: "Blue ink".to_string(),
            price: 1.5,
            category: "office".to_string(),
            in_stock: true,
        }
    }

    #[test]
    fn test_new_product_gets_id_and_timestamps() {
        let product = Product::new(pen());
        assert_eq!(product.name, "Pen");
        assert_eq!(product.created_at, product.updated_at);
        assert_eq!(product.id.get_version_num(), 7);
    }

    #[test]
    fn test_apply_update_only_touches_present_fields() {
        let mut product = Product::new(pen());
        let id = product.id;
        let created_at = product.created_at;

        product.apply_update(UpdateProduct {
            price: Some(2.0),
            in_stock: Some(false),
            ..Default::default()
        });

        assert_eq!(product.id, id);
        assert_eq!(product.name, "Pen");
        assert_eq!(product.price, 2.0);
        assert!(!product.in_stock);
        assert_eq!(product.created_at, created_at);
        assert!(product.updated_at >= created_at);
    }

    #[test]
    fn test_schema_constraints() {
        assert!(pen().validate().is_ok());

        let negative = CreateProduct {
            price: -0.01,
            ..pen()
        };
        assert!(negative.validate().is_err());

        let blank = UpdateProduct {
            category: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
        assert!(UpdateProduct::default().validate().is_ok());
    }

    #[test]
    fn test_product_json_uses_camel_case() {
        let json = serde_json::to_value(Product::new(pen())).unwrap();
        assert!(json.get("inStock").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("in_stock").is_none());
    }
}
