use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sellable item in the catalog.
///
/// Products are never erased. Removing one flips `available` to false, after
/// which it no longer shows up in reads but keeps its `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update as it arrives from a caller.
///
/// Callers may echo the `id` back; it is accepted and then discarded by
/// [`ProductPatch::into_changes`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The writable fields of a product, without its identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

impl ProductPatch {
    pub fn into_changes(self) -> ProductChanges {
        let ProductPatch {
            id: _,
            name,
            price,
            description,
        } = self;
        ProductChanges {
            name,
            price,
            description,
        }
    }
}

impl ProductChanges {
    /// Applies the present fields to `product`, leaving the rest untouched.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
    }
}
