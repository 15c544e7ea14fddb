//! Catalog items (products).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::validate::{Validate, require};

/// Merchandising label attached to items server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Hit,
    Rec,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Hit => "hit",
            Label::Rec => "rec",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product. `price` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Slug of the owning category.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Item {
    pub fn has_label(&self, label: Label) -> bool {
        self.labels.iter().any(|l| l == label.as_str())
    }
}

impl Validate for Item {
    fn validate(&self) -> Result<(), CatalogError> {
        require(&self.title, "title")?;
        if self.price <= 0 {
            return Err(CatalogError::validation("price must be positive"));
        }
        Ok(())
    }
}
