//! Promotions grouping a set of items.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::validate::{Validate, require, require_slug};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub src: String,
    /// Ids of the items attached to this promotion.
    #[serde(default)]
    pub items: Vec<Uuid>,
}

impl Validate for Promotion {
    fn validate(&self) -> Result<(), CatalogError> {
        require_slug(&self.slug)?;
        require(&self.title, "title")
    }
}
