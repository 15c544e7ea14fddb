//! Categories and their filter definitions.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::validate::{Validate, require, require_slug};

/// A filter a category offers over its items' attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFilter {
    /// Attribute name the filter applies to.
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub filters: Vec<CategoryFilter>,
}

impl Validate for Category {
    fn validate(&self) -> Result<(), CatalogError> {
        require_slug(&self.slug)?;
        require(&self.title, "title")?;
        for filter in &self.filters {
            require(&filter.name, "filter name")?;
        }
        Ok(())
    }
}
