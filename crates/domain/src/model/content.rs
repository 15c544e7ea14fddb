//! SEO records and banners owned by sibling services.
//!
//! The catalog only forwards these; they are attached to another entity by
//! `(obj_name, obj_pk)`, e.g. `("category", "kitchen")`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::validate::{Validate, require};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub og_title: String,
    #[serde(default)]
    pub og_description: String,
    #[serde(default)]
    pub og_image: String,
}

impl Validate for Seo {
    fn validate(&self) -> Result<(), CatalogError> {
        require(&self.title, "title")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerSlide {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(default)]
    pub button_href: String,
    #[serde(default)]
    pub banner_id: i64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default)]
    pub slides: Vec<BannerSlide>,
}

impl Validate for Banner {
    fn validate(&self) -> Result<(), CatalogError> {
        for slide in &self.slides {
            require(&slide.src, "slide src")?;
        }
        Ok(())
    }
}
