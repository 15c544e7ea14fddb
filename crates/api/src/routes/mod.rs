//! HTTP handlers, one module per resource.

pub mod banners;
pub mod categories;
pub mod favorites;
pub mod health;
pub mod items;
pub mod metrics;
pub mod orders;
pub mod promotions;
pub mod seo;
