//! Domain layer for the catalog service.
//!
//! This crate provides:
//! - Catalog entities (items, categories, favorites, promotions, orders,
//!   SEO records, banners) and their validation contracts
//! - Controller traits the HTTP layer calls into
//! - An in-memory controller implementation for local runs and tests

pub mod controller;
pub mod error;
pub mod memory;
pub mod model;
pub mod validate;

pub use controller::{
    CategoryController, FavoriteController, ItemController, OrderController, PromotionController,
};
pub use error::CatalogError;
pub use memory::InMemoryCatalog;
pub use model::{
    Banner, BannerSlide, Category, CategoryFilter, Favorite, Item, Label, Order, OrderLine,
    OrderStatus, Promotion, Seo,
};
pub use validate::Validate;
