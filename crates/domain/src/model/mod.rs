//! Catalog entities. Storage owns their invariants; the shapes here are
//! what handlers decode and controllers return.

pub mod category;
pub mod content;
pub mod favorite;
pub mod item;
pub mod order;
pub mod promotion;

pub use category::{Category, CategoryFilter};
pub use content::{Banner, BannerSlide, Seo};
pub use favorite::Favorite;
pub use item::{Item, Label};
pub use order::{Order, OrderLine, OrderStatus};
pub use promotion::Promotion;
