//! Controller traits the HTTP layer calls into.
//!
//! Controllers own storage and its invariants. Every call receives the
//! request's [`CallContext`]; an implementation that does I/O bounds it by
//! `ctx.remaining()` and gives up with
//! [`CatalogError::DeadlineExceeded`](crate::CatalogError::DeadlineExceeded)
//! once the deadline has passed. They report missing
//! entities as [`CatalogError::NotFound`](crate::CatalogError::NotFound) and
//! uniqueness violations as
//! [`CatalogError::AlreadyExists`](crate::CatalogError::AlreadyExists).
//! All implementations must be thread-safe (Send + Sync).

use async_trait::async_trait;
use common::{CallContext, ListQuery, Page, PageRequest, UserId};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Category, CategoryFilter, Favorite, Item, Label, Order, Promotion};

#[async_trait]
pub trait ItemController: Send + Sync {
    /// Stores a new item and returns its generated id.
    async fn create(&self, ctx: &CallContext, item: Item) -> Result<Uuid>;

    async fn get(&self, ctx: &CallContext, id: Uuid) -> Result<Item>;

    async fn update(&self, ctx: &CallContext, id: Uuid, item: Item) -> Result<()>;

    async fn delete(&self, ctx: &CallContext, id: Uuid) -> Result<()>;

    async fn list(&self, ctx: &CallContext, query: ListQuery) -> Result<Page<Item>>;

    /// Items related to `id`, unpaginated.
    async fn related(&self, ctx: &CallContext, id: Uuid) -> Result<Vec<Item>>;

    async fn search(&self, ctx: &CallContext, q: &str, page: PageRequest) -> Result<Page<Item>>;

    /// Searches attribute values rather than titles.
    async fn search_by_attribute(
        &self,
        ctx: &CallContext,
        q: &str,
        page: PageRequest,
    ) -> Result<Page<Item>>;

    async fn labelled(
        &self,
        ctx: &CallContext,
        label: Label,
        page: PageRequest,
    ) -> Result<Page<Item>>;
}

#[async_trait]
pub trait CategoryController: Send + Sync {
    /// Stores a new category and returns its slug.
    async fn create(&self, ctx: &CallContext, category: Category) -> Result<String>;

    async fn get(&self, ctx: &CallContext, slug: &str) -> Result<Category>;

    async fn update(&self, ctx: &CallContext, slug: &str, category: Category) -> Result<()>;

    async fn delete(&self, ctx: &CallContext, slug: &str) -> Result<()>;

    async fn list(&self, ctx: &CallContext, page: PageRequest) -> Result<Page<Category>>;

    /// Items of a category; sort and filters are passed through untouched.
    async fn items(&self, ctx: &CallContext, slug: &str, query: ListQuery) -> Result<Page<Item>>;

    async fn filters(&self, ctx: &CallContext, slug: &str) -> Result<Vec<CategoryFilter>>;

    async fn search(&self, ctx: &CallContext, q: &str, page: PageRequest) -> Result<Page<Category>>;

    async fn search_filters(
        &self,
        ctx: &CallContext,
        q: &str,
        page: PageRequest,
    ) -> Result<Page<CategoryFilter>>;
}

#[async_trait]
pub trait FavoriteController: Send + Sync {
    async fn list(&self, ctx: &CallContext, uid: UserId) -> Result<Vec<Favorite>>;

    /// Fails with `NotFound` when the item does not exist and with
    /// `AlreadyExists` when the pair is already stored.
    async fn add(&self, ctx: &CallContext, uid: UserId, item_id: Uuid) -> Result<Favorite>;

    async fn remove(&self, ctx: &CallContext, uid: UserId, item_id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait PromotionController: Send + Sync {
    /// Stores a new promotion and returns its slug.
    async fn create(&self, ctx: &CallContext, promotion: Promotion) -> Result<String>;

    async fn get(&self, ctx: &CallContext, slug: &str) -> Result<Promotion>;

    async fn update(&self, ctx: &CallContext, slug: &str, promotion: Promotion) -> Result<()>;

    async fn delete(&self, ctx: &CallContext, slug: &str) -> Result<()>;

    async fn list(&self, ctx: &CallContext, page: PageRequest) -> Result<Page<Promotion>>;

    async fn items(&self, ctx: &CallContext, slug: &str, page: PageRequest) -> Result<Page<Item>>;

    async fn search(
        &self,
        ctx: &CallContext,
        q: &str,
        page: PageRequest,
    ) -> Result<Page<Promotion>>;
}

#[async_trait]
pub trait OrderController: Send + Sync {
    /// Stores a new order and returns its generated id.
    async fn create(&self, ctx: &CallContext, order: Order) -> Result<u64>;

    async fn get(&self, ctx: &CallContext, id: u64) -> Result<Order>;

    async fn update(&self, ctx: &CallContext, id: u64, order: Order) -> Result<()>;

    async fn delete(&self, ctx: &CallContext, id: u64) -> Result<()>;

    async fn list_by_user(&self, ctx: &CallContext, uid: UserId) -> Result<Vec<Order>>;
}
