use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use common::{CallContext, Filters, ListQuery, Page, PageRequest, UserId};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::controller::{
    CategoryController, FavoriteController, ItemController, OrderController, PromotionController,
};
use crate::error::{CatalogError, Result};
use crate::model::{Category, CategoryFilter, Favorite, Item, Label, Order, Promotion};

#[derive(Debug, Default)]
struct CatalogState {
    items: HashMap<Uuid, Item>,
    categories: BTreeMap<String, Category>,
    favorites: Vec<Favorite>,
    promotions: BTreeMap<String, Promotion>,
    orders: BTreeMap<u64, Order>,
    next_order_id: u64,
}

/// In-memory catalog implementing every controller trait.
///
/// Used for local runs and tests. A catalog built with [`with_journal`]
/// also records every controller call so tests can assert which calls were
/// (or were not) made.
///
/// [`with_journal`]: InMemoryCatalog::with_journal
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
    journal: Option<Arc<RwLock<Vec<String>>>>,
}

impl InMemoryCatalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty catalog that records its calls.
    pub fn with_journal() -> Self {
        Self {
            journal: Some(Arc::default()),
            ..Self::default()
        }
    }

    /// Controller calls made so far, formatted as `resource.op(args)`.
    /// Always empty without a journal.
    pub async fn calls(&self) -> Vec<String> {
        match &self.journal {
            Some(journal) => journal.read().await.clone(),
            None => Vec::new(),
        }
    }

    /// Returns the number of recorded controller calls.
    pub async fn call_count(&self) -> usize {
        match &self.journal {
            Some(journal) => journal.read().await.len(),
            None => 0,
        }
    }

    /// Rejects calls whose deadline has passed, then journals the call.
    async fn begin(&self, ctx: &CallContext, call: impl FnOnce() -> String) -> Result<()> {
        if ctx.remaining().is_some_and(|left| left.is_zero()) {
            return Err(CatalogError::DeadlineExceeded);
        }
        if let Some(journal) = &self.journal {
            journal.write().await.push(call());
        }
        Ok(())
    }

    /// Inserts an item as-is, bypassing the journal.
    pub async fn seed_item(&self, item: Item) {
        self.state.write().await.items.insert(item.id, item);
    }

    /// Inserts a category as-is, bypassing the journal.
    pub async fn seed_category(&self, category: Category) {
        self.state
            .write()
            .await
            .categories
            .insert(category.slug.clone(), category);
    }

    /// Inserts a promotion as-is, bypassing the journal.
    pub async fn seed_promotion(&self, promotion: Promotion) {
        self.state
            .write()
            .await
            .promotions
            .insert(promotion.slug.clone(), promotion);
    }
}

fn matches(haystack: &str, q: &str) -> bool {
    haystack.to_lowercase().contains(&q.to_lowercase())
}

fn apply_filters(items: Vec<Item>, filters: &Filters) -> Vec<Item> {
    items
        .into_iter()
        .filter(|item| {
            filters
                .iter()
                .all(|(name, value)| item.attributes.get(name) == Some(value))
        })
        .collect()
}

fn sort_items(items: &mut [Item], sort: Option<&str>) {
    match sort {
        Some("price") => items.sort_by_key(|item| item.price),
        Some("-price") => items.sort_by_key(|item| std::cmp::Reverse(item.price)),
        Some("-title") => items.sort_by(|a, b| b.title.cmp(&a.title)),
        _ => items.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id))),
    }
}

fn list_items(state: &CatalogState, pred: impl Fn(&Item) -> bool) -> Vec<Item> {
    let mut items: Vec<Item> = state.items.values().filter(|i| pred(i)).cloned().collect();
    sort_items(&mut items, None);
    items
}

#[async_trait]
impl ItemController for InMemoryCatalog {
    async fn create(&self, ctx: &CallContext, mut item: Item) -> Result<Uuid> {
        self.begin(ctx, || format!("items.create({})", item.title)).await?;
        item.id = Uuid::new_v4();
        let id = item.id;
        self.state.write().await.items.insert(id, item);
        Ok(id)
    }

    async fn get(&self, ctx: &CallContext, id: Uuid) -> Result<Item> {
        self.begin(ctx, || format!("items.get({id})")).await?;
        self.state
            .read()
            .await
            .items
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    async fn update(&self, ctx: &CallContext, id: Uuid, mut item: Item) -> Result<()> {
        self.begin(ctx, || format!("items.update({id})")).await?;
        let mut state = self.state.write().await;
        let slot = state.items.get_mut(&id).ok_or(CatalogError::NotFound)?;
        item.id = id;
        *slot = item;
        Ok(())
    }

    async fn delete(&self, ctx: &CallContext, id: Uuid) -> Result<()> {
        self.begin(ctx, || format!("items.delete({id})")).await?;
        let mut state = self.state.write().await;
        state.items.remove(&id).ok_or(CatalogError::NotFound)?;
        state.favorites.retain(|f| f.item_id != id);
        Ok(())
    }

    async fn list(&self, ctx: &CallContext, query: ListQuery) -> Result<Page<Item>> {
        self.begin(ctx, || {
            format!("items.list({},{})", query.page.page(), query.page.size())
        })
        .await?;
        let state = self.state.read().await;
        let mut items = apply_filters(state.items.values().cloned().collect(), &query.filters);
        sort_items(&mut items, query.sort.as_deref());
        Ok(Page::from_slice(items, query.page))
    }

    async fn related(&self, ctx: &CallContext, id: Uuid) -> Result<Vec<Item>> {
        self.begin(ctx, || format!("items.related({id})")).await?;
        let state = self.state.read().await;
        let item = state.items.get(&id).ok_or(CatalogError::NotFound)?;
        Ok(list_items(&state, |other| {
            other.id != id && other.category == item.category
        }))
    }

    async fn search(&self, ctx: &CallContext, q: &str, page: PageRequest) -> Result<Page<Item>> {
        self.begin(ctx, || format!("items.search({q},{},{})", page.page(), page.size())).await?;
        let state = self.state.read().await;
        let items = list_items(&state, |item| {
            matches(&item.title, q) || matches(&item.description, q)
        });
        Ok(Page::from_slice(items, page))
    }

    async fn search_by_attribute(
        &self,
        ctx: &CallContext,
        q: &str,
        page: PageRequest,
    ) -> Result<Page<Item>> {
        self.begin(ctx, || {
            format!("items.search_by_attribute({q},{},{})", page.page(), page.size())
        })
        .await?;
        let state = self.state.read().await;
        let items = list_items(&state, |item| {
            item.attributes.values().any(|value| matches(value, q))
        });
        Ok(Page::from_slice(items, page))
    }

    async fn labelled(
        &self,
        ctx: &CallContext,
        label: Label,
        page: PageRequest,
    ) -> Result<Page<Item>> {
        self.begin(ctx, || {
            format!("items.labelled({label},{},{})", page.page(), page.size())
        })
        .await?;
        let state = self.state.read().await;
        let items = list_items(&state, |item| item.has_label(label));
        Ok(Page::from_slice(items, page))
    }
}

#[async_trait]
impl CategoryController for InMemoryCatalog {
    async fn create(&self, ctx: &CallContext, category: Category) -> Result<String> {
        self.begin(ctx, || format!("categories.create({})", category.slug)).await?;
        let mut state = self.state.write().await;
        if state.categories.contains_key(&category.slug) {
            return Err(CatalogError::AlreadyExists);
        }
        let slug = category.slug.clone();
        state.categories.insert(slug.clone(), category);
        Ok(slug)
    }

    async fn get(&self, ctx: &CallContext, slug: &str) -> Result<Category> {
        self.begin(ctx, || format!("categories.get({slug})")).await?;
        self.state
            .read()
            .await
            .categories
            .get(slug)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    async fn update(&self, ctx: &CallContext, slug: &str, mut category: Category) -> Result<()> {
        self.begin(ctx, || format!("categories.update({slug})")).await?;
        let mut state = self.state.write().await;
        let slot = state.categories.get_mut(slug).ok_or(CatalogError::NotFound)?;
        category.slug = slug.to_string();
        *slot = category;
        Ok(())
    }

    async fn delete(&self, ctx: &CallContext, slug: &str) -> Result<()> {
        self.begin(ctx, || format!("categories.delete({slug})")).await?;
        self.state
            .write()
            .await
            .categories
            .remove(slug)
            .map(|_| ())
            .ok_or(CatalogError::NotFound)
    }

    async fn list(&self, ctx: &CallContext, page: PageRequest) -> Result<Page<Category>> {
        self.begin(ctx, || format!("categories.list({},{})", page.page(), page.size())).await?;
        let state = self.state.read().await;
        Ok(Page::from_slice(
            state.categories.values().cloned().collect(),
            page,
        ))
    }

    async fn items(&self, ctx: &CallContext, slug: &str, query: ListQuery) -> Result<Page<Item>> {
        self.begin(ctx, || {
            format!("categories.items({slug},{},{})", query.page.page(), query.page.size())
        })
        .await?;
        let state = self.state.read().await;
        if !state.categories.contains_key(slug) {
            return Err(CatalogError::NotFound);
        }
        let items = state
            .items
            .values()
            .filter(|item| item.category == slug)
            .cloned()
            .collect();
        let mut items = apply_filters(items, &query.filters);
        sort_items(&mut items, query.sort.as_deref());
        Ok(Page::from_slice(items, query.page))
    }

    async fn filters(&self, ctx: &CallContext, slug: &str) -> Result<Vec<CategoryFilter>> {
        self.begin(ctx, || format!("categories.filters({slug})")).await?;
        self.state
            .read()
            .await
            .categories
            .get(slug)
            .map(|category| category.filters.clone())
            .ok_or(CatalogError::NotFound)
    }

    async fn search(
        &self,
        ctx: &CallContext,
        q: &str,
        page: PageRequest,
    ) -> Result<Page<Category>> {
        self.begin(ctx, || {
            format!("categories.search({q},{},{})", page.page(), page.size())
        })
        .await?;
        let state = self.state.read().await;
        let found = state
            .categories
            .values()
            .filter(|category| matches(&category.title, q) || matches(&category.slug, q))
            .cloned()
            .collect();
        Ok(Page::from_slice(found, page))
    }

    async fn search_filters(
        &self,
        ctx: &CallContext,
        q: &str,
        page: PageRequest,
    ) -> Result<Page<CategoryFilter>> {
        self.begin(ctx, || {
            format!("categories.search_filters({q},{},{})", page.page(), page.size())
        })
        .await?;
        let state = self.state.read().await;
        let found = state
            .categories
            .values()
            .flat_map(|category| category.filters.iter())
            .filter(|filter| matches(&filter.name, q) || matches(&filter.title, q))
            .cloned()
            .collect();
        Ok(Page::from_slice(found, page))
    }
}

#[async_trait]
impl FavoriteController for InMemoryCatalog {
    async fn list(&self, ctx: &CallContext, uid: UserId) -> Result<Vec<Favorite>> {
        self.begin(ctx, || format!("favorites.list({uid})")).await?;
        let state = self.state.read().await;
        Ok(state
            .favorites
            .iter()
            .filter(|f| f.uid == uid)
            .copied()
            .collect())
    }

    async fn add(&self, ctx: &CallContext, uid: UserId, item_id: Uuid) -> Result<Favorite> {
        self.begin(ctx, || format!("favorites.add({uid},{item_id})")).await?;
        let mut state = self.state.write().await;
        if !state.items.contains_key(&item_id) {
            return Err(CatalogError::NotFound);
        }
        let favorite = Favorite { uid, item_id };
        if state.favorites.contains(&favorite) {
            return Err(CatalogError::AlreadyExists);
        }
        state.favorites.push(favorite);
        Ok(favorite)
    }

    async fn remove(&self, ctx: &CallContext, uid: UserId, item_id: Uuid) -> Result<()> {
        self.begin(ctx, || format!("favorites.remove({uid},{item_id})")).await?;
        let mut state = self.state.write().await;
        let before = state.favorites.len();
        state
            .favorites
            .retain(|f| !(f.uid == uid && f.item_id == item_id));
        if state.favorites.len() == before {
            return Err(CatalogError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PromotionController for InMemoryCatalog {
    async fn create(&self, ctx: &CallContext, promotion: Promotion) -> Result<String> {
        self.begin(ctx, || format!("promotions.create({})", promotion.slug)).await?;
        let mut state = self.state.write().await;
        if state.promotions.contains_key(&promotion.slug) {
            return Err(CatalogError::AlreadyExists);
        }
        let slug = promotion.slug.clone();
        state.promotions.insert(slug.clone(), promotion);
        Ok(slug)
    }

    async fn get(&self, ctx: &CallContext, slug: &str) -> Result<Promotion> {
        self.begin(ctx, || format!("promotions.get({slug})")).await?;
        self.state
            .read()
            .await
            .promotions
            .get(slug)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    async fn update(&self, ctx: &CallContext, slug: &str, mut promotion: Promotion) -> Result<()> {
        self.begin(ctx, || format!("promotions.update({slug})")).await?;
        let mut state = self.state.write().await;
        let slot = state.promotions.get_mut(slug).ok_or(CatalogError::NotFound)?;
        promotion.slug = slug.to_string();
        *slot = promotion;
        Ok(())
    }

    async fn delete(&self, ctx: &CallContext, slug: &str) -> Result<()> {
        self.begin(ctx, || format!("promotions.delete({slug})")).await?;
        self.state
            .write()
            .await
            .promotions
            .remove(slug)
            .map(|_| ())
            .ok_or(CatalogError::NotFound)
    }

    async fn list(&self, ctx: &CallContext, page: PageRequest) -> Result<Page<Promotion>> {
        self.begin(ctx, || format!("promotions.list({},{})", page.page(), page.size())).await?;
        let state = self.state.read().await;
        Ok(Page::from_slice(
            state.promotions.values().cloned().collect(),
            page,
        ))
    }

    async fn items(&self, ctx: &CallContext, slug: &str, page: PageRequest) -> Result<Page<Item>> {
        self.begin(ctx, || {
            format!("promotions.items({slug},{},{})", page.page(), page.size())
        })
        .await?;
        let state = self.state.read().await;
        let promotion = state.promotions.get(slug).ok_or(CatalogError::NotFound)?;
        let items = promotion
            .items
            .iter()
            .filter_map(|id| state.items.get(id).cloned())
            .collect();
        Ok(Page::from_slice(items, page))
    }

    async fn search(
        &self,
        ctx: &CallContext,
        q: &str,
        page: PageRequest,
    ) -> Result<Page<Promotion>> {
        self.begin(ctx, || {
            format!("promotions.search({q},{},{})", page.page(), page.size())
        })
        .await?;
        let state = self.state.read().await;
        let found = state
            .promotions
            .values()
            .filter(|p| matches(&p.title, q) || matches(&p.description, q))
            .cloned()
            .collect();
        Ok(Page::from_slice(found, page))
    }
}

#[async_trait]
impl OrderController for InMemoryCatalog {
    async fn create(&self, ctx: &CallContext, mut order: Order) -> Result<u64> {
        self.begin(ctx, || "orders.create".to_string()).await?;
        let mut state = self.state.write().await;
        state.next_order_id += 1;
        order.id = state.next_order_id;
        state.orders.insert(order.id, order);
        Ok(state.next_order_id)
    }

    async fn get(&self, ctx: &CallContext, id: u64) -> Result<Order> {
        self.begin(ctx, || format!("orders.get({id})")).await?;
        self.state
            .read()
            .await
            .orders
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    async fn update(&self, ctx: &CallContext, id: u64, mut order: Order) -> Result<()> {
        self.begin(ctx, || format!("orders.update({id})")).await?;
        let mut state = self.state.write().await;
        let slot = state.orders.get_mut(&id).ok_or(CatalogError::NotFound)?;
        order.id = id;
        order.user_id = slot.user_id;
        *slot = order;
        Ok(())
    }

    async fn delete(&self, ctx: &CallContext, id: u64) -> Result<()> {
        self.begin(ctx, || format!("orders.delete({id})")).await?;
        self.state
            .write()
            .await
            .orders
            .remove(&id)
            .map(|_| ())
            .ok_or(CatalogError::NotFound)
    }

    async fn list_by_user(&self, ctx: &CallContext, uid: UserId) -> Result<Vec<Order>> {
        self.begin(ctx, || format!("orders.list_by_user({uid})")).await?;
        let state = self.state.read().await;
        Ok(state
            .orders
            .values()
            .filter(|order| order.user_id == Some(uid))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn ctx() -> CallContext {
        CallContext::background()
    }

    fn item(title: &str, category: &str, price: i64) -> Item {
        Item {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            price,
            src: String::new(),
            attributes: BTreeMap::new(),
            category: category.to_string(),
            labels: vec![],
        }
    }

    fn category(slug: &str) -> Category {
        Category {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            filters: vec![CategoryFilter {
                name: "color".to_string(),
                title: "Color".to_string(),
                values: vec!["red".to_string(), "blue".to_string()],
            }],
        }
    }

    #[tokio::test]
    async fn create_and_get_item() {
        let catalog = InMemoryCatalog::with_journal();
        let id = ItemController::create(&catalog, &ctx(), item("Kettle", "kitchen", 100))
            .await
            .unwrap();
        let stored = ItemController::get(&catalog, &ctx(), id).await.unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.title, "Kettle");
        assert_eq!(catalog.call_count().await, 2);
    }

    #[tokio::test]
    async fn plain_catalog_keeps_no_journal() {
        let catalog = InMemoryCatalog::new();
        for _ in 0..100 {
            ItemController::list(&catalog, &ctx(), ListQuery::default())
                .await
                .unwrap();
        }
        assert_eq!(catalog.call_count().await, 0);
        assert!(catalog.calls().await.is_empty());
    }

    #[tokio::test]
    async fn expired_deadline_is_rejected_before_storage() {
        let catalog = InMemoryCatalog::with_journal();
        let expired = CallContext::background().with_deadline(std::time::Instant::now());

        let err = ItemController::create(&catalog, &expired, item("Kettle", "kitchen", 100))
            .await
            .unwrap_err();

        assert_eq!(err, CatalogError::DeadlineExceeded);
        assert_eq!(catalog.call_count().await, 0);
        let live = CallContext::background().with_timeout(std::time::Duration::from_secs(5));
        let page = ItemController::list(&catalog, &live, ListQuery::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let catalog = InMemoryCatalog::new();
        let err = ItemController::get(&catalog, &ctx(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::NotFound);
    }

    #[tokio::test]
    async fn duplicate_category_is_rejected() {
        let catalog = InMemoryCatalog::new();
        CategoryController::create(&catalog, &ctx(), category("kitchen"))
            .await
            .unwrap();
        let err = CategoryController::create(&catalog, &ctx(), category("kitchen"))
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::AlreadyExists);
    }

    #[tokio::test]
    async fn category_items_apply_filters_and_sort() {
        let catalog = InMemoryCatalog::new();
        catalog.seed_category(category("kitchen")).await;
        let mut red = item("Red kettle", "kitchen", 300);
        red.attributes.insert("color".to_string(), "red".to_string());
        let mut cheap_red = item("Cheap kettle", "kitchen", 100);
        cheap_red
            .attributes
            .insert("color".to_string(), "red".to_string());
        let blue = item("Blue kettle", "kitchen", 200);
        for i in [red, cheap_red, blue] {
            catalog.seed_item(i).await;
        }

        let query = ListQuery {
            page: PageRequest::new(1, 40),
            sort: Some("-price".to_string()),
            filters: [("color".to_string(), "red".to_string())].into(),
        };
        let page = CategoryController::items(&catalog, &ctx(), "kitchen", query)
            .await
            .unwrap();
        let prices: Vec<i64> = page.items.iter().map(|i| i.price).collect();
        assert_eq!(prices, vec![300, 100]);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn favorites_enforce_item_existence_and_uniqueness() {
        let catalog = InMemoryCatalog::new();
        let uid = UserId::from_uuid(Uuid::new_v4());
        let kettle = item("Kettle", "kitchen", 100);
        let item_id = kettle.id;

        let err = catalog.add(&ctx(), uid, item_id).await.unwrap_err();
        assert_eq!(err, CatalogError::NotFound);

        catalog.seed_item(kettle).await;
        catalog.add(&ctx(), uid, item_id).await.unwrap();
        let err = catalog.add(&ctx(), uid, item_id).await.unwrap_err();
        assert_eq!(err, CatalogError::AlreadyExists);

        assert_eq!(FavoriteController::list(&catalog, &ctx(), uid).await.unwrap().len(), 1);
        catalog.remove(&ctx(), uid, item_id).await.unwrap();
        assert_eq!(
            catalog.remove(&ctx(), uid, item_id).await.unwrap_err(),
            CatalogError::NotFound
        );
    }

    #[tokio::test]
    async fn search_filters_spans_categories() {
        let catalog = InMemoryCatalog::with_journal();
        catalog.seed_category(category("kitchen")).await;
        catalog.seed_category(category("garden")).await;
        let page = catalog
            .search_filters(&ctx(), "colo", PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(
            catalog.calls().await,
            vec!["categories.search_filters(colo,1,10)".to_string()]
        );
    }

    #[tokio::test]
    async fn orders_are_numbered_and_scoped_to_user() {
        let catalog = InMemoryCatalog::new();
        let uid = UserId::from_uuid(Uuid::new_v4());
        let order = Order {
            id: 0,
            user_id: Some(uid),
            fio: "Ivan".to_string(),
            tel: "1".to_string(),
            email: "a@b.c".to_string(),
            address: String::new(),
            status: Default::default(),
            lines: vec![],
        };
        let first = OrderController::create(&catalog, &ctx(), order.clone()).await.unwrap();
        let second = OrderController::create(&catalog, &ctx(), order).await.unwrap();
        assert_eq!((first, second), (1, 2));

        let other = UserId::from_uuid(Uuid::new_v4());
        assert_eq!(catalog.list_by_user(&ctx(), uid).await.unwrap().len(), 2);
        assert!(catalog.list_by_user(&ctx(), other).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn promotion_items_resolve_known_ids() {
        let catalog = InMemoryCatalog::new();
        let kettle = item("Kettle", "kitchen", 100);
        let promotion = Promotion {
            slug: "sale".to_string(),
            title: "Sale".to_string(),
            description: String::new(),
            src: String::new(),
            items: vec![kettle.id, Uuid::new_v4()],
        };
        catalog.seed_item(kettle).await;
        catalog.seed_promotion(promotion).await;

        let page = PromotionController::items(&catalog, &ctx(), "sale", PageRequest::new(1, 40))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(
            PromotionController::items(&catalog, &ctx(), "missing", PageRequest::default())
                .await
                .unwrap_err(),
            CatalogError::NotFound
        );
    }
}
