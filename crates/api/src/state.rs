//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use common::DEFAULT_PAGE_SIZE;
use domain::{
    CategoryController, FavoriteController, ItemController, OrderController, PromotionController,
};
use remote::{BannerPublisher, IdentityProvider, SeoPublisher};

/// Collaborators every handler may reach. Cloned per request; holds only `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemController>,
    pub categories: Arc<dyn CategoryController>,
    pub favorites: Arc<dyn FavoriteController>,
    pub promotions: Arc<dyn PromotionController>,
    pub orders: Arc<dyn OrderController>,
    pub identity: Arc<dyn IdentityProvider>,
    pub seo: Arc<dyn SeoPublisher>,
    pub banners: Arc<dyn BannerPublisher>,
    /// Page size of list endpoints when the query omits `size`.
    pub page_size: u32,
    pub request_timeout: Duration,
}

impl AppState {
    /// Uses `catalog` for every controller.
    pub fn new<C>(
        catalog: C,
        identity: Arc<dyn IdentityProvider>,
        seo: Arc<dyn SeoPublisher>,
        banners: Arc<dyn BannerPublisher>,
    ) -> Self
    where
        C: ItemController
            + CategoryController
            + FavoriteController
            + PromotionController
            + OrderController
            + 'static,
    {
        let catalog = Arc::new(catalog);
        Self {
            items: catalog.clone(),
            categories: catalog.clone(),
            favorites: catalog.clone(),
            promotions: catalog.clone(),
            orders: catalog,
            identity,
            seo,
            banners,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(15),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
