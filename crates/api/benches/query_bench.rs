use std::sync::Arc;

use api::query::{self, Params};
use axum::body::Body;
use axum::http::Request;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::InMemoryCatalog;
use remote::{InMemoryBannerPublisher, InMemoryIdentity, InMemorySeoPublisher};
use tower::ServiceExt;

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn bench_list_query(c: &mut Criterion) {
    let p = params(&[
        ("page", "3"),
        ("size", "24"),
        ("sort", "-price"),
        ("color", "red"),
        ("material", "oak"),
        ("brand", "acme"),
        ("width", "120"),
    ]);

    c.bench_function("query/list_query", |b| {
        b.iter(|| query::list_query(std::hint::black_box(&p), 40));
    });
}

fn bench_invalid_window(c: &mut Criterion) {
    let p = params(&[("q", "testquery"), ("size", "invalid"), ("page", "-1")]);

    c.bench_function("query/search_page_fallback", |b| {
        b.iter(|| {
            let term = query::search_term(std::hint::black_box(&p));
            (term.is_some(), query::search_page(&p))
        });
    });
}

fn bench_paginated_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = api::AppState::new(
        InMemoryCatalog::new(),
        Arc::new(InMemoryIdentity::new()),
        Arc::new(InMemorySeoPublisher::new()),
        Arc::new(InMemoryBannerPublisher::new()),
    );
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .build_recorder()
        .handle();
    let app = api::create_app(state, handle);

    c.bench_function("router/category_filter_search", |b| {
        b.iter(|| {
            rt.block_on(async {
                let request = Request::builder()
                    .uri("/api/category/filters/search?q=testquery&size=invalid&page=1")
                    .body(Body::empty())
                    .unwrap();
                app.clone().oneshot(request).await.unwrap()
            })
        });
    });
}

criterion_group!(
    benches,
    bench_list_query,
    bench_invalid_window,
    bench_paginated_request
);
criterion_main!(benches);
