//! Matching Operations Benchmarks
//!
//! Benchmarks for fragment matching over listing pages and selector parsing.
//!
//! Run with: `cargo bench --bench matching_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shopwalk::prelude::*;

fn listing(size: usize, match_at: Option<usize>) -> Vec<String> {
    (0..size)
        .map(|i| {
            if Some(i) == match_at {
                "Nike Calm Slip-On White".to_string()
            } else {
                format!("Adidas Ultraboost Light {i}")
            }
        })
        .collect()
}

fn bench_first_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_match");
    let criteria = SearchCriteria::new("Nike", "Calm", "Slip-On").unwrap();

    for size in [24usize, 48, 96] {
        let miss = listing(size, None);
        let last = listing(size, Some(size - 1));

        group.bench_with_input(BenchmarkId::new("miss", size), &miss, |bench, names| {
            bench.iter(|| black_box(criteria.first_match(black_box(names.as_slice()))));
        });
        group.bench_with_input(BenchmarkId::new("last", size), &last, |bench, names| {
            bench.iter(|| black_box(criteria.first_match(black_box(names.as_slice()))));
        });
    }

    group.finish();
}

fn bench_selector_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector_parsing");
    let locators = PageLocators::default();

    let selectors = vec![
        ("product_list", locators.product_list.as_str().to_string()),
        ("search_box", locators.search_box.as_str().to_string()),
        ("promo_close", locators.promo_close.as_str().to_string()),
        ("review_checkout", locators.review_checkout.as_str().to_string()),
    ];

    for (name, selector) in selectors {
        group.bench_with_input(BenchmarkId::from_parameter(name), &selector, |bench, sel| {
            bench.iter(|| black_box(Selector::parse(black_box(sel.as_str()))));
        });
    }

    group.finish();
}

fn bench_locator_query(c: &mut Criterion) {
    let page = SelectPage::default();

    c.bench_function("locator_to_query_framed", |bench| {
        bench.iter(|| black_box(page.promo_close().to_query()));
    });
    c.bench_function("locator_to_query_nth", |bench| {
        bench.iter(|| black_box(page.product_list().nth(black_box(7)).to_query()));
    });
}

criterion_group!(
    benches,
    bench_first_match,
    bench_selector_parsing,
    bench_locator_query
);
criterion_main!(benches);
