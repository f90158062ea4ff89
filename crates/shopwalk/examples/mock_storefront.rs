//! Example: Mock Storefront
//!
//! Demonstrates: the selection flow against a scripted storefront, both the
//! listing-match path and the fallback search path
//!
//! Run with: `cargo run --example mock_storefront`

use shopwalk::prelude::*;

fn storefront(config: &SelectorConfig, pages: &[&[&str]]) -> MockDriver {
    let page = config.page();
    let pages: Vec<Vec<String>> = pages
        .iter()
        .map(|names| names.iter().map(|n| (*n).to_string()).collect())
        .collect();
    MockDriver::new()
        .with_listing(&page.product_list(), &page.next_page(), pages)
        .with_element(
            &page.product_title(),
            MockElement::visible().with_text("Nike Calm Slip-On"),
        )
        .with_element(&page.ship_option(), MockElement::visible().checked())
        .with_element(&page.pickup_option(), MockElement::visible())
        .with_element(&page.size_option(&config.selection_size), MockElement::visible())
        .with_element(&page.size_option(&config.fallback_size), MockElement::visible())
        .with_element(&page.add_to_bag(), MockElement::visible())
        .with_element(
            &page.review_checkout(),
            MockElement::visible().appears_after(3),
        )
        .with_element(&page.promo_close(), MockElement::visible())
        .with_element(&page.search_box(), MockElement::visible())
        .with_element(&page.price_filter(), MockElement::visible())
        .with_element(&page.price_min(), MockElement::visible())
        .with_element(&page.price_max(), MockElement::visible())
        .with_element(&page.price_apply(), MockElement::visible())
        .with_element(&page.sort_filter(), MockElement::visible())
        .with_element(&page.first_product(), MockElement::visible())
}

#[tokio::main]
async fn main() -> ShopResult<()> {
    println!("=== Mock Storefront Example ===\n");

    let config = SelectorConfig::default().with_timeouts(500, 20);
    let criteria = SearchCriteria::new("Nike", "Calm", "Slip-On")?;

    // 1. Product on the second listing page
    println!("1. Searching a two-page listing...");
    let driver = storefront(
        &config,
        &[
            &["Adidas Samba OG", "Puma Suede Classic"],
            &["Vans Old Skool", "Nike Calm Slip-On White"],
        ],
    );
    let mut selector = ProductSelector::new(driver, config.clone());
    let outcome = selector.select(&criteria).await?;
    println!("   Outcome: {outcome:?}");
    for call in selector.driver().history() {
        println!("   - {call}");
    }

    // 2. No match anywhere: fallback search
    println!("\n2. Searching a listing without the product...");
    let driver = storefront(&config, &[&["Adidas Samba OG"]]);
    let mut selector = ProductSelector::new(driver, config.clone());
    let outcome = selector
        .select(&criteria.clone().with_fallback("adidas samba"))
        .await?;
    println!("   Outcome: {outcome:?}");
    for call in selector.driver().history() {
        println!("   - {call}");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
