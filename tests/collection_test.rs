use serde_json::json;

use bitebox::api::models::Food;
use bitebox::collection::filters::{equals, keyword, price_in};
use bitebox::collection::{
    CollectionView, Filters, PriceBucket, PriceThresholds, SortKey, ViewStatus, process,
};
use bitebox::error::ApiError;

fn food(id: u64, name: &str, price: f64) -> Food {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "price": price,
        "category": { "id": id % 3, "name": "Mains" },
    }))
    .unwrap()
}

fn dated(id: u64, name: &str, created_at: Option<&str>) -> Food {
    let mut food = food(id, name, 50_000.0);
    food.created_at = created_at.map(str::to_string);
    food
}

fn name_fields(food: &Food) -> Vec<&str> {
    vec![food.name.as_str()]
}

fn price(food: &Food) -> f64 {
    food.price
}

fn created_at(food: &Food) -> Option<&str> {
    food.created_at.as_deref()
}

/// 25 foods, three of them pizzas.
fn menu() -> Vec<Food> {
    (1..=25)
        .map(|id| match id {
            4 => food(id, "Pizza Margherita", 90_000.0),
            11 => food(id, "Seafood Pizza", 120_000.0),
            19 => food(id, "pizza bianca", 85_000.0),
            _ => food(id, &format!("Dish {id}"), 20_000.0 + id as f64 * 1_000.0),
        })
        .collect()
}

fn ids(items: &[Food]) -> Vec<u64> {
    items.iter().map(|f| f.id).collect()
}

// ============================================================================
// Paging and filtering
// ============================================================================

#[test]
fn test_pizza_search_from_page_two() {
    let mut view = CollectionView::with_items(menu(), 12);
    view.set_page(2);
    assert_eq!(view.visible().page, 2);
    assert_eq!(view.visible().total_pages, 3);

    view.set_filter("search", keyword("pizza", name_fields));

    let slice = view.visible();
    assert_eq!(view.page(), 1);
    assert_eq!(slice.total_pages, 1);
    assert_eq!(slice.items.len(), 3);
    assert_eq!(ids(&slice.items), vec![4, 11, 19]);
}

#[test]
fn test_sort_change_resets_page() {
    let mut view = CollectionView::with_items(menu(), 12);
    view.set_page(3);
    view.set_sort(SortKey::PriceDesc.comparator(price, created_at));
    assert_eq!(view.page(), 1);
    assert_eq!(view.visible().items[0].id, 11);
}

#[test]
fn test_page_change_keeps_filters() {
    let mut view = CollectionView::with_items(menu(), 5);
    view.set_filter("price", price_in(PriceBucket::Low, PriceThresholds::default(), price));
    view.set_page(2);

    let slice = view.visible();
    assert_eq!(slice.page, 2);
    assert_eq!(view.filters().names(), vec!["price"]);
    // Dishes priced below 30000: ids 1..=9 minus the pizza at 4
    assert_eq!(slice.total_matches, 8);
    assert_eq!(ids(&slice.items), vec![7, 8, 9]);
}

#[test]
fn test_low_price_bucket_is_strictly_below_threshold() {
    let raw = vec![
        food(1, "a", 10_000.0),
        food(2, "b", 30_000.0),
        food(3, "c", 30_001.0),
        food(4, "d", 50_000.0),
    ];
    let thresholds = PriceThresholds {
        low: 30_000.0,
        high: 100_000.0,
    };
    let mut filters = Filters::new();
    filters.set("price", price_in(PriceBucket::Low, thresholds, price));

    let slice = process(&raw, &filters, None, 1, 12);
    assert_eq!(ids(&slice.items), vec![1]);

    filters.set("price", price_in(PriceBucket::Mid, thresholds, price));
    let slice = process(&raw, &filters, None, 1, 12);
    assert_eq!(ids(&slice.items), vec![2, 3, 4]);
}

#[test]
fn test_filters_are_anded() {
    let mut filters = Filters::new();
    filters.set("search", keyword("pizza", name_fields));
    filters.set("category", equals(Food::category, 1));

    let slice = process(&menu(), &filters, None, 1, 12);
    // 4 % 3 == 1, 19 % 3 == 1, 11 % 3 == 2
    assert_eq!(ids(&slice.items), vec![4, 19]);
}

#[test]
fn test_processing_is_repeatable() {
    let raw = menu();
    let mut filters = Filters::new();
    filters.set("price", price_in(PriceBucket::Mid, PriceThresholds::default(), price));
    let sort = SortKey::PriceAsc.comparator(price, created_at);

    let first = process(&raw, &filters, sort.as_ref(), 2, 4);
    let second = process(&raw, &filters, sort.as_ref(), 2, 4);
    assert_eq!(first, second);
    assert_eq!(ids(&raw), (1..=25).collect::<Vec<_>>());
}

#[test]
fn test_price_sort_is_stable() {
    let raw = vec![
        food(1, "a", 20_000.0),
        food(2, "b", 10_000.0),
        food(3, "c", 20_000.0),
        food(4, "d", 10_000.0),
    ];
    let sort = SortKey::PriceAsc.comparator(price, created_at);
    let slice = process(&raw, &Filters::new(), sort.as_ref(), 1, 10);
    assert_eq!(ids(&slice.items), vec![2, 4, 1, 3]);
}

#[test]
fn test_newest_sort_puts_undated_last() {
    let raw = vec![
        dated(1, "old", Some("2024-01-02T10:00:00Z")),
        dated(2, "undated", None),
        dated(3, "new", Some("2024-03-01")),
        dated(4, "mid", Some("2024-02-01T08:30:00")),
    ];
    let sort: SortKey = "newest".parse().unwrap();
    let slice = process(&raw, &Filters::new(), sort.comparator(price, created_at).as_ref(), 1, 10);
    assert_eq!(ids(&slice.items), vec![3, 4, 1, 2]);
}

#[test]
fn test_out_of_range_page_is_clamped() {
    let slice = process(&menu(), &Filters::new(), None, 9, 12);
    assert_eq!(slice.page, 3);
    assert_eq!(ids(&slice.items), vec![25]);
    assert!(!slice.has_next());
    assert!(slice.has_previous());
}

// ============================================================================
// Refresh and status
// ============================================================================

#[test]
fn test_late_response_is_discarded() {
    let mut view: CollectionView<Food> = CollectionView::new(12);
    let a = view.begin_refresh();
    let b = view.begin_refresh();

    assert!(view.finish_refresh(b, Ok(vec![food(2, "from b", 1.0)])));
    assert!(!view.finish_refresh(a, Ok(vec![food(1, "from a", 1.0)])));

    assert_eq!(ids(view.raw()), vec![2]);
    assert_eq!(view.status(), ViewStatus::Ready { empty: false });
}

#[test]
fn test_failed_response_for_stale_ticket_is_ignored() {
    let mut view = CollectionView::with_items(menu(), 12);
    let a = view.begin_refresh();
    let b = view.begin_refresh();

    assert!(view.finish_refresh(b, Ok(menu())));
    assert!(!view.finish_refresh(a, Err(ApiError::Network("timed out".to_string()))));
    assert_eq!(view.status(), ViewStatus::Ready { empty: false });
}

#[test]
fn test_failed_refresh_keeps_previous_items() {
    let mut view = CollectionView::with_items(menu(), 12);
    let ticket = view.begin_refresh();
    assert_eq!(view.status(), ViewStatus::Loading);

    view.finish_refresh(ticket, Err(ApiError::Network("connection reset".to_string())));

    assert!(matches!(view.status(), ViewStatus::Error(ref m) if m.contains("connection reset")));
    assert_eq!(view.raw().len(), 25);
    assert_eq!(view.visible().items.len(), 12);
}

#[test]
fn test_no_matches_is_empty_not_error() {
    let mut view: CollectionView<Food> = CollectionView::new(12);
    let ticket = view.begin_refresh();
    view.finish_refresh(ticket, Ok(menu()));
    view.set_filter("search", keyword("sushi", name_fields));

    assert_eq!(view.status(), ViewStatus::Ready { empty: true });
    assert_eq!(view.visible().total_pages, 0);
    assert_eq!(view.visible().page, 1);
}
