//! Shared listing pipeline for the table-producing commands.
//!
//! A listing command fetches its collection once, feeds it through a
//! [`CollectionView`] configured from the command-line options, and prints
//! the visible slice as a table or as JSON.

use std::future::Future;

use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::print_json;
use crate::api::models::{Food, Order, OrderStatus, Restaurant, Review};
use crate::cli::{ListArgs, OutputOptions};
use crate::collection::filters::{self, PriceThresholds};
use crate::collection::{CollectionView, Slice, SortKey};
use crate::error::{ApiError, Result};

/// Optional attributes a listed type may carry. Filtering or sorting on an
/// attribute the type lacks is refused up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Price,
    Category,
    Status,
    Date,
}

impl Field {
    fn as_str(self) -> &'static str {
        match self {
            Field::Price => "price",
            Field::Category => "category",
            Field::Status => "status",
            Field::Date => "date",
        }
    }
}

/// Item types that can be searched, filtered and sorted locally.
pub trait Listing: Clone + Serialize + Send + Sync + 'static {
    type Row: Tabled;

    /// Attributes the accessors below actually read.
    const FIELDS: &'static [Field] = &[];

    /// Text fields matched by `--search`.
    fn search_fields(&self) -> Vec<&str>;

    fn price(&self) -> f64 {
        0.0
    }

    fn timestamp(&self) -> Option<&str> {
        None
    }

    fn category(&self) -> Option<u64> {
        None
    }

    fn status(&self) -> Option<&OrderStatus> {
        None
    }

    fn row(&self) -> Self::Row;
}

/// Install the filters and sort order `args` asks for.
pub fn configure<T: Listing>(
    view: &mut CollectionView<T>,
    args: &ListArgs,
    thresholds: PriceThresholds,
) {
    if let Some(query) = args.search.as_deref().filter(|q| !q.trim().is_empty()) {
        view.set_filter("search", filters::keyword(query, T::search_fields));
    }
    if let Some(category) = args.category {
        view.set_filter("category", filters::equals(T::category, category));
    }
    if let Some(bucket) = args.price {
        view.set_filter("price", filters::price_in(bucket, thresholds, T::price));
    }
    if let Some(bucket) = args.status {
        view.set_filter("status", filters::status_in(bucket, T::status));
    }
    view.set_sort(args.sort.comparator(T::price, T::timestamp));
    view.set_page(args.page);
}

/// Refuse options that need an attribute `T` does not have.
pub fn check_args<T: Listing>(args: &ListArgs, noun: &str) -> Result<()> {
    let mut wanted = Vec::new();
    if args.category.is_some() {
        wanted.push(("category", Field::Category));
    }
    if args.price.is_some() {
        wanted.push(("price", Field::Price));
    }
    if args.status.is_some() {
        wanted.push(("status", Field::Status));
    }
    match args.sort {
        SortKey::PriceAsc | SortKey::PriceDesc => wanted.push(("sort", Field::Price)),
        SortKey::Newest => wanted.push(("sort", Field::Date)),
        SortKey::None => {}
    }

    match wanted.into_iter().find(|(_, field)| !T::FIELDS.contains(field)) {
        Some((option, field)) => Err(ApiError::validation(
            option,
            format!("{noun} have no {}", field.as_str()),
        )),
        None => Ok(()),
    }
}

/// Fetch, process and print one listing.
///
/// A one-shot command has no earlier data to fall back on, so a failed
/// fetch is returned as the command's error. Unsupported options are
/// rejected before `fetch` is polled.
pub async fn run<T, F>(
    fetch: F,
    args: &ListArgs,
    page_size: usize,
    thresholds: PriceThresholds,
    noun: &str,
) -> Result<()>
where
    T: Listing,
    F: Future<Output = Result<Vec<T>>>,
{
    check_args::<T>(args, noun)?;
    let mut view = CollectionView::new(page_size);
    let ticket = view.begin_refresh();
    let items = fetch.await?;
    tracing::debug!(count = items.len(), noun, "fetched collection");
    view.finish_refresh(ticket, Ok(items));
    configure(&mut view, args, thresholds);
    print_slice(&view.visible(), args.output(), noun)
}

/// Print a slice as a table, or JSON with paging metadata.
pub fn print_slice<T: Listing>(slice: &Slice<T>, output: OutputOptions, noun: &str) -> Result<()> {
    if output.json {
        return print_json(&json!({
            "items": slice.items,
            "page": slice.page,
            "pageSize": slice.page_size,
            "totalPages": slice.total_pages,
            "totalMatches": slice.total_matches,
        }));
    }

    if slice.is_empty() {
        println!("{}", format!("No {noun} found.").dimmed());
        return Ok(());
    }

    let rows: Vec<T::Row> = slice.items.iter().map(T::row).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!(
        "{}",
        format!(
            "Page {} of {} ({} {noun})",
            slice.page, slice.total_pages, slice.total_matches
        )
        .dimmed()
    );
    Ok(())
}

fn format_price(price: f64) -> String {
    format!("{price:.0}")
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[derive(Tabled)]
pub struct FoodRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl Listing for Food {
    type Row = FoodRow;
    const FIELDS: &'static [Field] = &[Field::Price, Field::Category, Field::Date];

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn timestamp(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn category(&self) -> Option<u64> {
        Food::category(self)
    }

    fn row(&self) -> FoodRow {
        FoodRow {
            id: self.id,
            name: self.name.clone(),
            price: format_price(self.price),
            category: self
                .category_name()
                .map(str::to_string)
                .or_else(|| Food::category(self).map(|c| c.to_string()))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Tabled)]
pub struct RestaurantRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Rating")]
    rating: String,
}

impl Listing for Restaurant {
    type Row = RestaurantRow;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.address.as_str()]
    }

    fn row(&self) -> RestaurantRow {
        RestaurantRow {
            id: self.id,
            name: self.name.clone(),
            address: self.address.clone(),
            rating: self
                .rating
                .map(|r| format!("{r:.1}"))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Tabled)]
pub struct OrderRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Items")]
    items: usize,
    #[tabled(rename = "Placed")]
    placed: String,
    #[tabled(rename = "Address")]
    address: String,
}

impl Listing for Order {
    type Row = OrderRow;
    const FIELDS: &'static [Field] = &[Field::Price, Field::Status, Field::Date];

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.delivery_address.as_str()];
        fields.extend(self.items.iter().filter_map(|i| i.food_name.as_deref()));
        if let Some(customer) = &self.customer_name {
            fields.push(customer);
        }
        fields
    }

    fn price(&self) -> f64 {
        self.total_amount
    }

    fn timestamp(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn status(&self) -> Option<&OrderStatus> {
        Some(&self.status)
    }

    fn row(&self) -> OrderRow {
        OrderRow {
            id: self.id,
            status: self.status.to_string(),
            total: format_price(self.total_amount),
            items: self.items.len(),
            placed: or_dash(self.created_at.as_deref()),
            address: self.delivery_address.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct ReviewRow {
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "By")]
    author: String,
    #[tabled(rename = "Comment")]
    comment: String,
    #[tabled(rename = "Date")]
    date: String,
}

impl Listing for Review {
    type Row = ReviewRow;
    const FIELDS: &'static [Field] = &[Field::Date];

    fn search_fields(&self) -> Vec<&str> {
        vec![self.comment.as_str()]
    }

    fn timestamp(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn row(&self) -> ReviewRow {
        ReviewRow {
            rating: "★".repeat(self.rating.min(5) as usize),
            author: or_dash(self.user_name.as_deref()),
            comment: self.comment.clone(),
            date: or_dash(self.created_at.as_deref()),
        }
    }
}
