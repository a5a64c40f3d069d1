//! Catalog listings: categories, foods, restaurants.

use owo_colors::OwoColorize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::listing::{self, Listing};
use super::{CommandOutput, Context, print_json};
use crate::cli::{ListArgs, OutputOptions};
use crate::error::Result;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
}

pub async fn cmd_categories(output: OutputOptions) -> Result<()> {
    let ctx = Context::load("categories")?;
    let categories = ctx.api.catalog().categories().await?;

    if output.json {
        return print_json(&json!(categories));
    }
    if categories.is_empty() {
        println!("{}", "No categories found.".dimmed());
        return Ok(());
    }

    let rows: Vec<CategoryRow> = categories
        .iter()
        .map(|c| CategoryRow {
            id: c.id,
            name: c.name.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

pub async fn cmd_foods(args: ListArgs) -> Result<()> {
    let ctx = Context::load("foods")?;
    let catalog = ctx.api.catalog();
    listing::run(
        catalog.all_foods(),
        &args,
        ctx.page_size(args.page_size),
        ctx.config.price_thresholds,
        "foods",
    )
    .await
}

pub async fn cmd_restaurants(args: ListArgs) -> Result<()> {
    let ctx = Context::load("restaurants")?;
    let catalog = ctx.api.catalog();
    listing::run(
        catalog.all_restaurants(),
        &args,
        ctx.page_size(args.page_size),
        ctx.config.price_thresholds,
        "restaurants",
    )
    .await
}

/// One food and its reviews, fetched concurrently.
pub async fn cmd_food(id: u64, output: OutputOptions) -> Result<()> {
    let ctx = Context::load("foods")?;
    let catalog = ctx.api.catalog();
    let reviews_api = ctx.api.reviews();
    let (food, reviews) = futures::try_join!(catalog.food(id), reviews_api.for_food(id))?;

    let average = if reviews.is_empty() {
        None
    } else {
        Some(reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>() / reviews.len() as f64)
    };

    let mut text = format!(
        "{} {}\n{} {:.0}\n",
        food.name.bold(),
        format!("#{}", food.id).dimmed(),
        "Price:".cyan(),
        food.price
    );
    if let Some(description) = &food.description {
        text.push_str(&format!("{description}\n"));
    }
    match average {
        Some(avg) => text.push_str(&format!(
            "{} {avg:.1} from {} reviews\n",
            "Rating:".cyan(),
            reviews.len()
        )),
        None => text.push_str(&format!("{}\n", "No reviews yet.".dimmed())),
    }
    if !reviews.is_empty() {
        let rows: Vec<_> = reviews.iter().map(Listing::row).collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        text.push_str(&table.to_string());
    }

    CommandOutput::new(json!({
        "food": food,
        "averageRating": average,
        "reviews": reviews,
    }))
    .with_text(text.trim_end().to_string())
    .print(output)
}
