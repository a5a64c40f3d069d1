use super::listing;
use super::{Context, announce};
use crate::api::models::NewReview;
use crate::cli::{ListArgs, OutputOptions};
use crate::collection::SortKey;
use crate::error::Result;
use crate::notice::Notice;

pub async fn cmd_reviews(food_id: u64, sort: SortKey, output: OutputOptions) -> Result<()> {
    let ctx = Context::load("reviews")?;
    let reviews = ctx.api.reviews();
    let args = ListArgs {
        sort,
        page: 1,
        json: output.json,
        ..ListArgs::default()
    };
    // Reviews are shown on one page
    listing::run(
        reviews.for_food(food_id),
        &args,
        usize::MAX,
        ctx.config.price_thresholds,
        "reviews",
    )
    .await
}

pub async fn cmd_review_add(
    food_id: u64,
    rating: u8,
    comment: &str,
    order_id: Option<u64>,
) -> Result<()> {
    let ctx = Context::load("reviews")?;
    let review = NewReview {
        food_id,
        order_id,
        rating,
        comment: comment.trim().to_string(),
    };
    ctx.api.reviews().add(&review).await?;
    announce(
        Notice::success("Thanks for your review!"),
        OutputOptions::default(),
    );
    Ok(())
}
