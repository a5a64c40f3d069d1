//! Input checks run before a request is built.

use super::models::{LoginRequest, NewOrder, NewReview, RegisterRequest};
use crate::error::{ApiError, Result};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(field, "must not be blank"));
    }
    Ok(())
}

pub fn login(request: &LoginRequest) -> Result<()> {
    require("username", &request.username)?;
    require("password", &request.password)
}

pub fn registration(request: &RegisterRequest) -> Result<()> {
    require("username", &request.username)?;
    require("password", &request.password)?;
    require("email", &request.email)?;
    if !request.email.contains('@') {
        return Err(ApiError::validation("email", "must be an email address"));
    }
    Ok(())
}

pub fn order(order: &NewOrder) -> Result<()> {
    if order.items.is_empty() {
        return Err(ApiError::validation("items", "order must contain at least one item"));
    }
    if let Some(item) = order.items.iter().find(|i| i.quantity == 0) {
        return Err(ApiError::validation(
            "quantity",
            format!("food {} has quantity 0", item.food_id),
        ));
    }
    require("address", &order.delivery_address)
}

pub fn review(review: &NewReview) -> Result<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&review.rating) {
        return Err(ApiError::validation(
            "rating",
            format!(
                "must be between {MIN_RATING} and {MAX_RATING}, got {}",
                review.rating
            ),
        ));
    }
    require("comment", &review.comment)
}

pub fn voucher_code(code: &str) -> Result<()> {
    require("code", code)
}
