use super::fetch_list;
use super::models::{NewReview, Review};
use super::validate;
use crate::error::Result;
use crate::gateway::{ApiRequest, Gateway};

pub struct ReviewsApi {
    gateway: Gateway,
}

impl ReviewsApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn for_food(&self, food_id: u64) -> Result<Vec<Review>> {
        fetch_list(
            &self.gateway,
            ApiRequest::get(format!("/reviews/food/{food_id}")),
        )
        .await
    }

    pub async fn add(&self, review: &NewReview) -> Result<()> {
        validate::review(review)?;
        self.gateway
            .execute(ApiRequest::post("/reviews").json(review)?)
            .await
    }
}
