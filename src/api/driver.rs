//! Delivery driver endpoints.

use super::fetch_list;
use super::models::Order;
use crate::error::Result;
use crate::gateway::{ApiRequest, Gateway};

pub struct DriverApi {
    gateway: Gateway,
}

impl DriverApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Orders waiting for a driver.
    pub async fn available(&self) -> Result<Vec<Order>> {
        fetch_list(&self.gateway, ApiRequest::get("/driver/available-orders")).await
    }

    pub async fn accept(&self, order_id: u64) -> Result<()> {
        self.gateway
            .execute(ApiRequest::post(format!("/driver/orders/{order_id}/accept")))
            .await
    }

    pub async fn complete(&self, order_id: u64) -> Result<()> {
        self.gateway
            .execute(ApiRequest::post(format!("/driver/orders/{order_id}/complete")))
            .await
    }

    pub async fn history(&self) -> Result<Vec<Order>> {
        fetch_list(&self.gateway, ApiRequest::get("/driver/history")).await
    }
}
