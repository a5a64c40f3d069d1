//! Customer orders.

use super::fetch_list;
use super::models::{NewOrder, Order, OrderStatus};
use super::validate;
use crate::error::Result;
use crate::gateway::{ApiRequest, Gateway};

pub struct OrdersApi {
    gateway: Gateway,
}

impl OrdersApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn create(&self, order: &NewOrder) -> Result<Order> {
        validate::order(order)?;
        let created: Order = self.gateway.post_json("/orders/create", order).await?;
        tracing::info!(order_id = created.id, "order placed");
        Ok(created)
    }

    pub async fn mine(&self) -> Result<Vec<Order>> {
        fetch_list(&self.gateway, ApiRequest::get("/orders/my-orders")).await
    }

    pub async fn cancel(&self, id: u64) -> Result<()> {
        self.gateway
            .execute(ApiRequest::put(format!("/orders/{id}/cancel")))
            .await
    }

    /// Move an order to `status` (staff and drivers).
    pub async fn set_status(&self, id: u64, status: &OrderStatus) -> Result<()> {
        self.gateway
            .execute(ApiRequest::put(format!("/orders/{id}/status")).query("status", status))
            .await
    }
}
