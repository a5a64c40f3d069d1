//! Wire models for the storefront backend.
//!
//! Field aliases cover the spellings different backend versions use for the
//! same value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::session::{Role, UserRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Nested `{ "id": .. }` reference some endpoints embed instead of a bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(default, rename = "category", skip_serializing)]
    pub category_ref: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<u64>,
    #[serde(default, rename = "restaurant", skip_serializing)]
    pub restaurant_ref: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Food {
    /// Category id, whether sent flat or nested.
    pub fn category(&self) -> Option<u64> {
        self.category_id
            .or_else(|| self.category_ref.as_ref().map(|c| c.id))
    }

    pub fn restaurant(&self) -> Option<u64> {
        self.restaurant_id
            .or_else(|| self.restaurant_ref.as_ref().map(|r| r.id))
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category_ref.as_ref().and_then(|c| c.name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Raw order status. Values this client does not know are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivering,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivering => "DELIVERING",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Other(raw) => raw,
        }
    }

    /// A customer may still cancel.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    pub fn is_final(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PENDING" => OrderStatus::Pending,
            "CONFIRMED" => OrderStatus::Confirmed,
            "PREPARING" => OrderStatus::Preparing,
            "READY" | "READY_FOR_PICKUP" => OrderStatus::Ready,
            "DELIVERING" | "SHIPPING" => OrderStatus::Delivering,
            "DELIVERED" | "COMPLETED" => OrderStatus::Delivered,
            "CANCELLED" | "CANCELED" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(raw),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub food_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_name: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub status: OrderStatus,
    #[serde(default, alias = "total", alias = "totalPrice")]
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, alias = "orderItems")]
    pub items: Vec<OrderItem>,
    #[serde(default, alias = "address")]
    pub delivery_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub food_id: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub items: Vec<NewOrderItem>,
    pub delivery_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voucher_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub food_id: u64,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(
        default,
        alias = "username",
        alias = "author",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub food_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub code: String,
    #[serde(default, alias = "discountValue", alias = "discountAmount")]
    pub discount: f64,
    #[serde(
        default,
        alias = "minOrderValue",
        alias = "minOrderAmount",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_order: Option<f64>,
    #[serde(
        default,
        alias = "expiryDate",
        alias = "endDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<String>,
    #[serde(default = "default_active", alias = "isActive")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: u64,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "currentProgress")]
    pub progress: u32,
    #[serde(default = "default_target", alias = "targetValue")]
    pub target: u32,
    #[serde(default, alias = "rewardPoints")]
    pub reward: u32,
    #[serde(default, alias = "isCompleted")]
    pub completed: bool,
    #[serde(default, alias = "isClaimed")]
    pub claimed: bool,
}

fn default_target() -> u32 {
    1
}

impl Mission {
    pub fn is_complete(&self) -> bool {
        self.completed || self.progress >= self.target
    }

    pub fn is_claimable(&self) -> bool {
        self.is_complete() && !self.claimed
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Login reply: a token plus either a nested `user` object or the user
/// fields inline.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "jwt")]
    pub token: String,
    #[serde(default)]
    pub user: Option<UserRecord>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, alias = "fullName")]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub email: Option<String>,
}

impl LoginResponse {
    /// Split into the credential pair the session store persists.
    pub fn into_parts(self) -> Result<(String, UserRecord)> {
        if self.token.trim().is_empty() {
            return Err(ApiError::Decode("login response carried an empty token".to_string()));
        }
        if let Some(user) = self.user {
            return Ok((self.token, user));
        }
        match (self.id, self.role) {
            (Some(id), Some(role)) => Ok((
                self.token,
                UserRecord {
                    id,
                    name: self.username.unwrap_or_default(),
                    role,
                    email: self.email,
                },
            )),
            _ => Err(ApiError::Decode(
                "login response did not include the user record".to_string(),
            )),
        }
    }
}
