//! Generic CRUD over `/admin/{resource}`.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::fetch_list;
use super::models::{Category, Food, Order, Restaurant};
use crate::error::Result;
use crate::gateway::{ApiRequest, Gateway};
use crate::session::UserRecord;

/// One admin-managed resource, e.g. `/admin/foods`.
pub struct AdminResource<T> {
    gateway: Gateway,
    resource: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> AdminResource<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(gateway: Gateway, resource: &'static str) -> Self {
        Self {
            gateway,
            resource,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> String {
        format!("/admin/{}", self.resource)
    }

    fn item_path(&self, id: u64) -> String {
        format!("/admin/{}/{id}", self.resource)
    }

    pub async fn list(&self) -> Result<Vec<T>> {
        fetch_list(&self.gateway, ApiRequest::get(self.path())).await
    }

    pub async fn create(&self, item: &T) -> Result<T> {
        self.gateway.post_json(&self.path(), item).await
    }

    pub async fn update(&self, id: u64, item: &T) -> Result<T> {
        self.gateway.put_json(&self.item_path(id), item).await
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.gateway.delete(&self.item_path(id)).await
    }
}

pub struct AdminApi {
    gateway: Gateway,
}

impl AdminApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn categories(&self) -> AdminResource<Category> {
        AdminResource::new(self.gateway.clone(), "categories")
    }

    pub fn foods(&self) -> AdminResource<Food> {
        AdminResource::new(self.gateway.clone(), "foods")
    }

    pub fn restaurants(&self) -> AdminResource<Restaurant> {
        AdminResource::new(self.gateway.clone(), "restaurants")
    }

    pub fn users(&self) -> AdminResource<UserRecord> {
        AdminResource::new(self.gateway.clone(), "users")
    }

    pub fn orders(&self) -> AdminResource<Order> {
        AdminResource::new(self.gateway.clone(), "orders")
    }
}
