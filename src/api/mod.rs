//! Typed access to the storefront backend.
//!
//! Each endpoint group is a small client over a shared [`Gateway`]; all of
//! them go through its token injection and session handling.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod driver;
pub mod missions;
pub mod models;
pub mod orders;
pub mod reviews;
pub mod validate;
pub mod vouchers;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::gateway::{ApiRequest, Gateway};

pub use admin::{AdminApi, AdminResource};
pub use auth::AuthApi;
pub use catalog::{CatalogApi, FoodQuery};
pub use driver::DriverApi;
pub use missions::MissionsApi;
pub use orders::OrdersApi;
pub use reviews::ReviewsApi;
pub use vouchers::VouchersApi;

/// A page of results in the one shape the rest of the crate consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

/// Listing endpoints answer either with a bare array or a paged object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Flat(Vec<T>),
    #[serde(rename_all = "camelCase")]
    Paged {
        #[serde(default = "Vec::new")]
        content: Vec<T>,
        #[serde(default)]
        total_pages: Option<u32>,
    },
}

impl<T> From<ListResponse<T>> for Page<T> {
    fn from(response: ListResponse<T>) -> Self {
        match response {
            ListResponse::Flat(items) => {
                let total_pages = u32::from(!items.is_empty());
                Page { items, total_pages }
            }
            ListResponse::Paged {
                content,
                total_pages,
            } => {
                let total_pages = total_pages.unwrap_or(u32::from(!content.is_empty()));
                Page {
                    items: content,
                    total_pages,
                }
            }
        }
    }
}

impl<T> Page<T> {
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Send a listing request and normalize whichever shape comes back.
pub(crate) async fn fetch_page<T: DeserializeOwned>(
    gateway: &Gateway,
    request: ApiRequest,
) -> Result<Page<T>> {
    let response: ListResponse<T> = gateway.fetch(request).await?;
    Ok(response.into())
}

pub(crate) async fn fetch_list<T: DeserializeOwned>(
    gateway: &Gateway,
    request: ApiRequest,
) -> Result<Vec<T>> {
    Ok(fetch_page(gateway, request).await?.into_items())
}

/// All endpoint groups over one gateway.
#[derive(Clone)]
pub struct Api {
    gateway: Gateway,
}

impl Api {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.gateway.clone())
    }

    pub fn catalog(&self) -> CatalogApi {
        CatalogApi::new(self.gateway.clone())
    }

    pub fn orders(&self) -> OrdersApi {
        OrdersApi::new(self.gateway.clone())
    }

    pub fn reviews(&self) -> ReviewsApi {
        ReviewsApi::new(self.gateway.clone())
    }

    pub fn vouchers(&self) -> VouchersApi {
        VouchersApi::new(self.gateway.clone())
    }

    pub fn missions(&self) -> MissionsApi {
        MissionsApi::new(self.gateway.clone())
    }

    pub fn driver(&self) -> DriverApi {
        DriverApi::new(self.gateway.clone())
    }

    pub fn admin(&self) -> AdminApi {
        AdminApi::new(self.gateway.clone())
    }
}
