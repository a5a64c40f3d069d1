use super::fetch_list;
use super::models::Mission;
use crate::error::Result;
use crate::gateway::{ApiRequest, Gateway};

pub struct MissionsApi {
    gateway: Gateway,
}

impl MissionsApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn progress(&self) -> Result<Vec<Mission>> {
        fetch_list(&self.gateway, ApiRequest::get("/missions/my-progress")).await
    }

    pub async fn claim(&self, id: u64) -> Result<()> {
        self.gateway
            .execute(ApiRequest::post(format!("/missions/{id}/claim")))
            .await
    }
}
