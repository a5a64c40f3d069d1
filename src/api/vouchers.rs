use serde::Serialize;

use super::fetch_list;
use super::models::Voucher;
use super::validate;
use crate::error::Result;
use crate::gateway::{ApiRequest, Gateway};

#[derive(Serialize)]
struct RedeemRequest<'a> {
    code: &'a str,
}

pub struct VouchersApi {
    gateway: Gateway,
}

impl VouchersApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Vouchers currently on offer.
    pub async fn available(&self) -> Result<Vec<Voucher>> {
        fetch_list(&self.gateway, ApiRequest::get("/vouchers")).await
    }

    /// Vouchers the signed-in user has redeemed.
    pub async fn mine(&self) -> Result<Vec<Voucher>> {
        fetch_list(&self.gateway, ApiRequest::get("/vouchers/my-vouchers")).await
    }

    pub async fn redeem(&self, code: &str) -> Result<()> {
        validate::voucher_code(code)?;
        let body = RedeemRequest { code: code.trim() };
        self.gateway
            .execute(ApiRequest::post("/vouchers/redeem").json(&body)?)
            .await
    }

    pub async fn create(&self, voucher: &Voucher) -> Result<Voucher> {
        validate::voucher_code(&voucher.code)?;
        self.gateway.post_json("/vouchers", voucher).await
    }

    pub async fn update(&self, id: u64, voucher: &Voucher) -> Result<Voucher> {
        validate::voucher_code(&voucher.code)?;
        self.gateway
            .put_json(&format!("/vouchers/{id}"), voucher)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.gateway.delete(&format!("/vouchers/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use http::{Method, StatusCode};

    use super::super::testing::harness;
    use super::*;
    use crate::error::ApiError;

    #[tokio::test]
    async fn test_redeem_trims_code() {
        let h = harness();
        h.transport
            .on(Method::POST, "/vouchers/redeem", StatusCode::OK, "{}");
        h.api.vouchers().redeem(" SALE50 ").await.unwrap();
        let body = h.transport.last().unwrap().body.unwrap();
        assert_eq!(body["code"], "SALE50");
    }

    #[tokio::test]
    async fn test_blank_code_rejected() {
        let h = harness();
        let err = h.api.vouchers().redeem("  ").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "code", .. }));
        assert_eq!(h.transport.count(), 0);
    }

    #[tokio::test]
    async fn test_delete_hits_id_path() {
        let h = harness();
        h.transport
            .on(Method::DELETE, "/vouchers/12", StatusCode::NO_CONTENT, "");
        h.api.vouchers().delete(12).await.unwrap();
        assert_eq!(h.transport.last().unwrap().method, Method::DELETE);
    }
}
