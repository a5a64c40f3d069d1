//! Sign-in, registration and sign-out.

use super::models::{LoginRequest, LoginResponse, RegisterRequest};
use super::validate;
use crate::error::Result;
use crate::gateway::{ApiRequest, Gateway};
use crate::session::UserRecord;

pub struct AuthApi {
    gateway: Gateway,
}

impl AuthApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Exchange credentials for a token and persist the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserRecord> {
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        validate::login(&request)?;

        let response: LoginResponse = self
            .gateway
            .fetch(ApiRequest::post("/auth/login").json(&request)?)
            .await?;
        let (token, user) = response.into_parts()?;
        self.gateway.session().sign_in(&token, &user)?;
        Ok(user)
    }

    /// Create an account. The caller signs in separately.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        validate::registration(request)?;
        self.gateway
            .execute(ApiRequest::post("/auth/register").json(request)?)
            .await
    }

    /// Forget the local session. The backend keeps no session state.
    pub fn logout(&self) -> Result<()> {
        self.gateway.session().sign_out()
    }
}

#[cfg(test)]
mod tests {
    use http::{Method, StatusCode};

    use super::super::testing::harness;
    use crate::error::ApiError;
    use crate::session::Role;

    #[tokio::test]
    async fn test_login_signs_in() {
        let h = harness();
        h.transport.on(
            Method::POST,
            "/auth/login",
            StatusCode::OK,
            r#"{"token":"jwt-1","user":{"id":3,"username":"mai","role":"ROLE_DRIVER"}}"#,
        );

        let user = h.api.auth().login(" mai ", "pw").await.unwrap();
        assert_eq!(user.role, Role::Driver);
        assert!(h.session.is_signed_in().unwrap());

        let sent = h.transport.last().unwrap();
        let body = sent.body.unwrap();
        assert_eq!(body["username"], "mai");
        // No token existed yet, so none was attached
        assert!(sent.headers.get(http::header::AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_blank_credentials_never_reach_transport() {
        let h = harness();
        let err = h.api.auth().login("", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "username", .. }));
        assert_eq!(h.transport.count(), 0);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let h = harness();
        h.session
            .sign_in("tok", &super::super::testing::user(Role::Customer))
            .unwrap();
        h.api.auth().logout().unwrap();
        assert!(!h.session.is_signed_in().unwrap());
    }
}
