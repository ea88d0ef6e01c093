use super::Api;
use crate::error::ApiResult;
use crate::http::LOGIN_PATH;
use crate::models::{AuthResponse, Credentials};

impl Api {
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        self.http.post(LOGIN_PATH, credentials).await
    }
}
