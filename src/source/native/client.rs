use crate::error::{AppError, AppResult};
use crate::source::models::SuccessResponse;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeConfig {
    pub base_url: String,
    /// Bearer session token from a previous login, when one exists.
    #[serde(default)]
    pub token: Option<String>,
}

/// Request helper for the proprietary REST backend. Responses are already in
/// the canonical `{code, message, data}` shape, so there is no mapping layer:
/// the envelope is decoded and returned verbatim. A non-200 `code` inside an
/// HTTP-200 response is data for the caller, not an error here.
pub struct NativeClient {
    http: reqwest::Client,
    config: NativeConfig,
}

impl NativeClient {
    pub fn new(config: NativeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<SuccessResponse<T>> {
        let request = self.authorized(self.http.get(self.url(path)).query(query));
        Self::decode(request.send().await?).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<SuccessResponse<T>> {
        let request = self.authorized(self.http.post(self.url(path)).json(body));
        Self::decode(request.send().await?).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<SuccessResponse<T>> {
        let request = self.authorized(self.http.put(self.url(path)).json(body));
        Self::decode(request.send().await?).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<SuccessResponse<T>> {
        let request = self.authorized(self.http.delete(self.url(path)).query(query));
        Self::decode(request.send().await?).await
    }

    pub async fn delete_with_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<SuccessResponse<T>> {
        let request = self.authorized(self.http.delete(self.url(path)).json(body));
        Self::decode(request.send().await?).await
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> AppResult<SuccessResponse<T>> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}
