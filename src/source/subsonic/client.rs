use crate::error::{AppError, AppResult};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Protocol version we speak. Token auth requires 1.13+.
pub const API_VERSION: &str = "1.16.1";
const DEFAULT_CLIENT_NAME: &str = "Echoplay";
const SALT_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsonicConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub client_name: Option<String>,
}

/// Low-level Subsonic transport: request signing, envelope unwrapping and
/// error mapping. Performs no retries; retry policy belongs to the caller.
pub struct SubsonicClient {
    http: reqwest::Client,
    config: SubsonicConfig,
}

impl SubsonicClient {
    pub fn new(config: SubsonicConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &SubsonicConfig {
        &self.config
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn client_name(&self) -> &str {
        self.config
            .client_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CLIENT_NAME)
    }

    /// Standard auth parameters with a fresh salt per request, so replay of
    /// a captured request fails: `t = md5(password + salt)`.
    fn auth_params(&self) -> Vec<(&'static str, String)> {
        let salt: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SALT_LEN)
            .map(char::from)
            .collect();
        let token = format!("{:x}", md5::compute(format!("{}{}", self.config.password, salt)));

        vec![
            ("u", self.config.username.clone()),
            ("t", token),
            ("s", salt),
            ("v", API_VERSION.to_string()),
            ("c", self.client_name().to_string()),
            ("f", "json".to_string()),
        ]
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}/rest/{}.view", self.base(), endpoint);
        let response = self
            .http
            .get(&url)
            .query(&self.auth_params())
            .query(params)
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    /// Subsonic is GET-centric, but mutation-style calls also accept POST
    /// with the auth parameters kept in the query string.
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}/rest/{}.view", self.base(), endpoint);
        let response = self
            .http
            .post(&url)
            .query(&self.auth_params())
            .query(params)
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: serde_json::Value = response.json().await?;
        let Some(inner) = body.get("subsonic-response") else {
            return Err(AppError::Protocol {
                code: 0,
                message: "Response is missing the subsonic-response envelope".to_string(),
            });
        };

        if inner.get("status").and_then(|value| value.as_str()) == Some("failed") {
            let error = inner.get("error");
            let code = error
                .and_then(|err| err.get("code"))
                .and_then(|value| value.as_u64())
                .unwrap_or(0) as u32;
            let message = error
                .and_then(|err| err.get("message"))
                .and_then(|value| value.as_str())
                .unwrap_or("Subsonic request failed")
                .to_string();
            // Error 70 is "requested data was not found".
            if code == 70 {
                return Err(AppError::NotFound(message));
            }
            return Err(AppError::Protocol { code, message });
        }

        Ok(serde_json::from_value(inner.clone())?)
    }

    /// Binary resource URLs are constructed, never fetched: the same auth
    /// parameters plus the resource id on a fixed path. Callers embed these
    /// directly into image and audio elements.
    fn signed_resource_url(&self, endpoint: &str, id: &str) -> String {
        let mut query = String::new();
        for (key, value) in self.auth_params() {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(key);
            query.push('=');
            query.push_str(&urlencoding::encode(&value));
        }
        format!(
            "{}/rest/{}.view?{}&id={}",
            self.base(),
            endpoint,
            query,
            urlencoding::encode(id)
        )
    }

    pub fn cover_art_url(&self, id: &str) -> String {
        self.signed_resource_url("getCoverArt", id)
    }

    pub fn stream_url(&self, id: &str) -> String {
        self.signed_resource_url("stream", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SubsonicClient {
        SubsonicClient::new(SubsonicConfig {
            base_url: "http://music.local:4533/".to_string(),
            username: "alice".to_string(),
            password: "secret123".to_string(),
            client_name: None,
        })
    }

    #[test]
    fn auth_params_sign_password_with_salt() {
        let params = client().auth_params();
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        let salt = get("s");
        assert_eq!(salt.len(), SALT_LEN);
        let expected = format!("{:x}", md5::compute(format!("secret123{}", salt)));
        assert_eq!(get("t"), expected);
        assert_eq!(get("u"), "alice");
        assert_eq!(get("v"), API_VERSION);
        assert_eq!(get("c"), "Echoplay");
        assert_eq!(get("f"), "json");
    }

    #[test]
    fn auth_salt_is_fresh_per_request() {
        let client = client();
        let first = client.auth_params();
        let second = client.auth_params();
        let salt = |params: &[(&str, String)]| {
            params
                .iter()
                .find(|(k, _)| *k == "s")
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_ne!(salt(&first), salt(&second));
    }

    #[test]
    fn resource_urls_carry_auth_and_id() {
        let url = client().stream_url("tr-42");
        assert!(url.starts_with("http://music.local:4533/rest/stream.view?"));
        assert!(url.contains("u=alice"));
        assert!(url.contains("&s="));
        assert!(url.contains("&t="));
        assert!(url.ends_with("&id=tr-42"));

        let cover = client().cover_art_url("al 7");
        assert!(cover.contains("/rest/getCoverArt.view?"));
        assert!(cover.ends_with("&id=al%207"));
    }
}
