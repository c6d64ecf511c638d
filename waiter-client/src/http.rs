//! HTTP transport for the ordering backend

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ErrorCode;

use crate::error::{ClientError, ClientResult};

/// Backend base URL derived from the host entered by staff
///
/// A bare host (`"10.0.0.5:8080"`) is reached over plain `http://`;
/// a value that already carries a scheme is used as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
}

impl Endpoint {
    pub fn parse(host: &str) -> ClientResult<Self> {
        let host = host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(ClientError::Config(ErrorCode::EndpointMissing));
        }

        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET` full catalog
    pub fn menu_url(&self) -> String {
        format!("{}/menu/list/all", self.base_url)
    }

    /// `POST` device activation
    pub fn activation_url(&self, device_id: &str) -> String {
        format!("{}/activation/{}", self.base_url, device_id)
    }

    /// `POST` order submission
    pub fn order_url(&self) -> String {
        format!("{}/order/save", self.base_url)
    }
}

/// HTTP 客户端 trait
///
/// Takes absolute URLs because the endpoint can be changed by staff at
/// any time; callers build them with [`Endpoint`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET and decode a JSON body
    async fn get<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T>;

    /// POST without a body, returning the raw response text
    async fn post_empty(&self, url: &str) -> ClientResult<String>;

    /// POST a JSON body, returning the raw response text
    async fn post<B: Serialize + Sync>(&self, url: &str, body: &B) -> ClientResult<String>;
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
}

impl NetworkHttpClient {
    pub fn new(timeout_secs: u64) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn post_empty(&self, url: &str) -> ClientResult<String> {
        let response = self.client.post(url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.text().await?)
    }

    async fn post<B: Serialize + Sync>(&self, url: &str, body: &B) -> ClientResult<String> {
        let response = self.client.post(url).json(body).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.text().await?)
    }
}
