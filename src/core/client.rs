use crate::config::deploy_config::{API_KEY_ENV, DEFAULT_ARCHIVE_NAME};
use crate::core::{ConfigProvider, PlatformApi};
use crate::utils::error::{ComponentError, Result};
use crate::utils::validation::{validate_required_field, validate_url};
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.cloud.deepset.ai";
pub const COMPONENTS_PATH: &str = "/api/v2/custom_components";

/// custom components API 的 HTTP client，每次呼叫只送一次請求，不重試
pub struct PlatformClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl PlatformClient {
    pub fn new(api_url: &str, api_key: &str) -> Result<Self> {
        validate_url("platform.api_url", api_url)?;
        if api_key.trim().is_empty() {
            return Err(ComponentError::MissingConfigError {
                field: API_KEY_ENV.to_string(),
            });
        }

        Ok(Self {
            client: Client::new(),
            base_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout: None,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let api_key = config.api_key();
        let api_key = validate_required_field(API_KEY_ENV, &api_key)?;

        let client = Self::new(config.api_url(), api_key)?;
        Ok(match config.timeout_seconds() {
            Some(secs) => client.with_timeout(Duration::from_secs(secs)),
            None => client,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self, suffix: &str) -> String {
        format!("{}{}{}", self.base_url, COMPONENTS_PATH, suffix)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.client.request(method, url).bearer_auth(&self.api_key);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ComponentError::ApiStatusError {
            status: status.as_u16(),
            body,
        })
    }

    /// 空回應回傳 Null，非 JSON 回應保留原文字
    async fn json_body(response: Response) -> Result<serde_json::Value> {
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }
}

#[async_trait::async_trait]
impl PlatformApi for PlatformClient {
    async fn upload(&self, archive: &Path) -> Result<serde_json::Value> {
        let data = tokio::fs::read(archive).await?;
        let file_name = archive
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_ARCHIVE_NAME)
            .to_string();

        tracing::debug!(
            "Uploading {} ({} bytes) to {}",
            file_name,
            data.len(),
            self.endpoint("")
        );

        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str("application/zip")?;
        let form = Form::new().part("file", part);

        let response = self
            .request(Method::POST, &self.endpoint(""))
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Self::json_body(response).await
    }

    async fn list(&self) -> Result<serde_json::Value> {
        tracing::debug!("Listing components at {}", self.endpoint(""));
        let response = self
            .request(Method::GET, &self.endpoint(""))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Self::json_body(response).await
    }

    async fn logs(&self) -> Result<String> {
        tracing::debug!("Fetching logs from {}", self.endpoint("/logs"));
        let response = self
            .request(Method::GET, &self.endpoint("/logs"))
            .header(ACCEPT, "text/plain")
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.text().await?)
    }
}

/// list 回應可能是陣列，或是 `{ "data": [...] }` 分頁物件
pub fn component_items(response: &serde_json::Value) -> Vec<&serde_json::Value> {
    match response {
        serde_json::Value::Array(items) => items.iter().collect(),
        serde_json::Value::Object(obj) => obj
            .get("data")
            .and_then(|data| data.as_array())
            .map(|items| items.iter().collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeployConfig;
    use httpmock::prelude::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = PlatformClient::new("https://api.example.com/", "token").unwrap();
        assert_eq!(
            client.endpoint(""),
            "https://api.example.com/api/v2/custom_components"
        );
        assert_eq!(
            client.endpoint("/logs"),
            "https://api.example.com/api/v2/custom_components/logs"
        );
    }

    #[test]
    fn test_missing_token_is_rejected_before_request() {
        let result = PlatformClient::new("https://api.example.com", "  ");
        assert!(matches!(
            result,
            Err(ComponentError::MissingConfigError { .. })
        ));

        let config = DeployConfig::default();
        let result = PlatformClient::from_config(&config);
        assert!(matches!(
            result,
            Err(ComponentError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_from_config_uses_timeout() {
        let mut config = DeployConfig::default();
        config.platform.api_key = Some("token".to_string());
        config.platform.timeout_seconds = Some(15);
        let client = PlatformClient::from_config(&config).unwrap();
        assert_eq!(client.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_component_items() {
        let array = serde_json::json!([{"name": "a"}, {"name": "b"}]);
        assert_eq!(component_items(&array).len(), 2);

        let paged = serde_json::json!({"data": [{"name": "a"}], "total": 1});
        assert_eq!(component_items(&paged).len(), 1);

        assert!(component_items(&serde_json::Value::Null).is_empty());
    }

    #[tokio::test]
    async fn test_list_sends_bearer_token() {
        let server = MockServer::start();
        let list_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v2/custom_components")
                .header("authorization", "Bearer test-token")
                .header("accept", "application/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"data": [{"custom_component_id": "c-1"}]}));
        });

        let client = PlatformClient::new(&server.base_url(), "test-token").unwrap();
        let response = client.list().await.unwrap();

        list_mock.assert();
        assert_eq!(component_items(&response).len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status_returns_body() {
        let server = MockServer::start();
        let logs_mock = server.mock(|when, then| {
            when.method(GET).path("/api/v2/custom_components/logs");
            then.status(403).body("forbidden");
        });

        let client = PlatformClient::new(&server.base_url(), "bad-token").unwrap();
        let err = client.logs().await.unwrap_err();

        logs_mock.assert();
        match err {
            ComponentError::ApiStatusError { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
