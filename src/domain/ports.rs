use crate::domain::model::Document;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> Option<u64>;
}

/// 遠端平台 custom components API
#[async_trait]
pub trait PlatformApi: Send + Sync {
    async fn upload(&self, archive: &Path) -> Result<serde_json::Value>;
    async fn list(&self) -> Result<serde_json::Value>;
    async fn logs(&self) -> Result<String>;
}

pub trait DocumentSource: Send + Sync {
    fn retrieve(&self, query: &str) -> Result<Vec<Document>>;
}

pub trait DocumentComponent: Send + Sync {
    fn name(&self) -> &str;
    fn run(&self, documents: Vec<Document>) -> Result<Vec<Document>>;
}
