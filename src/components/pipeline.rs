use crate::core::{Document, DocumentComponent, DocumentSource};
use crate::utils::error::Result;
use std::path::Path;

/// 回傳固定文件清單的來源，忽略 query
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: Vec<Document>,
}

impl StaticSource {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// 從 JSON 陣列載入文件
    pub fn from_json_str(content: &str) -> Result<Self> {
        let documents: Vec<Document> = serde_json::from_str(content)?;
        Ok(Self::new(
            documents.into_iter().map(Document::ensure_id).collect(),
        ))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

impl DocumentSource for StaticSource {
    fn retrieve(&self, _query: &str) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }
}

/// 來源 → 依序執行的 components
pub struct DocumentPipeline {
    source: Box<dyn DocumentSource>,
    components: Vec<Box<dyn DocumentComponent>>,
}

impl DocumentPipeline {
    pub fn new(source: impl DocumentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            components: Vec::new(),
        }
    }

    pub fn add_component(mut self, component: impl DocumentComponent + 'static) -> Self {
        self.components.push(Box::new(component));
        self
    }

    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    pub fn run(&self, query: &str) -> Result<Vec<Document>> {
        let mut documents = self.source.retrieve(query)?;
        tracing::debug!("source returned {} documents", documents.len());

        for component in &self.components {
            documents = component.run(documents)?;
            tracing::debug!("{} -> {} documents", component.name(), documents.len());
        }

        Ok(documents)
    }
}
