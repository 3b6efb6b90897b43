use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// 檢索結果中的單一文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub meta: HashMap<String, serde_json::Value>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            id: content_id(&content, &HashMap::new()),
            content,
            score: None,
            meta: HashMap::new(),
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.meta.insert(key.into(), value);
        self.id = content_id(&self.content, &self.meta);
        self
    }

    /// 輸入 JSON 沒有 id 時以內容與 meta 補上
    pub fn ensure_id(mut self) -> Self {
        if self.id.is_empty() {
            self.id = content_id(&self.content, &self.meta);
        }
        self
    }

    /// 排序用分數，沒有分數視為 0
    pub fn sort_score(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

/// meta 以排序後的鍵序列化，id 不受 HashMap 迭代順序影響
fn content_id(content: &str, meta: &HashMap<String, serde_json::Value>) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    if !meta.is_empty() {
        let sorted: BTreeMap<&String, &serde_json::Value> = meta.iter().collect();
        serde_json::to_string(&sorted)
            .unwrap_or_default()
            .hash(&mut hasher);
    }
    format!("{:016x}", hasher.finish())
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub file_count: usize,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    pub archive: ArchiveSummary,
    pub response: serde_json::Value,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    pub commands_run: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_is_derived_from_content() {
        let a = Document::new("Python is great");
        let b = Document::new("Python is great");
        let c = Document::new("Java is okay");
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_document_id_covers_meta() {
        let a = Document::new("Python").with_meta("source", serde_json::json!("a"));
        let b = Document::new("Python").with_meta("source", serde_json::json!("b"));
        let a_again = Document::new("Python").with_meta("source", serde_json::json!("a"));
        assert_ne!(a.id, b.id);
        assert_ne!(a.id, Document::new("Python").id);
        assert_eq!(a.id, a_again.id);
    }

    #[test]
    fn test_document_deserialize_without_id_or_score() {
        let doc: Document = serde_json::from_str(r#"{"content": "hello"}"#).unwrap();
        assert!(doc.id.is_empty());
        assert_eq!(doc.score, None);
        assert_eq!(doc.sort_score(), 0.0);

        let doc = doc.ensure_id();
        assert_eq!(doc.id, Document::new("hello").id);
    }
}
