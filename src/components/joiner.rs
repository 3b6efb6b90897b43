use crate::core::{Document, DocumentComponent};
use crate::utils::error::Result;
use std::cmp::Ordering;
use std::collections::HashMap;

/// 串接多組文件：相同 id 只保留最高分的一份
#[derive(Debug, Clone)]
pub struct DocumentJoiner {
    sort_by_score: bool,
    top_k: Option<usize>,
}

impl Default for DocumentJoiner {
    fn default() -> Self {
        Self {
            sort_by_score: true,
            top_k: None,
        }
    }
}

impl DocumentJoiner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_sort_by_score(mut self, sort_by_score: bool) -> Self {
        self.sort_by_score = sort_by_score;
        self
    }

    pub fn join(&self, inputs: Vec<Vec<Document>>) -> Vec<Document> {
        let mut order: Vec<String> = Vec::new();
        let mut best: HashMap<String, Document> = HashMap::new();

        for doc in inputs.into_iter().flatten().map(Document::ensure_id) {
            match best.get_mut(&doc.id) {
                Some(existing) => {
                    if score_order(&doc, existing) == Ordering::Greater {
                        *existing = doc;
                    }
                }
                None => {
                    order.push(doc.id.clone());
                    best.insert(doc.id.clone(), doc);
                }
            }
        }

        let mut documents: Vec<Document> = order
            .into_iter()
            .filter_map(|id| best.remove(&id))
            .collect();

        if self.sort_by_score {
            documents.sort_by(|a, b| score_order(b, a));
        }
        if let Some(top_k) = self.top_k {
            documents.truncate(top_k);
        }
        documents
    }
}

/// 沒有分數的文件排在所有有分數的文件之後
fn score_order(a: &Document, b: &Document) -> Ordering {
    match (a.score, b.score) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

impl DocumentComponent for DocumentJoiner {
    fn name(&self) -> &str {
        "joiner"
    }

    fn run(&self, documents: Vec<Document>) -> Result<Vec<Document>> {
        Ok(self.join(vec![documents]))
    }
}
