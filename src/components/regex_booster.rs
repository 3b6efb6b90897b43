use crate::core::{Document, DocumentComponent};
use crate::utils::error::Result;
use crate::utils::validation::validate_boost_factor;
use regex::{Regex, RegexBuilder};

/// 依 regex 規則調整文件分數後重新排序。
///
/// - 比對不分大小寫
/// - 同一文件符合多個規則時倍率相乘
/// - 沒有分數的文件維持 `None`，排序時視為 0
/// - 倍率 > 1 加分，介於 0 與 1 之間減分，1.0 不影響
///
/// ```
/// use dc_custom_component::components::RegexBooster;
/// use dc_custom_component::core::Document;
///
/// let booster = RegexBooster::new([(r"\bpython\b", 1.5), (r"machine\s+learning", 1.3)]).unwrap();
/// let docs = booster.boost(vec![
///     Document::new("Rust notes").with_score(1.0),
///     Document::new("Python and machine learning").with_score(1.0),
/// ]);
/// assert_eq!(docs[0].content, "Python and machine learning");
/// assert!((docs[0].score.unwrap() - 1.95).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct RegexBooster {
    boosts: Vec<(Regex, f64)>,
}

impl RegexBooster {
    pub fn new<I, S>(boosts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for (pattern, boost) in boosts {
            let pattern = pattern.as_ref();
            validate_boost_factor(&format!("boost[{}]", pattern), boost)?;
            let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
            compiled.push((regex, boost));
        }

        Ok(Self { boosts: compiled })
    }

    pub fn len(&self) -> usize {
        self.boosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boosts.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = (&str, f64)> {
        self.boosts.iter().map(|(regex, boost)| (regex.as_str(), *boost))
    }

    pub fn boost(&self, mut documents: Vec<Document>) -> Vec<Document> {
        for (regex, boost) in &self.boosts {
            for doc in documents.iter_mut() {
                if let Some(score) = doc.score.as_mut() {
                    if regex.is_match(&doc.content) {
                        *score *= boost;
                    }
                }
            }
        }

        // sort_by 為穩定排序，同分保留原順序
        documents.sort_by(|a, b| b.sort_score().total_cmp(&a.sort_score()));
        documents
    }
}

impl DocumentComponent for RegexBooster {
    fn name(&self) -> &str {
        "regex_booster"
    }

    fn run(&self, documents: Vec<Document>) -> Result<Vec<Document>> {
        let boosted = self.boost(documents);
        tracing::debug!("regex_booster applied {} patterns", self.boosts.len());
        Ok(boosted)
    }
}
