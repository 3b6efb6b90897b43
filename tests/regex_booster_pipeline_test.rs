use anyhow::Result;
use dc_custom_component::core::Document;
use dc_custom_component::{DocumentJoiner, DocumentPipeline, RegexBooster, StaticSource};

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("document should have a score");
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {} got {}",
        expected,
        actual
    );
}

fn booster_pipeline(documents: Vec<Document>) -> Result<DocumentPipeline> {
    Ok(DocumentPipeline::new(StaticSource::new(documents))
        .add_component(RegexBooster::new([(r"\bPython\b", 1.5), (r"\bAI\b", 1.3)])?)
        .add_component(DocumentJoiner::new()))
}

#[test]
fn test_regex_booster_in_pipeline() -> Result<()> {
    let pipeline = booster_pipeline(vec![
        Document::new("Python is a programming language").with_score(0.9),
        Document::new("Java is also a programming language").with_score(0.7),
        Document::new("Machine learning is a subset of AI").with_score(0.5),
    ])?;

    let documents = pipeline.run("programming languages")?;

    assert_eq!(documents.len(), 3);
    assert_eq!(documents[0].content, "Python is a programming language");
    assert_close(documents[0].score, 0.9 * 1.5);
    assert_eq!(documents[1].content, "Java is also a programming language");
    assert_close(documents[1].score, 0.7);
    assert_eq!(documents[2].content, "Machine learning is a subset of AI");
    assert_close(documents[2].score, 0.5 * 1.3);

    Ok(())
}

#[test]
fn test_regex_booster_pipeline_no_matches() -> Result<()> {
    let pipeline = booster_pipeline(vec![
        Document::new("C++ is a compiled language").with_score(0.8),
        Document::new("Ruby is dynamic").with_score(0.6),
    ])?;

    let documents = pipeline.run("programming languages")?;

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].content, "C++ is a compiled language");
    assert_close(documents[0].score, 0.8);
    assert_eq!(documents[1].content, "Ruby is dynamic");
    assert_close(documents[1].score, 0.6);

    Ok(())
}

#[test]
fn test_pipeline_from_json_documents() -> Result<()> {
    let source = StaticSource::from_json_str(
        r#"[
            {"content": "SQL joins explained", "score": 1.0},
            {"content": "Python for machine learning", "score": 1.0},
            {"content": "Notes without a score"}
        ]"#,
    )?;

    let pipeline = DocumentPipeline::new(source)
        .add_component(RegexBooster::new([
            (r"\bpython\b", 1.5),
            (r"machine\s+learning", 1.3),
            (r"\bsql\b", 0.8),
        ])?)
        .add_component(DocumentJoiner::new().with_top_k(2));

    let documents = pipeline.run("")?;

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].content, "Python for machine learning");
    assert_close(documents[0].score, 1.95);
    assert_eq!(documents[1].content, "SQL joins explained");
    assert_close(documents[1].score, 0.8);

    Ok(())
}
