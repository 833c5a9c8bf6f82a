//! Configuration -> session -> analysis -> report flow against
//! artifacts written to a temporary directory

use phishguard_cli::report::{render_summary, AnalysisReport};
use phishguard_cli::{AppConfig, Session};
use phishguard_core::{Error, Label};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, value: serde_json::Value) {
    std::fs::write(dir.join(name), serde_json::to_vec_pretty(&value).unwrap()).unwrap();
}

/// Built-in SVC artifacts plus a logistic regression pair under a custom name
fn artifacts() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let vectorizer = json!({
        "kind": "tfidf",
        "vocabulary": {"verify": 0, "account": 1, "lunch": 2},
        "idf": [1.0, 1.0, 1.0],
        "norm": null
    });

    write(dir.path(), "tfidf_vectorizer_svc.json", vectorizer.clone());
    write(
        dir.path(),
        "phishing_detector_model_svc.json",
        json!({
            "kind": "linear_svc",
            "classes": ["Phishing Email", "Safe Email"],
            "coef": [[-1.0, -1.0, 2.0]],
            "intercept": [0.5]
        }),
    );
    write(dir.path(), "vec_lr.json", vectorizer);
    write(
        dir.path(),
        "clf_lr.json",
        json!({
            "kind": "logistic_regression",
            "classes": ["Phishing Email", "Safe Email"],
            "coef": [[-1.0, -1.0, 2.0]],
            "intercept": [0.0]
        }),
    );
    dir
}

#[test]
fn test_default_session_analyzes_email() {
    let dir = artifacts();
    let config = AppConfig {
        artifacts_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    let session = Session::start(&config).unwrap();
    assert_eq!(session.model_name(), "SVC");

    let text = "Please verify your account";
    let analysis = session.analyze(text).unwrap();
    // decision = -1 - 1 + 0.5 = -1.5
    assert_eq!(analysis.label, Label::Phishing);
    let expected = 1.0 / (1.0 + (-1.5_f64).exp());
    assert!((analysis.confidence.unwrap() - expected).abs() < 1e-12);
    assert_eq!(
        analysis.highlighted,
        "Please <mark>verify</mark> your <mark>account</mark>"
    );

    let summary = render_summary(&analysis);
    assert!(summary.contains("Model Confidence: 81.76%"));

    let report_path = dir.path().join("report.txt");
    AnalysisReport::new(text, &analysis).write_to(&report_path).unwrap();
    let report = std::fs::read_to_string(report_path).unwrap();
    assert!(report.starts_with("Email Text:\nPlease verify your account\n\nPrediction: Phishing Email\n"));
    assert!(report.contains("Model: SVC\n"));
}

#[test]
fn test_registry_file_and_keywords_from_config() {
    let dir = artifacts();
    let registry_path = dir.path().join("registry.yaml");
    std::fs::write(
        &registry_path,
        "models:\n  - name: SVC\n    classifier: phishing_detector_model_svc.json\n    vectorizer: tfidf_vectorizer_svc.json\n  - name: Logistic\n    classifier: clf_lr.json\n    vectorizer: vec_lr.json\n",
    )
    .unwrap();

    let config_path = dir.path().join("phishguard.yaml");
    std::fs::write(
        &config_path,
        format!(
            "registry: {}\nartifacts_dir: {}\ndefault_model: Logistic\nkeywords: [lunch]\n",
            registry_path.display(),
            dir.path().display()
        ),
    )
    .unwrap();

    let config = AppConfig::load(&config_path).unwrap();
    let session = Session::start(&config).unwrap();
    assert_eq!(session.model_name(), "Logistic");

    let analysis = session.analyze("Lunch at noon?").unwrap();
    assert_eq!(analysis.label, Label::Safe);
    // p(Safe) = sigmoid(2)
    let expected = 1.0 / (1.0 + (-2.0_f64).exp());
    assert!((analysis.confidence.unwrap() - expected).abs() < 1e-12);
    assert_eq!(analysis.highlighted, "<mark>Lunch</mark> at noon?");
}

#[test]
fn test_command_line_model_overrides_config() {
    let dir = artifacts();
    let config = AppConfig {
        artifacts_dir: Some(dir.path().to_path_buf()),
        default_model: Some("SVC".into()),
        ..Default::default()
    }
    .with_model(Some("Naive Bayes".into()));

    // naive Bayes artifacts were never written
    let err = Session::start(&config).unwrap_err();
    match err {
        Error::ArtifactNotFound { path } => {
            assert!(path.ends_with("phishing_detector_model_naive.json"));
        }
        other => panic!("expected ArtifactNotFound, got {other}"),
    }
}

#[test]
fn test_unknown_model_rejected() {
    let dir = artifacts();
    let config = AppConfig {
        artifacts_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    }
    .with_model(Some("Random Forest".into()));

    assert!(matches!(
        Session::start(&config).unwrap_err(),
        Error::UnknownModel(_)
    ));
}
