// Integration tests for Pathwise
use pathwise::prelude::*;
use pathwise::{ArtifactStore, Outcome};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, value: Value) {
    fs::write(dir.join(name), serde_json::to_vec_pretty(&value).unwrap()).unwrap();
}

/// Two well separated clusters: "A" students score high everywhere, "B" low
fn write_artifacts(dir: &Path, rows: Value) {
    write(dir, "features.json", json!(["Mathematics", "Physics", "Chemistry", "English"]));
    write(
        dir,
        "scaler.json",
        json!({"kind": "standard", "mean": [55.0, 55.0, 55.0, 55.0], "scale": [20.0, 20.0, 20.0, 20.0]}),
    );
    write(dir, "dataset.json", rows);
}

fn clustered_rows() -> Value {
    json!([
        {"Mathematics": 88, "Physics": 85, "Chemistry": 80, "English": 60, "Course": "A", "Career Options": "Engineer, Analyst"},
        {"Mathematics": 92, "Physics": 90, "Chemistry": 84, "English": 55, "Course": "A", "Career Options": "Engineer, Researcher"},
        {"Mathematics": 25, "Physics": 30, "Chemistry": 28, "English": 90, "Course": "B", "Career Options": "Writer"},
        {"Mathematics": 20, "Physics": 22, "Chemistry": 35, "English": 85, "Course": "B", "Career Options": ["Editor", "Writer"]}
    ])
}

fn load(dir: &Path) -> Recommender {
    Recommender::new(ArtifactStore::open(dir).unwrap().load().unwrap())
}

fn raw(value: Value) -> RawProfile {
    raw_profile_from_value(value).unwrap()
}

#[test]
fn test_recommend_prefers_matching_cluster() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path(), clustered_rows());
    let recommender = load(dir.path());

    let recs = recommender
        .recommend(&raw(json!({"Mathematics": 90, "Physics": 88, "Chemistry": 82, "English": 58})), 5)
        .unwrap();

    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].course, "A");
    assert_eq!(recs[1].course, "B");
    assert!(recs[0].similarity > recs[1].similarity);
    assert_eq!(recs[0].career_options, vec!["Engineer", "Analyst", "Researcher"]);
    assert_eq!(recs[1].career_options, vec!["Writer", "Editor"]);
    assert!(recs[0].top_skills.len() <= 3);
}

#[test]
fn test_low_profile_prefers_low_cluster() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path(), clustered_rows());
    let recommender = load(dir.path());

    let recs = recommender
        .recommend(&raw(json!({"scores": {"Mathematics": 22, "Physics": 26, "Chemistry": 30, "English": 88}})), 1)
        .unwrap();

    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].course, "B");
}

#[test]
fn test_partial_and_messy_profile() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path(), clustered_rows());
    let recommender = load(dir.path());

    let profile = raw(json!({"Mathematics": "95", "Physics": 140, "Chemistry": "n/a", "Music": 80}));
    let normalized = recommender.normalize(&profile).unwrap();
    assert_eq!(normalized.profile.as_slice(), &[95.0, 100.0, 50.0, 50.0]);
    assert_eq!(normalized.defaulted, vec!["Chemistry", "English"]);
    assert_eq!(normalized.clamped, vec!["Physics"]);

    let recs = recommender.recommend(&profile, 5).unwrap();
    assert_eq!(recs[0].course, "A");
}

#[test]
fn test_repeated_requests_are_identical() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path(), clustered_rows());
    let recommender = load(dir.path());

    let profile = raw(json!({"Mathematics": 61, "Physics": 47, "Chemistry": 73, "English": 66}));
    let first = serde_json::to_string(&recommender.recommend(&profile, 5).unwrap()).unwrap();
    let second = serde_json::to_string(&recommender.recommend(&profile, 5).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_dataset_is_reported() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path(), json!([]));
    let recommender = load(dir.path());

    let outcome: Outcome<_> = recommender.recommend(&raw(json!({"Mathematics": 70})), 5).into();
    let body = serde_json::to_value(&outcome).unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["kind"], "EmptyDataset");
}

#[test]
fn test_predict_and_advise() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path(), clustered_rows());
    write(
        dir.path(),
        "classifier.json",
        json!({"coef": [[1.0, 1.0, 1.0, -1.0]], "intercept": [0.0]}),
    );
    write(dir.path(), "label_encoder.json", json!({"classes": ["B", "A"]}));
    let recommender = load(dir.path());

    let best = recommender
        .predict_best(&raw(json!({"Mathematics": 95, "Physics": 90, "Chemistry": 85, "English": 40})))
        .unwrap();
    assert_eq!(best, "A");

    let ranked = recommender
        .predict_ranked(&raw(json!({"Mathematics": 20, "Physics": 25, "Chemistry": 30, "English": 95})), 2)
        .unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].course, "B");
    assert!(ranked[0].probability > 50.0);

    let advice = recommender
        .advise(&raw(json!({"Mathematics": 95, "Physics": 90, "Chemistry": 85, "English": 40})), 2)
        .unwrap();
    assert_eq!(advice.best_course.as_deref(), Some("A"));
    assert_eq!(advice.careers, vec!["Engineer", "Analyst", "Researcher"]);
    assert_eq!(advice.stats.courses_considered, 2);
    assert_eq!(advice.stats.results_count, 2);
}

#[test]
fn test_predict_without_classifier_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path(), clustered_rows());
    let recommender = load(dir.path());

    let err = recommender.predict_best(&raw(json!({"Mathematics": 90}))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PredictionError);
}

#[test]
fn test_manifest_layout_and_categories() {
    let dir = TempDir::new().unwrap();
    write_artifacts(
        dir.path(),
        json!([
            {"Mathematics": 90, "Physics": 80, "Chemistry": 70, "English": 50, "Stream": "B.Tech", "Careers": "Engineer"},
            {"Mathematics": 30, "Physics": 30, "Chemistry": 40, "English": 90, "Stream": "B.A.", "Careers": "Journalist"}
        ]),
    );
    write(
        dir.path(),
        "pathwise.json",
        json!({
            "name": "pcm",
            "course_column": "Stream",
            "career_columns": ["Careers"],
            "recommend": {"top_n": 1},
            "categories": [
                {"id": "science", "title": "Science", "subjects": ["Physics", "Chemistry", "Biology"]}
            ]
        }),
    );
    let recommender = load(dir.path());

    assert_eq!(recommender.context().name(), "pcm");
    assert_eq!(recommender.default_top_n(), 1);

    let recs = recommender
        .recommend(&raw(json!({"Mathematics": 95, "Physics": 85})), recommender.default_top_n())
        .unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].course, "B.Tech");
    assert_eq!(recs[0].career_options, vec!["Engineer"]);

    let catalog = recommender.catalog();
    assert_eq!(catalog.count, 4);
    assert_eq!(catalog.categories[0].subjects, vec!["Physics", "Chemistry"]);
    assert_eq!(catalog.missing, vec!["Biology"]);
}
