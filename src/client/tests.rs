use super::*;
use crate::error::{IndexBuildError, IndexLoadError};
use crate::generator::DisabledGenerator;
use crate::types::{AnswerStatus, FileKind};
use std::fs;
use tempfile::TempDir;

// Helper to create a test client whose artifacts live in a temp dir
fn create_test_client(temp_dir: &TempDir) -> QaClient {
    let mut config = Config::default();
    config.indexing.index_path = temp_dir.path().join("out/index.json");
    config.indexing.summary_path = temp_dir.path().join("out/summary.md");
    QaClient::with_generator(config, Arc::new(DisabledGenerator))
}

fn write_project(root: &Path) {
    let route = root.join("app/api/users/route.ts");
    fs::create_dir_all(route.parent().unwrap()).unwrap();
    fs::write(
        &route,
        "export async function GET(req: Request) {}\nexport async function POST(req: Request) {}\n",
    )
    .unwrap();
    fs::write(root.join("broken.ts"), "export function (\n").unwrap();
}

#[tokio::test]
async fn test_answer_before_load_fails() {
    let temp_dir = TempDir::new().unwrap();
    let client = create_test_client(&temp_dir);

    let result = client.answer_question("What API endpoints exist?").await;
    assert!(matches!(result, Err(QaError::IndexNotLoaded)));
    assert!(client.snapshot().await.is_none());
}

#[tokio::test]
async fn test_build_persists_and_loads() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("project");
    write_project(&project);
    let client = create_test_client(&temp_dir);

    let report = client.build_index(&project).await.unwrap();

    assert_eq!(report.snapshot.total_files, 1);
    assert_eq!(report.snapshot.kind_count(FileKind::ApiRoute), 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].file, "broken.ts");
    assert!(client.index_path().exists());
    // Summary is off by default
    assert!(!temp_dir.path().join("out/summary.md").exists());

    let loaded = client.snapshot().await.unwrap();
    assert_eq!(loaded.total_files, 1);
}

#[tokio::test]
async fn test_build_writes_summary_when_enabled() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("project");
    write_project(&project);

    let mut config = Config::default();
    config.indexing.index_path = temp_dir.path().join("index.json");
    config.indexing.summary_path = temp_dir.path().join("summary.md");
    config.indexing.write_summary = true;
    let client = QaClient::with_generator(config, Arc::new(DisabledGenerator));

    client.build_index(&project).await.unwrap();
    let summary = fs::read_to_string(temp_dir.path().join("summary.md")).unwrap();
    assert!(summary.contains("app/api/users/route.ts"));
}

#[tokio::test]
async fn test_build_missing_root_persists_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let client = create_test_client(&temp_dir);

    let result = client.build_index(temp_dir.path().join("missing")).await;
    assert!(matches!(
        result,
        Err(QaError::IndexBuild(IndexBuildError::RootNotFound(_)))
    ));
    assert!(!client.index_path().exists());
    assert!(client.snapshot().await.is_none());
}

#[tokio::test]
async fn test_load_index_then_answer() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("project");
    write_project(&project);

    let builder_client = create_test_client(&temp_dir);
    builder_client.build_index(&project).await.unwrap();

    // A fresh client only sees the persisted artifact
    let client = create_test_client(&temp_dir);
    let snapshot = client.load_index(client.index_path()).await.unwrap();
    assert_eq!(snapshot.statistics.total_api_routes, 2);

    let result = client
        .answer_question("What API endpoints exist?")
        .await
        .unwrap();
    assert_eq!(result.sources[0].file, "app/api/users/route.ts");
    assert_eq!(result.answer_status, AnswerStatus::Unavailable);
}

#[tokio::test]
async fn test_load_missing_index() {
    let temp_dir = TempDir::new().unwrap();
    let client = create_test_client(&temp_dir);

    let result = client.load_index(temp_dir.path().join("nope.json")).await;
    assert!(matches!(
        result,
        Err(QaError::IndexLoad(IndexLoadError::NotFound(_)))
    ));
}

#[tokio::test]
async fn test_rebuild_replaces_loaded_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("project");
    write_project(&project);
    let client = create_test_client(&temp_dir);

    client.build_index(&project).await.unwrap();
    fs::write(project.join("extra.ts"), "export const extra = () => 1;\n").unwrap();
    client.build_index(&project).await.unwrap();

    assert_eq!(client.snapshot().await.unwrap().total_files, 2);
}

#[test]
fn test_with_config_rejects_invalid_config() {
    let mut config = Config::default();
    config.generator.timeout_secs = 0;
    assert!(matches!(
        QaClient::with_config(config),
        Err(QaError::Config(_))
    ));
}

#[test]
fn test_client_clone_shares_engine() {
    let temp_dir = TempDir::new().unwrap();
    let client = create_test_client(&temp_dir);
    let cloned = client.clone();
    assert!(Arc::ptr_eq(&client.engine, &cloned.engine));
}
