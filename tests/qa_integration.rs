/// End-to-end tests: build an index from a project tree, persist it, load it
/// and answer questions through the public client
use anyhow::Result;
use async_trait::async_trait;
use codebase_qa::config::Config;
use codebase_qa::error::GeneratorError;
use codebase_qa::generator::{AnswerGenerator, DisabledGenerator, GenerationRequest};
use codebase_qa::types::{AnswerStatus, ConfidenceTier, FileKind};
use codebase_qa::QaClient;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

struct CountingGenerator {
    calls: AtomicUsize,
}

#[async_trait]
impl AnswerGenerator for CountingGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("Answered from {} bytes of context", request.context.len()))
    }

    fn name(&self) -> &str {
        "counting"
    }
}

struct StalledGenerator;

#[async_trait]
impl AnswerGenerator for StalledGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GeneratorError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("too late".to_string())
    }

    fn name(&self) -> &str {
        "stalled"
    }
}

fn write(root: &Path, relative: &str, contents: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

fn write_users_route(root: &Path) -> Result<()> {
    write(
        root,
        "app/api/users/route.ts",
        r#"import { NextResponse } from "next/server";

/** List users */
export async function GET(request: Request) {
    return NextResponse.json([]);
}

/** Create a user */
export async function POST(request: Request) {
    const body = await request.json();
    return NextResponse.json(body, { status: 201 });
}
"#,
    )
}

fn config_in(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.indexing.index_path = dir.path().join("artifacts/index.json");
    config.indexing.summary_path = dir.path().join("artifacts/summary.md");
    config
}

#[tokio::test]
async fn test_route_file_is_indexed_as_api_route() -> Result<()> {
    let dir = TempDir::new()?;
    let project = dir.path().join("project");
    write_users_route(&project)?;

    let client = QaClient::with_generator(config_in(&dir), Arc::new(DisabledGenerator));
    let report = client.build_index(&project).await?;

    let snapshot = &report.snapshot;
    assert_eq!(snapshot.statistics.total_api_routes, 2);
    let file = snapshot
        .file("app/api/users/route.ts")
        .expect("route file indexed");
    assert_eq!(file.kind, FileKind::ApiRoute);

    let json = serde_json::to_value(snapshot)?;
    assert_eq!(json["statistics"]["totalApiRoutes"], 2);
    assert_eq!(json["files"][0]["kind"], "api-route");

    Ok(())
}

#[tokio::test]
async fn test_endpoint_question_ranks_route_first() -> Result<()> {
    let dir = TempDir::new()?;
    let project = dir.path().join("project");
    write_users_route(&project)?;
    write(
        &project,
        "lib/format.ts",
        "export function formatDate(value: Date): string {\n    return value.toISOString();\n}\n",
    )?;

    let generator = Arc::new(CountingGenerator {
        calls: AtomicUsize::new(0),
    });
    let client = QaClient::with_generator(config_in(&dir), generator.clone());
    client.build_index(&project).await?;

    let result = client.answer_question("What API endpoints exist?").await?;

    assert_eq!(result.sources[0].file, "app/api/users/route.ts");
    assert!(matches!(
        result.confidence_tier,
        ConfidenceTier::High | ConfidenceTier::Medium
    ));
    assert_eq!(result.answer_status, AnswerStatus::Generated);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_only_matching_files_are_sources() -> Result<()> {
    let dir = TempDir::new()?;
    let project = dir.path().join("project");
    write(
        &project,
        "lib/checkout.ts",
        r#"/** Charge the invoice for a checkout session */
export async function chargeInvoice(invoiceId: string, checkout: CheckoutSession): Promise<Receipt> {
    return gateway.charge(invoiceId);
}
"#,
    )?;
    write(
        &project,
        "lib/colors.ts",
        "export const palette = ['red', 'green'];\nexport function lighten(hex: string): string {\n    return hex;\n}\n",
    )?;

    let client = QaClient::with_generator(config_in(&dir), Arc::new(DisabledGenerator));
    client.build_index(&project).await?;

    let result = client
        .answer_question("charge invoice during checkout")
        .await?;

    let files: Vec<&str> = result.sources.iter().map(|s| s.file.as_str()).collect();
    assert_eq!(files, vec!["lib/checkout.ts"]);

    Ok(())
}

#[tokio::test]
async fn test_malformed_file_becomes_warning() -> Result<()> {
    let dir = TempDir::new()?;
    let project = dir.path().join("project");
    write_users_route(&project)?;
    write(&project, "lib/broken.ts", "export function broken( {\n  return;\n")?;

    let client = QaClient::with_generator(config_in(&dir), Arc::new(DisabledGenerator));
    let report = client.build_index(&project).await?;

    assert!(report.snapshot.file("lib/broken.ts").is_none());
    assert_eq!(report.snapshot.total_files, 1);
    assert!(report.warnings.iter().any(|w| w.file == "lib/broken.ts"));

    // Warnings are not part of the persisted artifact
    let persisted = std::fs::read_to_string(client.index_path())?;
    assert!(!persisted.contains("broken.ts"));

    Ok(())
}

#[tokio::test]
async fn test_rebuild_is_idempotent() -> Result<()> {
    let dir = TempDir::new()?;
    let project = dir.path().join("project");
    write_users_route(&project)?;
    write(
        &project,
        "components/UserCard.tsx",
        r#"import { useState } from "react";

export function UserCard({ name }: { name: string }): JSX.Element {
    const [open, setOpen] = useState(false);
    return <div onClick={() => setOpen(!open)}>{name}</div>;
}
"#,
    )?;
    write(
        &project,
        "types/user.ts",
        "export interface User {\n    id: string;\n    email?: string;\n}\n",
    )?;

    let client = QaClient::with_generator(config_in(&dir), Arc::new(DisabledGenerator));
    let first = client.build_index(&project).await?.snapshot;
    let second = client.build_index(&project).await?.snapshot;

    assert_eq!(first.total_files, second.total_files);
    assert_eq!(first.kind_counts, second.kind_counts);
    assert_eq!(first.files, second.files);
    assert_eq!(first.statistics, second.statistics);

    Ok(())
}

#[tokio::test]
async fn test_persisted_index_answers_in_fresh_client() -> Result<()> {
    let dir = TempDir::new()?;
    let project = dir.path().join("project");
    write_users_route(&project)?;

    let builder = QaClient::with_generator(config_in(&dir), Arc::new(DisabledGenerator));
    let built = builder.build_index(&project).await?.snapshot;

    let client = QaClient::with_generator(config_in(&dir), Arc::new(DisabledGenerator));
    let loaded = client.load_index(client.index_path()).await?;
    assert_eq!(loaded.files, built.files);
    assert_eq!(loaded.generated_at, built.generated_at);

    let result = client.answer_question("Which users endpoints exist?").await?;
    assert_eq!(result.answer_status, AnswerStatus::Unavailable);
    assert!(result.answer.starts_with("[answer unavailable]"));
    assert_eq!(result.sources[0].file, "app/api/users/route.ts");

    Ok(())
}

#[tokio::test]
async fn test_no_match_skips_generator() -> Result<()> {
    let dir = TempDir::new()?;
    let project = dir.path().join("project");
    write_users_route(&project)?;

    let generator = Arc::new(CountingGenerator {
        calls: AtomicUsize::new(0),
    });
    let client = QaClient::with_generator(config_in(&dir), generator.clone());
    client.build_index(&project).await?;

    let result = client
        .answer_question("zebra quantum spaghetti")
        .await?;

    assert_eq!(result.answer_status, AnswerStatus::NoMatches);
    assert!(result.sources.is_empty());
    assert_eq!(result.confidence_tier, ConfidenceTier::Low);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);

    Ok(())
}

#[tokio::test]
async fn test_stalled_generator_degrades_after_timeout() -> Result<()> {
    let dir = TempDir::new()?;
    let project = dir.path().join("project");
    write_users_route(&project)?;

    let mut config = config_in(&dir);
    config.generator.timeout_secs = 1;
    let client = QaClient::with_generator(config, Arc::new(StalledGenerator));
    client.build_index(&project).await?;

    let result = client.answer_question("What API endpoints exist?").await?;

    assert_eq!(result.answer_status, AnswerStatus::Unavailable);
    assert!(result.answer.starts_with("[answer unavailable]"));
    assert_eq!(result.sources[0].file, "app/api/users/route.ts");

    Ok(())
}

#[tokio::test]
async fn test_ignored_directories_are_not_indexed() -> Result<()> {
    let dir = TempDir::new()?;
    let project = dir.path().join("project");
    write_users_route(&project)?;
    write(
        &project,
        "node_modules/left-pad/index.js",
        "module.exports = function leftPad() {};\n",
    )?;
    write(&project, ".next/server/page.js", "export function page() {}\n")?;
    write(&project, "README.md", "# project\n")?;

    let client = QaClient::with_generator(config_in(&dir), Arc::new(DisabledGenerator));
    let report = client.build_index(&project).await?;

    let paths: Vec<&str> = report
        .snapshot
        .files
        .iter()
        .map(|f| f.relative_path.as_str())
        .collect();
    assert_eq!(paths, vec!["app/api/users/route.ts"]);
    assert!(report.warnings.is_empty());

    Ok(())
}
