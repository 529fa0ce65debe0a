use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codebase_qa::paths::PlatformPaths;
use codebase_qa::types::FileKind;
use codebase_qa::{Config, QaClient};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ", ",
    env!("BUILD_PROFILE"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

#[derive(Parser)]
#[command(name = "codebase-qa")]
#[command(about = "Index a TypeScript/JavaScript project and ask questions about its structure")]
#[command(version = VERSION)]
struct Cli {
    /// Path to a TOML config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a fresh index of a project directory
    Index {
        /// Project root to index
        root: PathBuf,

        /// Where to write the index artifact
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Also write a markdown summary to this path
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Ask a question against a persisted index
    Ask {
        question: String,

        /// Index artifact to load
        #[arg(long, short)]
        index: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the statistics of a persisted index
    Stats {
        /// Index artifact to load
        #[arg(long, short)]
        index: Option<PathBuf>,
    },

    /// Write a config file holding every default, ready for editing
    InitConfig {
        /// Destination (defaults to the platform config path)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default()?,
    };
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `ask --json` output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codebase_qa=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Index {
            root,
            output,
            summary,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            if let Some(output) = output {
                config.indexing.index_path = output;
            }
            if let Some(summary) = summary {
                config.indexing.summary_path = summary;
                config.indexing.write_summary = true;
            }

            let client = QaClient::with_config(config)?;
            let report = client
                .build_index(&root)
                .await
                .with_context(|| format!("Failed to index {}", root.display()))?;

            let snapshot = &report.snapshot;
            println!(
                "Indexed {} files in {}ms -> {}",
                snapshot.total_files,
                report.duration_ms,
                client.index_path().display()
            );
            for warning in &report.warnings {
                println!("  warning: {}", warning);
            }
        }

        Command::Ask {
            question,
            index,
            json,
        } => {
            let config = load_config(cli.config.as_ref())?;
            let client = QaClient::with_config(config)?;
            let index_path = index.unwrap_or_else(|| client.index_path().to_path_buf());
            client.load_index(&index_path).await?;

            let result = client.answer_question(&question).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}\n", result.answer);
                println!("Confidence: {}", result.confidence_tier);
                if !result.sources.is_empty() {
                    println!("Sources:");
                    for source in &result.sources {
                        println!(
                            "  - {} [{}] {:.1}  {}",
                            source.file, source.kind, source.relevance_score, source.snippet
                        );
                    }
                }
                if !result.follow_ups.is_empty() {
                    println!("Follow-up questions:");
                    for follow_up in &result.follow_ups {
                        println!("  - {}", follow_up);
                    }
                }
            }
        }

        Command::Stats { index } => {
            let config = load_config(cli.config.as_ref())?;
            let client = QaClient::with_config(config)?;
            let index_path = index.unwrap_or_else(|| client.index_path().to_path_buf());
            let snapshot = client.load_index(&index_path).await?;

            println!("Root: {}", snapshot.root_path);
            println!("Generated: {}", snapshot.generated_at);
            println!("Files: {}", snapshot.total_files);
            for kind in FileKind::ALL {
                println!("  {:<10} {}", kind.as_str(), snapshot.kind_count(kind));
            }
            let stats = &snapshot.statistics;
            println!("Functions: {}", stats.total_functions);
            println!("Components: {}", stats.total_components);
            println!("Types: {}", stats.total_types);
            println!("API routes: {}", stats.total_api_routes);
        }

        // Runs without loading config so a broken file can be replaced
        Command::InitConfig { path, force } => {
            let path = path.unwrap_or_else(PlatformPaths::default_config_path);
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists; pass --force to overwrite",
                    path.display()
                );
            }
            Config::default().save(&path)?;
            println!("Wrote default config to {}", path.display());
        }
    }

    Ok(())
}
