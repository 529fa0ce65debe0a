//! Question answering over a loaded index snapshot
//!
//! Turns a question into keywords, ranks file records against them, renders
//! a bounded structural context for the answer generator and shapes the
//! result with sources, a confidence tier and follow-up suggestions.

mod context;
mod followups;
mod keywords;
mod scoring;

pub use context::{build_context, snippet, FILE_SEPARATOR};
pub use followups::suggest_follow_ups;
pub use keywords::extract_keywords;
pub use scoring::{search_blob, Scorer, SearchDocument};

use crate::config::{Config, GeneratorConfig, QueryConfig, ScoringConfig};
use crate::error::GeneratorError;
use crate::generator::{AnswerGenerator, GenerationRequest};
use crate::types::{
    AnswerStatus, ConfidenceTier, FileRecord, IndexSnapshot, QueryResult, SourceReference,
};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Prefix of every answer that did not come from the generator
pub const UNAVAILABLE_MARKER: &str = "[answer unavailable]";

const NO_MATCHES_ANSWER: &str =
    "No indexed files match this question. Try naming a function, component, type or route.";

/// A file retained after scoring
#[derive(Debug, Clone, Copy)]
pub struct RankedFile<'a> {
    pub file: &'a FileRecord,
    pub score: f64,
}

/// Confidence tier of the top-ranked score
pub fn confidence_tier(top_score: f64, config: &QueryConfig) -> ConfidenceTier {
    if top_score > config.high_confidence_score {
        ConfidenceTier::High
    } else if top_score > config.medium_confidence_score {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    }
}

/// Holds one immutable snapshot and answers questions against it
pub struct QueryEngine {
    snapshot: Arc<IndexSnapshot>,
    documents: Vec<SearchDocument>,
    scoring: ScoringConfig,
    query: QueryConfig,
    generator_config: GeneratorConfig,
    generator: Arc<dyn AnswerGenerator>,
}

impl QueryEngine {
    pub fn new(
        snapshot: Arc<IndexSnapshot>,
        config: &Config,
        generator: Arc<dyn AnswerGenerator>,
    ) -> Self {
        let documents = snapshot
            .files
            .par_iter()
            .map(SearchDocument::from_record)
            .collect();

        Self {
            snapshot,
            documents,
            scoring: config.scoring.clone(),
            query: config.query.clone(),
            generator_config: config.generator.clone(),
            generator,
        }
    }

    pub fn snapshot(&self) -> &IndexSnapshot {
        &self.snapshot
    }

    pub fn snapshot_handle(&self) -> Arc<IndexSnapshot> {
        self.snapshot.clone()
    }

    /// Score every file and return the top matches, best first.
    ///
    /// Files scoring zero are dropped. Equal scores are ordered by relative
    /// path so the ranking is deterministic.
    pub fn rank(&self, question: &str) -> Vec<RankedFile<'_>> {
        let keywords = extract_keywords(question, &self.scoring.stop_words);
        if keywords.is_empty() {
            return Vec::new();
        }

        let scorer = Scorer::new(&self.scoring);
        let mut ranked: Vec<RankedFile<'_>> = self
            .documents
            .par_iter()
            .zip(self.snapshot.files.par_iter())
            .filter_map(|(document, file)| {
                let score = scorer.score(document, &keywords, question);
                (score > 0.0).then_some(RankedFile { file, score })
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.file.relative_path.cmp(&b.file.relative_path))
        });
        ranked.truncate(self.query.max_relevant_files);
        ranked
    }

    /// Answer a question.
    ///
    /// Never fails: no matches short-circuits without calling the generator,
    /// and generator failures or timeouts produce a degraded answer.
    pub async fn answer(&self, question: &str) -> QueryResult {
        let start = Instant::now();
        let ranked = self.rank(question);

        let Some(top) = ranked.first() else {
            tracing::info!("No relevant files for question: {}", question);
            return QueryResult {
                answer: NO_MATCHES_ANSWER.to_string(),
                answer_status: AnswerStatus::NoMatches,
                sources: Vec::new(),
                confidence_tier: ConfidenceTier::Low,
                follow_ups: Vec::new(),
                duration_ms: start.elapsed().as_millis() as u64,
            };
        };

        let confidence_tier = confidence_tier(top.score, &self.query);
        let relevant: Vec<&FileRecord> = ranked.iter().map(|r| r.file).collect();
        let context_files = &relevant[..relevant.len().min(self.query.context_files)];

        let sources: Vec<SourceReference> = ranked
            .iter()
            .take(self.query.context_files)
            .map(|r| SourceReference {
                file: r.file.relative_path.clone(),
                kind: r.file.kind,
                relevance_score: r.score,
                snippet: snippet(r.file),
            })
            .collect();

        let follow_ups = suggest_follow_ups(&relevant, self.query.max_follow_ups);
        let context = build_context(context_files, &self.query);

        tracing::info!(
            "Ranked {} relevant files (top: {} at {:.1}, {} confidence)",
            ranked.len(),
            top.file.relative_path,
            top.score,
            confidence_tier
        );

        let (answer, answer_status) = match self.generate(question, context).await {
            Ok(text) => (text, AnswerStatus::Generated),
            Err(e) => {
                tracing::warn!("Answer generator '{}' unavailable: {}", self.generator.name(), e);
                (
                    format!("{} {}", UNAVAILABLE_MARKER, e),
                    AnswerStatus::Unavailable,
                )
            }
        };

        QueryResult {
            answer,
            answer_status,
            sources,
            confidence_tier,
            follow_ups,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    async fn generate(&self, question: &str, context: String) -> Result<String, GeneratorError> {
        let request = GenerationRequest::new(question, context).with_sampling(
            self.generator_config.temperature,
            self.generator_config.max_tokens,
        );
        let timeout_secs = self.generator_config.timeout_secs;

        match tokio::time::timeout(
            Duration::from_secs(timeout_secs),
            self.generator.generate(&request),
        )
        .await
        {
            Ok(Ok(text)) if text.trim().is_empty() => Err(GeneratorError::EmptyResponse),
            Ok(result) => result,
            Err(_) => Err(GeneratorError::Timeout(timeout_secs)),
        }
    }
}
