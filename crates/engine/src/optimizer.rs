//! Orchestration surface: the full optimization loop and the single-shot
//! analysis entry point.
//!
//! `start_optimization` drives rounds until a termination criterion fires;
//! `analyze_match` scores one resume against one job with no loop. The two
//! differ in failure posture. The loop treats parse/match/score failures as
//! fatal for the run, while the single-shot path degrades them and still
//! returns a report.

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::OptimizationConfig;
use crate::degrade::{empty_matches, with_graceful_degradation, with_graceful_degradation_sync};
use crate::errors::EngineError;
use crate::iteration::controller::{
    create_optimization_result, process_iteration, IterationHistory, OptimizationResult,
    RoundVerdict,
};
use crate::models::{ParsedJob, ParsedResume, Recommendations};
use crate::observer::EngineEvent;
use crate::pipeline::{Components, ResumeReviser};
use crate::scoring::engine::MatchResult;
use crate::scoring::importance::assign_importance_scores;

/// A job posting as submitted by the caller.
#[derive(Debug, Clone)]
pub struct JobInput {
    pub id: Uuid,
    pub content: String,
}

impl JobInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
        }
    }
}

/// Single-shot analysis output: the score plus everything needed to act on it.
#[derive(Debug, Clone)]
pub struct AnalyzeReport {
    pub match_result: MatchResult,
    pub recommendations: Recommendations,
    pub parsed_job: ParsedJob,
    pub parsed_resume: ParsedResume,
}

// ────────────────────────────────────────────────────────────────────────────
// Optimization loop
// ────────────────────────────────────────────────────────────────────────────

/// Runs the iterative optimization loop until termination.
///
/// The job is parsed once up front; a parse failure there degrades to an
/// element-free job rather than aborting, because an empty job still scores
/// deterministically (all dimensions zero). Failures inside a round are
/// fatal. When `reviser` is `None`, every round scores the same draft, so
/// the run ends by early stopping at the latest.
pub async fn start_optimization(
    job: &JobInput,
    initial_resume: &str,
    config: &OptimizationConfig,
    components: &Components,
    reviser: Option<&dyn ResumeReviser>,
) -> Result<OptimizationResult, EngineError> {
    if job.content.trim().is_empty() {
        return Err(EngineError::Validation(
            "job content must not be empty".to_string(),
        ));
    }
    if initial_resume.trim().is_empty() {
        return Err(EngineError::Validation(
            "initial resume must not be empty".to_string(),
        ));
    }

    let parsed_job = parse_job_degraded(job, components).await;
    info!(
        job_id = %job.id,
        elements = parsed_job.elements.len(),
        target = config.target_score,
        max_iterations = config.max_iterations,
        "starting optimization"
    );

    let mut resume = initial_resume.to_string();
    let mut history: Vec<IterationHistory> = Vec::new();

    loop {
        let round = history.len() as u32 + 1;
        let outcome = process_iteration(&resume, &parsed_job, &history, config, components).await?;
        let score = outcome.match_result.overall_score;

        match outcome.verdict {
            RoundVerdict::Stop { reason, .. } => {
                history.push(IterationHistory {
                    round,
                    score,
                    recommendations: None,
                    resume_version: format!("v{round}"),
                });
                components
                    .observer
                    .record(EngineEvent::Terminated { reason });
                return create_optimization_result(resume, history, config);
            }
            RoundVerdict::Continue { recommendations } => {
                if let Some(reviser) = reviser {
                    resume = reviser.revise(&resume, &recommendations).await?;
                }
                history.push(IterationHistory {
                    round,
                    score,
                    recommendations: Some(recommendations),
                    resume_version: format!("v{round}"),
                });
            }
        }
    }
}

/// Parses the job, degrading to a failed placeholder on error. Importance
/// scores are assigned here so parsers only have to categorize.
async fn parse_job_degraded(job: &JobInput, components: &Components) -> ParsedJob {
    match components.job_parser.parse(&job.content).await {
        Ok(mut parsed) => {
            parsed.id = job.id;
            assign_importance_scores(&mut parsed);
            parsed
        }
        Err(error) => {
            warn!(job_id = %job.id, "job parsing failed: {error}");
            components.observer.record(EngineEvent::Degraded {
                operation: "job_parsing".to_string(),
                error: error.to_string(),
                fallback: "element-free job".to_string(),
            });
            ParsedJob::failed(job.id, &job.content, error.to_string())
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Single-shot analysis
// ────────────────────────────────────────────────────────────────────────────

/// Scores one resume against one job without iterating.
///
/// Every collaborator failure short of the scorer's degrades: a failed parse
/// yields a flagged empty parse, a failed matcher yields no matches, and a
/// failed recommender yields the unavailable placeholder. The report always
/// carries the parse flags so callers can tell a genuine zero from a
/// degraded one.
pub async fn analyze_match(
    job: &JobInput,
    resume_text: &str,
    config: &OptimizationConfig,
    components: &Components,
) -> Result<AnalyzeReport, EngineError> {
    if job.content.trim().is_empty() {
        return Err(EngineError::Validation(
            "job content must not be empty".to_string(),
        ));
    }
    if resume_text.trim().is_empty() {
        return Err(EngineError::Validation(
            "resume must not be empty".to_string(),
        ));
    }

    let parsed_job = parse_job_degraded(job, components).await;

    let parsed_resume = match components.resume_parser.parse(resume_text).await {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!("resume parsing failed: {error}");
            components.observer.record(EngineEvent::Degraded {
                operation: "resume_parsing".to_string(),
                error: error.to_string(),
                fallback: "element-free resume".to_string(),
            });
            ParsedResume::failed(resume_text, error.to_string())
        }
    };

    let matches = with_graceful_degradation(
        || {
            components
                .matcher
                .find_matches(&parsed_resume.elements, &parsed_job.elements)
        },
        empty_matches,
        "semantic_matching",
        components.observer.as_ref(),
    )
    .await;

    let match_result = components
        .scorer
        .score(&parsed_resume, &parsed_job, &matches)?;

    let recommendations = with_graceful_degradation_sync(
        || {
            components
                .recommender
                .generate(&match_result, &matches, 1, config.target_score)
        },
        || Recommendations::unavailable(1, match_result.overall_score, config.target_score),
        "recommendation_generation",
        components.observer.as_ref(),
    );

    Ok(AnalyzeReport {
        match_result,
        recommendations,
        parsed_job,
        parsed_resume,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
