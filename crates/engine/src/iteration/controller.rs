//! Iteration Controller — the per-round pipeline and its termination logic.
//!
//! Each round runs parse → match → score → decide, strictly sequentially.
//! A parse/match/score failure here aborts the whole run (wrapped as
//! [`EngineError::Iteration`]); a recommendation failure only degrades the
//! round. That asymmetry is deliberate: one element's tagging hiccup should
//! not derail scoring, but scoring a round against garbage would be worse
//! than stopping.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::OptimizationConfig;
use crate::degrade::with_graceful_degradation_sync;
use crate::errors::EngineError;
use crate::models::{ParsedJob, ParsedResume, Recommendations, SemanticMatch};
use crate::observer::EngineEvent;
use crate::pipeline::Components;
use crate::scoring::engine::MatchResult;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    TargetReached,
    MaxIterations,
    EarlyStopping,
}

/// One completed round. History is append-only; past entries are never
/// rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationHistory {
    /// 1-based round number.
    pub round: u32,
    pub score: f64,
    /// Omitted on the terminal round: advice for a finished run is wasted work.
    pub recommendations: Option<Recommendations>,
    /// Opaque marker for the resume draft this round scored.
    pub resume_version: String,
}

/// Outcome of the termination check after a round.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminationCheck {
    Stop {
        reason: String,
        termination: TerminationReason,
    },
    Continue,
}

/// The controller's decision for a round.
#[derive(Debug, Clone)]
pub enum RoundVerdict {
    Stop {
        reason: String,
        termination: TerminationReason,
    },
    Continue {
        recommendations: Recommendations,
    },
}

/// Everything a round produced.
#[derive(Debug, Clone)]
pub struct IterationOutcome {
    pub parsed_resume: ParsedResume,
    pub matches: Vec<SemanticMatch>,
    pub match_result: MatchResult,
    pub verdict: RoundVerdict,
}

/// Summary metrics derived from a completed run's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    pub initial_score: f64,
    pub final_score: f64,
    pub improvement: f64,
    pub iteration_count: u32,
}

/// Terminal artifact of an optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub final_resume: String,
    pub final_score: f64,
    pub iterations: Vec<IterationHistory>,
    pub termination_reason: TerminationReason,
    pub metrics: OptimizationMetrics,
}

// ────────────────────────────────────────────────────────────────────────────
// Round pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one round: parse the draft, match, score, evaluate termination, and
/// generate recommendations only if the run continues.
pub async fn process_iteration(
    resume_draft: &str,
    job: &ParsedJob,
    history: &[IterationHistory],
    config: &OptimizationConfig,
    components: &Components,
) -> Result<IterationOutcome, EngineError> {
    let round = history.len() as u32 + 1;

    let parsed_resume = components
        .resume_parser
        .parse(resume_draft)
        .await
        .map_err(|e| EngineError::Iteration(e.to_string()))?;

    let matches = components
        .matcher
        .find_matches(&parsed_resume.elements, &job.elements)
        .await
        .map_err(|e| EngineError::Iteration(e.to_string()))?;

    let match_result = components
        .scorer
        .score(&parsed_resume, job, &matches)
        .map_err(|e| EngineError::Iteration(e.to_string()))?;

    let score = match_result.overall_score;
    info!(round, score, matches = matches.len(), "round scored");
    components
        .observer
        .record(EngineEvent::RoundScored { round, score });

    let verdict = match evaluate_termination_criteria(score, history, config) {
        TerminationCheck::Stop {
            reason,
            termination,
        } => {
            // Deliberate short-circuit: no recommendations for a round that
            // already decided to stop.
            info!(round, %reason, "terminating run");
            RoundVerdict::Stop {
                reason,
                termination,
            }
        }
        TerminationCheck::Continue => {
            let recommendations = with_graceful_degradation_sync(
                || {
                    components
                        .recommender
                        .generate(&match_result, &matches, round, config.target_score)
                },
                || Recommendations::unavailable(round, score, config.target_score),
                "recommendation_generation",
                components.observer.as_ref(),
            );
            RoundVerdict::Continue { recommendations }
        }
    };

    Ok(IterationOutcome {
        parsed_resume,
        matches,
        match_result,
        verdict,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Termination criteria
// ────────────────────────────────────────────────────────────────────────────

/// Evaluates termination criteria in strict priority order; the first match
/// wins. Target-reached beats everything, even when it coincides with the
/// max-iterations or early-stopping conditions.
pub fn evaluate_termination_criteria(
    current_score: f64,
    history: &[IterationHistory],
    config: &OptimizationConfig,
) -> TerminationCheck {
    if current_score >= config.target_score {
        return TerminationCheck::Stop {
            reason: format!(
                "Target score {:.2} reached with {:.2}",
                config.target_score, current_score
            ),
            termination: TerminationReason::TargetReached,
        };
    }

    let round = history.len() as u32 + 1;
    if round >= config.max_iterations {
        return TerminationCheck::Stop {
            reason: format!("Maximum iterations ({}) reached", config.max_iterations),
            termination: TerminationReason::MaxIterations,
        };
    }

    if is_stagnant(current_score, history, config) {
        return TerminationCheck::Stop {
            reason: format!(
                "Early stopping: no improvement of at least {} over the last {} rounds",
                config.min_improvement, config.early_stopping_rounds
            ),
            termination: TerminationReason::EarlyStopping,
        };
    }

    TerminationCheck::Continue
}

/// True when every consecutive delta over the last
/// `early_stopping_rounds + 1` scores (history plus the current score) stays
/// strictly below `min_improvement` in absolute value. Absolute deltas mean
/// a monotonic regression counts as stagnation too.
fn is_stagnant(
    current_score: f64,
    history: &[IterationHistory],
    config: &OptimizationConfig,
) -> bool {
    let window = config.early_stopping_rounds as usize + 1;
    let total = history.len() + 1;
    if total < window || window < 2 {
        return false;
    }

    let mut scores: Vec<f64> = history
        .iter()
        .skip(total - window)
        .map(|entry| entry.score)
        .collect();
    scores.push(current_score);

    scores
        .windows(2)
        .all(|pair| (pair[1] - pair[0]).abs() < config.min_improvement)
}

/// Classifier for final-result labeling only. Unlike the live criteria it
/// has no stagnation awareness: anything that is neither target-reached nor
/// max-iterations is labeled early stopping by elimination.
pub fn determine_termination_reason(
    final_score: f64,
    iteration_count: u32,
    config: &OptimizationConfig,
) -> TerminationReason {
    if final_score >= config.target_score {
        TerminationReason::TargetReached
    } else if iteration_count >= config.max_iterations {
        TerminationReason::MaxIterations
    } else {
        TerminationReason::EarlyStopping
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Result assembly
// ────────────────────────────────────────────────────────────────────────────

/// Builds the terminal artifact from a completed run's history.
/// An empty history is a programmer error and fails fast.
pub fn create_optimization_result(
    final_resume: String,
    iterations: Vec<IterationHistory>,
    config: &OptimizationConfig,
) -> Result<OptimizationResult, EngineError> {
    let (first, last) = match (iterations.first(), iterations.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(EngineError::EmptyHistory),
    };

    let initial_score = first.score;
    let final_score = last.score;
    let iteration_count = iterations.len() as u32;
    let termination_reason = determine_termination_reason(final_score, iteration_count, config);

    if final_score < initial_score {
        warn!(
            initial_score,
            final_score, "run ended below its starting score"
        );
    }

    Ok(OptimizationResult {
        final_resume,
        final_score,
        termination_reason,
        metrics: OptimizationMetrics {
            initial_score,
            final_score,
            improvement: final_score - initial_score,
            iteration_count,
        },
        iterations,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
