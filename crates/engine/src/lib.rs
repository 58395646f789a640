//! Tailor Engine — resume-vs-job matching and iterative optimization core.
//!
//! The engine scores a parsed resume against a parsed job posting across five
//! weighted dimensions, extracts ranked gaps and strengths, and drives an
//! optimization loop that repeats parse → match → score → decide rounds until
//! a target score is reached or further iteration is unproductive.
//!
//! Natural-language extraction, semantic matching, and resume revision are
//! external collaborators injected through the traits in [`pipeline`].
//! Default LLM-backed implementations live in [`collaborators`]; all of their
//! API traffic goes through [`llm_client`] — no other module may call the
//! Anthropic API directly.

pub mod collaborators;
pub mod config;
pub mod degrade;
pub mod errors;
pub mod iteration;
pub mod llm_client;
pub mod models;
pub mod observer;
pub mod optimizer;
pub mod pipeline;
pub mod scoring;

pub use config::OptimizationConfig;
pub use errors::EngineError;
pub use iteration::controller::{OptimizationResult, TerminationReason};
pub use optimizer::{analyze_match, start_optimization, AnalyzeReport};
pub use scoring::engine::{calculate_match_score, MatchResult};
