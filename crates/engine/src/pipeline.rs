//! Collaborator contracts consumed by the iteration controller.
//!
//! Parsing, matching, and revision are capability-providing black boxes
//! behind narrow traits, injected for testability (default LLM-backed
//! implementations live in [`crate::collaborators`]). The scorer is the
//! engine's own pure function, injected all the same so tests can substitute
//! failing or canned doubles.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::EngineError;
use crate::models::{
    Element, ParsedJob, ParsedResume, Recommendations, SemanticMatch, TaggedElement,
};
use crate::observer::{EngineObserver, NullObserver};
use crate::scoring::engine::{calculate_match_score, MatchResult};
use crate::scoring::weights::DimensionWeights;

/// Turns a raw job posting into importance-tagged elements.
#[async_trait]
pub trait JobParser: Send + Sync {
    async fn parse(&self, job_text: &str) -> Result<ParsedJob, EngineError>;
}

/// Turns a raw resume draft into elements.
#[async_trait]
pub trait ResumeParser: Send + Sync {
    async fn parse(&self, resume_text: &str) -> Result<ParsedResume, EngineError>;
}

/// Pairs resume elements with job elements. An empty result is a legitimate
/// answer, not an error.
#[async_trait]
pub trait SemanticMatcher: Send + Sync {
    async fn find_matches(
        &self,
        resume_elements: &[Element],
        job_elements: &[TaggedElement],
    ) -> Result<Vec<SemanticMatch>, EngineError>;
}

/// Synchronous, pure scoring step.
pub trait Scorer: Send + Sync {
    fn score(
        &self,
        resume: &ParsedResume,
        job: &ParsedJob,
        matches: &[SemanticMatch],
    ) -> Result<MatchResult, EngineError>;
}

/// Produces the edit recommendations for one round.
///
/// Failures should surface as [`EngineError::Recommendation`] so the
/// retryability taxonomy classifies them correctly; the round degrades to a
/// placeholder recommendation set either way.
pub trait Recommender: Send + Sync {
    fn generate(
        &self,
        result: &MatchResult,
        matches: &[SemanticMatch],
        iteration_round: u32,
        target_score: f64,
    ) -> Result<Recommendations, EngineError>;
}

/// Optional collaborator that turns recommendations into the next resume
/// draft (human- or agent-authored revision between rounds).
#[async_trait]
pub trait ResumeReviser: Send + Sync {
    async fn revise(
        &self,
        current_resume: &str,
        recommendations: &Recommendations,
    ) -> Result<String, EngineError>;
}

/// The standard scorer: [`calculate_match_score`] with a fixed weight
/// configuration. Total over valid inputs; never returns `Err`.
pub struct DefaultScorer {
    pub weights: DimensionWeights,
}

impl Default for DefaultScorer {
    fn default() -> Self {
        Self {
            weights: DimensionWeights::default(),
        }
    }
}

impl Scorer for DefaultScorer {
    fn score(
        &self,
        resume: &ParsedResume,
        job: &ParsedJob,
        matches: &[SemanticMatch],
    ) -> Result<MatchResult, EngineError> {
        Ok(calculate_match_score(resume, job, matches, &self.weights))
    }
}

/// Everything one optimization run needs, bundled for injection.
#[derive(Clone)]
pub struct Components {
    pub job_parser: Arc<dyn JobParser>,
    pub resume_parser: Arc<dyn ResumeParser>,
    pub matcher: Arc<dyn SemanticMatcher>,
    pub scorer: Arc<dyn Scorer>,
    pub recommender: Arc<dyn Recommender>,
    pub observer: Arc<dyn EngineObserver>,
}

impl Components {
    /// Swaps the observer, keeping the rest. Convenient in tests asserting
    /// on emitted events.
    pub fn with_observer(mut self, observer: Arc<dyn EngineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// A null observer as the default keeps embedding simple; callers that
    /// want events inject a ring buffer.
    pub fn default_observer() -> Arc<dyn EngineObserver> {
        Arc::new(NullObserver)
    }
}
