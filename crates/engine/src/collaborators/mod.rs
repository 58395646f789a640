//! Default collaborator implementations: LLM-backed parsers and matcher,
//! plus a deterministic recommender.
//!
//! Parsing and matching are judgment calls, so they go to the model. Turning
//! a scored result into advice is mechanical once gaps and strengths exist,
//! so the default recommender is plain code and cannot flake.

pub mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::degrade::degraded_tagged_element;
use crate::errors::EngineError;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::{
    Element, ElementCategory, MatchType, ParsedJob, ParsedResume, RecommendationItem,
    RecommendationKind, RecommendationMetadata, Recommendations, SemanticMatch, Span,
    TaggedElement,
};
use crate::pipeline::{
    Components, DefaultScorer, JobParser, Recommender, ResumeParser, SemanticMatcher,
};
use crate::scoring::engine::{Gap, MatchResult};
use crate::scoring::importance::assign_importance_scores;

/// Maps an LLM failure onto the engine's error taxonomy. A malformed
/// response is a parse problem (retrying the same prompt rarely helps);
/// everything else stays an LLM transport error.
fn map_llm(error: LlmError) -> EngineError {
    match error {
        LlmError::Parse(msg) => {
            EngineError::Parse(format!("collaborator returned invalid JSON: {msg}"))
        }
        other => EngineError::Llm(other),
    }
}

/// Wires the three LLM collaborators, the default scorer, and the
/// deterministic recommender into a ready-to-use component set.
pub fn default_components(llm: LlmClient) -> Components {
    let llm = Arc::new(llm);
    Components {
        job_parser: Arc::new(LlmJobParser { llm: llm.clone() }),
        resume_parser: Arc::new(LlmResumeParser { llm: llm.clone() }),
        matcher: Arc::new(LlmSemanticMatcher { llm }),
        scorer: Arc::new(DefaultScorer::default()),
        recommender: Arc::new(HeuristicRecommender),
        observer: Components::default_observer(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LLM-backed parsers
// ────────────────────────────────────────────────────────────────────────────

/// Wire shape of one job element as the model returns it. Category and tags
/// are optional; an element missing both is kept with degraded defaults
/// rather than dropped.
#[derive(Debug, Deserialize)]
struct RawJobElement {
    text: String,
    category: Option<ElementCategory>,
    tags: Option<Vec<String>>,
    context: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawResumeElement {
    text: String,
    tags: Option<Vec<String>>,
    context: Option<String>,
}

fn element_from_parts(
    text: String,
    tags: Vec<String>,
    context: Option<String>,
    source: &str,
) -> Element {
    // Span carries character offsets, so byte positions from `find` must be
    // converted before non-ASCII source text can be located correctly.
    let position = source
        .find(&text)
        .map(|byte_start| {
            let start = source[..byte_start].chars().count();
            Span {
                start,
                end: start + text.chars().count(),
            }
        })
        .unwrap_or_default();
    let context = context.unwrap_or_else(|| text.clone());
    let mut element = Element::new(text, context);
    element.tags = tags;
    element.position = position;
    element
}

fn tagged_from_raw(raw: RawJobElement, source: &str) -> TaggedElement {
    if raw.category.is_none() && raw.tags.is_none() {
        // The model gave us nothing to classify by.
        let element = element_from_parts(raw.text, Vec::new(), raw.context, source);
        return degraded_tagged_element(element);
    }
    let category = raw.category.unwrap_or_default();
    let element = element_from_parts(
        raw.text,
        raw.tags.unwrap_or_default(),
        raw.context,
        source,
    );
    TaggedElement {
        element,
        importance: 0.5,
        category,
    }
}

/// Extracts importance-tagged job elements via the LLM.
pub struct LlmJobParser {
    pub llm: Arc<LlmClient>,
}

#[async_trait]
impl JobParser for LlmJobParser {
    async fn parse(&self, job_text: &str) -> Result<ParsedJob, EngineError> {
        let prompt = prompts::JOB_PARSE_TEMPLATE.replace("{job_text}", job_text);
        let raw: Vec<RawJobElement> = self
            .llm
            .call_json(&prompt, prompts::JOB_PARSE_SYSTEM)
            .await
            .map_err(map_llm)?;
        debug!(elements = raw.len(), "job elements extracted");

        let elements = raw
            .into_iter()
            .map(|r| tagged_from_raw(r, job_text))
            .collect();
        let mut job = ParsedJob::new(uuid::Uuid::new_v4(), elements, job_text);
        assign_importance_scores(&mut job);
        Ok(job)
    }
}

/// Extracts resume elements via the LLM.
pub struct LlmResumeParser {
    pub llm: Arc<LlmClient>,
}

#[async_trait]
impl ResumeParser for LlmResumeParser {
    async fn parse(&self, resume_text: &str) -> Result<ParsedResume, EngineError> {
        let prompt = prompts::RESUME_PARSE_TEMPLATE.replace("{resume_text}", resume_text);
        let raw: Vec<RawResumeElement> = self
            .llm
            .call_json(&prompt, prompts::RESUME_PARSE_SYSTEM)
            .await
            .map_err(map_llm)?;
        debug!(elements = raw.len(), "resume elements extracted");

        let elements = raw
            .into_iter()
            .map(|r| {
                element_from_parts(r.text, r.tags.unwrap_or_default(), r.context, resume_text)
            })
            .collect();
        Ok(ParsedResume {
            elements,
            raw_text: resume_text.to_string(),
            parsing_failed: false,
            error: None,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LLM-backed matcher
// ────────────────────────────────────────────────────────────────────────────

/// Pairs resume elements with job elements via the LLM. Confidences are
/// clamped to [0, 1] on the way in; the model occasionally overshoots.
pub struct LlmSemanticMatcher {
    pub llm: Arc<LlmClient>,
}

#[async_trait]
impl SemanticMatcher for LlmSemanticMatcher {
    async fn find_matches(
        &self,
        resume_elements: &[Element],
        job_elements: &[TaggedElement],
    ) -> Result<Vec<SemanticMatch>, EngineError> {
        if resume_elements.is_empty() || job_elements.is_empty() {
            return Ok(Vec::new());
        }

        let resume_json =
            serde_json::to_string(resume_elements).map_err(|e| EngineError::Internal(e.into()))?;
        let job_json =
            serde_json::to_string(job_elements).map_err(|e| EngineError::Internal(e.into()))?;
        let prompt = prompts::MATCH_TEMPLATE
            .replace("{resume_elements_json}", &resume_json)
            .replace("{job_elements_json}", &job_json);

        let mut matches: Vec<SemanticMatch> = self
            .llm
            .call_json(&prompt, prompts::MATCH_SYSTEM)
            .await
            .map_err(map_llm)?;
        for m in &mut matches {
            m.confidence = m.confidence.clamp(0.0, 1.0);
        }
        debug!(matches = matches.len(), "semantic matches found");
        Ok(matches)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Deterministic recommender
// ────────────────────────────────────────────────────────────────────────────

/// Turns gaps and strengths into concrete advice without calling a model.
/// Same scored result in, same recommendations out.
pub struct HeuristicRecommender;

const PRIORITY_IMPORTANCE_FLOOR: f64 = 0.5;

impl Recommender for HeuristicRecommender {
    fn generate(
        &self,
        result: &MatchResult,
        matches: &[SemanticMatch],
        iteration_round: u32,
        target_score: f64,
    ) -> Result<Recommendations, EngineError> {
        let mut priority = Vec::new();
        let mut optional = Vec::new();
        let mut rewording = Vec::new();

        // Gaps arrive sorted by descending impact; keep that order.
        for gap in &result.gaps {
            let item = gap_item(gap);
            if gap.importance >= PRIORITY_IMPORTANCE_FLOOR {
                priority.push(item);
            } else {
                optional.push(item);
            }
            if let Some(reword) = reword_item(gap, matches) {
                rewording.push(reword);
            }
        }

        Ok(Recommendations {
            summary: build_summary(result, target_score),
            priority,
            optional,
            rewording,
            metadata: RecommendationMetadata {
                iteration_round,
                current_score: result.overall_score,
                target_score,
            },
        })
    }
}

fn gap_item(gap: &Gap) -> RecommendationItem {
    if gap.match_quality == 0.0 {
        RecommendationItem {
            kind: RecommendationKind::AddContent,
            element: gap.element.clone(),
            importance: gap.importance,
            suggestion: format!(
                "The posting asks for \"{}\" and the resume never addresses it. \
                 Add a bullet demonstrating it with a concrete outcome.",
                gap.element
            ),
            example: None,
        }
    } else {
        RecommendationItem {
            kind: RecommendationKind::Strengthen,
            element: gap.element.clone(),
            importance: gap.importance,
            suggestion: format!(
                "\"{}\" is only weakly evidenced. Expand the existing mention \
                 with scope, duration, or measurable results.",
                gap.element
            ),
            example: None,
        }
    }
}

/// A rewording item for a gap that was partially matched through indirect
/// phrasing. Naming the requirement directly is the cheapest possible fix.
fn reword_item(gap: &Gap, matches: &[SemanticMatch]) -> Option<RecommendationItem> {
    if gap.match_quality <= 0.0 {
        return None;
    }
    let key = gap.element.to_lowercase();
    let indirect = matches.iter().find(|m| {
        m.job_element == key
            && matches!(m.match_type, MatchType::Semantic | MatchType::Related)
    })?;
    Some(RecommendationItem {
        kind: RecommendationKind::Reword,
        element: gap.element.clone(),
        importance: gap.importance,
        suggestion: format!(
            "The resume covers \"{}\" only indirectly. Rephrase to use the \
             posting's own wording.",
            gap.element
        ),
        example: Some(format!(
            "Rework the \"{}\" bullet to mention \"{}\" explicitly.",
            indirect.resume_element, gap.element
        )),
    })
}

fn build_summary(result: &MatchResult, target_score: f64) -> String {
    let score = result.overall_score;
    let verdict = if score >= target_score {
        "The resume meets the target for this posting."
    } else if score >= 0.6 {
        "The resume is close; a few focused edits should close the gap."
    } else if score >= 0.4 {
        "The resume partially fits; the highest-impact gaps need new content."
    } else {
        "The resume misses most of what the posting asks for."
    };

    let top_gaps: Vec<&str> = result
        .gaps
        .iter()
        .take(3)
        .map(|g| g.element.as_str())
        .collect();
    if top_gaps.is_empty() {
        format!("Score {score:.2} against target {target_score:.2}. {verdict}")
    } else {
        format!(
            "Score {score:.2} against target {target_score:.2}. {verdict} \
             Biggest gaps: {}.",
            top_gaps.join(", ")
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
