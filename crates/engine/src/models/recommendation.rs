//! Edit recommendations produced once per non-terminal round.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    AddContent,
    Strengthen,
    Reword,
}

/// A single prioritized edit suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub kind: RecommendationKind,
    /// The job element this suggestion targets.
    pub element: String,
    pub importance: f64,
    pub suggestion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationMetadata {
    pub iteration_round: u32,
    pub current_score: f64,
    pub target_score: f64,
}

/// Full recommendation set for one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub summary: String,
    pub priority: Vec<RecommendationItem>,
    pub optional: Vec<RecommendationItem>,
    pub rewording: Vec<RecommendationItem>,
    pub metadata: RecommendationMetadata,
}

impl Recommendations {
    /// Fallback when recommendation generation fails: empty lists and a
    /// human-readable summary, so the round still completes.
    pub fn unavailable(iteration_round: u32, current_score: f64, target_score: f64) -> Self {
        Self {
            summary: "Recommendations could not be generated for this round. \
                      The match score above is still valid; please retry or edit manually."
                .to_string(),
            priority: Vec::new(),
            optional: Vec::new(),
            rewording: Vec::new(),
            metadata: RecommendationMetadata {
                iteration_round,
                current_score,
                target_score,
            },
        }
    }
}
