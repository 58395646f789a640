// Scoring: importance assignment, dimension weighting, match-score
// computation. Everything in here is a pure function of its inputs.

pub mod engine;
pub mod importance;
pub mod weights;

pub use engine::{
    calculate_match_score, DimensionBreakdown, ElementContribution, Gap, MatchResult,
    ScoreBreakdown, Strength,
};
pub use importance::{assign_importance, assign_importance_scores};
pub use weights::{Dimension, DimensionWeights, WEIGHT_TOLERANCE};
