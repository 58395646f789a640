pub mod element;
pub mod matching;
pub mod recommendation;

pub use element::{Element, ElementCategory, ParsedJob, ParsedResume, Span, TaggedElement};
pub use matching::{MatchType, SemanticMatch};
pub use recommendation::{
    RecommendationItem, RecommendationKind, RecommendationMetadata, Recommendations,
};
