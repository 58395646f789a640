//! Semantic match types produced by the matching collaborator.

use serde::{Deserialize, Serialize};

/// How a resume element matched a job element, ordered by descending quality.
///
/// The matcher is an external collaborator, so an unrecognized type can
/// legitimately arrive on the wire; `Other` keeps scoring total over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Synonym,
    Related,
    Semantic,
    #[serde(other)]
    Other,
}

impl MatchType {
    /// Base match quality before confidence weighting.
    pub fn base_quality(self) -> f64 {
        match self {
            MatchType::Exact => 1.0,
            MatchType::Synonym => 0.95,
            MatchType::Related => 0.7,
            MatchType::Semantic => 0.6,
            MatchType::Other => 0.5,
        }
    }

    /// Rank used to break confidence ties; lower is better.
    pub fn quality_rank(self) -> u8 {
        match self {
            MatchType::Exact => 0,
            MatchType::Synonym => 1,
            MatchType::Related => 2,
            MatchType::Semantic => 3,
            MatchType::Other => 4,
        }
    }
}

/// One pairing of a resume element with a job element.
///
/// Multiple matches may reference the same job element; scoring keeps only
/// the best one per job element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticMatch {
    /// Normalized text of the matched resume element.
    pub resume_element: String,
    /// Normalized text of the job element (join key into the parsed job).
    pub job_element: String,
    pub match_type: MatchType,
    /// Matcher confidence in this pairing, 0.0–1.0.
    pub confidence: f64,
}

impl SemanticMatch {
    /// Combined quality of this match: type base quality scaled by confidence.
    pub fn quality(&self) -> f64 {
        (self.match_type.base_quality() * self.confidence).clamp(0.0, 1.0)
    }

    /// True when `self` beats `other` for the same job element:
    /// higher confidence first, match-type quality as the tie-break.
    pub fn outranks(&self, other: &SemanticMatch) -> bool {
        if self.confidence != other.confidence {
            return self.confidence > other.confidence;
        }
        self.match_type.quality_rank() < other.match_type.quality_rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_match(match_type: MatchType, confidence: f64) -> SemanticMatch {
        SemanticMatch {
            resume_element: "rust".to_string(),
            job_element: "rust".to_string(),
            match_type,
            confidence,
        }
    }

    #[test]
    fn test_base_quality_table() {
        assert_eq!(MatchType::Exact.base_quality(), 1.0);
        assert_eq!(MatchType::Synonym.base_quality(), 0.95);
        assert_eq!(MatchType::Related.base_quality(), 0.7);
        assert_eq!(MatchType::Semantic.base_quality(), 0.6);
        assert_eq!(MatchType::Other.base_quality(), 0.5);
    }

    #[test]
    fn test_quality_combines_type_and_confidence() {
        let m = make_match(MatchType::Synonym, 0.8);
        assert!((m.quality() - 0.76).abs() < 1e-9);
    }

    #[test]
    fn test_higher_confidence_outranks() {
        let weak = make_match(MatchType::Exact, 0.5);
        let strong = make_match(MatchType::Semantic, 0.9);
        assert!(strong.outranks(&weak));
        assert!(!weak.outranks(&strong));
    }

    #[test]
    fn test_confidence_tie_broken_by_match_type() {
        let exact = make_match(MatchType::Exact, 0.8);
        let related = make_match(MatchType::Related, 0.8);
        assert!(exact.outranks(&related));
        assert!(!related.outranks(&exact));
    }

    #[test]
    fn test_equal_matches_do_not_outrank_each_other() {
        // Neither outranks, so the first-seen match survives in the lookup.
        let a = make_match(MatchType::Exact, 0.8);
        let b = make_match(MatchType::Exact, 0.8);
        assert!(!a.outranks(&b));
        assert!(!b.outranks(&a));
    }

    #[test]
    fn test_unknown_match_type_deserializes_as_other() {
        let m: MatchType = serde_json::from_str(r#""fuzzy""#).unwrap();
        assert_eq!(m, MatchType::Other);
    }
}
