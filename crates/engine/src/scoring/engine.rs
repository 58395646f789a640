//! Scoring Engine — computes a full [`MatchResult`] from a parsed resume, a
//! parsed job, and the semantic matches between them.
//!
//! Every step is a pure function of its inputs: no I/O, no clock, no
//! randomness. Calling [`calculate_match_score`] twice with identical inputs
//! yields identical results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{ElementCategory, MatchType, ParsedJob, ParsedResume, SemanticMatch};
use crate::scoring::weights::{Dimension, DimensionWeights};

/// Match quality below this is a gap; at or above it, a potential strength.
pub const ACCEPTANCE_THRESHOLD: f64 = 0.7;
/// Minimum importance for a well-matched element to count as a strength.
pub const STRENGTH_IMPORTANCE_FLOOR: f64 = 0.5;
/// The level dimension has no algorithm yet; it scores a fixed neutral 0.5.
/// TODO: seniority matching; keep the neutral placeholder until an actual
/// algorithm exists rather than guessing at one.
const LEVEL_PLACEHOLDER_SCORE: f64 = 0.5;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// How one job element contributed to the score. Recomputed on every scoring
/// call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementContribution {
    pub element: String,
    pub importance: f64,
    pub match_quality: f64,
    /// `importance × match_quality`.
    pub contribution: f64,
    pub category: ElementCategory,
    pub match_type: Option<MatchType>,
}

/// Score detail for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionBreakdown {
    pub dimension: Dimension,
    /// Mean of the dimension's contributions; 0.0 when the bucket is empty.
    pub score: f64,
    pub weight: f64,
    pub weighted_score: f64,
    pub contributions: Vec<ElementContribution>,
}

/// All five dimension breakdowns plus the weight configuration in effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub dimensions: Vec<DimensionBreakdown>,
    pub weights: DimensionWeights,
}

/// A job element whose best match fell below the acceptance threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub element: String,
    pub importance: f64,
    pub category: ElementCategory,
    pub match_quality: f64,
    /// `importance × (1 − match_quality)`; gaps sort descending by this.
    pub impact: f64,
}

/// An important, well-matched job element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strength {
    pub element: String,
    pub match_type: MatchType,
    pub importance: f64,
    /// `importance × match_quality`; strengths sort descending by this.
    pub contribution: f64,
}

/// Full scoring output. Produced fresh on every call, never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub overall_score: f64,
    pub breakdown: ScoreBreakdown,
    pub gaps: Vec<Gap>,
    pub strengths: Vec<Strength>,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Computes the weighted match score.
///
/// Steps:
/// 1. Keep only the best match per job element (confidence, then match-type
///    quality, then first-seen input order).
/// 2. Per-element contribution: `importance × base_quality × confidence`,
///    zero when unmatched.
/// 3. Dimension score = mean of its contributions; empty dimensions score
///    0.0 (they earn nothing but do not count against the candidate).
///    The level dimension is a fixed 0.5 placeholder.
/// 4. Overall = Σ dimension score × weight, clamped to [0, 1].
/// 5. Extract gaps (quality < 0.7, by descending impact) and strengths
///    (quality ≥ 0.7 and importance ≥ 0.5, by descending contribution).
pub fn calculate_match_score(
    resume: &ParsedResume,
    job: &ParsedJob,
    matches: &[SemanticMatch],
    weights: &DimensionWeights,
) -> MatchResult {
    debug!(
        resume_elements = resume.elements.len(),
        job_elements = job.elements.len(),
        matches = matches.len(),
        "scoring match"
    );

    let best = best_match_lookup(matches);

    let contributions: Vec<ElementContribution> = job
        .elements
        .iter()
        .map(|tagged| {
            let matched = best.get(tagged.element.normalized_text.as_str());
            let match_quality = matched.map(|m| m.quality()).unwrap_or(0.0);
            ElementContribution {
                element: tagged.element.text.clone(),
                importance: tagged.importance,
                match_quality,
                contribution: tagged.importance * match_quality,
                category: tagged.category,
                match_type: matched.map(|m| m.match_type),
            }
        })
        .collect();

    let breakdown = build_breakdown(contributions, weights);

    let overall_score = breakdown
        .dimensions
        .iter()
        .map(|d| d.weighted_score)
        .sum::<f64>()
        .clamp(0.0, 1.0);

    let (gaps, strengths) = extract_gaps_and_strengths(&breakdown);

    MatchResult {
        overall_score,
        breakdown,
        gaps,
        strengths,
    }
}

/// Best match per job element. Not every match is counted: a job element
/// referenced by several matches is scored by its single best one.
fn best_match_lookup(matches: &[SemanticMatch]) -> HashMap<&str, &SemanticMatch> {
    let mut best: HashMap<&str, &SemanticMatch> = HashMap::new();
    for candidate in matches {
        match best.get(candidate.job_element.as_str()) {
            Some(current) if !candidate.outranks(current) => {}
            _ => {
                best.insert(candidate.job_element.as_str(), candidate);
            }
        }
    }
    best
}

fn build_breakdown(
    contributions: Vec<ElementContribution>,
    weights: &DimensionWeights,
) -> ScoreBreakdown {
    let mut buckets: HashMap<Dimension, Vec<ElementContribution>> = HashMap::new();
    for contribution in contributions {
        buckets
            .entry(Dimension::for_category(contribution.category))
            .or_default()
            .push(contribution);
    }

    let dimensions = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let contributions = buckets.remove(&dimension).unwrap_or_default();
            let score = if dimension == Dimension::Level {
                LEVEL_PLACEHOLDER_SCORE
            } else if contributions.is_empty() {
                0.0
            } else {
                contributions.iter().map(|c| c.contribution).sum::<f64>()
                    / contributions.len() as f64
            };
            let weight = weights.get(dimension);
            DimensionBreakdown {
                dimension,
                score,
                weight,
                weighted_score: score * weight,
                contributions,
            }
        })
        .collect();

    ScoreBreakdown {
        dimensions,
        weights: *weights,
    }
}

/// Splits scored elements into gaps and strengths. An element lands in at
/// most one of the two lists; a partially matched, unimportant element lands
/// in neither.
fn extract_gaps_and_strengths(breakdown: &ScoreBreakdown) -> (Vec<Gap>, Vec<Strength>) {
    let mut gaps = Vec::new();
    let mut strengths = Vec::new();

    for dimension in &breakdown.dimensions {
        for c in &dimension.contributions {
            if c.match_quality < ACCEPTANCE_THRESHOLD {
                gaps.push(Gap {
                    element: c.element.clone(),
                    importance: c.importance,
                    category: c.category,
                    match_quality: c.match_quality,
                    impact: c.importance * (1.0 - c.match_quality),
                });
            } else if c.importance >= STRENGTH_IMPORTANCE_FLOOR {
                if let Some(match_type) = c.match_type {
                    strengths.push(Strength {
                        element: c.element.clone(),
                        match_type,
                        importance: c.importance,
                        contribution: c.contribution,
                    });
                }
            }
        }
    }

    // Stable sorts keep input order on ties, so output is deterministic.
    gaps.sort_by(|a, b| {
        b.impact
            .partial_cmp(&a.impact)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    strengths.sort_by(|a, b| {
        b.contribution
            .partial_cmp(&a.contribution)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    (gaps, strengths)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Element, TaggedElement};
    use uuid::Uuid;

    fn make_job(elements: Vec<TaggedElement>) -> ParsedJob {
        ParsedJob::new(Uuid::new_v4(), elements, "raw job text")
    }

    fn make_resume(texts: &[&str]) -> ParsedResume {
        ParsedResume {
            elements: texts.iter().map(|t| Element::new(*t, "")).collect(),
            raw_text: "raw resume text".to_string(),
            parsing_failed: false,
            error: None,
        }
    }

    fn tagged(text: &str, importance: f64, category: ElementCategory) -> TaggedElement {
        TaggedElement {
            element: Element::new(text, ""),
            importance,
            category,
        }
    }

    fn exact_match(element: &str, confidence: f64) -> SemanticMatch {
        SemanticMatch {
            resume_element: element.to_lowercase(),
            job_element: element.to_lowercase(),
            match_type: MatchType::Exact,
            confidence,
        }
    }

    #[test]
    fn test_python_exact_match_is_a_strength() {
        let job = make_job(vec![tagged("Python", 0.9, ElementCategory::Skill)]);
        let resume = make_resume(&["Python"]);
        let matches = vec![exact_match("Python", 1.0)];

        let result =
            calculate_match_score(&resume, &job, &matches, &DimensionWeights::default());

        let skills = result
            .breakdown
            .dimensions
            .iter()
            .find(|d| d.dimension == Dimension::Skills)
            .unwrap();
        assert!((skills.score - 0.9).abs() < 1e-9);
        assert!((skills.contributions[0].contribution - 0.9).abs() < 1e-9);

        assert_eq!(result.strengths.len(), 1);
        assert_eq!(result.strengths[0].element, "Python");
        assert!((result.strengths[0].contribution - 0.9).abs() < 1e-9);
        assert!(result.gaps.is_empty());
    }

    #[test]
    fn test_unmatched_python_is_a_gap_with_full_impact() {
        let job = make_job(vec![tagged("Python", 0.9, ElementCategory::Skill)]);
        let resume = make_resume(&["Java"]);

        let result = calculate_match_score(&resume, &job, &[], &DimensionWeights::default());

        assert_eq!(result.gaps.len(), 1);
        let gap = &result.gaps[0];
        assert_eq!(gap.match_quality, 0.0);
        assert!((gap.impact - 0.9).abs() < 1e-9);
        assert!(result.strengths.is_empty());
    }

    #[test]
    fn test_only_best_match_per_job_element_counts() {
        let job = make_job(vec![tagged("rust", 1.0, ElementCategory::Skill)]);
        let resume = make_resume(&["rust", "rusty tools"]);
        let matches = vec![
            SemanticMatch {
                resume_element: "rusty tools".to_string(),
                job_element: "rust".to_string(),
                match_type: MatchType::Related,
                confidence: 0.6,
            },
            exact_match("rust", 1.0),
        ];

        let result =
            calculate_match_score(&resume, &job, &matches, &DimensionWeights::default());

        let skills = result
            .breakdown
            .dimensions
            .iter()
            .find(|d| d.dimension == Dimension::Skills)
            .unwrap();
        // The exact match (quality 1.0) wins over related × 0.6.
        assert!((skills.score - 1.0).abs() < 1e-9);
        assert_eq!(
            skills.contributions[0].match_type,
            Some(MatchType::Exact)
        );
    }

    #[test]
    fn test_empty_dimension_scores_zero_not_negative() {
        // Job with skills only: keyword/attribute/experience buckets empty.
        let job = make_job(vec![tagged("rust", 0.8, ElementCategory::Skill)]);
        let resume = make_resume(&["rust"]);
        let matches = vec![exact_match("rust", 1.0)];

        let result =
            calculate_match_score(&resume, &job, &matches, &DimensionWeights::default());

        for breakdown in &result.breakdown.dimensions {
            match breakdown.dimension {
                Dimension::Skills => assert!(breakdown.score > 0.0),
                Dimension::Level => assert_eq!(breakdown.score, 0.5),
                _ => assert_eq!(breakdown.score, 0.0),
            }
        }
    }

    #[test]
    fn test_level_dimension_is_neutral_placeholder() {
        let result = calculate_match_score(
            &make_resume(&[]),
            &make_job(vec![]),
            &[],
            &DimensionWeights::default(),
        );
        let level = result
            .breakdown
            .dimensions
            .iter()
            .find(|d| d.dimension == Dimension::Level)
            .unwrap();
        assert_eq!(level.score, 0.5);
        assert!(level.contributions.is_empty());
        // Empty job: overall is exactly the level placeholder's share.
        assert!((result.overall_score - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_overall_score_bounds() {
        let job = make_job(vec![
            tagged("a", 1.0, ElementCategory::Keyword),
            tagged("b", 1.0, ElementCategory::Skill),
            tagged("c", 1.0, ElementCategory::Attribute),
            tagged("d", 1.0, ElementCategory::Experience),
        ]);
        let resume = make_resume(&["a", "b", "c", "d"]);
        let matches = vec![
            exact_match("a", 1.0),
            exact_match("b", 1.0),
            exact_match("c", 1.0),
            exact_match("d", 1.0),
        ];

        let result =
            calculate_match_score(&resume, &job, &matches, &DimensionWeights::default());
        assert!(result.overall_score <= 1.0);
        assert!(result.overall_score >= 0.0);
        for dimension in &result.breakdown.dimensions {
            assert!((0.0..=1.0).contains(&dimension.score));
        }
    }

    #[test]
    fn test_gap_strength_partition_is_disjoint() {
        let job = make_job(vec![
            tagged("matched", 0.9, ElementCategory::Skill),
            tagged("missing", 0.8, ElementCategory::Skill),
            tagged("weak", 0.9, ElementCategory::Keyword),
            tagged("unimportant", 0.3, ElementCategory::Keyword),
        ]);
        let resume = make_resume(&["matched", "weakish"]);
        let matches = vec![
            exact_match("matched", 1.0),
            SemanticMatch {
                resume_element: "weakish".to_string(),
                job_element: "weak".to_string(),
                match_type: MatchType::Semantic,
                confidence: 0.5,
            },
            // "unimportant" matched well but below the importance floor.
            SemanticMatch {
                resume_element: "matched".to_string(),
                job_element: "unimportant".to_string(),
                match_type: MatchType::Exact,
                confidence: 1.0,
            },
        ];

        let result =
            calculate_match_score(&resume, &job, &matches, &DimensionWeights::default());

        let gap_elements: Vec<&str> = result.gaps.iter().map(|g| g.element.as_str()).collect();
        let strength_elements: Vec<&str> = result
            .strengths
            .iter()
            .map(|s| s.element.as_str())
            .collect();

        for element in &gap_elements {
            assert!(
                !strength_elements.contains(element),
                "{element} appears in both lists"
            );
        }
        // Well matched but unimportant: in neither list.
        assert!(!gap_elements.contains(&"unimportant"));
        assert!(!strength_elements.contains(&"unimportant"));
        assert!(gap_elements.contains(&"missing"));
        assert!(gap_elements.contains(&"weak"));
        assert_eq!(strength_elements, vec!["matched"]);
    }

    #[test]
    fn test_gaps_sorted_by_descending_impact() {
        let job = make_job(vec![
            tagged("minor", 0.4, ElementCategory::Keyword),
            tagged("major", 0.95, ElementCategory::Skill),
            tagged("middling", 0.6, ElementCategory::Keyword),
        ]);
        let result = calculate_match_score(
            &make_resume(&[]),
            &job,
            &[],
            &DimensionWeights::default(),
        );

        let impacts: Vec<f64> = result.gaps.iter().map(|g| g.impact).collect();
        assert_eq!(impacts.len(), 3);
        assert!(impacts[0] >= impacts[1] && impacts[1] >= impacts[2]);
        assert_eq!(result.gaps[0].element, "major");
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let job = make_job(vec![
            tagged("rust", 0.9, ElementCategory::Skill),
            tagged("kafka", 0.6, ElementCategory::Keyword),
        ]);
        let resume = make_resume(&["rust"]);
        let matches = vec![exact_match("rust", 0.97)];
        let weights = DimensionWeights::default();

        let first = calculate_match_score(&resume, &job, &matches, &weights);
        let second = calculate_match_score(&resume, &job, &matches, &weights);

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_synonym_quality_scaled_by_confidence() {
        let job = make_job(vec![tagged("golang", 1.0, ElementCategory::Skill)]);
        let resume = make_resume(&["go"]);
        let matches = vec![SemanticMatch {
            resume_element: "go".to_string(),
            job_element: "golang".to_string(),
            match_type: MatchType::Synonym,
            confidence: 0.8,
        }];

        let result =
            calculate_match_score(&resume, &job, &matches, &DimensionWeights::default());
        let skills = result
            .breakdown
            .dimensions
            .iter()
            .find(|d| d.dimension == Dimension::Skills)
            .unwrap();
        // 0.95 × 0.8 = 0.76
        assert!((skills.score - 0.76).abs() < 1e-9);
    }
}
