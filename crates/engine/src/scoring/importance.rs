//! Importance Assigner — derives a 0.0–1.0 weight for each job element from
//! textual cues, position in the document, and mention frequency.

use crate::models::ParsedJob;

/// One tier of importance-indicator phrases with its score range.
struct IndicatorTier {
    phrases: &'static [&'static str],
    low: f64,
    high: f64,
}

impl IndicatorTier {
    fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

/// Indicator tiers, strongest first. When several tiers match the same
/// element, the highest midpoint wins: more important wins conflicts.
const TIERS: [IndicatorTier; 5] = [
    IndicatorTier {
        phrases: &[
            "required",
            "must have",
            "must-have",
            "essential",
            "mandatory",
            "critical",
        ],
        low: 0.9,
        high: 1.0,
    },
    IndicatorTier {
        phrases: &["strong", "proficient", "extensive", "expert", "deep"],
        low: 0.7,
        high: 0.8,
    },
    IndicatorTier {
        phrases: &["should have", "experience with", "knowledge of", "solid"],
        low: 0.5,
        high: 0.6,
    },
    IndicatorTier {
        phrases: &["familiar", "exposure to", "helpful", "useful"],
        low: 0.4,
        high: 0.5,
    },
    IndicatorTier {
        phrases: &["nice to have", "bonus", "a plus", "preferred", "optional"],
        low: 0.3,
        high: 0.5,
    },
];

const BASELINE: f64 = 0.5;
/// Maximum bonus for appearing early in the document.
const POSITION_BONUS: f64 = 0.2;
const SECTION_BONUS: f64 = 0.1;
const NICE_TO_HAVE_PENALTY: f64 = 0.2;
/// Per extra mention, capped at [`REPEAT_BONUS_CAP`].
const REPEAT_BONUS: f64 = 0.1;
const REPEAT_BONUS_CAP: f64 = 0.2;

/// Assigns an importance weight to one element.
///
/// An indicator phrase counts only when it co-occurs with the element text
/// inside the same sentence-like span (text between periods), in either
/// order. When no indicator is in range, the score starts from a 0.5
/// baseline and is adjusted by document position, section cues, and
/// repetition. Pure function; the result is clamped to [0, 1].
pub fn assign_importance(element_text: &str, context: &str, position: Option<f64>) -> f64 {
    let element_lower = element_text.to_lowercase();
    let context_lower = context.to_lowercase();

    if let Some(tier_score) = best_indicator_match(&context_lower, &element_lower) {
        return tier_score.clamp(0.0, 1.0);
    }

    let mut score = BASELINE;

    if let Some(position) = position {
        // Earlier mentions matter more: full bonus at the top of the document.
        score += POSITION_BONUS * (1.0 - position.clamp(0.0, 1.0));
    }

    if context_lower.contains("requirement") || context_lower.contains("qualification") {
        score += SECTION_BONUS;
    }

    if context_lower.contains("nice to have") || context_lower.contains("bonus") {
        score -= NICE_TO_HAVE_PENALTY;
    }

    let occurrences = context_lower.matches(element_lower.as_str()).count();
    if occurrences > 1 {
        score += (REPEAT_BONUS * (occurrences - 1) as f64).min(REPEAT_BONUS_CAP);
    }

    score.clamp(0.0, 1.0)
}

/// Highest tier midpoint among indicators sharing a sentence span with the
/// element, or `None` when no indicator is in range.
fn best_indicator_match(context_lower: &str, element_lower: &str) -> Option<f64> {
    if element_lower.is_empty() {
        return None;
    }

    let mut best: Option<f64> = None;
    for span in context_lower.split('.') {
        if !span.contains(element_lower) {
            continue;
        }
        for tier in &TIERS {
            if tier.phrases.iter().any(|phrase| span.contains(phrase)) {
                let midpoint = tier.midpoint();
                best = Some(best.map_or(midpoint, |b: f64| b.max(midpoint)));
            }
        }
    }
    best
}

/// Batch pass over a parsed job: recomputes every element's importance,
/// passing each element's relative index as its document position.
pub fn assign_importance_scores(job: &mut ParsedJob) {
    let count = job.elements.len();
    for (index, tagged) in job.elements.iter_mut().enumerate() {
        let position = relative_position(index, count);
        tagged.importance = assign_importance(
            &tagged.element.normalized_text,
            &tagged.element.context,
            Some(position),
        );
    }
}

fn relative_position(index: usize, count: usize) -> f64 {
    if count <= 1 {
        0.5
    } else {
        index as f64 / (count - 1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Element, ElementCategory, TaggedElement};
    use uuid::Uuid;

    #[test]
    fn test_required_indicator_hits_high_tier() {
        let score = assign_importance("rust", "5+ years of Rust required.", None);
        assert!((score - 0.95).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_nice_to_have_indicator_hits_low_tier() {
        let score = assign_importance("kafka", "Kafka experience is nice to have.", None);
        assert!((score - 0.4).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_conflicting_indicators_more_important_wins() {
        // Same sentence carries a high-tier and a low-tier phrase; the high
        // tier's midpoint must win.
        let context = "Kubernetes is required, though depth beyond basics is a bonus";
        let score = assign_importance("kubernetes", context, None);
        assert!(score >= 0.95, "got {score}");
    }

    #[test]
    fn test_indicator_in_other_sentence_is_ignored() {
        // "required" is out of the element's sentence span, so the baseline
        // path applies instead of the high tier.
        let context = "A degree is required. We also use Python daily";
        let score = assign_importance("python", context, None);
        assert!(score < 0.9, "got {score}");
    }

    #[test]
    fn test_baseline_early_position_bonus() {
        let score = assign_importance("go", "we build services in Go", Some(0.0));
        assert!((score - 0.7).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_baseline_late_position_no_bonus() {
        let score = assign_importance("go", "we build services in Go", Some(1.0));
        assert!((score - 0.5).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_requirement_section_bonus() {
        let score = assign_importance("sql", "listed under the qualifications heading: SQL", None);
        assert!((score - 0.6).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_nice_to_have_penalty_outside_sentence() {
        // Penalty applies when the cue is in context but not in the
        // element's own sentence span.
        let context = "Bonus points for extras. Terraform keeps our infra tidy";
        let score = assign_importance("terraform", context, None);
        assert!((score - 0.3).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_repetition_bonus_capped() {
        let context = "python python python python python python";
        let score = assign_importance("python", context, None);
        // 0.5 baseline + 0.2 cap, no other adjustments.
        assert!((score - 0.7).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_result_is_clamped() {
        // Position bonus + section bonus + repetition could exceed 1.0
        // before clamping only via indicators; verify bounds hold anyway.
        let context = "requirements: rust, rust, rust, rust";
        let score = assign_importance("rust", context, Some(0.0));
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_batch_pass_uses_relative_index() {
        let make = |text: &str, context: &str| TaggedElement {
            element: Element::new(text, context),
            importance: 0.0,
            category: ElementCategory::Skill,
        };
        let mut job = ParsedJob::new(
            Uuid::new_v4(),
            vec![
                make("first", "mentions first"),
                make("middle", "mentions middle"),
                make("last", "mentions last"),
            ],
            "raw",
        );

        assign_importance_scores(&mut job);

        // position 0.0 → +0.2, position 0.5 → +0.1, position 1.0 → +0.0
        assert!((job.elements[0].importance - 0.7).abs() < 1e-9);
        assert!((job.elements[1].importance - 0.6).abs() < 1e-9);
        assert!((job.elements[2].importance - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_batch_pass_single_element_position_is_half() {
        let mut job = ParsedJob::new(
            Uuid::new_v4(),
            vec![TaggedElement::untagged(Element::new("solo", "about solo"))],
            "raw",
        );
        assign_importance_scores(&mut job);
        assert!((job.elements[0].importance - 0.6).abs() < 1e-9);
    }
}
