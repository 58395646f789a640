//! Core extraction types: elements as produced by the parsing collaborators.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Character offsets of an element in its source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Scoring category of a job element. Each category feeds one scoring
/// dimension; `Concept` buckets with keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementCategory {
    #[default]
    Keyword,
    Skill,
    Attribute,
    Experience,
    Concept,
}

/// An atomic unit of meaning extracted from free text.
///
/// Immutable once produced by a parser; `normalized_text` is the lowercase
/// canonical form used as the join key between resume and job sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub text: String,
    pub normalized_text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Surrounding text, used for importance inference.
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub position: Span,
}

impl Element {
    pub fn new(text: impl Into<String>, context: impl Into<String>) -> Self {
        let text = text.into();
        let normalized_text = text.to_lowercase();
        Self {
            text,
            normalized_text,
            tags: Vec::new(),
            context: context.into(),
            position: Span::default(),
        }
    }
}

/// A job-side element carrying an importance weight and a category.
///
/// Only job elements carry importance; the type split (rather than optional
/// fields on [`Element`]) keeps the resume side from ever holding one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedElement {
    #[serde(flatten)]
    pub element: Element,
    /// 0.0–1.0 weight for how critical this requirement is.
    pub importance: f64,
    pub category: ElementCategory,
}

impl TaggedElement {
    /// The single normalization point for elements that arrive without
    /// importance or category: importance defaults to 0.5, category to
    /// keyword. All defaulting happens here, nowhere else.
    pub fn untagged(element: Element) -> Self {
        Self {
            element,
            importance: 0.5,
            category: ElementCategory::Keyword,
        }
    }
}

/// A parsed resume. On parsing failure the degradation policy produces this
/// with no elements, `parsing_failed` set, and the cause in `error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedResume {
    pub elements: Vec<Element>,
    pub raw_text: String,
    #[serde(default)]
    pub parsing_failed: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ParsedResume {
    pub fn failed(raw_text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            elements: Vec::new(),
            raw_text: raw_text.into(),
            parsing_failed: true,
            error: Some(error.into()),
        }
    }
}

/// A parsed job posting with importance-tagged elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedJob {
    pub id: Uuid,
    pub elements: Vec<TaggedElement>,
    pub raw_text: String,
    #[serde(default)]
    pub parsing_failed: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ParsedJob {
    pub fn new(id: Uuid, elements: Vec<TaggedElement>, raw_text: impl Into<String>) -> Self {
        Self {
            id,
            elements,
            raw_text: raw_text.into(),
            parsing_failed: false,
            error: None,
        }
    }

    pub fn failed(id: Uuid, raw_text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            id,
            elements: Vec::new(),
            raw_text: raw_text.into(),
            parsing_failed: true,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_normalizes_text() {
        let element = Element::new("PostgreSQL", "must have PostgreSQL experience");
        assert_eq!(element.normalized_text, "postgresql");
        assert_eq!(element.text, "PostgreSQL");
    }

    #[test]
    fn test_untagged_defaults() {
        let tagged = TaggedElement::untagged(Element::new("Rust", ""));
        assert_eq!(tagged.importance, 0.5);
        assert_eq!(tagged.category, ElementCategory::Keyword);
    }

    #[test]
    fn test_category_serde_is_lowercase() {
        let json = serde_json::to_string(&ElementCategory::Skill).unwrap();
        assert_eq!(json, r#""skill""#);
        let back: ElementCategory = serde_json::from_str(r#""experience""#).unwrap();
        assert_eq!(back, ElementCategory::Experience);
    }

    #[test]
    fn test_tagged_element_flattens_in_json() {
        let tagged = TaggedElement {
            element: Element::new("Python", "Python required"),
            importance: 0.9,
            category: ElementCategory::Skill,
        };
        let value = serde_json::to_value(&tagged).unwrap();
        assert_eq!(value["text"], "Python");
        assert_eq!(value["importance"], 0.9);
    }

    #[test]
    fn test_failed_parse_carries_cause() {
        let resume = ParsedResume::failed("raw text", "extractor timed out");
        assert!(resume.parsing_failed);
        assert!(resume.elements.is_empty());
        assert_eq!(resume.error.as_deref(), Some("extractor timed out"));
        assert_eq!(resume.raw_text, "raw text");
    }
}
