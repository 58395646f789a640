//! Graceful degradation around collaborator calls.
//!
//! A failure in an isolated element's tagging, in the matcher, or in
//! recommendation generation degrades to a safe fallback and keeps the
//! pipeline moving. The one exception is the round pipeline itself
//! (`iteration::controller::process_iteration`), where a parse/match/score
//! failure aborts the run instead.

use std::future::Future;

use tracing::warn;

use crate::errors::EngineError;
use crate::models::{Element, SemanticMatch, TaggedElement};
use crate::observer::{EngineEvent, EngineObserver};

/// Runs `operation`; on failure, logs the error tagged with
/// `operation_name`, records a degradation event, and returns `fallback()`.
pub async fn with_graceful_degradation<T, Op, Fut, Fb>(
    operation: Op,
    fallback: Fb,
    operation_name: &str,
    observer: &dyn EngineObserver,
) -> T
where
    Op: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, EngineError>>,
    Fb: FnOnce() -> T,
{
    match operation().await {
        Ok(value) => value,
        Err(error) => degrade(error, fallback, operation_name, observer),
    }
}

/// Synchronous twin of [`with_graceful_degradation`], identical semantics.
pub fn with_graceful_degradation_sync<T, Op, Fb>(
    operation: Op,
    fallback: Fb,
    operation_name: &str,
    observer: &dyn EngineObserver,
) -> T
where
    Op: FnOnce() -> Result<T, EngineError>,
    Fb: FnOnce() -> T,
{
    match operation() {
        Ok(value) => value,
        Err(error) => degrade(error, fallback, operation_name, observer),
    }
}

fn degrade<T, Fb: FnOnce() -> T>(
    error: EngineError,
    fallback: Fb,
    operation_name: &str,
    observer: &dyn EngineObserver,
) -> T {
    warn!(
        operation = operation_name,
        retryable = error.is_retryable(),
        "collaborator failed, using fallback: {error}"
    );
    observer.record(EngineEvent::Degraded {
        operation: operation_name.to_string(),
        error: error.to_string(),
        fallback: "default value".to_string(),
    });
    fallback()
}

/// Fallback for a single element whose semantic tagging failed: generic tag
/// set, default importance, keyword category.
pub fn degraded_tagged_element(mut element: Element) -> TaggedElement {
    element.tags = vec!["general".to_string()];
    TaggedElement::untagged(element)
}

/// Fallback for a whole-pipeline matcher failure. An empty match list means
/// every job element surfaces as a gap, which is the honest degraded answer.
pub fn empty_matches() -> Vec<SemanticMatch> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ElementCategory;
    use crate::observer::RingBufferObserver;

    #[tokio::test]
    async fn test_async_wrapper_passes_through_success() {
        let observer = RingBufferObserver::new(8);
        let value = with_graceful_degradation(
            || async { Ok::<_, EngineError>(7) },
            || 0,
            "lucky_op",
            &observer,
        )
        .await;
        assert_eq!(value, 7);
        assert!(observer.is_empty());
    }

    #[tokio::test]
    async fn test_async_wrapper_falls_back_and_records() {
        let observer = RingBufferObserver::new(8);
        let value = with_graceful_degradation(
            || async { Err::<u32, _>(EngineError::Matching("down".into())) },
            || 42,
            "semantic_matching",
            &observer,
        )
        .await;
        assert_eq!(value, 42);

        let events = observer.snapshot();
        assert_eq!(events.len(), 1);
        match &events[0].event {
            EngineEvent::Degraded {
                operation, error, ..
            } => {
                assert_eq!(operation, "semantic_matching");
                assert!(error.contains("down"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_sync_wrapper_falls_back() {
        let observer = RingBufferObserver::new(8);
        let value = with_graceful_degradation_sync(
            || Err::<&str, _>(EngineError::Parse("bad input".into())),
            || "fallback",
            "resume_parsing",
            &observer,
        );
        assert_eq!(value, "fallback");
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn test_degraded_tagged_element_defaults() {
        let tagged = degraded_tagged_element(Element::new("Go", "some context"));
        assert_eq!(tagged.importance, 0.5);
        assert_eq!(tagged.category, ElementCategory::Keyword);
        assert_eq!(tagged.element.tags, vec!["general".to_string()]);
    }

    #[test]
    fn test_empty_matches_is_empty() {
        assert!(empty_matches().is_empty());
    }
}
