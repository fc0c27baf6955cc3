//! Loading/error state per logical resource.

use larder_content::ContentError;

/// The lifecycle of one fetched resource.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Resource<T> {
    /// Never requested.
    #[default]
    Idle,
    /// Request dispatched, no response yet.
    Loading,
    /// Loaded successfully.
    Ready(T),
    /// The fetch layer reported an error. Surfaced, never swallowed.
    Failed(ContentError),
}

impl<T> Resource<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Resource::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Resource::Ready(_))
    }

    /// The loaded value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Resource::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The fetch error, if any.
    pub fn error(&self) -> Option<&ContentError> {
        match self {
            Resource::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Settle from a fetch result.
    pub fn settle(&mut self, result: Result<T, ContentError>) {
        *self = match result {
            Ok(value) => Resource::Ready(value),
            Err(error) => Resource::Failed(error),
        };
    }
}

/// A resource whose responses are tagged with the request they answer.
///
/// Responses for a superseded tag are discarded, so a slow early response
/// can never overwrite a faster later one ("last request wins").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaggedResource<T> {
    tag: String,
    state: Resource<T>,
}

impl<T> TaggedResource<T> {
    pub fn new() -> Self {
        Self {
            tag: String::new(),
            state: Resource::Idle,
        }
    }

    /// The tag of the most recent request.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn state(&self) -> &Resource<T> {
        &self.state
    }

    /// Mark a request for `tag` as in flight. Supersedes any earlier tag.
    pub fn begin(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
        self.state = Resource::Loading;
    }

    /// Settle a response for `tag`. Returns false (and changes nothing)
    /// when the tag has been superseded.
    pub fn apply(&mut self, tag: &str, result: Result<T, ContentError>) -> bool {
        if tag != self.tag {
            tracing::debug!(stale = tag, current = %self.tag, "discarding stale response");
            return false;
        }
        self.state.settle(result);
        true
    }

    /// Drop any loaded or pending state.
    pub fn reset(&mut self) {
        self.tag.clear();
        self.state = Resource::Idle;
    }

    /// The loaded value, only when it answers `tag`.
    pub fn value_for(&self, tag: &str) -> Option<&T> {
        if self.tag == tag {
            self.state.value()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_lifecycle() {
        let mut resource: Resource<Vec<u32>> = Resource::Idle;
        assert!(resource.is_idle());

        resource = Resource::Loading;
        assert!(resource.is_loading());
        assert_eq!(resource.value(), None);

        resource.settle(Ok(vec![1, 2]));
        assert!(resource.is_ready());
        assert_eq!(resource.value(), Some(&vec![1, 2]));

        resource.settle(Err(ContentError::Transport("down".to_string())));
        assert!(resource.error().is_some());
    }

    #[test]
    fn test_tagged_resource_last_request_wins() {
        let mut search: TaggedResource<Vec<u32>> = TaggedResource::new();

        search.begin("ab");
        search.begin("abc");

        // The slow response for the superseded term arrives late.
        assert!(!search.apply("ab", Ok(vec![1])));
        assert!(search.state().is_loading());

        assert!(search.apply("abc", Ok(vec![2])));
        assert_eq!(search.value_for("abc"), Some(&vec![2]));
        assert_eq!(search.value_for("ab"), None);
    }

    #[test]
    fn test_tagged_resource_reset() {
        let mut search: TaggedResource<Vec<u32>> = TaggedResource::new();
        search.begin("rye");
        search.apply("rye", Ok(vec![1]));

        search.reset();
        assert!(search.state().is_idle());
        assert_eq!(search.tag(), "");
    }
}
