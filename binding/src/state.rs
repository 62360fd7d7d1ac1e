//! View state for asynchronous resources.

/// Snapshot of an asynchronous resource as seen by a rendering layer.
///
/// Lifecycle: a binding starts in the loading state, transitions to loaded
/// or failed exactly once per fetch, and re-enters loading whenever its
/// dependency key changes. The error is the normalized message string; raw
/// errors never reach the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncState<T> {
    /// Fetched resource, present only after a successful load
    pub data: Option<T>,
    /// Whether a fetch is currently in flight
    pub is_loading: bool,
    /// Normalized failure message, present only after a failed load
    pub error: Option<String>,
}

impl<T> AsyncState<T> {
    /// The initial state: no data, loading, no error.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
            error: None,
        }
    }

    /// A successfully loaded state.
    #[must_use]
    pub const fn loaded(data: T) -> Self {
        Self {
            data: Some(data),
            is_loading: false,
            error: None,
        }
    }

    /// A failed state carrying the normalized message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: None,
            is_loading: false,
            error: Some(message.into()),
        }
    }

    /// Whether the state holds loaded data.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Whether the state holds a failure.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

impl<T> Default for AsyncState<T> {
    fn default() -> Self {
        Self::loading()
    }
}
