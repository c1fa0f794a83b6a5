//! Per-resource fetch state.

/// Display state of one remotely loaded resource.
///
/// ```text
/// Empty ──begin──▶ Loading{stale} ──succeed──▶ Ready
///                        │
///                        ├──fail (stale present)──▶ StaleFromCache
///                        └──fail (no stale)───────▶ Failed
/// ```
///
/// `Ready`, `StaleFromCache` and `Failed` go back to `Loading` on the next
/// `begin`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    Empty,
    Loading {
        stale: Option<T>,
    },
    Ready(T),
    StaleFromCache(T),
    Failed(String),
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self::Empty
    }
}

/// Result of a completed fetch as seen by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Fresh,
    /// The fetch failed and a stale copy is still displayed.
    Offline,
    Failed,
}

impl<T> ResourceState<T> {
    /// Start a fetch. A persisted snapshot is surfaced immediately; without
    /// one, whatever value is currently displayed stays visible.
    pub fn begin(&mut self, snapshot: Option<T>) {
        let current = std::mem::replace(self, Self::Empty).into_value();
        *self = Self::Loading {
            stale: snapshot.or(current),
        };
    }

    /// The fetch returned `value`.
    pub fn succeed(&mut self, value: T) -> FetchOutcome {
        *self = Self::Ready(value);
        FetchOutcome::Fresh
    }

    /// The fetch failed with `message`.
    pub fn fail(&mut self, message: impl Into<String>) -> FetchOutcome {
        match std::mem::replace(self, Self::Empty).into_value() {
            Some(stale) => {
                *self = Self::StaleFromCache(stale);
                FetchOutcome::Offline
            }
            None => {
                *self = Self::Failed(message.into());
                FetchOutcome::Failed
            }
        }
    }

    /// The value to display, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Loading { stale } => stale.as_ref(),
            Self::Ready(value) | Self::StaleFromCache(value) => Some(value),
            Self::Empty | Self::Failed(_) => None,
        }
    }

    fn into_value(self) -> Option<T> {
        match self {
            Self::Loading { stale } => stale,
            Self::Ready(value) | Self::StaleFromCache(value) => Some(value),
            Self::Empty | Self::Failed(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleFromCache(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}
