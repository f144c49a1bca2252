use leadgen_core::LeadgenError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// A fetched list and its loading flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
        }
    }
}

impl<T> ListState<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Inline error and success messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banners {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Banners {
    pub fn clear(&mut self) {
        self.error = None;
        self.success = None;
    }
}

/// Banner for a failed list fetch. Fetches always use the fixed message.
pub(crate) fn fetch_banner(err: &LeadgenError, message: &str) -> Option<String> {
    if err.is_unauthorized() {
        None
    } else {
        Some(message.to_string())
    }
}

/// Shared, mount-aware view state.
///
/// Updates after [`unmount`](Self::unmount) are dropped, which is how
/// responses arriving after the screen was left are discarded.
pub(crate) struct ViewScope<S> {
    state: Arc<RwLock<S>>,
    mounted: Arc<AtomicBool>,
}

impl<S> Clone for ViewScope<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            mounted: Arc::clone(&self.mounted),
        }
    }
}

impl<S: Clone> ViewScope<S> {
    pub(crate) fn new(initial: S) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub(crate) async fn snapshot(&self) -> S {
        self.state.read().await.clone()
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    pub(crate) fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    /// Applies `f` if still mounted. Returns `None` when dropped.
    pub(crate) async fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        if !self.is_mounted() {
            return None;
        }
        let mut state = self.state.write().await;
        if !self.is_mounted() {
            return None;
        }
        Some(f(&mut state))
    }
}
