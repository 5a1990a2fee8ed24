//! Async owner of the book list's `ViewState`.
//!
//! # Design
//! The state lives in a `tokio::sync::watch` channel: the controller is the
//! only writer, renderers subscribe and redraw on every change. The loading
//! guard is checked and set inside one `send_if_modified` call, so two
//! triggers racing each other can never both start a fetch.
//!
//! A fetch that is already running is never cancelled; the guard is what
//! keeps a second one from starting.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::fetch::{LibrosFetcher, Transport};
use crate::view::ViewState;

pub struct LibrosController<T> {
    fetcher: LibrosFetcher<T>,
    state: watch::Sender<ViewState>,
}

impl<T: Transport + 'static> LibrosController<T> {
    pub fn new(fetcher: LibrosFetcher<T>) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self { fetcher, state }
    }

    /// Create the controller and start the initial fetch on the current
    /// tokio runtime. The returned controller is already in the loading
    /// state.
    pub fn mount(fetcher: LibrosFetcher<T>) -> Arc<Self> {
        let controller = Arc::new(Self::new(fetcher));
        controller.trigger();
        controller
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Start a fetch in the background. Returns `None` when one is already
    /// in flight.
    pub fn trigger(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.begin() {
            tracing::debug!("fetch already in flight, trigger ignored");
            return None;
        }
        Some(self.spawn_settle())
    }

    /// Run a fetch and wait for it to settle. Returns `false` without
    /// fetching when one is already in flight.
    ///
    /// The attempt runs on its own task, so dropping this future still lets
    /// the state leave loading.
    pub async fn refresh(self: &Arc<Self>) -> bool {
        if !self.begin() {
            return false;
        }
        if let Err(err) = self.spawn_settle().await {
            tracing::warn!(error = %err, "fetch task did not complete");
        }
        true
    }

    fn spawn_settle(self: &Arc<Self>) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.settle().await })
    }

    fn begin(&self) -> bool {
        self.state.send_if_modified(ViewState::begin_fetch)
    }

    async fn settle(&self) {
        let result = self.fetcher.fetch().await;
        self.state.send_modify(|state| state.apply(result));
    }
}
