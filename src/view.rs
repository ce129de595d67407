use std::sync::{Arc, Weak};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::TransportError;
use crate::fetcher::{Fetcher, Item};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Fetching,
    Populated,
    Failed,
}

/// What the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub state: ViewState,
    /// `None` until the first successful fetch.
    pub items: Option<Vec<Item>>,
}

struct Inner {
    fetcher: Arc<Fetcher>,
    snapshot: watch::Sender<Snapshot>,
}

/// Drives the one-shot listing fetch and holds the result for display.
pub struct ViewController {
    inner: Arc<Inner>,
}

impl ViewController {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        let (snapshot, _) = watch::channel(Snapshot::default());
        Self {
            inner: Arc::new(Inner { fetcher, snapshot }),
        }
    }

    /// Starts the initial fetch in the background and returns immediately.
    ///
    /// The spawned task only holds a weak reference to the view, so a result
    /// arriving after the controller is dropped is discarded.
    ///
    /// Must be called from within a tokio runtime.
    pub fn initialize(&self) -> JoinHandle<()> {
        begin(&self.inner);

        let fetcher = self.inner.fetcher.clone();
        let view = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            let result = fetcher.fetch().await;
            complete_detached(&view, result);
        })
    }

    /// Runs one fetch and applies its result before returning.
    pub async fn fetch_data(&self) {
        begin(&self.inner);
        let result = self.inner.fetcher.fetch().await;
        complete(&self.inner, result);
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.snapshot.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.snapshot.borrow().clone()
    }

    pub fn state(&self) -> ViewState {
        self.inner.snapshot.borrow().state
    }

    pub fn items(&self) -> Option<Vec<Item>> {
        self.inner.snapshot.borrow().items.clone()
    }
}

fn begin(inner: &Inner) {
    inner
        .snapshot
        .send_modify(|snapshot| snapshot.state = ViewState::Fetching);
}

fn complete_detached(view: &Weak<Inner>, result: Result<Vec<Item>, TransportError>) {
    match view.upgrade() {
        Some(inner) => complete(&inner, result),
        None => debug!("View dropped before the fetch finished, discarding result"),
    }
}

// Whichever fetch lands last wins.
fn complete(inner: &Inner, result: Result<Vec<Item>, TransportError>) {
    match result {
        Ok(items) => {
            info!("Displaying {} items", items.len());
            inner.snapshot.send_modify(|snapshot| {
                snapshot.state = ViewState::Populated;
                snapshot.items = Some(items);
            });
        }
        Err(e) => {
            error!("Failed to fetch items: {}", e);
            inner
                .snapshot
                .send_modify(|snapshot| snapshot.state = ViewState::Failed);
        }
    }
}
