//! Controller between a front end and the aggregator.
//!
//! Front ends send [`Command`]s and observe [`ViewEvent`]s through handlers
//! registered with [`Controller::on_event`]. Each command kind is sequenced:
//! when an older request finishes after a newer one of the same kind was
//! issued, its response is discarded (last request wins).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::debug;

use crate::aggregator::Aggregator;
use crate::details::DetailView;
use crate::tidy_query;
use crate::types::NormalizedItem;

pub const DETAIL_FAILED: &str = "Failed to load details";

#[derive(Debug, Clone)]
pub enum Command {
    SubmitQuery(String),
    SelectCategory(String),
    OpenDetail(NormalizedItem),
    CloseDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Loading,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    fn new(kind: MessageKind, text: impl Into<String>) -> Self { Self { kind, text: text.into() } }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Loading(String),
    Results(Vec<NormalizedItem>),
    NoResults { query: String },
    CategoryLoaded { category: String, items: Vec<NormalizedItem> },
    DetailOpened(DetailView),
    DetailClosed,
    Message(Message),
}

/// Everything a front end needs to draw the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub results: Vec<NormalizedItem>,
    pub active_category: Option<String>,
    pub category_items: Vec<NormalizedItem>,
    pub message: Option<Message>,
    pub detail: Option<DetailView>,
}

type Handler = Arc<dyn Fn(&ViewEvent) + Send + Sync>;

/// Monotonic ticket counter for one command kind.
#[derive(Default)]
struct Sequence(AtomicU64);

impl Sequence {
    fn next(&self) -> u64 { self.0.fetch_add(1, Ordering::SeqCst) + 1 }
    fn is_current(&self, ticket: u64) -> bool { self.0.load(Ordering::SeqCst) == ticket }
}

pub struct Controller {
    aggregator: Arc<Aggregator>,
    initial_category: String,
    state: Mutex<ViewState>,
    handlers: Mutex<Vec<Handler>>,
    searches: Sequence,
    categories: Sequence,
    details: Sequence,
}

impl Controller {
    pub fn new(aggregator: Arc<Aggregator>, initial_category: impl Into<String>) -> Self {
        Self {
            aggregator,
            initial_category: initial_category.into(),
            state: Mutex::new(ViewState::default()),
            handlers: Mutex::new(Vec::new()),
            searches: Sequence::default(),
            categories: Sequence::default(),
            details: Sequence::default(),
        }
    }

    pub fn on_event(&self, handler: impl Fn(&ViewEvent) + Send + Sync + 'static) {
        lock(&self.handlers).push(Arc::new(handler));
    }

    pub fn state(&self) -> ViewState { lock(&self.state).clone() }

    pub async fn dispatch(&self, command: Command) {
        match command {
            Command::SubmitQuery(query) => self.submit_query(&query).await,
            Command::SelectCategory(category) => self.select_category(&category).await,
            Command::OpenDetail(item) => self.open_detail(&item).await,
            Command::CloseDetail => self.close_detail(),
        }
    }

    pub async fn load_initial_category(&self) {
        let category = self.initial_category.clone();
        self.select_category(&category).await;
    }

    async fn submit_query(&self, query: &str) {
        let query = tidy_query(query);
        let query = query.as_str();
        if query.is_empty() {
            return;
        }
        let ticket = self.searches.next();
        let loading = format!("Searching for \"{query}\" in Meals , Drinks and Products...");
        {
            let mut st = lock(&self.state);
            st.results.clear();
            st.message = Some(Message::new(MessageKind::Loading, loading.clone()));
        }
        self.emit(&ViewEvent::Loading(loading));

        let items = self.aggregator.search_all(query).await;
        if !self.searches.is_current(ticket) {
            debug!(query, ticket, "discarding stale search results");
            return;
        }

        let event = {
            let mut st = lock(&self.state);
            if items.is_empty() {
                st.results.clear();
                st.message = Some(Message::new(MessageKind::Error, format!("No results found for \"{query}\". Try another term!")));
                ViewEvent::NoResults { query: query.to_string() }
            } else {
                st.results = items.clone();
                st.message = None;
                ViewEvent::Results(items)
            }
        };
        self.emit(&event);
    }

    async fn select_category(&self, category: &str) {
        let ticket = self.categories.next();
        lock(&self.state).active_category = Some(category.to_string());

        let items = self.aggregator.search_category(category).await;
        if !self.categories.is_current(ticket) {
            debug!(category, ticket, "discarding stale category results");
            return;
        }
        lock(&self.state).category_items = items.clone();
        self.emit(&ViewEvent::CategoryLoaded { category: category.to_string(), items });
    }

    async fn open_detail(&self, item: &NormalizedItem) {
        let ticket = self.details.next();
        let resolved = self.aggregator.resolve_details(item).await;
        if !self.details.is_current(ticket) {
            debug!(id = %item.id, ticket, "discarding stale detail");
            return;
        }
        let event = match resolved {
            Ok(full) => {
                let view = DetailView::from_item(&full);
                lock(&self.state).detail = Some(view.clone());
                ViewEvent::DetailOpened(view)
            }
            Err(e) => {
                debug!(catalog = %item.source, id = %item.id, error = %e, "detail lookup failed");
                let msg = Message::new(MessageKind::Error, DETAIL_FAILED);
                lock(&self.state).message = Some(msg.clone());
                ViewEvent::Message(msg)
            }
        };
        self.emit(&event);
    }

    fn close_detail(&self) {
        // Supersedes any lookup still in flight.
        self.details.next();
        lock(&self.state).detail = None;
        self.emit(&ViewEvent::DetailClosed);
    }

    fn emit(&self, event: &ViewEvent) {
        // Handlers run unlocked so they may register further handlers.
        let handlers = lock(&self.handlers).clone();
        for handler in &handlers {
            handler(event);
        }
    }
}

// A panicking handler must not wedge the controller.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> { m.lock().unwrap_or_else(|e| e.into_inner()) }
