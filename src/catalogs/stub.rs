use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::catalogs::{Catalog, SourceKind};
use crate::error::{CatalogError, Result};

#[derive(Clone)]
enum Reply {
    Records(Vec<Value>),
    Fail,
}

impl Reply {
    fn resolve(&self, kind: SourceKind) -> Result<Vec<Value>> {
        match self {
            Reply::Records(v) => Ok(v.clone()),
            Reply::Fail => Err(CatalogError::Malformed { catalog: kind, reason: "stubbed failure".into() }),
        }
    }
}

/// In-memory catalog for tests. Unconfigured calls answer with no records.
#[derive(Default)]
pub(crate) struct StubCatalog {
    search: HashMap<SourceKind, Reply>,
    search_by_query: HashMap<(SourceKind, String), Reply>,
    category: Option<Reply>,
    lookup: HashMap<(SourceKind, String), Reply>,
    delays: HashMap<(SourceKind, String), Duration>,
    calls: Mutex<Vec<String>>,
}

impl StubCatalog {
    pub(crate) fn new() -> Self { Self::default() }

    pub(crate) fn with_search(mut self, kind: SourceKind, records: Vec<Value>) -> Self {
        self.search.insert(kind, Reply::Records(records));
        self
    }

    pub(crate) fn with_query(mut self, kind: SourceKind, query: &str, records: Vec<Value>) -> Self {
        self.search_by_query.insert((kind, query.to_string()), Reply::Records(records));
        self
    }

    pub(crate) fn failing_search(mut self, kind: SourceKind) -> Self {
        self.search.insert(kind, Reply::Fail);
        self
    }

    pub(crate) fn with_category(mut self, records: Vec<Value>) -> Self {
        self.category = Some(Reply::Records(records));
        self
    }

    pub(crate) fn failing_category(mut self) -> Self {
        self.category = Some(Reply::Fail);
        self
    }

    pub(crate) fn with_lookup(mut self, kind: SourceKind, id: &str, records: Vec<Value>) -> Self {
        self.lookup.insert((kind, id.to_string()), Reply::Records(records));
        self
    }

    pub(crate) fn failing_lookup(mut self, kind: SourceKind, id: &str) -> Self {
        self.lookup.insert((kind, id.to_string()), Reply::Fail);
        self
    }

    /// Delay a search (or lookup, keyed by id) before it answers.
    pub(crate) fn with_delay(mut self, kind: SourceKind, key: &str, delay: Duration) -> Self {
        self.delays.insert((kind, key.to_string()), delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().clone() }

    async fn pause(&self, kind: SourceKind, key: &str) {
        if let Some(d) = self.delays.get(&(kind, key.to_string())) {
            tokio::time::sleep(*d).await;
        }
    }
}

#[async_trait]
impl Catalog for StubCatalog {
    async fn search(&self, kind: SourceKind, query: &str) -> Result<Vec<Value>> {
        self.calls.lock().unwrap().push(format!("search:{kind}:{query}"));
        self.pause(kind, query).await;
        let key = (kind, query.to_string());
        match self.search_by_query.get(&key).or_else(|| self.search.get(&kind)) {
            Some(reply) => reply.resolve(kind),
            None => Ok(Vec::new()),
        }
    }

    async fn filter_by_category(&self, category: &str) -> Result<Vec<Value>> {
        self.calls.lock().unwrap().push(format!("category:{category}"));
        self.pause(SourceKind::Meal, category).await;
        self.category.as_ref().map_or(Ok(Vec::new()), |r| r.resolve(SourceKind::Meal))
    }

    async fn lookup(&self, kind: SourceKind, id: &str) -> Result<Vec<Value>> {
        self.calls.lock().unwrap().push(format!("lookup:{kind}:{id}"));
        self.pause(kind, id).await;
        match self.lookup.get(&(kind, id.to_string())) {
            Some(reply) => reply.resolve(kind),
            None => Ok(Vec::new()),
        }
    }
}
