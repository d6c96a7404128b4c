//! In-memory json-server lookalike (tests/dev).

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{ApiError, Operation, RestApi};

type Record = Map<String, Value>;

/// In-memory backend with json-server routing rules.
///
/// - `/<collection>` lists (optionally filtered by `?field=value`) and creates.
/// - `/<collection>/<id>` reads, replaces and removes one record.
/// - Created records without an `id` get the next numeric id.
///
/// Every call is appended to a request log so tests can assert on traffic.
#[derive(Debug, Default)]
pub struct InMemoryApi {
    collections: Mutex<BTreeMap<String, Vec<Record>>>,
    requests: Mutex<Vec<(Operation, String)>>,
    unreachable: AtomicBool,
}

struct Route<'a> {
    collection: &'a str,
    id: Option<&'a str>,
    filters: Vec<(String, String)>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty collections so reads on them return `[]` instead of 404.
    pub fn with_collections(names: &[&str]) -> Self {
        let api = Self::new();
        {
            let mut collections = api.lock_collections();
            for name in names {
                collections.entry((*name).to_string()).or_default();
            }
        }
        api
    }

    /// Insert records as-is (objects only; anything else is ignored).
    pub fn seed(&self, collection: &str, records: impl IntoIterator<Item = Value>) {
        let mut collections = self.lock_collections();
        let rows = collections.entry(collection.to_string()).or_default();
        rows.extend(records.into_iter().filter_map(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        }));
    }

    /// Simulate a dead network: every call fails with a transport error.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<(Operation, String)> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of records currently stored in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.lock_collections().get(collection).map_or(0, Vec::len)
    }

    fn lock_collections(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Vec<Record>>> {
        // A poisoned lock only means another test thread panicked mid-call.
        self.collections.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self, op: Operation, path: &str) -> Result<(), ApiError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push((op, path.to_string()));
        }
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(ApiError::transport(op, path, "connection refused"));
        }
        Ok(())
    }

    fn route<'a>(op: Operation, path: &'a str) -> Result<Route<'a>, ApiError> {
        let (raw, query) = match path.split_once('?') {
            Some((raw, query)) => (raw, Some(query)),
            None => (path, None),
        };
        let mut segments = raw.trim_matches('/').split('/').filter(|s| !s.is_empty());
        let collection = segments.next().ok_or_else(|| ApiError::status(op, path, 404))?;
        let id = segments.next();
        if segments.next().is_some() {
            return Err(ApiError::status(op, path, 404));
        }

        let mut filters = Vec::new();
        for pair in query.unwrap_or_default().split('&').filter(|p| !p.is_empty()) {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            let k = urlencoding::decode(k).map_err(|_| ApiError::status(op, path, 400))?;
            let v = urlencoding::decode(v).map_err(|_| ApiError::status(op, path, 400))?;
            filters.push((k.into_owned(), v.into_owned()));
        }

        Ok(Route {
            collection,
            id,
            filters,
        })
    }
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn has_id(record: &Record, id: &str) -> bool {
    record.get("id").and_then(id_text).as_deref() == Some(id)
}

fn field_matches(record: &Record, field: &str, expected: &str) -> bool {
    match record.get(field) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Bool(b)) => b.to_string() == expected,
        Some(Value::Number(n)) => n.to_string() == expected,
        _ => false,
    }
}

fn next_id(rows: &[Record]) -> u64 {
    rows.iter()
        .filter_map(|r| r.get("id").and_then(id_text))
        .filter_map(|id| id.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

fn into_record(op: Operation, path: &str, body: Value) -> Result<Record, ApiError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::status(op, path, 400)),
    }
}

#[async_trait]
impl RestApi for InMemoryApi {
    async fn read(&self, path: &str) -> Result<Value, ApiError> {
        let op = Operation::Read;
        self.begin(op, path)?;
        let route = Self::route(op, path)?;
        let collections = self.lock_collections();
        let rows = collections
            .get(route.collection)
            .ok_or_else(|| ApiError::status(op, path, 404))?;

        match route.id {
            Some(id) => rows
                .iter()
                .find(|r| has_id(r, id))
                .map(|r| Value::Object(r.clone()))
                .ok_or_else(|| ApiError::status(op, path, 404)),
            None => Ok(Value::Array(
                rows.iter()
                    .filter(|r| route.filters.iter().all(|(k, v)| field_matches(r, k, v)))
                    .map(|r| Value::Object(r.clone()))
                    .collect(),
            )),
        }
    }

    async fn create(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let op = Operation::Create;
        self.begin(op, path)?;
        let route = Self::route(op, path)?;
        if route.id.is_some() {
            return Err(ApiError::status(op, path, 404));
        }
        let mut record = into_record(op, path, body)?;

        let mut collections = self.lock_collections();
        let rows = collections.entry(route.collection.to_string()).or_default();
        let given_id = record.get("id").and_then(id_text);
        match given_id {
            Some(id) if rows.iter().any(|r| has_id(r, &id)) => {
                return Err(ApiError::status(op, path, 409));
            }
            Some(_) => {}
            None => {
                record.insert("id".to_string(), Value::from(next_id(rows)));
            }
        }
        rows.push(record.clone());
        Ok(Value::Object(record))
    }

    async fn replace(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let op = Operation::Replace;
        self.begin(op, path)?;
        let route = Self::route(op, path)?;
        let id = route.id.ok_or_else(|| ApiError::status(op, path, 404))?;
        let mut record = into_record(op, path, body)?;

        let mut collections = self.lock_collections();
        let slot = collections
            .get_mut(route.collection)
            .and_then(|rows| rows.iter_mut().find(|r| has_id(r, id)))
            .ok_or_else(|| ApiError::status(op, path, 404))?;
        let stored_id = slot.get("id").cloned().unwrap_or_else(|| Value::from(id));
        record.insert("id".to_string(), stored_id);
        *slot = record.clone();
        Ok(Value::Object(record))
    }

    async fn remove(&self, path: &str) -> Result<bool, ApiError> {
        let op = Operation::Remove;
        self.begin(op, path)?;
        let route = Self::route(op, path)?;
        let id = route.id.ok_or_else(|| ApiError::status(op, path, 404))?;

        let mut collections = self.lock_collections();
        let rows = collections
            .get_mut(route.collection)
            .ok_or_else(|| ApiError::status(op, path, 404))?;
        let before = rows.len();
        rows.retain(|r| !has_id(r, id));
        if rows.len() == before {
            return Err(ApiError::status(op, path, 404));
        }
        Ok(true)
    }
}
