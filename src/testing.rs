//! In-memory stand-ins for the network edges, used by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::app::{RadiationError, Result};
use crate::domain::{Entry, EntryId, EntryList};
use crate::fetcher::{HttpRequest, HttpResponse, Transport};
use crate::render::Renderer;
use crate::store::EntryStore;

/// Replays queued responses; an empty queue answers with an IO error.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, status: StatusCode, body: &[u8]) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.to_vec(),
        }));
    }

    pub fn push_io_error(&self) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(io_error("connection reset")));
    }

    pub fn attempts(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(io_error("connection refused")))
    }
}

fn io_error(msg: &str) -> RadiationError {
    RadiationError::Io(std::io::Error::other(msg.to_string()))
}

/// Entry store with scripted list fetches and recorded mark-read calls.
#[derive(Default)]
pub struct FakeStore {
    lists: Mutex<VecDeque<Result<EntryList>>>,
    entries: Mutex<HashMap<EntryId, Entry>>,
    marked: Mutex<Vec<EntryId>>,
    mark_calls: AtomicUsize,
    mark_delay: Option<Duration>,
    fail_mark_read: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mark_delay(delay: Duration) -> Self {
        Self {
            mark_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn push_list(&self, list: EntryList) {
        self.lists.lock().unwrap().push_back(Ok(list));
    }

    pub fn push_list_error(&self, err: RadiationError) {
        self.lists.lock().unwrap().push_back(Err(err));
    }

    pub fn insert_entry(&self, entry: Entry) {
        self.entries.lock().unwrap().insert(entry.id, entry);
    }

    pub fn fail_mark_read(&self) {
        self.fail_mark_read.store(true, Ordering::SeqCst);
    }

    /// Identifiers whose mark-read completed successfully.
    pub fn marked(&self) -> Vec<EntryId> {
        self.marked.lock().unwrap().clone()
    }

    pub fn mark_calls(&self) -> usize {
        self.mark_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntryStore for FakeStore {
    async fn fetch_unread(&self) -> Result<EntryList> {
        self.lists
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RadiationError::Other("no list queued".into())))
    }

    async fn fetch_entry(&self, id: EntryId) -> Result<Entry> {
        self.entries
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| RadiationError::UnexpectedStatus {
                status: 404,
                url: format!("/v1/entries/{}", id),
            })
    }

    async fn mark_read(&self, ids: &[EntryId]) -> Result<()> {
        self.mark_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.mark_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_mark_read.load(Ordering::SeqCst) {
            return Err(RadiationError::RemoteUnavailable {
                attempts: 5,
                source: Box::new(io_error("connection refused")),
            });
        }
        self.marked.lock().unwrap().extend_from_slice(ids);
        Ok(())
    }
}

/// Renderer that returns its input unchanged, or a fixed error.
pub struct EchoRenderer {
    pub fail: bool,
}

impl Renderer for EchoRenderer {
    fn render(&self, markup: &str) -> Result<String> {
        if self.fail {
            Err(RadiationError::Render("renderer exited with status 1".into()))
        } else {
            Ok(markup.to_string())
        }
    }
}

/// `n` entries with ids `0..n`, titles `Entry i` and content `body i`.
pub fn entry_list(n: i64) -> EntryList {
    let entries = (0..n)
        .map(|i| {
            let mut entry = Entry::new(i, format!("Entry {}", i));
            entry.url = format!("https://news.example.com/{}", i);
            entry.content = format!("body {}", i);
            entry
        })
        .collect();
    EntryList::new(n, entries)
}
