//! The browsing/reading state machine.
//!
//! A [`Session`] owns the working entry list and, while one is open, the
//! article being read. Whether an article is open is the only mode state:
//!
//! ```text
//!            open n / <enter>
//!  Listing ───────────────────▶ Reading
//!     ▲                            │
//!     └────── quit / end of text ──┘
//! ```
//!
//! Every input line produces a [`Response`]; the caller decides how to put
//! it on screen. Opening an entry removes it from the list and schedules a
//! background mark-read through the session's [`TaskSupervisor`].

pub mod command;
pub mod view;

use std::sync::Arc;

use tracing::{info, warn};

use crate::app::RadiationError;
use crate::background::{DrainReport, MarkReadFailure, TaskSupervisor};
use crate::domain::{Article, EntryList};
use crate::render::Renderer;
use crate::store::EntryStore;

use self::command::{ListCommand, ReadCommand, LIST_HELP, READ_HELP};

pub const LAST_PAGE: &str = "Already at last page";
pub const FIRST_PAGE: &str = "Already at first page";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Listing,
    Reading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub entries_per_page: usize,
    pub lines_per_page: usize,
}

/// What to show after handling one input line.
///
/// `page` replaces the screen contents; `notice` is written after it
/// without clearing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub page: Option<String>,
    pub notice: Option<String>,
    pub quit: bool,
}

impl Response {
    pub fn page(text: impl Into<String>) -> Self {
        Self {
            page: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            notice: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }

    pub fn with_notice(mut self, text: impl Into<String>) -> Self {
        self.notice = Some(text.into());
        self
    }
}

pub struct Session {
    store: Arc<dyn EntryStore>,
    renderer: Arc<dyn Renderer>,
    settings: PageSettings,
    entries: EntryList,
    article: Option<Article>,
    tasks: TaskSupervisor,
}

impl Session {
    /// A session with an empty list. Call [`Session::refresh`] to load it.
    pub fn new(store: Arc<dyn EntryStore>, renderer: Arc<dyn Renderer>, settings: PageSettings) -> Self {
        Self {
            store,
            renderer,
            settings,
            entries: EntryList::default(),
            article: None,
            tasks: TaskSupervisor::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        if self.article.is_some() {
            Mode::Reading
        } else {
            Mode::Listing
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self.mode() {
            Mode::Listing => "> ",
            Mode::Reading => ": ",
        }
    }

    pub fn entries(&self) -> &EntryList {
        &self.entries
    }

    pub fn article(&self) -> Option<&Article> {
        self.article.as_ref()
    }

    pub fn pending_writebacks(&self) -> usize {
        self.tasks.pending()
    }

    /// Route one input line to the handler for the current mode.
    pub async fn handle(&mut self, line: &str) -> Response {
        match self.mode() {
            Mode::Listing => self.handle_list(ListCommand::parse(line)).await,
            Mode::Reading => self.handle_read(ReadCommand::parse(line)),
        }
    }

    /// Replace the entry list with a fresh fetch.
    ///
    /// On failure the previous list is kept and the error replaces the page.
    pub async fn refresh(&mut self) -> Response {
        match self.store.fetch_unread().await {
            Ok(list) => {
                self.entries = list;
                self.entries.position = 0;
                Response::page(self.list_page())
            }
            Err(e) => {
                warn!("Refresh failed: {}", e);
                Response::page(format!("Refresh failed: {}", e))
            }
        }
    }

    /// Mark-read failures that finished since the last call.
    pub fn reap(&mut self) -> Vec<MarkReadFailure> {
        self.tasks.reap()
    }

    /// Wait for all outstanding mark-read tasks.
    pub async fn shutdown(&mut self) -> DrainReport {
        let report = self.tasks.drain().await;
        info!(
            "Session closed: {} entries marked read, {} failures",
            report.succeeded,
            report.failures.len()
        );
        report
    }

    async fn handle_list(&mut self, command: ListCommand) -> Response {
        let page_size = self.settings.entries_per_page;
        match command {
            ListCommand::Open(index) => self.open(index).await,
            ListCommand::Refresh => self.refresh().await,
            ListCommand::List => Response::page(self.list_page()),
            ListCommand::Next => {
                let moved = self.entries.next_page(page_size);
                let response = Response::page(self.list_page());
                if moved {
                    response
                } else {
                    response.with_notice(LAST_PAGE)
                }
            }
            ListCommand::Prev => {
                let moved = self.entries.prev_page();
                let response = Response::page(self.list_page());
                if moved {
                    response
                } else {
                    response.with_notice(FIRST_PAGE)
                }
            }
            ListCommand::Help => Response::notice(LIST_HELP),
            ListCommand::Quit => Response::quit(),
            ListCommand::Unknown(input) => Response::notice(format!("Unknown command: {}", input)),
        }
    }

    async fn open(&mut self, index: Option<i64>) -> Response {
        let page_size = self.settings.entries_per_page;
        let len = self.entries.len();
        let index = index.unwrap_or(self.entries.first_on_page(page_size) as i64);

        let Some(position) = usize::try_from(index).ok().filter(|&i| i < len) else {
            return Response::notice(RadiationError::OutOfBounds { index, len }.to_string());
        };

        let (id, listed_content) = {
            let entry = &self.entries.entries[position];
            (entry.id, entry.content.clone())
        };

        let content = if listed_content.trim().is_empty() {
            match self.store.fetch_entry(id).await {
                Ok(full) => full.content,
                Err(e) => {
                    warn!("Could not load entry {}: {}", id, e);
                    return Response::notice(format!("Could not load entry {}: {}", id, e));
                }
            }
        } else {
            listed_content
        };

        let renderer = self.renderer.clone();
        let text = match tokio::task::spawn_blocking(move || renderer.render(&content)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Rendering entry {} failed: {}", id, e);
                e.to_string()
            }
            Err(e) => {
                warn!("Render task for entry {} failed: {}", id, e);
                RadiationError::Render(e.to_string()).to_string()
            }
        };

        let Some(entry) = self.entries.take(position, page_size) else {
            return Response::notice(RadiationError::OutOfBounds { index, len }.to_string());
        };

        self.tasks.spawn_mark_read(self.store.clone(), entry.id);
        let article = Article::new(&entry, &text);
        let page = view::article_page(&article, self.settings.lines_per_page);
        self.article = Some(article);
        Response::page(page)
    }

    fn handle_read(&mut self, command: ReadCommand) -> Response {
        let lines_per_page = self.settings.lines_per_page;
        let Some(article) = self.article.as_mut() else {
            return Response::page(self.list_page());
        };

        match command {
            ReadCommand::Continue => {
                if article.next_page(lines_per_page) {
                    Response::page(view::article_page(article, lines_per_page))
                } else {
                    self.article = None;
                    Response::page(self.list_page())
                }
            }
            ReadCommand::Prev => {
                if article.prev_page() {
                    Response::page(view::article_page(article, lines_per_page))
                } else {
                    Response::notice(FIRST_PAGE)
                }
            }
            ReadCommand::Quit => {
                self.article = None;
                Response::page(self.list_page())
            }
            ReadCommand::OpenInBrowser => {
                if article.url.is_empty() {
                    return Response::notice("Entry has no URL");
                }
                match open::that(&article.url) {
                    Ok(()) => Response::notice(format!("Opened {}", article.url)),
                    Err(e) => Response::notice(format!("Failed to open browser: {}", e)),
                }
            }
            ReadCommand::Help => Response::notice(READ_HELP),
            ReadCommand::Unknown(input) => Response::notice(format!("Unknown command: {}", input)),
        }
    }

    fn list_page(&self) -> String {
        view::list_page(&self.entries, self.settings.entries_per_page)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::{page, Entry};
    use crate::testing::{entry_list, EchoRenderer, FakeStore};

    const SETTINGS: PageSettings = PageSettings {
        entries_per_page: 5,
        lines_per_page: 2,
    };

    async fn session_with(store: Arc<FakeStore>, n: i64) -> Session {
        store.push_list(entry_list(n));
        let mut session = Session::new(store, Arc::new(EchoRenderer { fail: false }), SETTINGS);
        session.refresh().await;
        session
    }

    fn ids(session: &Session) -> Vec<i64> {
        session.entries().entries.iter().map(|e| e.id).collect()
    }

    #[tokio::test]
    async fn test_paging_seven_entries() {
        let mut session = session_with(Arc::new(FakeStore::new()), 7).await;

        let list = session.handle("list").await;
        let page = list.page.unwrap();
        assert!(page.starts_with("0. Entry 0\n"));
        assert!(page.contains("4. Entry 4"));
        assert!(!page.contains("5. Entry 5"));

        let next = session.handle("next").await;
        assert_eq!(next.notice, None);
        let page = next.page.unwrap();
        assert!(page.starts_with("5. Entry 5\n6. Entry 6\n"));

        let again = session.handle("next").await;
        assert_eq!(again.notice.as_deref(), Some(LAST_PAGE));
        assert_eq!(again.page.unwrap(), page);
        assert_eq!(session.entries().position, 1);
    }

    #[tokio::test]
    async fn test_prev_on_first_page_is_noop() {
        let mut session = session_with(Arc::new(FakeStore::new()), 3).await;

        let first = session.handle("p").await;
        let second = session.handle("p").await;
        assert_eq!(first, second);
        assert_eq!(first.notice.as_deref(), Some(FIRST_PAGE));
        assert_eq!(session.entries().position, 0);
    }

    #[tokio::test]
    async fn test_open_removes_entry_and_enters_reading() {
        let store = Arc::new(FakeStore::new());
        let mut session = session_with(store.clone(), 7).await;

        let response = session.handle("2").await;
        let page = response.page.unwrap();
        assert!(page.starts_with("Entry 2\n"));
        assert!(page.contains("body 2"));

        assert_eq!(session.mode(), Mode::Reading);
        assert_eq!(session.prompt(), ": ");
        assert_eq!(ids(&session), vec![0, 1, 3, 4, 5, 6]);
        assert_eq!(session.entries().position, 0);
        assert_eq!(session.pending_writebacks(), 1);

        let report = session.shutdown().await;
        assert_eq!(report.succeeded, 1);
        assert_eq!(store.marked(), vec![2]);
    }

    #[tokio::test]
    async fn test_empty_input_opens_first_entry_of_page() {
        let mut session = session_with(Arc::new(FakeStore::new()), 7).await;
        session.handle("next").await;

        session.handle("").await;
        assert_eq!(session.article().unwrap().entry_id, 5);
        session.shutdown().await;
    }

    #[tokio::test]
    async fn test_opening_last_entry_on_last_page_steps_back() {
        let mut session = session_with(Arc::new(FakeStore::new()), 6).await;
        session.handle("next").await;
        assert_eq!(session.entries().position, 1);

        session.handle("5").await;
        assert_eq!(session.entries().position, 0);
        assert!(page::is_valid(0, 5, session.entries().len()));
        session.shutdown().await;
    }

    #[tokio::test]
    async fn test_out_of_bounds_does_not_mutate() {
        let store = Arc::new(FakeStore::new());
        let mut session = session_with(store.clone(), 3).await;
        let before = session.entries().clone();

        for input in ["3", "99", "-1"] {
            let response = session.handle(input).await;
            assert!(response.page.is_none());
            assert!(response.notice.unwrap().starts_with("No entry at index"));
            assert_eq!(session.entries(), &before);
            assert_eq!(session.mode(), Mode::Listing);
        }

        session.shutdown().await;
        assert_eq!(store.mark_calls(), 0);
    }

    #[tokio::test]
    async fn test_open_on_empty_list_is_out_of_bounds() {
        let mut session = session_with(Arc::new(FakeStore::new()), 0).await;
        let response = session.handle("").await;
        assert!(response.notice.unwrap().starts_with("No entry at index 0"));
    }

    #[tokio::test]
    async fn test_reading_pages_then_returns_to_list() {
        let store = Arc::new(FakeStore::new());
        store.push_list(EntryList::new(1, {
            let mut entry = Entry::new(10, "Long");
            entry.content = "l1\nl2\nl3\nl4\nl5".into();
            vec![entry]
        }));
        let mut session = Session::new(store, Arc::new(EchoRenderer { fail: false }), SETTINGS);
        session.refresh().await;

        let first = session.handle("0").await.page.unwrap();
        assert!(first.contains("l1\nl2\n-- page 1/3 --"));

        assert_eq!(session.handle("p").await.notice.as_deref(), Some(FIRST_PAGE));

        let second = session.handle("").await.page.unwrap();
        assert_eq!(second, "l3\nl4\n-- page 2/3 --");
        let back = session.handle("prev").await.page.unwrap();
        assert_eq!(back, first);

        session.handle("c").await;
        let third = session.handle("n").await.page.unwrap();
        assert_eq!(third, "l5\n-- page 3/3 --");

        let done = session.handle("").await;
        assert_eq!(done.page.as_deref(), Some(view::EMPTY_LIST));
        assert_eq!(session.mode(), Mode::Listing);
        session.shutdown().await;
    }

    #[tokio::test]
    async fn test_quit_while_reading_returns_to_list() {
        let mut session = session_with(Arc::new(FakeStore::new()), 3).await;
        session.handle("1").await;

        let response = session.handle("q").await;
        assert!(!response.quit);
        assert!(response.page.unwrap().starts_with("0. Entry 0\n1. Entry 2"));
        assert_eq!(session.mode(), Mode::Listing);

        assert!(session.handle("q").await.quit);
        session.shutdown().await;
    }

    #[tokio::test]
    async fn test_render_failure_becomes_body() {
        let store = Arc::new(FakeStore::new());
        store.push_list(entry_list(2));
        let mut session = Session::new(store, Arc::new(EchoRenderer { fail: true }), SETTINGS);
        session.refresh().await;

        let page = session.handle("0").await.page.unwrap();
        assert!(page.contains("Render failed: renderer exited with status 1"));
        assert_eq!(session.mode(), Mode::Reading);
        assert_eq!(session.entries().len(), 1);
        session.shutdown().await;
    }

    #[tokio::test]
    async fn test_missing_content_is_fetched() {
        let store = Arc::new(FakeStore::new());
        let mut full = Entry::new(4, "Sparse");
        full.content = "fetched body".into();
        store.insert_entry(full);
        store.push_list(EntryList::new(1, vec![Entry::new(4, "Sparse")]));
        let mut session = Session::new(store, Arc::new(EchoRenderer { fail: false }), SETTINGS);
        session.refresh().await;

        let page = session.handle("0").await.page.unwrap();
        assert!(page.contains("fetched body"));
        session.shutdown().await;
    }

    #[tokio::test]
    async fn test_failed_content_fetch_keeps_entry() {
        let store = Arc::new(FakeStore::new());
        store.push_list(EntryList::new(1, vec![Entry::new(4, "Sparse")]));
        let mut session = Session::new(store.clone(), Arc::new(EchoRenderer { fail: false }), SETTINGS);
        session.refresh().await;

        let response = session.handle("0").await;
        assert!(response.notice.unwrap().starts_with("Could not load entry 4"));
        assert_eq!(session.entries().len(), 1);
        assert_eq!(session.mode(), Mode::Listing);
        session.shutdown().await;
        assert_eq!(store.mark_calls(), 0);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_list() {
        let store = Arc::new(FakeStore::new());
        let mut session = session_with(store.clone(), 4).await;
        store.push_list_error(RadiationError::Other("server down".into()));

        let response = session.handle("refresh").await;
        assert_eq!(response.page.as_deref(), Some("Refresh failed: server down"));
        assert_eq!(ids(&session), vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_refresh_replaces_list_and_resets_position() {
        let store = Arc::new(FakeStore::new());
        let mut session = session_with(store.clone(), 7).await;
        session.handle("next").await;
        store.push_list(entry_list(7));

        let response = session.handle("r").await;
        assert!(response.page.unwrap().starts_with("0. Entry 0"));
        assert_eq!(session.entries(), &entry_list(7));
    }

    #[tokio::test]
    async fn test_unknown_and_help() {
        let mut session = session_with(Arc::new(FakeStore::new()), 2).await;

        assert_eq!(
            session.handle("frobnicate").await.notice.as_deref(),
            Some("Unknown command: frobnicate")
        );
        assert_eq!(session.handle("h").await.notice.as_deref(), Some(LIST_HELP));

        session.handle("0").await;
        assert_eq!(session.handle("help").await.notice.as_deref(), Some(READ_HELP));
        assert_eq!(session.handle("zzz").await.notice.as_deref(), Some("Unknown command: zzz"));
        assert_eq!(session.mode(), Mode::Reading);
        session.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_every_mark_read() {
        let store = Arc::new(FakeStore::with_mark_delay(Duration::from_millis(30)));
        let mut session = session_with(store.clone(), 5).await;

        for _ in 0..3 {
            session.handle("0").await;
            session.handle("q").await;
        }
        assert_eq!(session.entries().len(), 2);

        let report = session.shutdown().await;
        assert_eq!(report.succeeded, 3);
        assert_eq!(session.pending_writebacks(), 0);
        let mut marked = store.marked();
        marked.sort();
        assert_eq!(marked, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_open_without_url_reports() {
        let store = Arc::new(FakeStore::new());
        store.push_list(EntryList::new(1, vec![{
            let mut entry = Entry::new(1, "No link");
            entry.content = "text".into();
            entry
        }]));
        let mut session = Session::new(store, Arc::new(EchoRenderer { fail: false }), SETTINGS);
        session.refresh().await;

        session.handle("0").await;
        assert_eq!(session.handle("open").await.notice.as_deref(), Some("Entry has no URL"));
        session.shutdown().await;
    }
}
