//! Global state container, action dispatch, and background task plumbing.

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use crate::actions::Action;
use crate::backend::RelayClient;
use crate::cache::{CommandCache, CommandSet};
use crate::error::{CacheRefreshFailed, SearchError};
use crate::history::History;
use crate::selection::{EnterIntent, SelectionController, SelectionEvent};
use crate::services::{copy_text, now_epoch_ms, strip_ansi};
use crate::session::{RequestToken, SearchSession};
use crate::state::{AppState, ResultStatus, ThemeChoice};
use crate::store::Store;
use crate::suggest::suggest;

const PAGE: isize = 10;

/// Completions reported by spawned network tasks.
#[derive(Debug)]
pub enum BackgroundEvent {
    CommandsFetched(Result<CommandSet, CacheRefreshFailed>),
    SearchFinished {
        token: RequestToken,
        query: String,
        result: Result<String, SearchError>,
    },
}

pub struct App {
    pub state: AppState,
    pub selection: SelectionController,
    pub cache: CommandCache,
    session: SearchSession,
    client: RelayClient,
    store: Box<dyn Store>,
    runtime: Handle,
    tx: UnboundedSender<BackgroundEvent>,
    rx: UnboundedReceiver<BackgroundEvent>,
    pub should_quit: bool,
    /// For spinner animation (incremented each tick).
    pub tick: usize,
}

impl App {
    pub fn new(client: RelayClient, store: Box<dyn Store>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = AppState {
            history: History::load(store.as_ref()),
            theme: ThemeChoice::load(store.as_ref()),
            ..AppState::default()
        };
        Self {
            state,
            selection: SelectionController::new(),
            cache: CommandCache::load(store.as_ref()),
            session: SearchSession::new(),
            client,
            store,
            runtime,
            tx,
            rx,
            should_quit: false,
            tick: 0,
        }
    }

    pub fn bootstrap(&mut self) {
        info!(
            commands = self.cache.get().len(),
            fetched_at_ms = self.cache.entry().map(|e| e.fetched_at_ms),
            history = self.state.history.entries().len(),
            "starting"
        );
        self.refresh_commands_if_stale(now_epoch_ms());
    }

    /// Start a background listing fetch unless the cache is fresh or one is running.
    pub fn refresh_commands_if_stale(&mut self, now_ms: u64) {
        if !self.cache.begin_refresh(now_ms) {
            return;
        }
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.list_commands().await;
            let _ = tx.send(BackgroundEvent::CommandsFetched(result));
        });
    }

    /// Drain finished background work. Called once per tick.
    pub fn poll_results(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                BackgroundEvent::CommandsFetched(result) => {
                    self.cache.complete_refresh(result, self.store.as_mut());
                }
                BackgroundEvent::SearchFinished { token, query, result } => {
                    self.finish_search(token, query, result);
                }
            }
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state.notice = None;
        match action {
            Action::Quit => self.should_quit = true,

            Action::Char(c) => {
                self.state.insert_char(c);
                self.query_changed();
            }
            Action::Backspace => {
                if self.state.delete_back() {
                    self.query_changed();
                }
            }
            Action::ClearInput => {
                self.state.set_input("");
                self.selection.dispatch(SelectionEvent::Dismiss);
            }
            Action::Submit => self.submit_input(),

            Action::SuggestionNext => {
                self.selection.dispatch(SelectionEvent::MoveNext);
            }
            Action::SuggestionPrev => {
                self.selection.dispatch(SelectionEvent::MovePrev);
            }
            Action::DismissSuggestions => {
                self.selection.dispatch(SelectionEvent::Dismiss);
            }

            Action::ScrollUp => self.state.results.scroll_by(-1),
            Action::ScrollDown => self.state.results.scroll_by(1),
            Action::ScrollPageUp => self.state.results.scroll_by(-PAGE),
            Action::ScrollPageDown => self.state.results.scroll_by(PAGE),
            Action::ScrollTop => self.state.results.scroll = 0,
            Action::ScrollBottom => self.state.results.scroll_to_bottom(),

            Action::ToggleTheme => {
                self.state.theme = self.state.theme.toggled();
                self.state.theme.save(self.store.as_mut());
            }
            Action::CopyResult => self.copy_result(),
            Action::ClearHistory => {
                self.state.history.clear();
                self.state.history.save(self.store.as_mut());
            }
            Action::RunHistory(index) => {
                if let Some(query) = self.state.history.get(index).map(str::to_string) {
                    self.selection.dispatch(SelectionEvent::Dismiss);
                    self.search(&query);
                }
            }
        }
    }

    fn query_changed(&mut self) {
        let commands = self.cache.get();
        let list = suggest(&self.state.input_buffer, &commands);
        self.selection.dispatch(SelectionEvent::QueryChanged(list));
    }

    fn submit_input(&mut self) {
        match self.selection.enter_intent() {
            EnterIntent::Commit => {
                if let Some(picked) = self.selection.dispatch(SelectionEvent::Commit) {
                    self.search(&picked.text);
                }
            }
            EnterIntent::SubmitRaw => {
                self.selection.dispatch(SelectionEvent::Dismiss);
                let raw = self.state.input_buffer.clone();
                self.search(&raw);
            }
        }
    }

    fn search(&mut self, raw: &str) {
        let Some(pending) = self.session.begin(raw) else {
            return;
        };
        self.state.set_input(&pending.query);
        self.state.results.loading(&pending.query);

        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.fetch(&pending.query).await;
            let _ = tx.send(BackgroundEvent::SearchFinished {
                token: pending.token,
                query: pending.query,
                result,
            });
        });
    }

    fn finish_search(&mut self, token: RequestToken, query: String, result: Result<String, SearchError>) {
        let Some(outcome) = self
            .session
            .resolve(token, query, result, &mut self.state.history)
        else {
            return;
        };
        match outcome.result {
            Ok(text) => {
                self.state.history.save(self.store.as_mut());
                self.state.results.ready(outcome.query, text);
            }
            Err(e) => {
                warn!(query = %outcome.query, error = %e, "search failed");
                self.state.results.failed(outcome.query, e.to_string());
            }
        }
    }

    fn copy_result(&mut self) {
        if !self.state.results.has_content() {
            return;
        }
        let clean = strip_ansi(&self.state.results.content);
        self.state.notice = Some(match copy_text(&clean) {
            Ok(()) => "Copied".to_string(),
            Err(e) => {
                warn!(error = %e, "clipboard unavailable");
                format!("Copy failed: {e}")
            }
        });
    }

    pub fn is_loading(&self) -> bool {
        self.state.results.status == ResultStatus::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CACHE_TTL_MS, STORAGE_KEY_COMMANDS, STORAGE_KEY_COMMANDS_TS};
    use crate::store::MemoryStore;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use std::collections::HashMap;
    use std::time::Duration;

    async fn stub(params: Query<HashMap<String, String>>) -> (StatusCode, String) {
        match params.get("q").map(String::as_str) {
            Some(":list") => (StatusCode::OK, "tar\ntail\ntac\n".into()),
            Some("tac") => (StatusCode::OK, "\x1b[32mtac\x1b[0m - reverse cat".into()),
            Some("tar") => (StatusCode::OK, "tar -xvf".into()),
            _ => (StatusCode::OK, String::new()),
        }
    }

    async fn spawn_relay() -> String {
        let router = axum::Router::new().route("/api/cheat", get(stub));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api/cheat")
    }

    fn seeded_store(commands: &[&str]) -> MemoryStore {
        let mut store = MemoryStore::default();
        store
            .set(STORAGE_KEY_COMMANDS, serde_json::to_string(commands).unwrap())
            .unwrap();
        store
            .set(STORAGE_KEY_COMMANDS_TS, now_epoch_ms().to_string())
            .unwrap();
        store
    }

    fn app(endpoint: String, store: MemoryStore) -> App {
        let client = RelayClient::new(endpoint).unwrap();
        App::new(client, Box::new(store), Handle::current())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.dispatch(Action::Char(c));
        }
    }

    async fn settle(app: &mut App, done: impl Fn(&App) -> bool) {
        for _ in 0..200 {
            app.poll_results();
            if done(app) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("background work did not finish");
    }

    fn suggestion_texts(app: &App) -> Vec<String> {
        app.selection
            .suggestions()
            .iter()
            .map(|s| s.text.clone())
            .collect()
    }

    #[tokio::test]
    async fn typing_ranks_cached_commands() {
        let mut app = app(
            "http://127.0.0.1:1/api/cheat".into(),
            seeded_store(&["tar", "tail", "tac"]),
        );
        type_text(&mut app, "ta");
        assert_eq!(suggestion_texts(&app), ["tac", "tar", "tail"]);
        assert_eq!(app.selection.highlighted(), Some(0));

        app.dispatch(Action::Backspace);
        app.dispatch(Action::Backspace);
        assert!(!app.selection.is_visible());
    }

    #[tokio::test]
    async fn enter_commits_highlighted_suggestion() {
        let endpoint = spawn_relay().await;
        let mut app = app(endpoint, seeded_store(&["tar", "tail", "tac"]));
        type_text(&mut app, "ta");
        app.dispatch(Action::Submit);

        assert!(!app.selection.is_visible());
        assert_eq!(app.state.input_buffer, "tac");
        assert!(app.is_loading());

        settle(&mut app, |a| !a.is_loading()).await;
        assert_eq!(app.state.results.status, ResultStatus::Ready);
        assert!(app.state.results.content.contains("reverse cat"));
        assert_eq!(app.state.history.entries(), ["tac"]);
    }

    #[tokio::test]
    async fn enter_after_dismiss_searches_raw_text() {
        let endpoint = spawn_relay().await;
        let mut app = app(endpoint, seeded_store(&["tar", "tail", "tac"]));
        type_text(&mut app, "ta");
        app.dispatch(Action::DismissSuggestions);
        app.dispatch(Action::Submit);

        settle(&mut app, |a| !a.is_loading()).await;
        assert_eq!(
            app.state.results.status,
            ResultStatus::Failed("No results found".into())
        );
        assert_eq!(app.state.results.title, "ta");
        assert!(app.state.history.is_empty());
    }

    #[tokio::test]
    async fn blank_submit_does_nothing() {
        let mut app = app("http://127.0.0.1:1/api/cheat".into(), MemoryStore::default());
        type_text(&mut app, "   ");
        app.dispatch(Action::Submit);
        assert_eq!(app.state.results.status, ResultStatus::Idle);
    }

    #[tokio::test]
    async fn unreachable_relay_reports_transport_error() {
        let mut app = app("http://127.0.0.1:1/api/cheat".into(), MemoryStore::default());
        type_text(&mut app, "tar");
        app.dispatch(Action::Submit);
        settle(&mut app, |a| !a.is_loading()).await;
        assert!(matches!(app.state.results.status, ResultStatus::Failed(_)));
    }

    #[tokio::test]
    async fn bootstrap_fetches_listing_once() {
        let endpoint = spawn_relay().await;
        let mut app = app(endpoint, MemoryStore::default());
        app.bootstrap();
        assert!(app.cache.is_refreshing());
        // A second trigger while the first is in flight is ignored.
        app.refresh_commands_if_stale(now_epoch_ms());

        settle(&mut app, |a| !a.cache.is_refreshing()).await;
        assert_eq!(app.cache.get().as_slice(), ["tar", "tail", "tac"]);
        assert!(!app.cache.needs_refresh(now_epoch_ms()));
        assert!(app.cache.needs_refresh(now_epoch_ms() + CACHE_TTL_MS));
    }

    #[tokio::test]
    async fn history_rerun_and_clear() {
        let endpoint = spawn_relay().await;
        let mut app = app(endpoint, MemoryStore::default());
        type_text(&mut app, "tar");
        app.dispatch(Action::Submit);
        settle(&mut app, |a| !a.is_loading()).await;
        assert_eq!(app.state.history.entries(), ["tar"]);

        app.dispatch(Action::ClearInput);
        app.dispatch(Action::RunHistory(0));
        assert_eq!(app.state.input_buffer, "tar");
        settle(&mut app, |a| !a.is_loading()).await;

        app.dispatch(Action::ClearHistory);
        assert!(app.state.history.is_empty());
        app.dispatch(Action::RunHistory(0));
        assert_eq!(app.state.results.status, ResultStatus::Ready);
    }

    #[tokio::test]
    async fn theme_toggle_persists() {
        let mut app = app("http://127.0.0.1:1/api/cheat".into(), MemoryStore::default());
        app.dispatch(Action::ToggleTheme);
        assert_eq!(app.state.theme, ThemeChoice::Light);
        assert_eq!(ThemeChoice::load(app.store.as_ref()), ThemeChoice::Light);
    }

    #[tokio::test]
    async fn end_then_up_moves_the_view() {
        let mut app = app("http://127.0.0.1:1/api/cheat".into(), MemoryStore::default());
        let body: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
        app.state.results.ready("tar".into(), body.join("\n"));
        app.state.results.set_viewport(20);

        app.dispatch(Action::ScrollBottom);
        assert_eq!(app.state.results.scroll, 80);
        app.dispatch(Action::ScrollUp);
        assert_eq!(app.state.results.scroll, 79);
        app.dispatch(Action::ScrollPageUp);
        assert_eq!(app.state.results.scroll, 69);
        app.dispatch(Action::ScrollTop);
        assert_eq!(app.state.results.scroll, 0);
    }
}
