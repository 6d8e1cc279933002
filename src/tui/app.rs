use crate::codec::Passage;
use crate::debounce::QueryDebouncer;
use crate::output::{layout_rows, HeaderLocale, Row};
use crate::worker::{WorkerEvent, WorkerHandle};
use std::time::{Duration, Instant};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Search,
    Help,
}

/// Loading state of the worker's translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

/// Application state
pub struct App {
    worker: WorkerHandle,
    debouncer: QueryDebouncer,
    pub locale: HeaderLocale,
    pub query: String,
    /// Query text whose results are currently shown
    pub shown_query: String,
    pub results: Vec<Passage>,
    /// Index into `results` of the highlighted verse
    pub selected: usize,
    pub mode: Mode,
    pub status_message: String,
    pub load_state: LoadState,
    sent_at: Option<Instant>,
}

impl App {
    /// The worker answers `initial_query` on its own once loading is done
    pub fn new(worker: WorkerHandle, initial_query: String, locale: HeaderLocale, debounce: Duration) -> Self {
        Self {
            worker,
            debouncer: QueryDebouncer::new(debounce),
            locale,
            query: initial_query,
            shown_query: String::new(),
            results: Vec::new(),
            selected: 0,
            mode: Mode::Search,
            status_message: "Loading...".to_string(),
            load_state: LoadState::Loading,
            sent_at: Some(Instant::now()),
        }
    }

    /// Drain worker events (call this in event loop)
    pub fn poll_worker(&mut self) {
        while let Some(event) = self.worker.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Loading { is_loading: true } => {
                self.load_state = LoadState::Loading;
                self.status_message = "Loading...".to_string();
            }
            WorkerEvent::Loading { is_loading: false } => {
                if self.load_state == LoadState::Loading {
                    self.load_state = LoadState::Ready;
                }
            }
            WorkerEvent::Results { query, passages } => {
                let elapsed = self.sent_at.take().map(|t| t.elapsed());
                self.status_message = match elapsed {
                    Some(elapsed) => format!(
                        "{} verses ({:.1}ms)",
                        passages.len(),
                        elapsed.as_secs_f64() * 1000.0
                    ),
                    None => format!("{} verses", passages.len()),
                };
                self.shown_query = query;
                self.results = passages;
                self.selected = 0;
            }
            WorkerEvent::Failed(message) => {
                self.load_state = LoadState::Failed;
                self.status_message = format!("Load failed: {}", message);
                self.results.clear();
            }
        }
    }

    /// Send the debounced query to the worker once it is ready
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.take_ready_at(now) {
            self.send_query(query);
        }
    }

    /// How long the event loop may block before the next tick is due
    pub fn poll_timeout(&self, max: Duration) -> Duration {
        self.debouncer
            .time_until_ready()
            .map_or(max, |remaining| remaining.min(max))
    }

    /// Run the current query without waiting for the debounce window
    pub fn execute_now(&mut self) {
        self.debouncer.cancel();
        self.send_query(self.query.clone());
    }

    fn send_query(&mut self, query: String) {
        if self.load_state == LoadState::Failed {
            return;
        }
        if !self.worker.query(query) {
            self.status_message = "Worker stopped unexpectedly".to_string();
            return;
        }
        self.sent_at = Some(Instant::now());
    }

    fn query_changed(&mut self) {
        self.debouncer.schedule(self.query.clone());
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.query_changed();
    }

    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            self.query_changed();
        }
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.query_changed();
    }

    /// Delete word backward from query (vim Ctrl+w)
    pub fn delete_word(&mut self) {
        let before = self.query.len();
        while self.query.ends_with(' ') {
            self.query.pop();
        }
        while !self.query.is_empty() && !self.query.ends_with(' ') {
            self.query.pop();
        }
        if self.query.len() != before {
            self.query_changed();
        }
    }

    /// Rows for the results pane: chapter headers and verses
    pub fn rows(&self) -> Vec<Row<'_>> {
        layout_rows(&self.results, self.locale)
    }

    /// Row index of the selected verse within `rows()`
    pub fn selected_row(&self, rows: &[Row<'_>]) -> Option<usize> {
        rows.iter()
            .enumerate()
            .filter(|(_, row)| matches!(row, Row::Verse { .. }))
            .nth(self.selected)
            .map(|(i, _)| i)
    }

    pub fn selected_passage(&self) -> Option<&Passage> {
        self.results.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1).min(self.results.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_page_down(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 10).min(self.results.len() - 1);
        }
    }

    pub fn select_page_up(&mut self) {
        self.selected = self.selected.saturating_sub(10);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.results.len().saturating_sub(1);
    }

    pub fn show_help(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn hide_help(&mut self) {
        self.mode = Mode::Search;
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Translation;
    use crate::source::StaticSource;
    use crate::store::MemoryStore;
    use crate::worker;

    const TEXT: &str = ";GEN;Genesis;Gen\nIn the beginning\nThe earth\n+\nThus the heavens\n;EXO;Exodus;Ex\nThese are the names\n";

    fn app(initial: &str) -> App {
        let translation = Translation::default();
        let handle = worker::spawn(
            MemoryStore::new(),
            StaticSource(TEXT.to_string()),
            translation,
            initial.to_string(),
        );
        App::new(handle, initial.to_string(), HeaderLocale::En, Duration::from_millis(100))
    }

    fn wait_for(app: &mut App, query: &str) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            app.poll_worker();
            if app.shown_query == query && app.load_state == LoadState::Ready {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("no results for {:?}", query);
    }

    #[test]
    fn test_initial_query_results() {
        let mut app = app("gen");
        wait_for(&mut app, "gen");
        assert_eq!(app.results.len(), 3);
        assert!(app.status_message.starts_with("3 verses"));
    }

    #[test]
    fn test_typing_is_debounced() {
        let mut app = app("");
        wait_for(&mut app, "");

        app.push_char('e');
        app.push_char('x');
        // Nothing is sent until the window has passed
        app.tick_at(Instant::now());
        assert!(app.poll_timeout(Duration::from_secs(1)) <= Duration::from_millis(100));

        app.tick_at(Instant::now() + Duration::from_millis(150));
        wait_for(&mut app, "ex");
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.results[0].book, "Exodus");
    }

    #[test]
    fn test_execute_now_skips_window() {
        let mut app = app("");
        wait_for(&mut app, "");

        app.query = "gen 2".to_string();
        app.execute_now();
        wait_for(&mut app, "gen 2");
        assert_eq!(app.results.len(), 1);
    }

    #[test]
    fn test_selection_maps_to_rows() {
        let mut app = app("gen");
        wait_for(&mut app, "gen");

        let rows = app.rows();
        assert_eq!(app.selected_row(&rows), Some(1));

        app.select_last();
        let rows = app.rows();
        // Header, 2 verses, header, verse
        assert_eq!(app.selected_row(&rows), Some(4));
        assert_eq!(app.selected_passage().map(|p| p.text.as_str()), Some("Thus the heavens"));

        app.select_next();
        assert_eq!(app.selected, 2);
        app.select_page_up();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_delete_word() {
        let mut app = app("");
        app.query = "gen 1:1".to_string();
        app.delete_word();
        assert_eq!(app.query, "gen ");
        app.delete_word();
        assert_eq!(app.query, "");
    }
}
