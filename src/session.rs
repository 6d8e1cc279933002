//! A loaded translation plus the state needed to query it
//!
//! `Session` replaces what would otherwise be process-wide globals: it owns
//! the passages, the debouncer and the display settings. One-shot queries go
//! through [`Session::filter`]; typed input goes through [`Session::input`]
//! and [`Session::poll`].

use crate::codec::{Passage, Translation};
use crate::debounce::QueryDebouncer;
use crate::loader::{load_passages, LoadOrigin};
use crate::output::{layout_rows, HeaderLocale, Row};
use crate::query::{filter_passages_with, FilterOptions};
use crate::source::PassageSource;
use crate::store::PassageStore;
use crate::utils::AppConfig;
use anyhow::Result;
use std::time::Instant;

pub struct Session {
    translation: Translation,
    passages: Vec<Passage>,
    origin: LoadOrigin,
    debouncer: QueryDebouncer,
    locale: HeaderLocale,
    options: FilterOptions,
}

/// Results of a debounced query that became ready
#[derive(Debug)]
pub struct Ready<'a> {
    pub query: String,
    pub passages: Vec<&'a Passage>,
}

impl Session {
    /// Load the configured translation and set up the session
    pub fn initialize<S, R>(config: &AppConfig, store: &mut S, source: &R) -> Result<Self>
    where
        S: PassageStore + ?Sized,
        R: PassageSource + ?Sized,
    {
        let (passages, origin) = load_passages(store, source, &config.translation)?;
        tracing::info!(
            translation = %config.translation,
            count = passages.len(),
            ?origin,
            "session initialized"
        );
        Ok(Self::from_passages(config, passages, origin))
    }

    /// Build a session around passages that are already loaded
    pub fn from_passages(config: &AppConfig, passages: Vec<Passage>, origin: LoadOrigin) -> Self {
        Self {
            translation: config.translation.clone(),
            passages,
            origin,
            debouncer: QueryDebouncer::new(config.debounce_duration()),
            locale: config.locale,
            options: FilterOptions { union: config.union },
        }
    }

    pub fn translation(&self) -> &Translation {
        &self.translation
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    pub fn locale(&self) -> HeaderLocale {
        self.locale
    }

    pub fn options(&self) -> FilterOptions {
        self.options
    }

    /// Run a query immediately
    pub fn filter(&self, query: &str) -> Vec<&Passage> {
        filter_passages_with(&self.passages, query, self.options)
    }

    /// Run a query and lay the matches out with chapter headers
    pub fn rows(&self, query: &str) -> Vec<Row<'_>> {
        layout_rows(self.filter(query), self.locale)
    }

    /// Record typed text; it runs once input has been quiet for the debounce window
    pub fn input(&mut self, text: impl Into<String>) {
        self.debouncer.schedule(text);
    }

    pub fn input_at(&mut self, text: impl Into<String>, now: Instant) {
        self.debouncer.schedule_at(text, now);
    }

    /// Run the pending query if its window has elapsed
    pub fn poll(&mut self) -> Option<Ready<'_>> {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> Option<Ready<'_>> {
        let query = self.debouncer.take_ready_at(now)?;
        let passages = filter_passages_with(&self.passages, &query, self.options);
        tracing::debug!(query = %query, count = passages.len(), "debounced query ran");
        Some(Ready { query, passages })
    }

    pub fn debouncer(&self) -> &QueryDebouncer {
        &self.debouncer
    }
}
