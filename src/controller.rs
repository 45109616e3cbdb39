// File: ./src/controller.rs
// Application state and orchestration: one owner per piece of state, view
// collaborators injected behind a trait, filter debouncing made explicit.
use crate::client::{self, FeedClient, FeedSource};
use crate::config::{Config, Theme};
use crate::context::SharedContext;
use crate::model::display::{CalendarEntry, calendar_entries};
use crate::model::{Concert, FilterCriteria};
use crate::mylist::MyList;
use crate::store::ConcertStore;
use std::time::{Duration, Instant};

/// How long a burst of text-filter edits may pause before the filter runs.
/// Scheduling only; the filter result is the same with or without it.
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(250);

/// Rendering collaborators implement whatever subset they care about; every
/// method defaults to doing nothing, so the core never has to check whether
/// a view exists.
pub trait ViewSink {
    fn table_updated(&mut self, _visible: &[Concert]) {}
    fn calendar_updated(&mut self, _entries: &[CalendarEntry]) {}
    fn my_list_updated(&mut self, _entries: &[Concert]) {}
    fn theme_changed(&mut self, _theme: Theme) {}
    fn load_failed(&mut self, _message: &str) {}
}

/// The default collaborator: renders nothing.
pub struct NullSink;

impl ViewSink for NullSink {}

/// Cancellable single-shot timer carrying the criteria it will apply.
///
/// Re-scheduling replaces both the deadline and the pending value, so a
/// burst of keystrokes collapses into one filter run with the final
/// criteria. Owned by the Filter Engine's caller; the engine itself knows
/// nothing about timing.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
    pending: Option<FilterCriteria>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            pending: None,
        }
    }

    /// Arms (or re-arms) the timer with fresh criteria.
    pub fn schedule(&mut self, criteria: FilterCriteria) {
        self.pending = Some(criteria);
        self.deadline = Some(Instant::now() + self.delay);
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Hands out the pending criteria once the deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<FilterCriteria> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        self.pending.take()
    }

    /// Sleeps until the deadline and hands out the pending criteria.
    /// Returns immediately with `None` when the timer is not armed.
    pub async fn wait(&mut self) -> Option<FilterCriteria> {
        let deadline = self.deadline?;
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        self.deadline = None;
        self.pending.take()
    }
}

/// What the detail-modal collaborator receives: a reconstructed record-like
/// value plus the membership flag, never a reference into the store.
#[derive(Debug, Clone)]
pub struct EventDetails {
    pub concert: Concert,
    pub in_my_list: bool,
}

/// Owns the application state. Writer rules: the store owns the two record
/// sets, the my-list owns its entries, the config owns the theme, and the
/// controller itself owns the ad-hoc export selection and the last load
/// error. Everything else reads.
pub struct Controller {
    ctx: SharedContext,
    store: ConcertStore,
    my_list: MyList,
    selection: Vec<Concert>,
    config: Config,
    debouncer: Debouncer,
    sink: Box<dyn ViewSink>,
    load_error: Option<String>,
}

impl Controller {
    pub fn new(ctx: SharedContext, sink: Box<dyn ViewSink>) -> Self {
        let config = Config::load_or_default(ctx.as_ref());
        let my_list = MyList::load(ctx.as_ref());
        Self {
            ctx,
            store: ConcertStore::new(),
            my_list,
            selection: Vec::new(),
            config,
            debouncer: Debouncer::new(FILTER_DEBOUNCE),
            sink,
            load_error: None,
        }
    }

    // --- Read access ---

    pub fn store(&self) -> &ConcertStore {
        &self.store
    }

    pub fn my_list(&self) -> &MyList {
        &self.my_list
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn selection(&self) -> &[Concert] {
        &self.selection
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    // --- Feed loading ---

    /// Fetches from the configured sources (built-ins unless overridden).
    pub async fn reload(&mut self, client: &FeedClient) {
        let sources = client::sources_from_config(&self.config);
        self.load_feed(client, &sources).await;
    }

    /// Runs the fallback fetch and swaps the store on success. On failure
    /// the store keeps whatever it held before the attempt and the error is
    /// surfaced through the sink with recovery guidance.
    pub async fn load_feed(&mut self, client: &FeedClient, sources: &[FeedSource]) {
        match client.fetch(sources).await {
            Ok(concerts) => {
                self.load_error = None;
                self.store.replace_all(concerts);
                self.notify_views();
            }
            Err(err) => {
                log::error!("feed load failed: {err:#}");
                let message = format!(
                    "Error loading data: {err:#}\n\n{}",
                    client::failure_guidance()
                );
                self.sink.load_failed(&message);
                self.load_error = Some(message);
            }
        }
    }

    // --- Filtering ---

    /// Applies criteria immediately, bypassing and cancelling any pending
    /// debounced change. Used for discrete inputs like date pickers.
    pub fn apply_criteria(&mut self, criteria: FilterCriteria) {
        self.debouncer.cancel();
        self.store.set_criteria(criteria);
        self.notify_views();
    }

    pub fn clear_filters(&mut self) {
        self.apply_criteria(FilterCriteria::default());
    }

    /// Queues criteria behind the debounce window. Call `settle_filters`
    /// (or `poll_filters` from a tick loop) to let them land.
    pub fn queue_criteria(&mut self, criteria: FilterCriteria) {
        self.debouncer.schedule(criteria);
    }

    /// Awaits the debounce deadline and applies whatever is pending.
    pub async fn settle_filters(&mut self) {
        let pending = self.debouncer.wait().await;
        if let Some(criteria) = pending {
            self.store.set_criteria(criteria);
            self.notify_views();
        }
    }

    /// Non-blocking variant for callers with their own tick source.
    pub fn poll_filters(&mut self, now: Instant) {
        if let Some(criteria) = self.debouncer.take_due(now) {
            self.store.set_criteria(criteria);
            self.notify_views();
        }
    }

    // --- My List ---

    pub fn add_to_my_list(&mut self, concert: &Concert) {
        match self.my_list.add(self.ctx.as_ref(), concert) {
            Ok(true) => self.notify_my_list(),
            Ok(false) => {}
            Err(err) => {
                // The in-memory list changed even though the write failed.
                log::warn!("could not persist my-list addition: {err:#}");
                self.notify_my_list();
            }
        }
    }

    pub fn remove_from_my_list(&mut self, concert: &Concert) {
        match self.my_list.remove(self.ctx.as_ref(), concert) {
            Ok(true) => self.notify_my_list(),
            Ok(false) => {}
            Err(err) => {
                log::warn!("could not persist my-list removal: {err:#}");
                self.notify_my_list();
            }
        }
    }

    /// Detail data for the modal collaborator.
    pub fn event_details(&self, concert: &Concert) -> EventDetails {
        EventDetails {
            concert: concert.clone(),
            in_my_list: self.my_list.contains(concert),
        }
    }

    // --- Ad-hoc export selection ---

    /// Checkbox semantics: selecting an already-selected event (by identity
    /// triple) deselects it.
    pub fn toggle_selection(&mut self, concert: &Concert) {
        let before = self.selection.len();
        self.selection.retain(|c| !c.same_event(concert));
        if self.selection.len() == before {
            self.selection.push(concert.clone());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The ad-hoc selection as a calendar document; `None` when nothing is
    /// selected.
    pub fn export_selection(&self) -> Option<String> {
        if self.selection.is_empty() {
            return None;
        }
        Some(crate::model::adapter::to_ics(&self.selection))
    }

    /// The persisted my-list as a calendar document; `None` when empty.
    pub fn export_my_list(&self) -> Option<String> {
        if self.my_list.is_empty() {
            return None;
        }
        Some(self.my_list.to_ics())
    }

    // --- Theme ---

    pub fn effective_theme(&self) -> Theme {
        self.config.effective_theme()
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.config.toggle_theme();
        self.persist_config();
        self.sink.theme_changed(theme);
        theme
    }

    pub fn reset_theme(&mut self) -> Theme {
        let theme = self.config.reset_theme();
        self.persist_config();
        self.sink.theme_changed(theme);
        theme
    }

    fn persist_config(&self) {
        if let Err(err) = self.config.save(self.ctx.as_ref()) {
            log::warn!("could not persist config: {err:#}");
        }
    }

    // --- View notification ---

    fn notify_views(&mut self) {
        self.sink.table_updated(self.store.filtered());
        let entries = calendar_entries(self.store.filtered());
        self.sink.calendar_updated(&entries);
    }

    fn notify_my_list(&mut self) {
        self.sink.my_list_updated(self.my_list.entries());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria_with_artist(artist: &str) -> FilterCriteria {
        FilterCriteria {
            artist: artist.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_debouncer_not_due_before_deadline() {
        let mut d = Debouncer::new(Duration::from_millis(100));
        let start = Instant::now();
        d.schedule(criteria_with_artist("a"));
        assert!(d.is_armed());
        assert_eq!(d.take_due(start), None);
        assert!(d.is_armed());
    }

    #[test]
    fn test_debouncer_coalesces_to_last_value() {
        let mut d = Debouncer::new(Duration::from_millis(100));
        d.schedule(criteria_with_artist("a"));
        d.schedule(criteria_with_artist("ab"));
        d.schedule(criteria_with_artist("abc"));

        let later = Instant::now() + Duration::from_secs(1);
        let due = d.take_due(later).unwrap();
        assert_eq!(due.artist, "abc");

        // Fired once; nothing left.
        assert_eq!(d.take_due(later), None);
        assert!(!d.is_armed());
    }

    #[test]
    fn test_debouncer_cancel() {
        let mut d = Debouncer::new(Duration::from_millis(100));
        d.schedule(criteria_with_artist("a"));
        d.cancel();
        let later = Instant::now() + Duration::from_secs(1);
        assert_eq!(d.take_due(later), None);
    }

    #[tokio::test]
    async fn test_debouncer_wait_returns_pending() {
        let mut d = Debouncer::new(Duration::from_millis(10));
        assert_eq!(d.wait().await, None);

        d.schedule(criteria_with_artist("x"));
        let got = d.wait().await.unwrap();
        assert_eq!(got.artist, "x");
        assert!(!d.is_armed());
    }
}
