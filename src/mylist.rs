// File: ./src/mylist.rs
// The user's curated concert list, persisted across sessions.
use crate::context::AppContext;
use crate::model::adapter;
use crate::model::item::{Concert, sort_by_event_date};
use crate::storage::LocalStorage;
use anyhow::Result;

/// Insertion-ordered, identity-deduplicated selection of concerts. Every
/// mutation is written through to disk before it returns; loading never
/// fails (corrupt state degrades to an empty list in the storage layer).
///
/// Membership is keyed on the (artist, date, venue) triple, so re-adding the
/// same event with different auxiliary fields is a no-op and removing any
/// record with a matching triple removes the stored one.
#[derive(Debug, Default)]
pub struct MyList {
    entries: Vec<Concert>,
}

impl MyList {
    pub fn load(ctx: &dyn AppContext) -> Self {
        Self {
            entries: LocalStorage::load_my_list(ctx),
        }
    }

    /// Inserts unless an entry with the same identity triple exists.
    /// Returns whether anything changed.
    pub fn add(&mut self, ctx: &dyn AppContext, concert: &Concert) -> Result<bool> {
        if self.contains(concert) {
            return Ok(false);
        }
        self.entries.push(concert.clone());
        LocalStorage::save_my_list(ctx, &self.entries)?;
        Ok(true)
    }

    /// Removes every entry sharing the identity triple. Returns whether
    /// anything changed.
    pub fn remove(&mut self, ctx: &dyn AppContext, concert: &Concert) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.same_event(concert));
        if self.entries.len() == before {
            return Ok(false);
        }
        LocalStorage::save_my_list(ctx, &self.entries)?;
        Ok(true)
    }

    pub fn contains(&self, concert: &Concert) -> bool {
        self.entries.iter().any(|entry| entry.same_event(concert))
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Concert] {
        &self.entries
    }

    /// Entries ordered by event date, undated ones last, insertion order
    /// preserved among ties.
    pub fn sorted(&self) -> Vec<Concert> {
        let mut list = self.entries.clone();
        sort_by_event_date(&mut list);
        list
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The whole list as a calendar document. Undated entries are skipped by
    /// the encoder.
    pub fn to_ics(&self) -> String {
        adapter::to_ics(&self.entries)
    }
}
