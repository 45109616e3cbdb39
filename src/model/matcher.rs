// Logic for checking which concerts match the active filter criteria.
//
// All constraints are optional and independent; whatever is present combines
// with AND. Text constraints are case-insensitive substring matches against
// a single field each. The date range is checked at day granularity with
// inclusive bounds, so an upper bound behaves as "through the end of that
// day". Records whose date never parsed fail the range check as soon as
// either bound is set, but pass when no date bound is active.
use crate::model::item::Concert;
use chrono::NaiveDate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub artist: String,
    pub genre: String,
    pub venue: String,
    pub promoter: String,
}

impl FilterCriteria {
    /// True when no constraint is active; `apply` is the identity then.
    pub fn is_empty(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && self.artist.is_empty()
            && self.genre.is_empty()
            && self.venue.is_empty()
            && self.promoter.is_empty()
    }

    /// Filters the full set down to the matching subset.
    ///
    /// Pure and deterministic: the output preserves the relative order of
    /// the input and the same input always produces the same output. The
    /// result is a fresh vec; the store recomputes it wholesale on every
    /// criteria change instead of patching.
    pub fn apply(&self, all: &[Concert]) -> Vec<Concert> {
        all.iter().filter(|c| self.matches(c)).cloned().collect()
    }

    pub fn matches(&self, concert: &Concert) -> bool {
        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(date) = concert.parsed_date else {
                return false;
            };
            if let Some(from) = self.date_from
                && date < from
            {
                return false;
            }
            if let Some(to) = self.date_to
                && date > to
            {
                return false;
            }
        }

        contains_ci(&concert.artist, &self.artist)
            && contains_ci(&concert.genre, &self.genre)
            && contains_ci(&concert.venue, &self.venue)
            && contains_ci(&concert.promoter, &self.promoter)
    }
}

/// An empty needle never restricts; an empty haystack fails any non-empty
/// needle.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
