// File: ./src/model/item.rs
use crate::model::dates::parse_event_date;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One concert listing as it appears in the feed.
///
/// `date` keeps the original display string from the spreadsheet; the
/// comparable form lives in `parsed_date` and is computed exactly once at
/// ingestion. Records are never mutated after that point: display helpers
/// build new values instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concert {
    pub date: String,
    pub artist: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub promoter: String,
    #[serde(default)]
    pub ticket_link: String,
    #[serde(default)]
    pub fb_link: String,
    #[serde(default)]
    pub parsed_date: Option<NaiveDate>,
}

// Facebook event URLs come in several shapes; all of them carry the numeric
// event id somewhere after "events/" or in an "event_id" query parameter.
static FB_EVENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"facebook\.com/events/(\d+)",
        r"fb\.com/events/(\d+)",
        r"event_id=(\d+)",
        r"/events/(\d+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid fb event regex"))
    .collect()
});

impl Concert {
    /// Builds a record from the two required fields, deriving `parsed_date`.
    /// Mostly useful in tests; the feed parser constructs records directly.
    pub fn new(date: &str, artist: &str) -> Self {
        Self {
            date: date.to_string(),
            artist: artist.to_string(),
            parsed_date: parse_event_date(date),
            ..Self::default()
        }
    }

    pub fn title(&self) -> &str {
        if self.artist.is_empty() {
            "Untitled Event"
        } else {
            &self.artist
        }
    }

    /// Membership identity: two listings naming the same artist on the same
    /// display date at the same venue are the same event, whatever the other
    /// columns say.
    pub fn same_event(&self, other: &Concert) -> bool {
        self.artist == other.artist && self.date == other.date && self.venue == other.venue
    }

    /// Orders by parsed date ascending; records without a parseable date go
    /// after all dated ones and compare equal among themselves, so a stable
    /// sort keeps their insertion order.
    pub fn date_cmp(&self, other: &Concert) -> Ordering {
        match (self.parsed_date, other.parsed_date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        }
    }

    /// True when the ticket column holds an actual link rather than a
    /// placeholder.
    pub fn has_ticket_link(&self) -> bool {
        !self.ticket_link.is_empty() && self.ticket_link != "N/A"
    }

    /// True when the Facebook column holds a real link. Sheet templates leave
    /// "xxxxxxxx" stubs behind, which are treated as absent.
    pub fn has_fb_link(&self) -> bool {
        !self.fb_link.is_empty() && self.fb_link != "N/A" && !self.fb_link.contains("xxxxxxxx")
    }

    /// Extracts the numeric Facebook event id from `fb_link`, if any.
    pub fn facebook_event_id(&self) -> Option<String> {
        if !self.has_fb_link() {
            return None;
        }
        for pattern in FB_EVENT_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(&self.fb_link)
                && let Some(id) = caps.get(1)
            {
                return Some(id.as_str().to_string());
            }
        }
        None
    }
}

/// Stable sort by event date, undated entries last.
pub fn sort_by_event_date(list: &mut [Concert]) {
    list.sort_by(|a, b| a.date_cmp(b));
}
