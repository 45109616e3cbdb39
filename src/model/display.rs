// File: ./src/model/display.rs
// Derived projections handed to the rendering collaborators.
use crate::color_utils::{contrast_color, genre_color};
use crate::model::item::Concert;
use chrono::NaiveDate;

/// What the calendar-grid collaborator needs for one event cell. Built from
/// a record, never the other way around; the `concert` field carries the
/// reconstructed record for detail views (modals) so the collaborator never
/// reaches back into the store.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub title: String,
    pub day: NaiveDate,
    pub color: &'static str,
    pub text_color: &'static str,
    pub concert: Concert,
}

/// Projects the visible record set onto calendar entries. Undated records
/// cannot be placed on a grid and are left out.
pub fn calendar_entries(concerts: &[Concert]) -> Vec<CalendarEntry> {
    concerts
        .iter()
        .filter_map(|concert| {
            let day = concert.parsed_date?;
            let color = genre_color(&concert.genre);
            Some(CalendarEntry {
                title: concert.title().to_string(),
                day,
                color,
                text_color: contrast_color(color),
                concert: concert.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undated_records_are_excluded() {
        let dated = Concert::new("1.11.2025", "Dated");
        let undated = Concert::new("TBA", "Undated");
        let entries = calendar_entries(&[dated, undated]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Dated");
        assert_eq!(entries[0].day, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
    }

    #[test]
    fn test_entry_carries_genre_color() {
        let mut c = Concert::new("1.11.2025", "Foo");
        c.genre = "Punk".to_string();
        let entries = calendar_entries(&[c]);
        assert_eq!(entries[0].color, genre_color("Punk"));
    }
}
