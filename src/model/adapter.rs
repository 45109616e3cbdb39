// File: ./src/model/adapter.rs
// Serializes concert selections into a VCALENDAR interchange document.
use crate::model::item::Concert;
use chrono::{Duration, NaiveDate, Utc};
use icalendar::{Calendar, Component, Event, EventLike};

/// Exported events have no time information in the feed, so every event
/// starts at local midnight and runs for a nominal three hours.
const EVENT_DURATION_HOURS: i64 = 3;

/// Builds a single VCALENDAR document with one VEVENT per concert that has a
/// parseable date. Undated concerts are silently skipped: there is nothing a
/// calendar application could do with them.
///
/// The return value is the finished text blob; writing it somewhere is the
/// caller's concern.
pub fn to_ics(concerts: &[Concert]) -> String {
    let mut output = String::from(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Gigview//Event Calendar//EN\r\nCALSCALE:GREGORIAN\r\nMETHOD:PUBLISH\r\n",
    );

    for concert in concerts {
        let Some(date) = concert.parsed_date else {
            continue;
        };

        let full_ics = build_event(concert, date).to_string();
        // Extract the VEVENT block from the full VCALENDAR string generated
        // by the icalendar crate, which owns the text escaping rules.
        if let Some(start) = full_ics.find("BEGIN:VEVENT")
            && let Some(end_idx) = full_ics.rfind("END:VEVENT")
        {
            let vevent = &full_ics[start..end_idx + "END:VEVENT".len()];
            output.push_str(vevent);
            output.push_str("\r\n");
        }
    }

    output.push_str("END:VCALENDAR");
    output
}

fn build_event(concert: &Concert, date: NaiveDate) -> Calendar {
    // Midnight is a valid time on every calendar day.
    let starts = date.and_hms_opt(0, 0, 0).unwrap();
    let ends = starts + Duration::hours(EVENT_DURATION_HOURS);

    let summary = if concert.artist.is_empty() {
        "Event".to_string()
    } else {
        sanitize(&concert.artist)
    };

    let mut event = Event::new();
    event
        .uid(&event_uid())
        .summary(&summary)
        .starts(starts)
        .ends(ends)
        .timestamp(Utc::now());

    let description = build_description(concert);
    if !description.is_empty() {
        event.description(&description);
    }

    if !concert.venue.is_empty() {
        event.location(&sanitize(&concert.venue));
    }

    let mut calendar = Calendar::new();
    calendar.push(event.done());
    calendar
}

/// One logical line per populated auxiliary field. The icalendar crate turns
/// the embedded newlines into the escaped form on serialization.
fn build_description(concert: &Concert) -> String {
    let mut lines = Vec::new();
    if !concert.genre.is_empty() {
        lines.push(format!("Genre: {}", sanitize(&concert.genre)));
    }
    if !concert.venue.is_empty() {
        lines.push(format!("Venue: {}", sanitize(&concert.venue)));
    }
    if !concert.promoter.is_empty() {
        lines.push(format!("Promoter: {}", sanitize(&concert.promoter)));
    }
    if !concert.ticket_link.is_empty() {
        lines.push(format!("Tickets: {}", sanitize(&concert.ticket_link)));
    }
    if !concert.fb_link.is_empty() {
        lines.push(format!("Facebook: {}", sanitize(&concert.fb_link)));
    }
    lines.join("\n")
}

/// Carriage returns have no escaped form in the target format; strip them
/// instead. Everything else is escaped downstream.
fn sanitize(text: &str) -> String {
    text.replace('\r', "")
}

/// Unique enough for calendar imports: wall-clock millis plus a random
/// suffix. A collision would need two ids generated in the same millisecond
/// drawing the same 32 bit value, which we accept rather than track state.
fn event_uid() -> String {
    format!(
        "{}-{:08x}@gigview.org",
        Utc::now().timestamp_millis(),
        fastrand::u32(..)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_shape() {
        let uid = event_uid();
        assert!(uid.ends_with("@gigview.org"));
        let dash = uid.find('-').unwrap();
        assert!(uid[..dash].parse::<i64>().is_ok());
    }

    #[test]
    fn test_description_lines_only_for_populated_fields() {
        let mut c = Concert::new("1.11.2025", "Foo");
        c.genre = "Punk".to_string();
        c.ticket_link = "https://tix.example".to_string();
        let desc = build_description(&c);
        assert_eq!(desc, "Genre: Punk\nTickets: https://tix.example");
    }

    #[test]
    fn test_sanitize_strips_carriage_returns() {
        assert_eq!(sanitize("a\r\nb\r"), "a\nb");
    }
}
