// Calendar export structure, exclusion rules and escaping.
use gigview::model::Concert;
use gigview::model::adapter::to_ics;

fn dated_concert() -> Concert {
    let mut c = Concert::new("1. 11. 2025", "The Cramps");
    c.genre = "Punk".to_string();
    c.venue = "Klub 007".to_string();
    c
}

#[test]
fn test_undated_records_are_excluded() {
    let undated = Concert::new("TBA", "Mystery Act");
    assert_eq!(undated.parsed_date, None);

    let ics = to_ics(&[dated_concert(), undated]);
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
    assert_eq!(ics.matches("END:VEVENT").count(), 1);
    assert!(ics.contains("The Cramps"));
    assert!(!ics.contains("Mystery Act"));
}

#[test]
fn test_document_structure() {
    let ics = to_ics(&[dated_concert()]);
    assert!(ics.starts_with("BEGIN:VCALENDAR"));
    assert!(ics.ends_with("END:VCALENDAR"));
    assert!(ics.contains("VERSION:2.0"));
    assert!(ics.contains("PRODID:-//Gigview//Event Calendar//EN"));
    assert!(ics.contains("METHOD:PUBLISH"));
    assert!(ics.contains("UID:"));
    assert!(ics.contains("@gigview.org"));
}

#[test]
fn test_event_spans_three_hours_from_local_midnight() {
    let ics = to_ics(&[dated_concert()]);
    assert!(ics.contains("DTSTART:20251101T000000"));
    assert!(ics.contains("DTEND:20251101T030000"));
}

#[test]
fn test_description_lists_populated_fields() {
    let mut c = dated_concert();
    c.ticket_link = "https://tix.example/1".to_string();
    let ics = to_ics(&[c]);
    // Newlines between logical description lines are escaped on write.
    assert!(ics.contains("DESCRIPTION:Genre: Punk\\nVenue: Klub 007"));
    assert!(ics.contains("LOCATION:Klub 007"));
}

#[test]
fn test_no_description_when_no_auxiliary_fields() {
    let c = Concert::new("1. 11. 2025", "Solo");
    let ics = to_ics(&[c]);
    assert!(!ics.contains("DESCRIPTION"));
    assert!(!ics.contains("LOCATION"));
}

#[test]
fn test_special_characters_are_escaped() {
    let mut c = Concert::new("1. 11. 2025", "Foo; Bar");
    c.venue = "Cafe, Praha".to_string();
    let ics = to_ics(&[c]);
    assert!(ics.contains("SUMMARY:Foo\\; Bar"));
    assert!(ics.contains("LOCATION:Cafe\\, Praha"));
}

#[test]
fn test_empty_artist_gets_placeholder_summary() {
    let c = Concert::new("1. 11. 2025", "");
    let ics = to_ics(&[c]);
    assert!(ics.contains("SUMMARY:Event"));
}

#[test]
fn test_empty_selection_yields_empty_calendar() {
    let ics = to_ics(&[]);
    assert!(ics.contains("BEGIN:VCALENDAR"));
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 0);
}

#[test]
fn test_uids_are_unique_per_event() {
    let ics = to_ics(&[dated_concert(), {
        let mut c = Concert::new("2. 11. 2025", "Other");
        c.venue = "Elsewhere".to_string();
        c
    }]);
    let uids: Vec<&str> = ics
        .lines()
        .filter(|l| l.starts_with("UID:"))
        .map(|l| l.trim())
        .collect();
    assert_eq!(uids.len(), 2);
    assert_ne!(uids[0], uids[1]);
}
