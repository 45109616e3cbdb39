// File: ./src/model/parser.rs
// Turns the raw delimited feed text into validated concert records.
//
// The feed is a spreadsheet CSV export using a simple dialect: fields are
// comma separated and a double quote toggles an in-field state in which
// commas are literal. There is no doubled-quote escape; quote characters are
// consumed by the toggle and never appear in field values.
use crate::model::dates::parse_event_date;
use crate::model::item::Concert;

/// Parses the whole feed. Pure transform, never fails: malformed rows are
/// dropped silently and anything short of a header plus one data row yields
/// an empty vec.
///
/// Columns are positional: date, artist, genre, venue, promoter, ticket
/// link, facebook link. The header row is not interpreted by name; its cell
/// count only serves as a minimum field threshold so truncated trailing rows
/// get skipped instead of shifting columns.
pub fn parse_feed(text: &str) -> Vec<Concert> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let min_fields = split_line(lines[0]).len();

    let mut concerts = Vec::new();
    for line in &lines[1..] {
        let values = split_line(line);
        if values.len() < min_fields {
            continue;
        }

        let field = |idx: usize| -> String {
            values
                .get(idx)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        let date = field(0);
        let artist = field(1);

        // Rows missing either required column are not events.
        if date.is_empty() || artist.is_empty() {
            continue;
        }

        let parsed_date = parse_event_date(&date);
        concerts.push(Concert {
            date,
            artist,
            genre: field(2),
            venue: field(3),
            promoter: field(4),
            ticket_link: field(5),
            fb_link: field(6),
            parsed_date,
        });
    }

    concerts
}

/// Splits one CSV line into fields, honoring the quote toggle.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}
