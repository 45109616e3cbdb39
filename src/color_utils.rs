//gigview/src/color_utils.rs

// Genre color mapping for the table and calendar collaborators.
// This file intentionally has NO dependencies on any GUI crate so it can be
// used from non-GUI code (CLI, core logic, tests, etc).

/// Maps a genre string onto the muted underground palette. Matching is by
/// lowercase keyword, first bucket wins; anything unknown falls back to the
/// primary firebrick.
pub fn genre_color(genre: &str) -> &'static str {
    if genre.is_empty() {
        return "#B22222";
    }

    let genre = genre.to_lowercase();

    // Post-punk must be checked before punk or it would land in the punk
    // bucket.
    if genre.contains("post-punk") || genre.contains("postpunk") || genre.contains("post punk") {
        "#3A0062" // Muted Indigo
    } else if genre.contains("punk") || genre.contains("hardcore") || genre.contains("oi!") {
        "#556B2F" // Muted Olive Green
    } else if genre.contains("metal") || genre.contains("death") || genre.contains("thrash") {
        "#6B0000" // Muted Dark Red
    } else if genre.contains("jazz") || genre.contains("blues") {
        "#8B6914" // Muted Dark Goldenrod
    } else if genre.contains("noise")
        || genre.contains("experimental")
        || genre.contains("ambient")
        || genre.contains("avant-garde")
    {
        "#5A5A5A" // Muted Slate Gray
    } else if genre.contains("indie")
        || genre.contains("alternative")
        || genre.contains("folk")
        || genre.contains("acoustic")
        || genre.contains("dream pop")
    {
        "#366894" // Muted Steel Blue
    } else if genre.contains("electronic") || genre.contains("synth") || genre.contains("techno") {
        "#006B6B" // Muted Dark Cyan
    } else {
        "#B22222" // Firebrick (primary)
    }
}

/// Picks black or white text for the given background color.
pub fn contrast_color(hex: &str) -> &'static str {
    let Some((r, g, b)) = parse_hex_to_u8(hex) else {
        return "#FFFFFF";
    };
    // Perceptual luminance approximation
    let luminance = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0;
    if luminance > 0.5 { "#000000" } else { "#FFFFFF" }
}

/// Parse a hex color string like "#RRGGBB" or "RRGGBB" into u8 tuple.
pub fn parse_hex_to_u8(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() < 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_punk_wins_over_punk() {
        assert_eq!(genre_color("Post-Punk"), "#3A0062");
        assert_eq!(genre_color("Punk Rock"), "#556B2F");
    }

    #[test]
    fn test_unknown_and_empty_fall_back_to_primary() {
        assert_eq!(genre_color(""), "#B22222");
        assert_eq!(genre_color("Polka"), "#B22222");
    }

    #[test]
    fn test_contrast_color() {
        assert_eq!(contrast_color("#FFFFFF"), "#000000");
        assert_eq!(contrast_color("#000000"), "#FFFFFF");
        assert_eq!(contrast_color("#6B0000"), "#FFFFFF");
        assert_eq!(contrast_color("not-a-color"), "#FFFFFF");
    }
}
