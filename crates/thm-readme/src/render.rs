use crate::types::Room;

use chrono::Utc;

const EMPTY_NOTE: &str =
    "_No rooms found — check that the profile is public or that the endpoint changed._";

/// Renders the README body. Pure string construction: rooms are sorted
/// case-insensitively by title, the input order does not matter.
pub fn render_markdown(username: &str, rooms: &[Room]) -> String {
    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");

    let mut lines = vec![
        format!("# TryHackMe — Rooms completed by `{}`", username),
        String::new(),
        format!("_Last updated: {}_", now),
        String::new(),
        "## Rooms".to_string(),
        String::new(),
    ];

    if rooms.is_empty() {
        lines.push(EMPTY_NOTE.to_string());
    } else {
        let mut sorted: Vec<&Room> = rooms.iter().collect();
        sorted.sort_by_key(|r| r.title.to_lowercase());
        lines.extend(sorted.iter().map(|r| r.markdown_line()));
    }

    lines.extend([
        String::new(),
        "---".to_string(),
        "Generated automatically by `thm-readme`.".to_string(),
    ]);

    lines.join("\n")
}
