use std::collections::HashSet;

use crate::types::Room;

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn room_link(slug: &str) -> String {
    format!("{}/room/{}", crate::BASE_URL, slug)
}

fn str_field<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| item.get(k).and_then(Value::as_str))
}

/// Normalizes the completed-rooms API payload. The endpoint has returned both
/// a bare array and an object wrapping the array under varying keys, and the
/// item fields have been renamed more than once, hence the fallback chains.
/// Unrecognized shapes normalize to an empty list rather than an error.
pub fn rooms_from_json(data: &Value) -> Vec<Room> {
    let empty = Vec::new();
    let items = match data {
        Value::Array(items) => items,
        Value::Object(map) => ["rooms", "data", "completedRooms"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_array))
            .unwrap_or(&empty),
        _ => &empty,
    };

    items
        .iter()
        .map(|item| {
            let title = str_field(item, &["title", "name", "room_title"])
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or("Unknown");
            let code = str_field(item, &["code", "roomCode", "slug"]).unwrap_or("");
            let date = str_field(item, &["date_completed", "completedDate", "date"])
                .filter(|d| !d.is_empty())
                .map(str::to_string);

            Room {
                title: title.to_string(),
                link: room_link(code),
                date_completed: date,
            }
        })
        .collect()
}

/// Scans a profile page for room anchors. Any `<a>` whose path starts with
/// `/room/` counts; the visible text is the title, falling back to the slug
/// when the anchor wraps only an image or badge. Duplicate links (the page
/// repeats rooms across sections) are collapsed, first occurrence wins.
pub fn parse_profile_rooms(html: &str) -> Vec<Room> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a").unwrap();

    let mut seen = HashSet::new();
    let mut rooms = Vec::new();

    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let path = href.strip_prefix(crate::BASE_URL).unwrap_or(href);
        let Some(rest) = path.strip_prefix("/room/") else {
            continue;
        };
        let Some(slug) = rest.split(['/', '?', '#']).next().filter(|s| !s.is_empty()) else {
            continue;
        };

        let link = room_link(slug);
        if !seen.insert(link.clone()) {
            continue;
        }

        let text = normalize_whitespace(&elem_text(element));
        let title = if text.is_empty() {
            slug.to_string()
        } else {
            text
        };

        rooms.push(Room {
            title,
            link,
            date_completed: None,
        });
    }

    rooms
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rooms_from_json_array() {
        let data = json!([
            {"title": "Blue", "code": "blue", "date_completed": "2023-05-01T10:00:00Z"},
            {"title": "Vulnversity", "code": "vulnversity"},
        ]);

        let rooms = rooms_from_json(&data);

        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].title, "Blue");
        assert_eq!(rooms[0].link, "https://tryhackme.com/room/blue");
        assert_eq!(
            rooms[0].date_completed.as_deref(),
            Some("2023-05-01T10:00:00Z")
        );
        assert_eq!(rooms[1].link, "https://tryhackme.com/room/vulnversity");
        assert!(rooms[1].date_completed.is_none());
    }

    #[test]
    fn test_rooms_from_json_fallback_fields() {
        let data = json!([
            {"name": "Pickle Rick", "roomCode": "picklerick", "completedDate": "2022-11-03"},
            {"room_title": "Kenobi", "slug": "kenobi", "date": "2022-12-24T08:15:00Z"},
        ]);

        let rooms = rooms_from_json(&data);

        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].title, "Pickle Rick");
        assert_eq!(rooms[0].link, "https://tryhackme.com/room/picklerick");
        assert_eq!(rooms[0].date_completed.as_deref(), Some("2022-11-03"));
        assert_eq!(rooms[1].title, "Kenobi");
        assert_eq!(rooms[1].link, "https://tryhackme.com/room/kenobi");
    }

    #[test]
    fn test_rooms_from_json_wrapped_object() {
        for key in ["rooms", "data", "completedRooms"] {
            let data = json!({key: [{"title": "Nmap", "code": "furthernmap"}]});
            let rooms = rooms_from_json(&data);
            assert_eq!(rooms.len(), 1, "key '{}' should hold the list", key);
            assert_eq!(rooms[0].link, "https://tryhackme.com/room/furthernmap");
        }
    }

    #[test]
    fn test_rooms_from_json_unrecognized_shapes() {
        assert!(rooms_from_json(&json!("nope")).is_empty());
        assert!(rooms_from_json(&json!(42)).is_empty());
        assert!(rooms_from_json(&json!({"unexpected": []})).is_empty());
        assert!(rooms_from_json(&json!(null)).is_empty());
    }

    #[test]
    fn test_rooms_from_json_title_placeholder_and_trim() {
        let data = json!([
            {"code": "mystery"},
            {"title": "   ", "code": "blank"},
            {"title": "  Padded  ", "code": "padded"},
        ]);

        let rooms = rooms_from_json(&data);

        assert_eq!(rooms[0].title, "Unknown");
        assert_eq!(rooms[1].title, "Unknown");
        assert_eq!(rooms[2].title, "Padded");
    }

    #[test]
    fn test_parse_profile_rooms_dedups_by_link() {
        let html = r#"
            <div class="profile">
                <a href="/room/blue">Blue</a>
                <a href="/room/kenobi">Kenobi</a>
                <a href="/room/blue">Blue (badge)</a>
                <a href="https://tryhackme.com/room/kenobi">Kenobi again</a>
            </div>
        "#;

        let rooms = parse_profile_rooms(html);

        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].title, "Blue");
        assert_eq!(rooms[0].link, "https://tryhackme.com/room/blue");
        assert_eq!(rooms[1].title, "Kenobi");
    }

    #[test]
    fn test_parse_profile_rooms_slug_fallback_title() {
        let html = r#"<a href="/room/picklerick"><img src="/badge.png"></a>"#;

        let rooms = parse_profile_rooms(html);

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].title, "picklerick");
        assert_eq!(rooms[0].link, "https://tryhackme.com/room/picklerick");
    }

    #[test]
    fn test_parse_profile_rooms_ignores_other_anchors() {
        let html = r#"
            <a href="/">Home</a>
            <a href="/p/someone">Profile</a>
            <a href="/room/">empty slug</a>
            <a href="https://example.com/room/external">elsewhere</a>
            <a href="/room/blue?badge=1#top">Blue</a>
        "#;

        let rooms = parse_profile_rooms(html);

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].link, "https://tryhackme.com/room/blue");
    }

    #[test]
    fn test_parse_profile_rooms_no_matches() {
        let rooms = parse_profile_rooms("<html><body><p>Nothing here</p></body></html>");
        assert!(rooms.is_empty());
    }

    #[test]
    fn test_parse_profile_rooms_whitespace_normalized_title() {
        let html = "<a href=\"/room/blue\">\n    Blue\n    Team\n</a>";

        let rooms = parse_profile_rooms(html);

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].title, "Blue Team");
    }
}
