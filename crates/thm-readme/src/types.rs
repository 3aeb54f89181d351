use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A completed room on a user's profile. `link` always points at the
/// canonical room page; `date_completed` keeps whatever ISO-ish string the
/// source provided, truncated to the day when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub title: String,
    pub link: String,
    pub date_completed: Option<String>,
}

impl Room {
    /// Markdown list item: `- [title](link)`, with a ` — YYYY-MM-DD` suffix
    /// when a completion date is known.
    pub fn markdown_line(&self) -> String {
        match self.date_completed.as_deref() {
            Some(date) => {
                let day: String = date.chars().take(10).collect();
                format!("- [{}]({}) — {}", self.title, self.link, day)
            }
            None => format!("- [{}]({})", self.title, self.link),
        }
    }
}

impl Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} — {}", self.title, self.link)?;
        if let Some(date) = &self.date_completed {
            write!(f, " ({})", date)?;
        }
        Ok(())
    }
}
