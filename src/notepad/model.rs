use crate::error::{NotepadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Content of page 1 in a fresh notepad.
pub const FIRST_PAGE_CONTENT: &str = "<p>Start typing your notes here...</p>";
/// Content of every page created after the first.
pub const NEW_PAGE_CONTENT: &str = "<p>New page content. Start typing here...</p>";
/// Content substituted for a loaded page whose saved content is empty.
pub const LOADED_PAGE_CONTENT: &str = "<p>Page content</p>";
/// Content left behind by clearing a page.
pub const CLEARED_CONTENT: &str = "<p></p>";
/// Longest page name a rename keeps, in characters.
pub const MAX_NAME_CHARS: usize = 20;

/// Stable page identifier. Positive, allocated in increasing order, never reused
/// within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u32);

impl PageId {
    pub const FIRST: PageId = PageId(1);

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageId {
    type Err = NotepadError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<u32>() {
            Ok(0) | Err(_) => Err(NotepadError::Api(format!("Invalid page id: {}", s))),
            Ok(n) => Ok(PageId(n)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: String,
}

impl Page {
    pub fn new(id: PageId, content: impl Into<String>) -> Self {
        Self {
            id,
            name: default_page_name(id),
            content: content.into(),
        }
    }
}

/// Exactly one page is `Active` at any time: the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageStatus {
    Active,
    Inactive,
}

/// The form the notepad takes in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    pub pages: BTreeMap<PageId, Page>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<PageId>,
}

pub fn default_page_name(id: PageId) -> String {
    format!("Page {}", id)
}

/// Trims a user-entered name, falls back to the default name when nothing is left,
/// and keeps at most [`MAX_NAME_CHARS`] characters.
pub fn normalize_page_name(id: PageId, raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default_page_name(id);
    }
    trimmed.chars().take(MAX_NAME_CHARS).collect::<String>().trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_fall_back_to_default() {
        assert_eq!(normalize_page_name(PageId(4), ""), "Page 4");
        assert_eq!(normalize_page_name(PageId(4), "   "), "Page 4");
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "A".repeat(30);
        let name = normalize_page_name(PageId(2), &long);
        assert_eq!(name, "A".repeat(20));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let name = normalize_page_name(PageId(2), &"é".repeat(25));
        assert_eq!(name.chars().count(), 20);
    }

    #[test]
    fn names_are_trimmed() {
        assert_eq!(normalize_page_name(PageId(1), "  Groceries \n"), "Groceries");
    }

    #[test]
    fn page_id_parsing() {
        assert_eq!("7".parse::<PageId>().unwrap(), PageId(7));
        assert!("0".parse::<PageId>().is_err());
        assert!("p1".parse::<PageId>().is_err());
    }

    #[test]
    fn saved_state_uses_string_keys_and_camel_case() {
        let mut pages = BTreeMap::new();
        pages.insert(PageId(2), Page::new(PageId(2), "<p>y</p>"));
        let state = SavedState {
            pages,
            total_pages: 2,
            current_page: Some(PageId(2)),
        };

        let json: serde_json::Value = serde_json::to_value(&state).unwrap();
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["pages"]["2"]["name"], "Page 2");
        assert_eq!(json["pages"]["2"]["id"], 2);
    }

    #[test]
    fn saved_state_tolerates_missing_counters() {
        let raw = r#"{"pages":{"1":{"id":1,"name":"A","content":"<p>x</p>"}}}"#;
        let state: SavedState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.total_pages, 0);
        assert_eq!(state.current_page, None);
        assert_eq!(state.pages[&PageId(1)].name, "A");
    }
}
