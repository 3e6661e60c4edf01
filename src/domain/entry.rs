use std::ops::Range;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::page;

pub type EntryId = i64;

/// One unread article as the server describes it.
///
/// The server's field names are matched case-insensitively for the fields we
/// read, and `null` strings decode as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(alias = "Id")]
    pub id: EntryId,
    #[serde(default, alias = "Title", deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, alias = "Url", deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, alias = "Content", deserialize_with = "nullable")]
    pub content: String,
    #[serde(default, alias = "Author", deserialize_with = "nullable")]
    pub author: String,
    #[serde(default, alias = "Published_at")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn new(id: EntryId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: String::new(),
            content: String::new(),
            author: String::new(),
            published_at: None,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// Author and publication time, when the server sent either.
    pub fn byline(&self) -> Option<String> {
        let date = self
            .published_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string());
        match (self.author.trim(), date) {
            ("", None) => None,
            ("", Some(date)) => Some(date),
            (author, None) => Some(author.to_string()),
            (author, Some(date)) => Some(format!("{} - {}", author, date)),
        }
    }
}

/// The session's working set of unread entries.
///
/// `entries` shrinks as entries are opened; `total` is whatever the server
/// reported at fetch time and is never adjusted locally.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EntryList {
    #[serde(default, alias = "Total")]
    pub total: i64,
    #[serde(default, alias = "Entries", deserialize_with = "nullable")]
    pub entries: Vec<Entry>,
    #[serde(skip)]
    pub position: usize,
}

impl EntryList {
    pub fn new(total: i64, entries: Vec<Entry>) -> Self {
        Self {
            total,
            entries,
            position: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn page_range(&self, page_size: usize) -> Range<usize> {
        page::page_range(self.position, page_size, self.len())
    }

    /// Absolute index of the first entry on the current page.
    pub fn first_on_page(&self, page_size: usize) -> usize {
        self.position * page_size
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        page::page_count(page_size, self.len())
    }

    pub fn next_page(&mut self, page_size: usize) -> bool {
        if page::has_next_page(self.position, page_size, self.len()) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    /// Remove the entry at `index` and keep `position` on a valid page.
    ///
    /// Returns `None` without touching the list when `index` is out of range.
    pub fn take(&mut self, index: usize, page_size: usize) -> Option<Entry> {
        if index >= self.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        self.position = page::settle(self.position, page_size, self.len());
        Some(entry)
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
