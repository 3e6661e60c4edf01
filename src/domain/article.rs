use crate::domain::page;
use crate::domain::{Entry, EntryId};

/// A rendered entry, paged by lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub entry_id: EntryId,
    pub title: String,
    pub url: String,
    pub byline: Option<String>,
    pub lines: Vec<String>,
    pub position: usize,
}

impl Article {
    /// Build an article from `entry` and its rendered plain text.
    ///
    /// Leading and trailing blank lines are dropped so the first page starts
    /// with content.
    pub fn new(entry: &Entry, text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let leading = lines.iter().take_while(|l| l.is_empty()).count();
        lines.drain(..leading);

        Self {
            entry_id: entry.id,
            title: entry.display_title().to_string(),
            url: entry.url.clone(),
            byline: entry.byline(),
            lines,
            position: 0,
        }
    }

    pub fn page_lines(&self, lines_per_page: usize) -> &[String] {
        &self.lines[page::page_range(self.position, lines_per_page, self.lines.len())]
    }

    pub fn page_count(&self, lines_per_page: usize) -> usize {
        page::page_count(lines_per_page, self.lines.len())
    }

    pub fn next_page(&mut self, lines_per_page: usize) -> bool {
        if page::has_next_page(self.position, lines_per_page, self.lines.len()) {
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
}
