//! Text rendering of list and article pages.

use crate::domain::{Article, EntryList};

pub const EMPTY_LIST: &str = "No unread entries.";

/// The current list page as numbered lines plus a footer.
///
/// Numbers are absolute indices into the list, which is what the user types
/// to open an entry.
pub fn list_page(list: &EntryList, page_size: usize) -> String {
    if list.is_empty() {
        return EMPTY_LIST.to_string();
    }

    let mut lines: Vec<String> = list
        .page_range(page_size)
        .map(|i| format!("{}. {}", i, list.entries[i].display_title()))
        .collect();
    lines.push(format!(
        "-- page {}/{} ({} unread, {} on server) --",
        list.position + 1,
        list.page_count(page_size),
        list.len(),
        list.total
    ));
    lines.join("\n")
}

/// The current article page. The first page carries the title and byline.
pub fn article_page(article: &Article, lines_per_page: usize) -> String {
    let mut lines = Vec::new();

    if article.position == 0 {
        lines.push(article.title.clone());
        if let Some(byline) = &article.byline {
            lines.push(byline.clone());
        }
        lines.push(String::new());
    }

    lines.extend(article.page_lines(lines_per_page).iter().cloned());
    lines.push(format!(
        "-- page {}/{} --",
        article.position + 1,
        article.page_count(lines_per_page)
    ));
    lines.join("\n")
}
