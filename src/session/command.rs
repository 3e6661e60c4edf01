//! Input lines parsed into per-mode commands.

/// Commands understood while browsing the entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    /// Open the entry at an absolute index; `None` opens the first entry
    /// of the current page.
    Open(Option<i64>),
    Refresh,
    List,
    Next,
    Prev,
    Help,
    Quit,
    Unknown(String),
}

impl ListCommand {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return ListCommand::Open(None);
        }
        if let Ok(index) = input.parse::<i64>() {
            return ListCommand::Open(Some(index));
        }

        match input.to_ascii_lowercase().as_str() {
            "r" | "refresh" => ListCommand::Refresh,
            "l" | "list" => ListCommand::List,
            "n" | "next" => ListCommand::Next,
            "p" | "prev" | "previous" => ListCommand::Prev,
            "h" | "help" | "?" => ListCommand::Help,
            "q" | "quit" | "exit" => ListCommand::Quit,
            _ => ListCommand::Unknown(input.to_string()),
        }
    }
}

/// Commands understood while an article is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadCommand {
    Continue,
    Prev,
    Quit,
    OpenInBrowser,
    Help,
    Unknown(String),
}

impl ReadCommand {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "" | "c" | "continue" | "n" | "next" => ReadCommand::Continue,
            "p" | "prev" | "previous" => ReadCommand::Prev,
            "q" | "quit" => ReadCommand::Quit,
            "o" | "open" => ReadCommand::OpenInBrowser,
            "h" | "help" | "?" => ReadCommand::Help,
            other => ReadCommand::Unknown(other.to_string()),
        }
    }
}

pub const LIST_HELP: &str = "\
<number>\tRead the entry with that number
<enter>\tRead the first entry on this page
list\tList unread entries on this page
next\tSwitch to next page
prev\tSwitch to previous page
refresh\tFetch the unread list again
help\tShow this help
quit\tQuit radiation";

pub const READ_HELP: &str = "\
<enter>\tShow the next page of the article
next\tShow the next page of the article
prev\tShow the previous page of the article
open\tOpen the article in a browser
quit\tStop reading and return to the list
help\tShow this help";
