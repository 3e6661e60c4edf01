use std::path::Path;

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::domain::{Article, EntryId, EntryList};

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => Config::default_config_path()?,
    };

    Config::write_template(&path)?;
    println!("Wrote config template to {}", path.display());
    println!("Fill in token and server_url, then run `radiation`.");
    Ok(())
}

pub async fn list_entries(ctx: &AppContext) -> Result<()> {
    let list = ctx.store.fetch_unread().await?;
    println!("{}", format_listing(&list));
    Ok(())
}

/// Print one entry. Unlike opening it in a session, this does not mark it read.
pub async fn show_entry(ctx: &AppContext, id: EntryId) -> Result<()> {
    let entry = ctx.store.fetch_entry(id).await?;
    let text = match ctx.renderer.render(&entry.content) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Rendering entry {} failed: {}", id, e);
            e.to_string()
        }
    };

    println!("{}", format_article(&Article::new(&entry, &text)));
    Ok(())
}

fn format_listing(list: &EntryList) -> String {
    if list.is_empty() {
        return "No unread entries".to_string();
    }

    let mut lines: Vec<String> = list
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| format!("{:>4}. [{}] {}", index, entry.id, entry.display_title()))
        .collect();
    lines.push(format!("{} unread ({} on server)", list.len(), list.total));
    lines.join("\n")
}

fn format_article(article: &Article) -> String {
    let mut lines = vec![article.title.clone()];
    if let Some(byline) = &article.byline {
        lines.push(byline.clone());
    }
    if !article.url.is_empty() {
        lines.push(article.url.clone());
    }
    lines.push(String::new());
    lines.extend(article.lines.iter().cloned());
    lines.join("\n")
}
