use html_escape::decode_html_entities;

use crate::app::Result;
use crate::render::Renderer;

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "ul", "ol", "table",
    "tr", "section", "article", "header", "footer", "figure", "figcaption", "dl", "dt", "dd",
];

/// A small in-process HTML to text converter.
///
/// Block elements become paragraphs separated by blank lines, list items get
/// a `* ` bullet, `<pre>` keeps its layout, scripts and styles are dropped
/// and everything else is wrapped to `width` columns.
pub struct BuiltinRenderer {
    width: usize,
}

impl BuiltinRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }
}

impl Renderer for BuiltinRenderer {
    fn render(&self, markup: &str) -> Result<String> {
        let mut out = TextBuilder::new(self.width);
        let mut rest = markup;

        while let Some(lt) = rest.find('<') {
            out.push_text(&rest[..lt]);
            let after = &rest[lt + 1..];

            if let Some(comment) = after.strip_prefix("!--") {
                rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
                continue;
            }

            let Some(gt) = after.find('>') else {
                out.push_text(&rest[lt..]);
                rest = "";
                break;
            };

            let (closing, name) = tag_name(&after[..gt]);
            rest = &after[gt + 1..];

            if !closing && (name == "script" || name == "style") {
                let close = format!("</{}", name);
                rest = rest
                    .to_ascii_lowercase()
                    .find(&close)
                    .map_or("", |i| &rest[i..]);
                continue;
            }

            out.tag(&name, closing);
        }
        out.push_text(rest);

        Ok(out.finish())
    }
}

fn tag_name(tag: &str) -> (bool, String) {
    let tag = tag.trim();
    let (closing, body) = match tag.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, tag),
    };
    let name = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    (closing, name)
}

struct TextBuilder {
    width: usize,
    lines: Vec<String>,
    paragraph: String,
    bullet: bool,
    preformatted: bool,
}

impl TextBuilder {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            paragraph: String::new(),
            bullet: false,
            preformatted: false,
        }
    }

    fn push_text(&mut self, raw: &str) {
        self.paragraph.push_str(&decode_html_entities(raw));
    }

    fn tag(&mut self, name: &str, closing: bool) {
        match name {
            "br" => self.flush(false),
            "li" => {
                self.flush(false);
                self.bullet = !closing;
            }
            "hr" => {
                self.flush(true);
                self.lines.push("-".repeat(self.width.min(40)));
                self.lines.push(String::new());
            }
            "pre" => {
                self.flush(true);
                self.preformatted = !closing;
            }
            _ if BLOCK_TAGS.contains(&name) => self.flush(true),
            _ => {}
        }
    }

    fn flush(&mut self, blank_after: bool) {
        let text = std::mem::take(&mut self.paragraph);

        if self.preformatted {
            let text = text.trim_matches('\n');
            self.lines
                .extend(text.lines().map(|l| l.trim_end().to_string()));
        } else {
            let prefix = if self.bullet { "* " } else { "" };
            let words: Vec<&str> = text.split_whitespace().collect();
            if !words.is_empty() {
                self.wrap(&words, prefix);
                self.bullet = false;
            }
        }

        if blank_after && self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn wrap(&mut self, words: &[&str], prefix: &str) {
        let indent = " ".repeat(prefix.len());
        let mut line = prefix.to_string();
        let mut line_len = prefix.len();
        let mut empty = true;

        for word in words {
            let word_len = word.chars().count();
            if !empty && line_len + 1 + word_len > self.width {
                self.lines.push(std::mem::replace(&mut line, indent.clone()));
                line_len = indent.len();
                empty = true;
            }
            if !empty {
                line.push(' ');
                line_len += 1;
            }
            line.push_str(word);
            line_len += word_len;
            empty = false;
        }

        if !empty {
            self.lines.push(line);
        }
    }

    fn finish(mut self) -> String {
        self.flush(false);
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        self.lines.join("\n")
    }
}
