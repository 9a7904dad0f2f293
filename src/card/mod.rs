//! Printable recipe cards.
//!
//! Recipe cards come back from the model in a small Markdown subset:
//! `#`/`##` headings, `---` rules, `- ` bullets, `1. ` numbered steps,
//! `**bold**` spans and plain paragraphs. This module turns that text into a
//! self-contained HTML document with print buttons. Anything it does not
//! recognise becomes a paragraph, so rendering never fails.

mod template;

pub use template::PRINT_BUTTON;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use std::sync::LazyLock;

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+").expect("Invalid ordered item regex"));

static BOLD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("Invalid bold span regex"));

/// Kind of list a list item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `- item`
    Unordered,
    /// `1. item`
    Ordered,
}

impl ListKind {
    fn open_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

/// One classified line of card Markdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Empty or whitespace-only line
    Blank,
    /// `# text` (level 1) or `## text` (level 2)
    Heading { level: u8, text: String },
    /// A line that is exactly `---`
    Rule,
    /// Bullet or numbered item, numbering already removed
    ListItem { kind: ListKind, text: String },
    /// Any other line
    Paragraph(String),
}

/// Which list, if any, is currently open while rendering.
///
/// At most one list can be open, so switching kinds always closes the
/// previous one first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ListState {
    #[default]
    NoListOpen,
    UnorderedOpen,
    OrderedOpen,
}

impl ListState {
    fn open_kind(self) -> Option<ListKind> {
        match self {
            ListState::NoListOpen => None,
            ListState::UnorderedOpen => Some(ListKind::Unordered),
            ListState::OrderedOpen => Some(ListKind::Ordered),
        }
    }
}

impl From<ListKind> for ListState {
    fn from(kind: ListKind) -> Self {
        match kind {
            ListKind::Unordered => ListState::UnorderedOpen,
            ListKind::Ordered => ListState::OrderedOpen,
        }
    }
}

/// Classify a single line of card Markdown.
pub fn classify_line(line: &str) -> Block {
    let line = line.trim();

    if line.is_empty() {
        Block::Blank
    } else if let Some(text) = line.strip_prefix("# ") {
        Block::Heading {
            level: 1,
            text: text.to_string(),
        }
    } else if let Some(text) = line.strip_prefix("## ") {
        Block::Heading {
            level: 2,
            text: text.to_string(),
        }
    } else if line == "---" {
        Block::Rule
    } else if let Some(text) = line.strip_prefix("- ") {
        Block::ListItem {
            kind: ListKind::Unordered,
            text: text.to_string(),
        }
    } else if let Some(numbering) = ORDERED_ITEM.find(line) {
        Block::ListItem {
            kind: ListKind::Ordered,
            text: line[numbering.end()..].to_string(),
        }
    } else {
        Block::Paragraph(line.to_string())
    }
}

/// Split card Markdown into blocks, one per input line.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    markdown.split('\n').map(classify_line).collect()
}

/// Render card Markdown as a complete, printable HTML document.
///
/// The output always carries exactly two [`PRINT_BUTTON`]s, one before and
/// one after the content, even for empty input. Card text is HTML-escaped,
/// so `&`, `<` and `>` appear as entities rather than literally.
///
/// # Example
/// ```
/// use dinner_recipe_maker::render_html;
///
/// let html = render_html("# Pancakes\n- 2 eggs\n- 1 cup **milk**");
/// assert!(html.contains("<h1>Pancakes</h1>"));
/// assert!(html.contains("<li>1 cup <strong>milk</strong></li>"));
/// ```
pub fn render_html(markdown: &str) -> String {
    template::wrap_document(&render_body(&parse_blocks(markdown)))
}

/// Render blocks to the HTML fragment placed between the print buttons.
pub fn render_body(blocks: &[Block]) -> String {
    let mut writer = BodyWriter::default();
    for block in blocks {
        writer.push(block);
    }
    writer.finish()
}

/// Encode a card document as a `data:` URL that a browser can open directly.
pub fn data_url(html: &str) -> String {
    format!("data:text/html;base64,{}", STANDARD.encode(html))
}

#[derive(Default)]
struct BodyWriter {
    lines: Vec<String>,
    list: ListState,
}

impl BodyWriter {
    fn push(&mut self, block: &Block) {
        match block {
            Block::Blank => self.close_list(),
            Block::Heading { level, text } => {
                self.close_list();
                self.lines
                    .push(format!("<h{level}>{}</h{level}>", escape(text)));
            }
            Block::Rule => {
                self.close_list();
                self.lines.push("<hr>".to_string());
            }
            Block::ListItem { kind, text } => {
                self.open_list(*kind);
                self.lines.push(format!("<li>{}</li>", inline(text)));
            }
            Block::Paragraph(text) => {
                self.close_list();
                self.lines.push(format!("<p>{}</p>", inline(text)));
            }
        }
    }

    fn open_list(&mut self, kind: ListKind) {
        if self.list.open_kind() == Some(kind) {
            return;
        }
        self.close_list();
        self.lines.push(kind.open_tag().to_string());
        self.list = kind.into();
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.list.open_kind() {
            self.lines.push(kind.close_tag().to_string());
            self.list = ListState::NoListOpen;
        }
    }

    fn finish(mut self) -> String {
        self.close_list();
        self.lines.join("\n")
    }
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Escape text and turn `**bold**` spans into `<strong>`.
fn inline(text: &str) -> String {
    BOLD_SPAN
        .replace_all(&escape(text), "<strong>${1}</strong>")
        .into_owned()
}
