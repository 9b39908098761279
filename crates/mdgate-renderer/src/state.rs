//! Renderer state tracking for code blocks, tables, images and headings.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// Escape HTML special characters in text content.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// State for an in-progress fenced or indented code block.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    language: Option<String>,
    content: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.content.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub(crate) fn push_newline(&mut self) {
        self.content.push('\n');
    }

    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.content))
    }
}

/// State for an in-progress table, tracking column alignments and cursor.
#[derive(Default)]
pub(crate) struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Inline style attribute for the current cell's column alignment.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align: left""#,
            Some(Alignment::Center) => r#" style="text-align: center""#,
            Some(Alignment::Right) => r#" style="text-align: right""#,
            _ => "",
        }
    }
}

/// State for collecting image alt text between start and end events.
#[derive(Default)]
pub(crate) struct ImageState {
    active: bool,
    alt: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        self.active = true;
        self.alt.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt.push_str(text);
    }

    pub(crate) fn end(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.alt)
    }
}

/// In-progress heading capture: plain text for slugs/titles, HTML for output.
struct CurrentHeading {
    level: u8,
    text: String,
    html: String,
}

/// Heading state: anchor ID generation, deduplication and title extraction.
pub(crate) struct HeadingState {
    extract_title: bool,
    title: Option<String>,
    current: Option<CurrentHeading>,
    slug_counts: HashMap<String, usize>,
}

impl HeadingState {
    pub(crate) fn new(extract_title: bool) -> Self {
        Self {
            extract_title,
            title: None,
            current: None,
            slug_counts: HashMap::new(),
        }
    }

    pub(crate) fn start(&mut self, level: u8) {
        self.current = Some(CurrentHeading {
            level,
            text: String::new(),
            html: String::new(),
        });
    }

    pub(crate) fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        if let Some(current) = &mut self.current {
            current.text.push_str(text);
        }
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        if let Some(current) = &mut self.current {
            current.html.push_str(html);
        }
    }

    /// Finish the current heading, returning `(level, id, html)`.
    ///
    /// The first H1 also becomes the document title when extraction is on;
    /// the heading itself is still rendered.
    pub(crate) fn complete(&mut self) -> Option<(u8, String, String)> {
        let current = self.current.take()?;
        if self.extract_title && self.title.is_none() && current.level == 1 {
            self.title = Some(current.text.trim().to_owned());
        }
        let id = self.unique_id(slugify(&current.text));
        Some((current.level, id, current.html))
    }

    pub(crate) fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }

    /// Deduplicate a slug with a numeric suffix: `faq`, `faq-1`, `faq-2`.
    fn unique_id(&mut self, slug: String) -> String {
        let count = self.slug_counts.entry(slug.clone()).or_insert(0);
        let id = if *count == 0 {
            slug.clone()
        } else {
            format!("{slug}-{count}")
        };
        *count += 1;
        id
    }
}

/// Build an anchor slug from heading text.
///
/// Lowercases, keeps alphanumerics and underscores, collapses everything
/// else into single dashes.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.trim().chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lc in c.to_lowercase() {
                slug.push(lc);
            }
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "section".to_owned()
    } else {
        slug
    }
}
