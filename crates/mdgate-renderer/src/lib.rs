//! GFM markdown to HTML rendering for the mdgate content server.
//!
//! This crate provides [`HtmlRenderer`], an explicit event-loop renderer
//! built on pulldown-cmark. It produces semantic HTML5 with:
//!
//! - heading anchor IDs (deduplicated `faq`, `faq-1`, ...)
//! - first-H1 title extraction
//! - inline-style syntax highlighting for fenced code blocks
//! - smart punctuation (curly quotes, dashes, ellipses)
//! - soft line breaks preserved as plain newlines (no hard wrap)
//!
//! Rendered anchors pointing at `.md` files can be normalized with
//! [`lowercase_md_hrefs`] so that uppercase source filenames never leak
//! into served URLs.
//!
//! # Example
//!
//! ```
//! use mdgate_renderer::HtmlRenderer;
//!
//! let mut renderer = HtmlRenderer::new().with_title_extraction();
//! let result = renderer.render_markdown("# Hello\n\n**Bold** text");
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! ```

mod highlight;
mod links;
mod renderer;
mod state;

pub use highlight::highlight_code_block;
pub use links::lowercase_md_hrefs;
pub use renderer::{HtmlRenderer, RenderResult};
pub use state::escape_html;
