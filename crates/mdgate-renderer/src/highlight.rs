//! Syntax highlighting for fenced code blocks.
//!
//! Uses syntect's bundled syntax and theme sets to emit highlighted HTML
//! with inline styles and no line numbers. Code blocks with an unknown or
//! missing language fall back to an escaped `<pre><code>` block.

use std::fmt::Write;
use std::sync::LazyLock;

use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::state::escape_html;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Theme used for inline-style highlighting. Light background to match
/// the page layout.
const THEME: &str = "InspiredGitHub";

/// Append a rendered code block to `out`.
///
/// Highlighted output carries inline `style` attributes only, so no
/// stylesheet is needed in the page shell.
pub fn highlight_code_block(lang: Option<&str>, content: &str, out: &mut String) {
    if let Some(lang) = lang {
        if let Some(syntax) = SYNTAXES.find_syntax_by_token(lang)
            && let Some(theme) = THEMES.themes.get(THEME)
            && let Ok(html) = highlighted_html_for_string(content, &SYNTAXES, syntax, theme)
        {
            out.push_str(&html);
            return;
        }
        // Unknown language: keep the hint as a class for downstream styling
        write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(content)
        )
        .unwrap();
    } else {
        write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_language_gets_inline_styles() {
        let mut out = String::new();
        highlight_code_block(Some("rust"), "fn main() {}\n", &mut out);
        assert!(out.starts_with("<pre style="));
        assert!(out.contains("main"));
        // Inline styles only, no class-based or line-number markup
        assert!(!out.contains("language-rust"));
        assert!(!out.contains("line-number"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_block() {
        let mut out = String::new();
        highlight_code_block(Some("no-such-lang"), "plain text\n", &mut out);
        assert_eq!(
            out,
            r#"<pre><code class="language-no-such-lang">plain text
</code></pre>"#
        );
    }

    #[test]
    fn test_no_language_renders_escaped() {
        let mut out = String::new();
        highlight_code_block(None, "a < b && c > d\n", &mut out);
        assert_eq!(out, "<pre><code>a &lt; b &amp;&amp; c &gt; d\n</code></pre>");
    }
}
