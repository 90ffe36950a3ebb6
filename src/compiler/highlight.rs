//! Class-based syntax highlighting for fenced code blocks.
//!
//! Output uses CSS classes only (no inline styles), so the site stylesheet
//! decides the colors:
//!
//! ```html
//! <pre class="highlight"><code class="language-rust"><span class="source rust">…</span></code></pre>
//! ```

use std::sync::LazyLock;
use syntect::{
    html::{ClassStyle, ClassedHTMLGenerator},
    parsing::SyntaxSet,
    util::LinesWithEndings,
};
use pulldown_cmark_escape::escape_html;

/// Tabs inside code blocks are expanded to this many spaces
pub const TAB_WIDTH: usize = 2;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Highlight one code block tagged with `lang`.
///
/// Unknown languages are rendered as escaped plain text inside the same
/// wrapper.
pub fn highlight_block(lang: &str, code: &str) -> String {
    let code = expand_tabs(code);
    let syntax = SYNTAXES
        .find_syntax_by_token(lang)
        .unwrap_or_else(|| SYNTAXES.find_syntax_plain_text());

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAXES, ClassStyle::Spaced);
    let body = LinesWithEndings::from(&code)
        .try_for_each(|line| generator.parse_html_for_line_which_includes_newline(line))
        .map(|()| generator.finalize())
        .unwrap_or_else(|_| escape(&code));

    format!(
        "<pre class=\"highlight\"><code class=\"language-{}\">{}</code></pre>\n",
        escape(lang),
        body
    )
}

/// Extract the language token from a fence info string (`rust,ignore` → `rust`).
pub fn fence_lang(info: &str) -> Option<&str> {
    info.split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .filter(|lang| !lang.is_empty())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = escape_html(&mut out, text);
    out
}

fn expand_tabs(code: &str) -> String {
    code.replace('\t', &" ".repeat(TAB_WIDTH))
}
