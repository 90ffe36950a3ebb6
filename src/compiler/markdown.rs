//! Markdown → HTML conversion with front matter extraction.
//!
//! A leading front matter block (`---` YAML or `+++` TOML) is split off the
//! source first. Only a block opening on the first line counts; later `---`
//! lines are ordinary markdown.
//!
//! The body is parsed by pulldown-cmark with tables, strikethrough and
//! footnotes enabled, and its event stream is rewritten in one pass:
//!
//! - fenced code blocks with a language tag are replaced by highlighted HTML
//! - bare `http(s)://` and `www.` URLs in plain text become links
//!
//! Raw HTML passes through unchanged; the output is trusted by the renderer.

use super::highlight::{fence_lang, highlight_block};
use super::meta::FrontMatterKind;
use pulldown_cmark::{
    CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream,
    html::push_html,
};
use regex::Regex;
use std::sync::LazyLock;

/// Result of converting one markdown document.
#[derive(Debug, Default)]
pub struct Converted {
    /// HTML fragment for the document body
    pub html: String,
    /// Raw front matter text and its syntax, if the document had a block
    pub front_matter: Option<(FrontMatterKind, String)>,
}

/// Bare URL candidates. Trailing punctuation is trimmed separately.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:https?://|www\.)[^ \t\r\n<>"]+"#).unwrap());

const fn options() -> Options {
    Options::ENABLE_TABLES
        .union(Options::ENABLE_STRIKETHROUGH)
        .union(Options::ENABLE_FOOTNOTES)
}

/// Convert a markdown document to HTML, separating its front matter.
pub fn convert(source: &str) -> Converted {
    let (front_matter, body) = split_front_matter(source);
    let front_matter = front_matter.map(|(kind, raw)| (kind, raw.to_owned()));
    let parser = TextMergeStream::new(Parser::new_ext(body, options()));

    let mut events: Vec<Event<'_>> = Vec::new();
    let mut fenced: Option<(String, String)> = None;
    let mut in_plain_code = false;
    let mut link_depth = 0usize;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => match fenced_lang(&kind) {
                Some(lang) => fenced = Some((lang, String::new())),
                None => {
                    in_plain_code = true;
                    events.push(Event::Start(Tag::CodeBlock(kind)));
                }
            },
            Event::Text(text) if fenced.is_some() => {
                if let Some((_, code)) = fenced.as_mut() {
                    code.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => match fenced.take() {
                Some((lang, code)) => {
                    events.push(Event::Html(highlight_block(&lang, &code).into()));
                }
                None => {
                    in_plain_code = false;
                    events.push(Event::End(TagEnd::CodeBlock));
                }
            },

            Event::Start(tag @ (Tag::Link { .. } | Tag::Image { .. })) => {
                link_depth += 1;
                events.push(Event::Start(tag));
            }
            Event::End(end @ (TagEnd::Link | TagEnd::Image)) => {
                link_depth = link_depth.saturating_sub(1);
                events.push(Event::End(end));
            }
            Event::InlineHtml(html) => {
                if is_anchor_open(&html) {
                    link_depth += 1;
                } else if is_anchor_close(&html) {
                    link_depth = link_depth.saturating_sub(1);
                }
                events.push(Event::InlineHtml(html));
            }

            Event::Text(text) if link_depth == 0 && !in_plain_code => {
                linkify(text, &mut events);
            }
            other => events.push(other),
        }
    }

    let mut html = String::with_capacity(body.len() * 3 / 2);
    push_html(&mut html, events.into_iter());

    Converted { html, front_matter }
}

/// Split a leading front matter block off `source`.
///
/// The block opens with `---` or `+++` on the first line and closes at the
/// next line holding the same delimiter. It may be empty or start with blank
/// lines. Without a closing delimiter the whole source is body.
pub fn split_front_matter(source: &str) -> (Option<(FrontMatterKind, &str)>, &str) {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return (None, source);
    };
    let delimiter = first.trim_end();
    let kind = match delimiter {
        "---" => FrontMatterKind::Yaml,
        "+++" => FrontMatterKind::Toml,
        _ => return (None, source),
    };

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == delimiter {
            let raw = &source[start..offset];
            return (Some((kind, raw)), &source[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, source)
}

/// Language of a fenced block that should be highlighted.
fn fenced_lang(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => fence_lang(info).map(str::to_owned),
        CodeBlockKind::Indented => None,
    }
}

fn is_anchor_open(html: &str) -> bool {
    let lower = html.to_ascii_lowercase();
    lower.starts_with("<a ") || lower.starts_with("<a>")
}

fn is_anchor_close(html: &str) -> bool {
    html.to_ascii_lowercase().starts_with("</a")
}

/// Split a text event around bare URLs, emitting autolink events for each.
fn linkify<'a>(text: CowStr<'a>, events: &mut Vec<Event<'a>>) {
    let spans = find_urls(&text);
    if spans.is_empty() {
        events.push(Event::Text(text));
        return;
    }

    let mut last = 0;
    for (start, end) in spans {
        if start > last {
            events.push(Event::Text(text[last..start].to_owned().into()));
        }
        let url = &text[start..end];
        let href = if url.starts_with("www.") {
            format!("http://{url}")
        } else {
            url.to_owned()
        };
        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: href.into(),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        events.push(Event::Text(url.to_owned().into()));
        events.push(Event::End(TagEnd::Link));
        last = end;
    }
    if last < text.len() {
        events.push(Event::Text(text[last..].to_owned().into()));
    }
}

/// Byte spans of bare URLs in `text`.
///
/// A match must not continue a word (`awww.x` is not a link) or the host
/// part of an email address (`me@www.x`), and loses trailing sentence punctuation and unbalanced closing parentheses.
fn find_urls(text: &str) -> Vec<(usize, usize)> {
    URL_RE
        .find_iter(text)
        .filter(|m| {
            !text[..m.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '@')
        })
        .filter_map(|m| {
            let url = trim_url(m.as_str());
            let host = url
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .trim_start_matches("www.");
            (!host.is_empty()).then(|| (m.start(), m.start() + url.len()))
        })
        .collect()
}

fn trim_url(url: &str) -> &str {
    let mut url = url;
    loop {
        let Some(last) = url.chars().next_back() else {
            return url;
        };
        let unbalanced_paren = last == ')' && url.matches(')').count() > url.matches('(').count();
        if matches!(last, '.' | ',' | ':' | ';' | '!' | '?' | '\'' | '*' | '_' | '~')
            || unbalanced_paren
        {
            url = &url[..url.len() - last.len_utf8()];
        } else {
            return url;
        }
    }
}
