//! Template loading and the helper functions exposed to templates.
//!
//! Each page renders `types/<type>.html`, which normally extends the shared
//! `main.html` layout. Templates are loaded from the template root on first
//! use and shared by every render of one build.
//!
//! Autoescaping is on for `.html` templates. Page bodies are passed in as safe
//! strings, so `{{ content }}` and `{{ p.content }}` print the rendered HTML
//! as is while every other field is escaped.
//!
//! # Helpers
//!
//! | Function                    | Result                                       |
//! |-----------------------------|----------------------------------------------|
//! | `url(path)`                 | `path.html`, or `dir/` when `path` ends in `index` |
//! | `filterType(type, pages)`   | pages whose `meta.type == type`, in order    |
//! | `formatTime(format, time)`  | strftime-formatted timestamp, `""` if absent |
//! | `mostRecent(pages)`         | copy of `pages`, newest `published` first    |

use super::meta::Page;
use crate::config::{MAIN_TEMPLATE, SiteConfig, TYPES_DIR};
use crate::error::BuildError;
use crate::utils::date::{self, Timestamp};
use minijinja::{Environment, Error, ErrorKind, Value, context, path_loader};
use std::cmp::Reverse;

/// Template name a page type renders with.
pub fn type_template_name(page_type: &str) -> String {
    format!("{TYPES_DIR}/{page_type}.html")
}

/// Templates and the page listing shared by one render phase.
pub struct Templates {
    env: Environment<'static>,
    /// Every page as seen from templates (`all_pages`), built once
    all_pages: Value,
}

impl Templates {
    pub fn new(config: &SiteConfig, pages: &[Page]) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(&config.template_dir));
        register_helpers(&mut env);

        let all_pages = Value::from(pages.iter().map(page_value).collect::<Vec<_>>());
        Self { env, all_pages }
    }

    /// Render one page with its type template.
    ///
    /// `main.html` is loaded first, so a missing layout fails every page even
    /// when the type template does not extend it.
    pub fn render(&self, page: &Page) -> Result<String, BuildError> {
        let name = type_template_name(&page.meta.page_type);
        let load_err = |source| BuildError::TemplateLoad {
            url: page.path.clone(),
            source,
        };

        self.env.get_template(MAIN_TEMPLATE).map_err(load_err)?;
        let template = self.env.get_template(&name).map_err(load_err)?;

        let ctx = context! {
            path => page.path.as_str(),
            content => Value::from_safe_string(page.content.clone()),
            meta => Value::from_serialize(&page.meta),
            all_pages => self.all_pages.clone(),
        };
        template.render(ctx).map_err(|source| BuildError::Render {
            url: page.path.clone(),
            template: name.clone(),
            source,
        })
    }
}

/// One entry of `all_pages`: `path`, `content` (safe) and `meta`.
fn page_value(page: &Page) -> Value {
    context! {
        path => page.path.as_str(),
        content => Value::from_safe_string(page.content.clone()),
        meta => Value::from_serialize(&page.meta),
    }
}

pub fn register_helpers(env: &mut Environment<'_>) {
    env.add_function("url", url);
    env.add_function("filterType", filter_type);
    env.add_function("formatTime", format_time);
    env.add_function("mostRecent", most_recent);
}

// ============================================================================
// Helpers
// ============================================================================

/// Public link for a page path.
///
/// A trailing `index` segment collapses to its directory, anything else gets
/// an `.html` suffix.
pub fn page_url(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((dir, "index")) => format!("{dir}/"),
        None if path == "index" => String::new(),
        _ => format!("{path}.html"),
    }
}

/// `url` output goes into `href` attributes unescaped.
fn url(path: &str) -> Value {
    Value::from_safe_string(page_url(path))
}

fn filter_type(page_type: &str, pages: Vec<Value>) -> Vec<Value> {
    pages
        .into_iter()
        .filter(|page| meta_field(page, "type").as_deref() == Some(page_type))
        .collect()
}

/// Pages sorted newest first. Undated pages keep their order at the end.
fn most_recent(pages: Vec<Value>) -> Vec<Value> {
    let mut sorted = pages;
    sorted.sort_by_cached_key(|page| Reverse(published_of(page)));
    sorted
}

fn format_time(format: &str, time: Option<&str>) -> Result<String, Error> {
    let Some(time) = time.filter(|t| !t.is_empty()) else {
        return Ok(String::new());
    };
    let ts = date::parse_timestamp(time).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("formatTime: invalid time `{time}`"),
        )
    })?;
    date::format_time(format, &ts)
        .map_err(|err| Error::new(ErrorKind::InvalidOperation, format!("formatTime: {err}")))
}

fn meta_field(page: &Value, key: &str) -> Option<String> {
    page.get_attr("meta")
        .ok()?
        .get_attr(key)
        .ok()?
        .as_str()
        .map(str::to_owned)
}

fn published_of(page: &Value) -> Option<Timestamp> {
    meta_field(page, "published").and_then(|s| date::parse_timestamp(&s))
}
