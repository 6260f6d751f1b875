use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("page path '{path}' is outside the content root '{root}'")]
    OutsideContentRoot { path: String, root: String },

    #[error("page path '{path}' has an empty segment")]
    EmptySegment { path: String },

    #[error("page path '{path}' has {count} segments, expected at most 3")]
    TooManySegments { path: String, count: usize },
}

/// Kind of page the client is on, parsed exactly once from the page path.
/// Every other component consumes this descriptor instead of re-parsing
/// the URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageDescriptor {
    TopicList,
    Topic {
        topic: String,
    },
    Category {
        topic: String,
        category: String,
    },
    Entry {
        topic: String,
        category: String,
        entry: String,
    },
}

/// Fragment URLs a page needs, one plan per page kind. Topic pages carry
/// two locations: the flat per-topic search index and the category list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FragmentPlan {
    TopicList { topics: String },
    Topic { search_index: String, categories: String },
    Category { entries: String },
    Entry { entry: String },
}

fn trim_slashes(value: &str) -> &str {
    value.trim_matches('/')
}

fn strip_html_suffix(segment: &str) -> &str {
    segment.strip_suffix(".html").unwrap_or(segment)
}

/// Parse a page path under `content_root` into a typed descriptor.
///
/// Identifiers are lower-cased here so that fragment derivation and page
/// URLs stay stable under case-insensitive matching. A path that does not
/// fit the 0/1/2/3-segment layout is an error; nothing gets fetched for it.
pub fn parse_page_path(path: &str, content_root: &str) -> Result<PageDescriptor, PageError> {
    let root = trim_slashes(content_root);
    let trimmed = trim_slashes(path);

    let rest = if trimmed == root {
        ""
    } else {
        match trimmed.strip_prefix(root).and_then(|r| r.strip_prefix('/')) {
            Some(rest) => rest,
            None if root.is_empty() => trimmed,
            None => {
                return Err(PageError::OutsideContentRoot {
                    path: path.to_string(),
                    root: content_root.to_string(),
                })
            }
        }
    };

    let mut segments: Vec<String> = Vec::new();
    for raw in rest.split('/') {
        if raw.is_empty() {
            continue;
        }
        let seg = strip_html_suffix(raw);
        if seg.is_empty() {
            return Err(PageError::EmptySegment {
                path: path.to_string(),
            });
        }
        segments.push(seg.to_lowercase());
    }

    // The generator emits index.html/content.html landing pages at the
    // content root; both are the topic-list page.
    if segments.len() == 1 && (segments[0] == "index" || segments[0] == "content") {
        segments.clear();
    }

    match segments.len() {
        0 => Ok(PageDescriptor::TopicList),
        1 => Ok(PageDescriptor::Topic {
            topic: segments.remove(0),
        }),
        2 => {
            let category = segments.pop().unwrap_or_default();
            let topic = segments.pop().unwrap_or_default();
            Ok(PageDescriptor::Category { topic, category })
        }
        3 => {
            let entry = segments.pop().unwrap_or_default();
            let category = segments.pop().unwrap_or_default();
            let topic = segments.pop().unwrap_or_default();
            Ok(PageDescriptor::Entry {
                topic,
                category,
                entry,
            })
        }
        count => Err(PageError::TooManySegments {
            path: path.to_string(),
            count,
        }),
    }
}

impl PageDescriptor {
    /// Derive the JSON fragment locations for this page under `data_root`.
    pub fn fragment_plan(&self, data_root: &str) -> FragmentPlan {
        let root = trim_slashes(data_root);
        match self {
            PageDescriptor::TopicList => FragmentPlan::TopicList {
                topics: format!("/{root}/topics.json"),
            },
            PageDescriptor::Topic { topic } => FragmentPlan::Topic {
                search_index: format!("/{root}/{topic}.json"),
                categories: format!("/{root}/{topic}/{topic}-categories.json"),
            },
            PageDescriptor::Category { topic, category } => FragmentPlan::Category {
                entries: format!("/{root}/{topic}/{category}.json"),
            },
            PageDescriptor::Entry {
                topic,
                category,
                entry,
            } => FragmentPlan::Entry {
                entry: format!("/{root}/{topic}/{category}/{entry}.json"),
            },
        }
    }

    /// Page path for this descriptor under `content_root`, the inverse of
    /// `parse_page_path` for well-formed descriptors.
    pub fn page_path(&self, content_root: &str) -> String {
        let root = trim_slashes(content_root);
        match self {
            PageDescriptor::TopicList => format!("/{root}/"),
            PageDescriptor::Topic { topic } => format!("/{root}/{topic}.html"),
            PageDescriptor::Category { topic, category } => {
                format!("/{root}/{topic}/{category}.html")
            }
            PageDescriptor::Entry {
                topic,
                category,
                entry,
            } => format!("/{root}/{topic}/{category}/{entry}.html"),
        }
    }
}

static SLUG_WHITESPACE: OnceLock<Regex> = OnceLock::new();
static SLUG_STRIP: OnceLock<Regex> = OnceLock::new();
static SLUG_DASH_RUN: OnceLock<Regex> = OnceLock::new();

/// Convert a display name into a URL-safe slug.
///
/// Whitespace runs collapse to a single dash; every other character
/// outside [a-z0-9-] is stripped, not substituted. Idempotent:
/// slugify(slugify(x)) == slugify(x).
pub fn slugify(name: &str) -> String {
    let ws = SLUG_WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap());
    let strip = SLUG_STRIP.get_or_init(|| Regex::new(r"[^a-z0-9-]").unwrap());
    let dashes = SLUG_DASH_RUN.get_or_init(|| Regex::new(r"-{2,}").unwrap());

    let lowered = name.to_lowercase();
    let dashed = ws.replace_all(lowered.trim(), "-");
    let stripped = strip.replace_all(&dashed, "");
    let collapsed = dashes.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Turn a raw field key into a display label: underscores become spaces,
/// each word gets capitalized.
pub fn humanize(field: &str) -> String {
    field
        .split('_')
        .filter(|w| !w.is_empty())
        .map(capitalize_ascii)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_ascii(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(word.len());
    out.push(first.to_ascii_uppercase());
    out.push_str(chars.as_str());
    out
}
