pub mod text;

use crate::model::{opt_value_text, ContentEntry, LinkKind, LINK_ORDER};
use crate::page::{humanize, slugify};

/// Placeholder shown when a field has no displayable value. Fields must
/// never render as null/undefined text.
pub const NA: &str = "N/A";

/// Substitute image used when a screenshot is missing or fails to load.
pub const PLACEHOLDER_IMAGE: &str = "/media/site/placeholder.jpg";

/// How following a link behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkBehavior {
    /// Ordinary navigation within the current browsing context.
    Navigate,
    /// Opens a new browsing context (Origin action).
    NewContext,
    /// Forces a file save instead of navigating (Download action).
    ForceDownload,
    /// Navigates in place (Magnet action).
    InPlace,
}

/// Toolkit-independent UI tree. Renderers for a concrete surface walk
/// this tree; building it stays a pure function of the records, so the
/// layout contracts are unit-testable without a browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiNode {
    Text(String),
    Link {
        label: String,
        href: String,
        behavior: LinkBehavior,
    },
    /// Two-cell row: left-aligned and right-aligned content.
    Row {
        left: Box<UiNode>,
        right: Box<UiNode>,
    },
    Column(Vec<UiNode>),
    Button {
        label: String,
        target: String,
    },
    /// One of the fixed entry link actions. `href == None` renders the
    /// action visually disabled and non-navigable.
    Action {
        kind: LinkKind,
        icon: &'static str,
        label: &'static str,
        href: Option<String>,
        behavior: LinkBehavior,
    },
    Table(Vec<(String, String)>),
    Image {
        src: String,
        fallback: String,
    },
    Loading(String),
    ErrorPanel {
        message: String,
        dismissable: bool,
    },
}

pub fn loading_indicator(what: &str) -> UiNode {
    UiNode::Loading(format!("Loading {what}..."))
}

pub fn error_panel(message: String) -> UiNode {
    UiNode::ErrorPanel {
        message,
        dismissable: true,
    }
}

fn display_or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NA.to_string())
}

/// Merged "File Size" cell: size plus unit when both are known, "N/A
/// <unit>" when only the unit is known, plain "N/A" when both are absent.
pub fn file_size_text(entry: &ContentEntry) -> String {
    let size = opt_value_text(entry.file_size.as_ref());
    let metric = crate::model::opt_str_text(entry.data_metric.as_deref());
    match (size, metric) {
        (Some(size), Some(metric)) => format!("{size} {metric}"),
        (Some(size), None) => size,
        (None, Some(metric)) => format!("{NA} {metric}"),
        (None, None) => NA.to_string(),
    }
}

fn entry_href(entry: &ContentEntry) -> String {
    match entry.media_piece_path.as_deref() {
        Some(path) if !path.trim().is_empty() => path.to_string(),
        _ => format!("{}.html", slugify(&entry.name)),
    }
}

fn name_link(entry: &ContentEntry) -> UiNode {
    UiNode::Link {
        label: entry.name.clone(),
        href: entry_href(entry),
        behavior: LinkBehavior::Navigate,
    }
}

/// Category-page card: name link + file size row, then type + year row.
pub fn category_entry_card(entry: &ContentEntry) -> UiNode {
    UiNode::Column(vec![
        UiNode::Row {
            left: Box::new(name_link(entry)),
            right: Box::new(UiNode::Text(file_size_text(entry))),
        },
        UiNode::Row {
            left: Box::new(UiNode::Text(display_or_na(opt_value_text(
                entry.media_type.as_ref(),
            )))),
            right: Box::new(UiNode::Text(display_or_na(opt_value_text(
                entry.year.as_ref(),
            )))),
        },
    ])
}

/// Topic-page card, simplified: name link row, then category + year row.
pub fn topic_entry_card(entry: &ContentEntry) -> UiNode {
    UiNode::Column(vec![
        name_link(entry),
        UiNode::Row {
            left: Box::new(UiNode::Text(display_or_na(crate::model::opt_str_text(
                entry.category.as_deref(),
            )))),
            right: Box::new(UiNode::Text(display_or_na(opt_value_text(
                entry.year.as_ref(),
            )))),
        },
    ])
}

pub fn entry_card_list(entries: &[&ContentEntry], simplified: bool) -> UiNode {
    UiNode::Column(
        entries
            .iter()
            .map(|e| {
                if simplified {
                    topic_entry_card(e)
                } else {
                    category_entry_card(e)
                }
            })
            .collect(),
    )
}

/// Topic/category button list: label is the display name, target its slug.
pub fn button_list(names: &[String]) -> UiNode {
    UiNode::Column(
        names
            .iter()
            .map(|name| UiNode::Button {
                label: name.clone(),
                target: slugify(name),
            })
            .collect(),
    )
}

fn action_for(entry: &ContentEntry, kind: LinkKind) -> UiNode {
    let (icon, label, behavior) = match kind {
        LinkKind::Origin => ("\u{2197}", "Origin", LinkBehavior::NewContext),
        LinkKind::Download => ("\u{2193}", "Download", LinkBehavior::ForceDownload),
        LinkKind::Magnet => ("\u{29c9}", "Magnet", LinkBehavior::InPlace),
    };
    UiNode::Action {
        kind,
        icon,
        label,
        href: entry.link(kind).map(str::to_string),
        behavior,
    }
}

/// Attribute table rows for the detail view, labels humanized.
///
/// Identity, link, and image fields stay out of the table; `file_size`
/// and `data_metric` merge into one "File Size" row. Extra generator
/// fields follow in key order, with the same placeholder rule.
pub fn attribute_rows(entry: &ContentEntry) -> Vec<(String, String)> {
    let mut rows = vec![
        (
            humanize("type"),
            display_or_na(opt_value_text(entry.media_type.as_ref())),
        ),
        (
            humanize("year"),
            display_or_na(opt_value_text(entry.year.as_ref())),
        ),
        (humanize("file_size"), file_size_text(entry)),
    ];
    for (key, value) in entry.extra.iter() {
        if key.ends_with("_link") || key.ends_with("_path") {
            continue;
        }
        rows.push((humanize(key), display_or_na(crate::model::value_text(value))));
    }
    rows
}

/// Single-entry detail view: attribute table and ordered link actions on
/// the left, the screenshot (or its placeholder) on the right.
pub fn entry_detail(entry: &ContentEntry) -> UiNode {
    let actions = LINK_ORDER
        .iter()
        .map(|kind| action_for(entry, *kind))
        .collect::<Vec<_>>();

    let mut left = vec![UiNode::Table(attribute_rows(entry))];
    left.extend(actions);

    let image = match entry.screenshot() {
        Some(src) => UiNode::Image {
            src: src.to_string(),
            fallback: PLACEHOLDER_IMAGE.to_string(),
        },
        None => UiNode::Image {
            src: PLACEHOLDER_IMAGE.to_string(),
            fallback: PLACEHOLDER_IMAGE.to_string(),
        },
    };

    UiNode::Row {
        left: Box::new(UiNode::Column(left)),
        right: Box::new(image),
    }
}

/// Tracks the one-shot placeholder substitution for a screenshot image.
/// The first load failure swaps in the placeholder; later failures do
/// nothing, so a broken placeholder cannot loop.
#[derive(Clone, Debug, Default)]
pub struct ImageFallback {
    substituted: bool,
}

impl ImageFallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_load_error(&mut self) -> Option<&'static str> {
        if self.substituted {
            return None;
        }
        self.substituted = true;
        Some(PLACEHOLDER_IMAGE)
    }
}
