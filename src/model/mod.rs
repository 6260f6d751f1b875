use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// One archived media piece, as emitted by the dataset generator.
///
/// Only `name` is guaranteed; every other field may be absent or null in
/// the fragment and must surface as a placeholder downstream, never as
/// raw null text. Fields the generator adds beyond the known set land in
/// `extra` and still show up in the detail attribute table.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub media_type: Option<Value>,
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub file_size: Option<Value>,
    #[serde(default)]
    pub data_metric: Option<String>,
    #[serde(default)]
    pub source_link: Option<String>,
    #[serde(default)]
    pub download_link: Option<String>,
    #[serde(default)]
    pub magnet_link: Option<String>,
    #[serde(default)]
    pub screenshot_path: Option<Screenshots>,
    #[serde(default)]
    pub media_piece_path: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The generator writes `screenshot_path` as either a single path or a
/// list of paths.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Screenshots {
    One(String),
    Many(Vec<String>),
}

impl Screenshots {
    pub fn first(&self) -> Option<&str> {
        match self {
            Screenshots::One(path) => non_empty(path),
            Screenshots::Many(paths) => paths.iter().find_map(|p| non_empty(p)),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Displayable text for a loose JSON value. The database rows behind the
/// fragments hold numbers and strings interchangeably; empty strings and
/// nulls both count as absent.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => non_empty(s).map(str::to_string),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn opt_value_text(value: Option<&Value>) -> Option<String> {
    value.and_then(value_text)
}

pub fn opt_str_text(value: Option<&str>) -> Option<String> {
    value.and_then(non_empty).map(str::to_string)
}

impl ContentEntry {
    pub fn link(&self, kind: LinkKind) -> Option<&str> {
        let raw = match kind {
            LinkKind::Origin => self.source_link.as_deref(),
            LinkKind::Download => self.download_link.as_deref(),
            LinkKind::Magnet => self.magnet_link.as_deref(),
        };
        raw.and_then(non_empty)
    }

    pub fn screenshot(&self) -> Option<&str> {
        self.screenshot_path.as_ref().and_then(Screenshots::first)
    }
}

/// The three link actions an entry can carry, in their fixed display
/// order: Origin, Download, Magnet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    Origin,
    Download,
    Magnet,
}

pub const LINK_ORDER: [LinkKind; 3] = [LinkKind::Origin, LinkKind::Download, LinkKind::Magnet];
