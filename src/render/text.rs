use colored::Colorize;

use super::{LinkBehavior, UiNode};

pub const DEFAULT_WIDTH: usize = 72;

/// Render a UI tree into terminal lines. Two-cell rows with inline
/// content become one padded line (left-aligned / right-aligned); block
/// content falls back to stacking.
pub fn render_lines(node: &UiNode, width: usize) -> Vec<String> {
    match node {
        UiNode::Column(children) => children
            .iter()
            .flat_map(|child| render_lines(child, width))
            .collect(),
        UiNode::Row { left, right } => {
            if let (Some(l), Some(r)) = (inline_cell(left), inline_cell(right)) {
                let used = l.plain_len + r.plain_len;
                let pad = if used + 2 <= width { width - used } else { 2 };
                vec![format!("{}{}{}", l.styled, " ".repeat(pad), r.styled)]
            } else {
                let mut out = render_lines(left, width);
                out.extend(render_lines(right, width));
                out
            }
        }
        UiNode::Table(rows) => {
            let label_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
            rows.iter()
                .map(|(k, v)| format!("{} : {}", format!("{k:<label_width$}").bold(), v))
                .collect()
        }
        UiNode::ErrorPanel {
            message,
            dismissable,
        } => {
            let mut line = format!("{} {}", "error ::".bold().red(), message.red());
            if *dismissable {
                line.push_str(&format!(" {}", "[dismiss]".dimmed()));
            }
            vec![line]
        }
        other => inline_cell(other)
            .map(|cell| vec![cell.styled])
            .unwrap_or_default(),
    }
}

struct InlineCell {
    plain_len: usize,
    styled: String,
}

fn inline_cell(node: &UiNode) -> Option<InlineCell> {
    match node {
        UiNode::Text(text) => Some(InlineCell {
            plain_len: text.chars().count(),
            styled: text.clone(),
        }),
        UiNode::Link { label, href, .. } => Some(InlineCell {
            plain_len: label.chars().count() + href.chars().count() + 4,
            styled: format!(
                "{} {} {}",
                label.blue().underline(),
                "->".dimmed(),
                href.dimmed()
            ),
        }),
        UiNode::Button { label, target } => Some(InlineCell {
            plain_len: label.chars().count() + target.chars().count() + 9,
            styled: format!(
                "[ {} ] {} {}",
                label.bold(),
                "->".dimmed(),
                target.dimmed()
            ),
        }),
        UiNode::Action {
            icon,
            label,
            href,
            behavior,
            ..
        } => {
            let hint = match behavior {
                LinkBehavior::NewContext => " (new window)",
                LinkBehavior::ForceDownload => " (save)",
                LinkBehavior::InPlace | LinkBehavior::Navigate => "",
            };
            let styled = match href {
                Some(href) => format!(
                    "{} {} {} {}{}",
                    icon,
                    label.bold(),
                    "->".dimmed(),
                    href.blue(),
                    hint.dimmed()
                ),
                None => format!("{} {}", icon, format!("{label} (unavailable)").dimmed()),
            };
            Some(InlineCell {
                plain_len: styled_plain_len(icon, label, href.as_deref(), hint),
                styled,
            })
        }
        UiNode::Image { src, .. } => Some(InlineCell {
            plain_len: src.chars().count() + 6,
            styled: format!("{} {}", "[img]".dimmed(), src),
        }),
        UiNode::Loading(message) => Some(InlineCell {
            plain_len: message.chars().count(),
            styled: message.dimmed().italic().to_string(),
        }),
        _ => None,
    }
}

fn styled_plain_len(icon: &str, label: &str, href: Option<&str>, hint: &str) -> usize {
    let base = icon.chars().count() + 1 + label.chars().count();
    match href {
        Some(href) => base + 4 + href.chars().count() + hint.chars().count(),
        None => base + " (unavailable)".len(),
    }
}
