use crate::model::ContentEntry;

/// Why the search term is empty. Erasing the text and forcing a search
/// with no text are different user intents and must stay distinguishable:
/// erased clears the display, forced shows the whole unfiltered set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchIntent {
    Erased,
    Forced,
}

/// Literal case-insensitive substring containment on the entry name.
/// Not tokenized, not fuzzy. An empty term matches everything.
pub fn matches_name(name: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&term.to_lowercase())
}

/// Narrow a loaded list to the entries whose name contains `term`,
/// preserving the original order. Never touches the network.
pub fn filter_by_name<'a>(entries: &'a [ContentEntry], term: &str) -> Vec<&'a ContentEntry> {
    entries.iter().filter(|e| matches_name(&e.name, term)).collect()
}

/// Category pages keep the full list rendered and only toggle card
/// visibility, so an empty term leaves every card visible.
pub fn visibility_mask(entries: &[ContentEntry], term: &str) -> Vec<bool> {
    entries.iter().map(|e| matches_name(&e.name, term)).collect()
}

/// Topic/search page outcome for the current term. `None` means the
/// results display is cleared (the user erased the text); `Some` carries
/// the subset to render.
pub fn search_outcome<'a>(
    entries: &'a [ContentEntry],
    term: &str,
    intent: SearchIntent,
) -> Option<Vec<&'a ContentEntry>> {
    let term = term.trim();
    if term.is_empty() {
        return match intent {
            SearchIntent::Erased => None,
            SearchIntent::Forced => Some(entries.iter().collect()),
        };
    }
    Some(filter_by_name(entries, term))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> Vec<ContentEntry> {
        names
            .iter()
            .map(|n| ContentEntry {
                name: n.to_string(),
                ..ContentEntry::default()
            })
            .collect()
    }

    #[test]
    fn substring_match_is_case_insensitive_and_order_preserving() {
        let entries = named(&["Document Viewer", "Video Player", "docx Tool"]);
        let hits = filter_by_name(&entries, "doc");
        let names: Vec<&str> = hits.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Document Viewer", "docx Tool"]);
    }

    #[test]
    fn forced_empty_search_returns_full_list_in_order() {
        let entries = named(&["b", "a", "c"]);
        let hits = search_outcome(&entries, "", SearchIntent::Forced).unwrap();
        let names: Vec<&str> = hits.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn erased_empty_search_clears_the_display() {
        let entries = named(&["a"]);
        assert!(search_outcome(&entries, "  ", SearchIntent::Erased).is_none());
    }

    #[test]
    fn category_mask_keeps_everything_visible_on_empty_term() {
        let entries = named(&["a", "b"]);
        assert_eq!(visibility_mask(&entries, ""), vec![true, true]);
        assert_eq!(visibility_mask(&entries, "a"), vec![true, false]);
    }
}
