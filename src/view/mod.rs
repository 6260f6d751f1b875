use thiserror::Error;

use crate::filter::{search_outcome, SearchIntent};
use crate::loader::{fetch_entry_list, FragmentSource, LoadError};
use crate::model::ContentEntry;
use crate::page::{FragmentPlan, PageDescriptor};
use crate::render::{error_panel, loading_indicator, UiNode};

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("this page has no search index")]
    NotSearchable,

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// User interactions with the search control. Any of them counts as
/// "the search feature is in use" and triggers the lazy index fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    Focus,
    Keystroke,
    Trigger,
    Enter,
}

/// A named results container in the host surface.
///
/// Showing content replaces whatever was there before — the loading
/// indicator, previous results, or an error panel — so repeated loads
/// never stack or duplicate.
#[derive(Clone, Debug)]
pub struct Container {
    name: String,
    content: Option<UiNode>,
}

impl Container {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            content: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn show(&mut self, node: UiNode) {
        self.content = Some(node);
    }

    pub fn begin_loading(&mut self, what: &str) {
        self.show(loading_indicator(what));
    }

    pub fn fail(&mut self, error: &LoadError) {
        self.show(error_panel(error.to_string()));
    }

    pub fn clear(&mut self) {
        self.content = None;
    }

    pub fn content(&self) -> Option<&UiNode> {
        self.content.as_ref()
    }
}

/// State scoped to one page view: the parsed descriptor plus the
/// lazily-fetched search index. Created on view entry, dropped on
/// navigation; never a process-wide singleton.
pub struct PageViewState {
    page: PageDescriptor,
    data_root: String,
    search_data: Option<Vec<ContentEntry>>,
}

impl PageViewState {
    pub fn new(page: PageDescriptor, data_root: &str) -> Self {
        Self {
            page,
            data_root: data_root.to_string(),
            search_data: None,
        }
    }

    pub fn page(&self) -> &PageDescriptor {
        &self.page
    }

    pub fn fragment_plan(&self) -> FragmentPlan {
        self.page.fragment_plan(&self.data_root)
    }

    pub fn search_data_loaded(&self) -> bool {
        self.search_data.is_some()
    }

    /// Fetch the topic's flat search index on the first search
    /// interaction; afterwards the cached copy is reused for the life of
    /// the page view and filter-only interactions never refetch.
    pub async fn ensure_search_data(
        &mut self,
        source: &dyn FragmentSource,
        _event: SearchEvent,
    ) -> Result<&[ContentEntry], ViewError> {
        if self.search_data.is_none() {
            let FragmentPlan::Topic { search_index, .. } = self.fragment_plan() else {
                return Err(ViewError::NotSearchable);
            };
            let entries = fetch_entry_list(source, &search_index).await?;
            self.search_data = Some(entries);
        }
        Ok(self.search_data.as_deref().unwrap_or_default())
    }

    /// Run one search interaction end to end: lazy-load the index if
    /// needed, then apply the topic-page empty-term policy. `None` means
    /// the results display is cleared.
    pub async fn search(
        &mut self,
        source: &dyn FragmentSource,
        event: SearchEvent,
        term: &str,
        intent: SearchIntent,
    ) -> Result<Option<Vec<&ContentEntry>>, ViewError> {
        let data = self.ensure_search_data(source, event).await?;
        Ok(search_outcome(data, term, intent))
    }
}
