use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::filter::SearchIntent;
use crate::loader::{fetch_entry, fetch_entry_list, fetch_name_list, FragmentSource, LoadError};
use crate::page::{parse_page_path, FragmentPlan, PageDescriptor};
use crate::render::{
    self, button_list, entry_card_list, entry_detail, UiNode, PLACEHOLDER_IMAGE,
};
use crate::render::text::{render_lines, DEFAULT_WIDTH};
use crate::view::{Container, PageViewState, SearchEvent};

struct ArchiveFixture {
    fragments: HashMap<String, Value>,
}

#[async_trait]
impl FragmentSource for ArchiveFixture {
    async fn fetch_json(&self, url: &str) -> Result<Value, LoadError> {
        self.fragments
            .get(url)
            .cloned()
            .ok_or_else(|| LoadError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

fn archive() -> ArchiveFixture {
    ArchiveFixture {
        fragments: HashMap::from([
            (
                "/datasets/content/topics.json".to_string(),
                json!(["Software", "Movies"]),
            ),
            (
                "/datasets/content/software/software-categories.json".to_string(),
                json!(["Games", "Operating Systems"]),
            ),
            (
                "/datasets/content/software.json".to_string(),
                json!([
                    {"name": "Document Viewer", "category": "Office", "year": 2001},
                    {"name": "Open World", "category": "Games", "year": 2004},
                    {"name": "docx Tool", "category": "Office"}
                ]),
            ),
            (
                "/datasets/content/software/games.json".to_string(),
                json!([
                    {"name": "Open World", "type": "game", "year": 2004,
                     "file_size": 700, "data_metric": "MB"},
                    {"name": "Puzzle Pack", "type": "game", "year": 1999}
                ]),
            ),
            (
                "/datasets/content/software/games/open-world.json".to_string(),
                json!({
                    "name": "Open World", "type": "game", "year": 2004,
                    "file_size": 700, "data_metric": "MB",
                    "source_link": "https://example.com/open-world",
                    "screenshot_path": "/media/software/games/open-world.jpg"
                }),
            ),
        ]),
    }
}

#[tokio::test]
async fn topic_list_page_renders_topic_buttons() {
    let src = archive();
    let page = parse_page_path("/content/", "/content").unwrap();
    let FragmentPlan::TopicList { topics } = page.fragment_plan("/datasets/content") else {
        panic!("topic list page must plan the topics fragment");
    };
    let names = fetch_name_list(&src, &topics).await.unwrap();
    let UiNode::Column(buttons) = button_list(&names) else {
        panic!("button list must be a column");
    };
    assert_eq!(buttons.len(), 2);
    assert_eq!(
        buttons[1],
        UiNode::Button {
            label: "Movies".to_string(),
            target: "movies".to_string(),
        }
    );
}

#[tokio::test]
async fn category_page_renders_cards_from_its_fragment() {
    colored::control::set_override(false);
    let src = archive();
    let page = parse_page_path("/content/Software/Games.html", "/content").unwrap();
    let FragmentPlan::Category { entries } = page.fragment_plan("/datasets/content") else {
        panic!("category page must plan the entry list fragment");
    };
    let list = fetch_entry_list(&src, &entries).await.unwrap();
    let refs: Vec<&crate::model::ContentEntry> = list.iter().collect();
    let lines = render_lines(&entry_card_list(&refs, false), DEFAULT_WIDTH);
    // two cards, two lines each
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("Open World"));
    assert!(lines[0].trim_end().ends_with("700 MB"));
    assert!(lines[2].contains("Puzzle Pack"));
    assert!(lines[2].trim_end().ends_with("N/A"));
}

#[tokio::test]
async fn entry_page_renders_detail_with_screenshot() {
    let src = archive();
    let page = parse_page_path("/content/software/games/open-world.html", "/content").unwrap();
    let FragmentPlan::Entry { entry } = page.fragment_plan("/datasets/content") else {
        panic!("entry page must plan the single entry fragment");
    };
    let record = fetch_entry(&src, &entry).await.unwrap();
    let UiNode::Row { right, .. } = entry_detail(&record) else {
        panic!("detail must be a two-cell row");
    };
    assert_eq!(
        *right,
        UiNode::Image {
            src: "/media/software/games/open-world.jpg".to_string(),
            fallback: PLACEHOLDER_IMAGE.to_string(),
        }
    );
}

#[tokio::test]
async fn topic_page_search_loads_the_index_once_and_filters() {
    let src = archive();
    let page = parse_page_path("/content/software.html", "/content").unwrap();
    assert_eq!(
        page,
        PageDescriptor::Topic {
            topic: "software".to_string()
        }
    );
    let mut view = PageViewState::new(page, "/datasets/content");

    let hits = view
        .search(&src, SearchEvent::Trigger, "doc", SearchIntent::Forced)
        .await
        .unwrap()
        .unwrap();
    let names: Vec<&str> = hits.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Document Viewer", "docx Tool"]);
    assert!(view.search_data_loaded());

    let cleared = view
        .search(&src, SearchEvent::Keystroke, "", SearchIntent::Erased)
        .await
        .unwrap();
    assert!(cleared.is_none());
}

#[test]
fn malformed_page_path_plans_no_fetch() {
    assert!(parse_page_path("/content/a/b/c/d.html", "/content").is_err());
    assert!(parse_page_path("/media/software.html", "/content").is_err());
}

#[tokio::test]
async fn failed_fragment_fetch_becomes_a_dismissable_error_panel() {
    colored::control::set_override(false);
    let src = archive();
    let mut container = Container::new("entries");
    container.begin_loading("entries");
    let err = fetch_entry_list(&src, "/datasets/content/software/missing.json")
        .await
        .unwrap_err();
    container.fail(&err);
    let lines = render_lines(container.content().unwrap(), DEFAULT_WIDTH);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("404"));
    assert!(lines[0].contains("[dismiss]"));
}

#[tokio::test]
async fn shape_errors_surface_like_network_errors() {
    let src = ArchiveFixture {
        fragments: HashMap::from([(
            "/datasets/content/software/games.json".to_string(),
            json!({"name": "not a list"}),
        )]),
    };
    let err = fetch_entry_list(&src, "/datasets/content/software/games.json")
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Shape { .. }));
    let mut container = Container::new("entries");
    container.fail(&err);
    assert!(matches!(
        container.content(),
        Some(UiNode::ErrorPanel { .. })
    ));
}

#[test]
fn loading_indicator_is_replaced_by_results() {
    let mut container = Container::new("topics");
    container.begin_loading("topics");
    assert!(matches!(container.content(), Some(UiNode::Loading(_))));
    container.show(render::button_list(&["Software".to_string()]));
    assert!(matches!(container.content(), Some(UiNode::Column(_))));
}
