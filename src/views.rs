//! Display components the dynamic routes hand their id to.
#![allow(non_snake_case)]

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::editor::RichTextEditor;

pub const TESTS_COLLECTION: &str = "tests";

const PAGE_STYLE: &str = "max-width:800px;margin:0 auto;padding:2rem;font-family:sans-serif;";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    pub id: String,
    pub title: Option<String>,
}

#[cfg(feature = "server")]
impl TestSummary {
    pub fn from_document(document: &crate::store::Document) -> Option<Self> {
        let id = crate::store::document_id(document)?;
        let title = document
            .get("title")
            .and_then(|title| title.as_str())
            .map(str::to_string);
        Some(Self { id, title })
    }
}

#[component]
pub fn NoteView(id: String) -> Element {
    rsx! {
        article { class: "note", "data-id": "{id}", style: PAGE_STYLE,
            h1 { "Note" }
            p { class: "record-id", "{id}" }
            RichTextEditor {}
        }
    }
}

#[component]
pub fn TestView(id: String) -> Element {
    rsx! {
        article { class: "test", "data-id": "{id}", style: PAGE_STYLE,
            h1 { "Test" }
            p { class: "record-id", "{id}" }
        }
    }
}

#[component]
pub fn SubmissionView(id: String) -> Element {
    rsx! {
        article { class: "submission", "data-id": "{id}", style: PAGE_STYLE,
            h1 { "Submission" }
            p { class: "record-id", "{id}" }
        }
    }
}

#[component]
pub fn TestsList(tests: Vec<TestSummary>) -> Element {
    rsx! {
        section { class: "tests", style: PAGE_STYLE,
            h1 { "Tests" }
            if tests.is_empty() {
                p { class: "empty", "No tests yet." }
            } else {
                ul {
                    for test in tests {
                        li { key: "{test.id}",
                            a { href: "/test/{test.id}",
                                {test.title.clone().unwrap_or_else(|| test.id.clone())}
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    fn render<P: Clone + Properties + 'static>(component: fn(P) -> Element, props: P) -> String {
        let mut dom = VirtualDom::new_with_props(component, props);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn test_view_carries_its_id() {
        let html = render(TestView, TestViewProps { id: "abc123".into() });
        assert!(html.contains(r#"data-id="abc123""#), "{html}");
        assert!(html.contains("<h1>Test</h1>"), "{html}");
    }

    #[test]
    fn note_view_embeds_the_editor() {
        let html = render(NoteView, NoteViewProps { id: "n-1".into() });
        assert!(html.contains(r#"data-id="n-1""#), "{html}");
        assert!(html.contains("editor-textarea"), "{html}");
    }

    #[test]
    fn tests_list_links_each_test() {
        let tests = vec![
            TestSummary { id: "t1".into(), title: Some("Midterm".into()) },
            TestSummary { id: "t2".into(), title: None },
        ];
        let html = render(TestsList, TestsListProps { tests });

        assert!(html.contains(r#"href="/test/t1""#), "{html}");
        assert!(html.contains("Midterm"), "{html}");
        assert!(html.contains(r#"href="/test/t2""#), "{html}");
    }

    #[test]
    fn empty_tests_list_says_so() {
        let html = render(TestsList, TestsListProps { tests: Vec::new() });
        assert!(html.contains("No tests yet."), "{html}");
    }

    #[test]
    fn summaries_read_id_and_optional_title() {
        let document = serde_json::json!({ "_id": "t9", "title": "Quiz" });
        let summary = TestSummary::from_document(document.as_object().unwrap()).unwrap();
        assert_eq!(summary, TestSummary { id: "t9".into(), title: Some("Quiz".into()) });

        let untitled = serde_json::json!({ "_id": "t10" });
        let summary = TestSummary::from_document(untitled.as_object().unwrap()).unwrap();
        assert_eq!(summary.title, None);
    }

    #[test]
    fn summaries_accept_mongo_object_ids() {
        let document = serde_json::json!({ "_id": { "$oid": "6ad34f6b3ab45a8a637e9303" }, "title": "Quiz" });
        let summary = TestSummary::from_document(document.as_object().unwrap()).unwrap();
        assert_eq!(summary.id, "6ad34f6b3ab45a8a637e9303");
    }
}
