#![allow(non_snake_case)]
pub mod content;
pub mod toolbar;

use dioxus::prelude::*;

pub use content::EditorContent;
use toolbar::{apply_action, Toolbar, ToolbarAction};
#[cfg(feature = "web")]
use toolbar::char_index;

/// Theme every editor on the site is rendered with.
pub const EDITOR_THEME: EditorTheme = EditorTheme::Snow;

const TEXTAREA_ID: &str = "editor-textarea";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorTheme {
    Snow,
}

pub struct Palette {
    pub toolbar: &'static str,
    pub button: &'static str,
    pub text: &'static str,
    pub border: &'static str,
    pub surface: &'static str,
}

impl EditorTheme {
    pub fn class(self) -> &'static str {
        match self {
            EditorTheme::Snow => "ql-snow",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            EditorTheme::Snow => Palette {
                toolbar: "#ffffff",
                button: "#f3f3f3",
                text: "#444444",
                border: "#cccccc",
                surface: "#ffffff",
            },
        }
    }
}

// selection of the textarea in chars, end of text when there is no DOM.
// The DOM counts UTF-16 code units.

#[cfg(feature = "web")]
fn selection(content: &str) -> (usize, usize) {
    use wasm_bindgen::JsCast;

    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(TEXTAREA_ID))
        .and_then(|element| element.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
        .map(|textarea| {
            let start = textarea.selection_start().ok().flatten().unwrap_or(0);
            let end = textarea.selection_end().ok().flatten().unwrap_or(start);
            (char_index(content, start as usize), char_index(content, end as usize))
        })
        .unwrap_or_else(|| end_of(content))
}

#[cfg(not(feature = "web"))]
fn selection(content: &str) -> (usize, usize) {
    end_of(content)
}

fn end_of(content: &str) -> (usize, usize) {
    let len = content.chars().count();
    (len, len)
}

/// Editor bound to a piece of local state. Every change event replaces the
/// state with the editor's value; nothing is persisted.
#[component]
pub fn RichTextEditor() -> Element {
    let mut content = use_signal(EditorContent::new);
    let theme = EDITOR_THEME;
    let palette = theme.palette();

    let handle_input = move |e: Event<FormData>| {
        content.write().on_change(e.value());
    };

    let handle_toolbar = move |action: ToolbarAction| {
        let current = content.read().value().to_string();
        let (next, _) = apply_action(&current, action, selection(&current));
        content.write().on_change(next);
    };

    let class = format!("ql-container {}", theme.class());
    let style = format!(
        "width:100%;min-height:12rem;padding:0.75rem;box-sizing:border-box;border:1px solid {};background:{};color:{};font-family:'Helvetica Neue',Helvetica,Arial,sans-serif;font-size:14px;line-height:1.5;resize:vertical;outline:none;",
        palette.border, palette.surface, palette.text,
    );
    let value = content.read().value().to_string();

    rsx! {
        div { class: "rich-text-editor",
            Toolbar { theme, on_action: handle_toolbar }
            textarea {
                id: TEXTAREA_ID,
                class: "{class}",
                style: "{style}",
                value: "{value}",
                oninput: handle_input,
            }
        }
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[test]
    fn renders_empty_with_the_fixed_theme() {
        let mut dom = VirtualDom::new(RichTextEditor);
        dom.rebuild_in_place();
        let html = dioxus_ssr::render(&dom);

        assert!(html.contains("ql-container ql-snow"), "{html}");
        assert!(html.contains("ql-toolbar ql-snow"), "{html}");
        assert!(html.contains(r#"id="editor-textarea""#), "{html}");
    }

    #[test]
    fn site_theme_is_snow() {
        assert_eq!(EDITOR_THEME, EditorTheme::Snow);
        assert_eq!(EDITOR_THEME.class(), "ql-snow");
    }
}
