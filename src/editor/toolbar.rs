use dioxus::prelude::*;

use super::EditorTheme;

#[derive(Props, Clone, PartialEq)]
pub struct ToolbarProps {
    pub theme: EditorTheme,
    pub on_action: EventHandler<ToolbarAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Bold,
    Italic,
    Code,
    Heading(u8),
    BulletList,
    Quote,
    Link,
}

impl ToolbarAction {
    pub const ALL: [ToolbarAction; 8] = [
        ToolbarAction::Bold,
        ToolbarAction::Italic,
        ToolbarAction::Code,
        ToolbarAction::Heading(1),
        ToolbarAction::Heading(2),
        ToolbarAction::BulletList,
        ToolbarAction::Quote,
        ToolbarAction::Link,
    ];

    fn label(self) -> &'static str {
        match self {
            ToolbarAction::Bold => "B",
            ToolbarAction::Italic => "I",
            ToolbarAction::Code => "`",
            ToolbarAction::Heading(1) => "H1",
            ToolbarAction::Heading(_) => "H2",
            ToolbarAction::BulletList => "•",
            ToolbarAction::Quote => "❝",
            ToolbarAction::Link => "🔗",
        }
    }

    fn title(self) -> &'static str {
        match self {
            ToolbarAction::Bold => "Bold",
            ToolbarAction::Italic => "Italic",
            ToolbarAction::Code => "Inline code",
            ToolbarAction::Heading(1) => "Heading 1",
            ToolbarAction::Heading(_) => "Heading 2",
            ToolbarAction::BulletList => "Bullet list",
            ToolbarAction::Quote => "Blockquote",
            ToolbarAction::Link => "Link",
        }
    }
}

/// Applies a toolbar action to the selected character range, returning the
/// new text and where the cursor should land.
pub fn apply_action(content: &str, action: ToolbarAction, selection: (usize, usize)) -> (String, usize) {
    let chars: Vec<char> = content.chars().collect();
    let end = selection.1.min(chars.len());
    let start = selection.0.min(end);

    let before: String = chars[..start].iter().collect();
    let selected: String = chars[start..end].iter().collect();
    let after: String = chars[end..].iter().collect();

    let wrap = |marker: &str, placeholder: &str| {
        let inner = if selected.is_empty() { placeholder } else { selected.as_str() };
        let cursor = start + 2 * marker.chars().count() + inner.chars().count();
        (format!("{before}{marker}{inner}{marker}{after}"), cursor)
    };

    match action {
        ToolbarAction::Bold => wrap("**", "bold text"),
        ToolbarAction::Italic => wrap("_", "italic text"),
        ToolbarAction::Code => wrap("`", "code"),
        ToolbarAction::Link => {
            let inner = if selected.is_empty() { "link text" } else { selected.as_str() };
            let link = format!("[{inner}](https://)");
            let cursor = start + link.chars().count();
            (format!("{before}{link}{after}"), cursor)
        }
        ToolbarAction::Heading(_) | ToolbarAction::BulletList | ToolbarAction::Quote => {
            let prefix = match action {
                ToolbarAction::Heading(1) => "# ",
                ToolbarAction::Heading(_) => "## ",
                ToolbarAction::BulletList => "- ",
                _ => "> ",
            };
            // block prefixes go at the start of a line
            let leading = if !before.is_empty() && !before.ends_with('\n') { "\n" } else { "" };
            let cursor = start + leading.len() + prefix.chars().count() + selected.chars().count();
            (format!("{before}{leading}{prefix}{selected}{after}"), cursor)
        }
    }
}

/// Converts an offset in UTF-16 code units, as the DOM reports selections,
/// into the char index [`apply_action`] expects.
pub fn char_index(content: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (index, c) in content.chars().enumerate() {
        if units >= utf16_offset {
            return index;
        }
        units += c.len_utf16();
    }
    content.chars().count()
}

#[component]
pub fn Toolbar(props: ToolbarProps) -> Element {
    let palette = props.theme.palette();
    let style = format!(
        "display:flex;gap:0.25rem;padding:0.4rem 0.6rem;background:{};border:1px solid {};border-bottom:none;flex-wrap:wrap;",
        palette.toolbar, palette.border,
    );

    let class = format!("ql-toolbar {}", props.theme.class());

    rsx! {
        div { class: "{class}", style: "{style}",
            for action in ToolbarAction::ALL {
                ToolbarBtn { action, theme: props.theme, on_action: props.on_action }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ToolbarBtnProps {
    action: ToolbarAction,
    theme: EditorTheme,
    on_action: EventHandler<ToolbarAction>,
}

#[component]
fn ToolbarBtn(props: ToolbarBtnProps) -> Element {
    let palette = props.theme.palette();
    let style = format!(
        "padding:0.2rem 0.5rem;background:{};color:{};border:none;border-radius:3px;cursor:pointer;font-size:0.85rem;{}{}",
        palette.button,
        palette.text,
        if props.action == ToolbarAction::Bold { "font-weight:bold;" } else { "" },
        if props.action == ToolbarAction::Italic { "font-style:italic;" } else { "" },
    );
    let action = props.action;
    let label = action.label();

    rsx! {
        button {
            r#type: "button",
            style: "{style}",
            title: action.title(),
            onclick: move |_| props.on_action.call(action),
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_the_selection() {
        let (text, cursor) = apply_action("say hello now", ToolbarAction::Bold, (4, 9));
        assert_eq!(text, "say **hello** now");
        assert_eq!(cursor, 13);
    }

    #[test]
    fn empty_selection_gets_a_placeholder() {
        let (text, cursor) = apply_action("", ToolbarAction::Code, (0, 0));
        assert_eq!(text, "`code`");
        assert_eq!(cursor, 6);
    }

    #[test]
    fn block_actions_start_a_new_line() {
        let (text, _) = apply_action("intro", ToolbarAction::Heading(2), (5, 5));
        assert_eq!(text, "intro\n## ");

        let (text, _) = apply_action("first\n", ToolbarAction::BulletList, (6, 6));
        assert_eq!(text, "first\n- ");
    }

    #[test]
    fn selection_past_the_end_is_clamped() {
        let (text, cursor) = apply_action("héllo", ToolbarAction::Italic, (3, 40));
        assert_eq!(text, "hél_lo_");
        assert_eq!(cursor, 7);
    }

    #[test]
    fn dom_offsets_count_astral_chars_twice() {
        let content = "😀ab";
        assert_eq!(char_index(content, 0), 0);
        assert_eq!(char_index(content, 2), 1);
        assert_eq!(char_index(content, 4), 3);
        assert_eq!(char_index(content, 9), 3);

        let selection = (char_index(content, 2), char_index(content, 4));
        let (text, cursor) = apply_action(content, ToolbarAction::Bold, selection);
        assert_eq!(text, "😀**ab**");
        assert_eq!(cursor, 7);
    }

    #[test]
    fn links_use_selected_text() {
        let (text, _) = apply_action("docs", ToolbarAction::Link, (0, 4));
        assert_eq!(text, "[docs](https://)");
    }
}
