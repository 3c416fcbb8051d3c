//! HTML document that server-rendered pages are placed into.
//!
//! The shell is the client bundle's `index.html`, so a page rendered here
//! still loads the bundle's scripts and the web client takes over `#main`.

use std::path::Path;

use tracing::{info, warn};

const MOUNT: &str = r#"<div id="main">"#;

const BUILT_IN: &str = "<!DOCTYPE html>\
<html lang=\"en\">\
<head><meta charset=\"utf-8\"><title>Studyhall</title></head>\
<body><div id=\"main\"></div></body>\
</html>";

#[derive(Debug, Clone)]
pub struct PageShell {
    template: String,
}

impl Default for PageShell {
    fn default() -> Self {
        Self::new(BUILT_IN)
    }
}

impl PageShell {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Reads `index.html` from the client bundle directory, falling back to a
    /// bare document when there is no usable bundle.
    pub fn load(static_dir: impl AsRef<Path>) -> Self {
        let path = static_dir.as_ref().join("index.html");

        match std::fs::read_to_string(&path) {
            Ok(template) if template.contains(MOUNT) => {
                info!("Rendering pages into {}", path.display());
                Self::new(template)
            }
            Ok(_) => {
                warn!("{} has no {MOUNT} element, pages render without the client", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Cannot read {} ({e}), pages render without the client", path.display());
                Self::default()
            }
        }
    }

    pub fn render(&self, title: &str, body: &str) -> String {
        let mut page = self.template.clone();

        if let (Some(open), Some(close)) = (page.find("<title>"), page.find("</title>")) {
            let start = open + "<title>".len();
            if start <= close {
                page.replace_range(start..close, &format!("{title} | Studyhall"));
            }
        }

        if let Some(mount) = page.find(MOUNT) {
            page.insert_str(mount + MOUNT.len(), body);
        } else if let Some(end) = page.find("</body>") {
            page.insert_str(end, body);
        } else {
            page.push_str(body);
        }

        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE_INDEX: &str = r#"<!DOCTYPE html><html><head><title>studyhall</title><script type="module" src="/assets/studyhall.js"></script></head><body><div id="main"></div></body></html>"#;

    #[test]
    fn body_goes_into_the_mount_and_scripts_stay() {
        let page = PageShell::new(BUNDLE_INDEX).render("Note", "<article>n1</article>");

        assert!(page.contains(r#"<div id="main"><article>n1</article></div>"#), "{page}");
        assert!(page.contains(r#"src="/assets/studyhall.js""#), "{page}");
        assert!(page.contains("<title>Note | Studyhall</title>"), "{page}");
    }

    #[test]
    fn built_in_shell_is_a_complete_document() {
        let page = PageShell::default().render("Home", "<p>hi</p>");

        assert!(page.starts_with("<!DOCTYPE html>"), "{page}");
        assert!(page.contains(r#"<div id="main"><p>hi</p></div>"#), "{page}");
    }

    #[test]
    fn template_without_mount_gets_the_body_before_closing_tag() {
        let page = PageShell::new("<html><body></body></html>").render("X", "<p>x</p>");
        assert_eq!(page, "<html><body><p>x</p></body></html>");
    }

    #[test]
    fn missing_bundle_falls_back_to_the_built_in_shell() {
        let dir = tempfile::tempdir().unwrap();
        let page = PageShell::load(dir.path()).render("Home", "");
        assert!(page.contains(r#"<div id="main"></div>"#), "{page}");
    }

    #[test]
    fn bundle_index_is_loaded_from_the_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), BUNDLE_INDEX).unwrap();

        let page = PageShell::load(dir.path()).render("Tests", "<ul></ul>");
        assert!(page.contains(r#"src="/assets/studyhall.js""#), "{page}");
        assert!(page.contains(r#"<div id="main"><ul></ul></div>"#), "{page}");
    }
}
