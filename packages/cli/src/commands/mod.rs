mod edit;
mod init;
mod page;
mod render;

pub use edit::{
    add, move_element, remove, resize, style, text, AddArgs, MoveArgs, RemoveArgs, ResizeArgs,
    StyleArgs, TextArgs,
};
pub use init::{init, InitArgs};
pub use page::{inspect, list, new_page, palette, validate, InspectArgs, NewArgs, ValidateArgs};
pub use render::{render, RenderArgs};

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use pagecraft_editor::{DocumentStore, Editor, FileStore, StoreError};

/// Open an existing page for editing
pub(crate) fn open_page(config: &Config, cwd: &str, page: &str) -> Result<(Editor, FileStore)> {
    let store = config.store(cwd);
    let json = match store.load(page) {
        Ok(json) => json,
        Err(StoreError::NotFound(_)) => {
            return Err(anyhow!("Page not found: {} (create it with `pagecraft new {}`)", page, page))
        }
        Err(e) => return Err(e.into()),
    };

    let mut editor = Editor::with_config(page, config.geometry);
    editor
        .hydrate(&json, false)
        .with_context(|| format!("Failed to load page {}", page))?;
    Ok((editor, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_editor::{ResizeHandle, Selection};
    use pagecraft_model::{ElementType, BODY_ID};

    fn project() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        new_page(
            NewArgs {
                page: "landing".to_string(),
                force: false,
            },
            &cwd,
        )
        .unwrap();
        (dir, cwd)
    }

    fn reload(cwd: &str) -> Editor {
        let config = Config::load(cwd).unwrap();
        open_page(&config, cwd, "landing").unwrap().0
    }

    fn add_container(cwd: &str) -> String {
        add(
            AddArgs {
                page: "landing".to_string(),
                component: "container".to_string(),
                into: BODY_ID.to_string(),
                src: None,
            },
            cwd,
        )
        .unwrap();
        reload(cwd).state().elements.children().unwrap()[0].id.clone()
    }

    #[test]
    fn test_new_page_refuses_overwrite() {
        let (_dir, cwd) = project();
        let again = new_page(
            NewArgs {
                page: "landing".to_string(),
                force: false,
            },
            &cwd,
        );
        assert!(again.is_err());
    }

    #[test]
    fn test_missing_page_is_an_error() {
        let (_dir, cwd) = project();
        let config = Config::load(&cwd).unwrap();
        assert!(open_page(&config, &cwd, "nowhere").is_err());
    }

    #[test]
    fn test_add_style_and_remove() {
        let (_dir, cwd) = project();
        let id = add_container(&cwd);

        style(
            StyleArgs {
                page: "landing".to_string(),
                element: id.clone(),
                property: "backgroundColor".to_string(),
                value: Some("navy".to_string()),
            },
            &cwd,
        )
        .unwrap();
        let editor = reload(&cwd);
        let element = editor.state().find(&id).unwrap();
        assert_eq!(element.kind, ElementType::Container);
        assert_eq!(element.styles.get("backgroundColor").map(String::as_str), Some("navy"));

        remove(
            RemoveArgs {
                page: "landing".to_string(),
                element: id.clone(),
            },
            &cwd,
        )
        .unwrap();
        assert!(reload(&cwd).state().find(&id).is_none());
    }

    #[test]
    fn test_move_then_resize() {
        let (_dir, cwd) = project();
        let id = add_container(&cwd);

        move_element(
            MoveArgs {
                page: "landing".to_string(),
                element: id.clone(),
                dx: 40.0,
                dy: 10.0,
            },
            &cwd,
        )
        .unwrap();
        resize(
            ResizeArgs {
                page: "landing".to_string(),
                element: id.clone(),
                handle: ResizeHandle::East,
                dx: 30.0,
                dy: 0.0,
            },
            &cwd,
        )
        .unwrap();

        let editor = reload(&cwd);
        let geometry = editor.state().find(&id).unwrap().geometry;
        assert_eq!(geometry.transform(), "translate(40px, 10px)");
        assert_eq!(geometry.width, Some(80.0));
        assert_eq!(editor.state().selected, Selection::Empty);
    }

    #[test]
    fn test_move_by_nan_is_refused() {
        let (_dir, cwd) = project();
        let id = add_container(&cwd);

        let result = move_element(
            MoveArgs {
                page: "landing".to_string(),
                element: id.clone(),
                dx: f64::NAN,
                dy: 0.0,
            },
            &cwd,
        );
        assert!(result.is_err());

        let editor = reload(&cwd);
        assert!(editor.state().find(&id).unwrap().geometry.is_finite());
    }

    #[test]
    fn test_text_and_render() {
        let (dir, cwd) = project();
        add(
            AddArgs {
                page: "landing".to_string(),
                component: "text".to_string(),
                into: BODY_ID.to_string(),
                src: None,
            },
            &cwd,
        )
        .unwrap();
        let id = reload(&cwd).state().elements.children().unwrap()[0].id.clone();

        text(
            TextArgs {
                page: "landing".to_string(),
                element: id,
                text: "Welcome <friends>".to_string(),
            },
            &cwd,
        )
        .unwrap();

        render(
            RenderArgs {
                page: "landing".to_string(),
                device: None,
                out: Some("landing.html".into()),
                select: None,
                fragment: false,
                compact: false,
            },
            &cwd,
        )
        .unwrap();

        let html = std::fs::read_to_string(dir.path().join("landing.html")).unwrap();
        assert!(html.contains("<title>landing</title>"));
        assert!(html.contains("Welcome &lt;friends&gt;"));
        assert!(!html.contains("pagecraft-badge"));
    }
}
