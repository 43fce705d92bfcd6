//! Mode switching for a single editable document.
//!
//! The actual editing widgets live outside this crate. [`EditorBackend`]
//! mounts them and hands back an [`EditorSurface`] to read the document
//! from; [`MultiEditor`] decides which conversion runs when the mode
//! changes and owns whichever surface is currently mounted.

use std::sync::OnceLock;

use regex::Regex;

use crate::{Converter, EditorMode};

/// A mounted editor instance.
pub trait EditorSurface {
    fn contents(&self) -> String;
    fn set_contents(&mut self, contents: &str);
}

/// Creates editor surfaces.
pub trait EditorBackend {
    /// Mounts a plain-text source editor. `extension` is `md` or `html`.
    fn mount_text(&mut self, extension: &str, contents: &str) -> Box<dyn EditorSurface>;
    /// Mounts a rich-text editor initialised from `html`.
    fn mount_rich(&mut self, html: &str) -> Box<dyn EditorSurface>;
}

/// An in-memory surface that stores exactly what it is given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSurface {
    contents: String,
}

impl BufferSurface {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }
}

impl EditorSurface for BufferSurface {
    fn contents(&self) -> String {
        self.contents.clone()
    }

    fn set_contents(&mut self, contents: &str) {
        self.contents = contents.to_string();
    }
}

/// Headless backend mounting [`BufferSurface`]s for both editor kinds.
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferBackend;

impl EditorBackend for BufferBackend {
    fn mount_text(&mut self, _extension: &str, contents: &str) -> Box<dyn EditorSurface> {
        Box::new(BufferSurface::new(contents))
    }

    fn mount_rich(&mut self, html: &str) -> Box<dyn EditorSurface> {
        Box::new(BufferSurface::new(html))
    }
}

/// Snapshot of the editor for whoever submits the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorInfo {
    pub mode: Option<EditorMode>,
    pub content: String,
    /// The content as HTML: rendered in Markdown mode, as is otherwise.
    pub html: String,
}

struct Mounted {
    mode: EditorMode,
    surface: Box<dyn EditorSurface>,
}

pub struct MultiEditor<B: EditorBackend> {
    backend: B,
    converter: Converter,
    start_content: String,
    mounted: Option<Mounted>,
}

impl<B: EditorBackend> MultiEditor<B> {
    /// Creates the editor and mounts `mode` with `content` unconverted.
    pub fn new(
        backend: B,
        converter: Converter,
        mode: EditorMode,
        content: impl Into<String>,
    ) -> Self {
        let mut editor = Self {
            backend,
            converter,
            start_content: content.into(),
            mounted: None,
        };
        editor.apply_mode(mode);
        editor
    }

    pub fn mode(&self) -> Option<EditorMode> {
        self.mounted.as_ref().map(|mounted| mounted.mode)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current document in the representation of the shown mode.
    ///
    /// Rich-editor HTML is cleaned of the trailing-break placeholders and
    /// empty paragraphs the editor inserts for caret placement.
    pub fn content(&self) -> String {
        match &self.mounted {
            None => self.start_content.clone(),
            Some(Mounted {
                mode: EditorMode::Wysiwyg,
                surface,
            }) => clean_rich_html(&surface.contents()),
            Some(Mounted { surface, .. }) => surface.contents(),
        }
    }

    /// Replaces the contents of the mounted surface, as a user edit would.
    ///
    /// Returns false when nothing is mounted.
    pub fn edit(&mut self, contents: &str) -> bool {
        match &mut self.mounted {
            Some(mounted) => {
                mounted.surface.set_contents(contents);
                true
            }
            None => false,
        }
    }

    /// Switches to `mode`, converting the current content on the way.
    ///
    /// Leaving Markdown renders it to HTML. Entering Markdown from either
    /// HTML-based mode converts back. WYSIWYG and HTML source share the
    /// same representation, so switching between them converts nothing.
    pub fn apply_mode(&mut self, mode: EditorMode) {
        let old = self.mode();
        if old == Some(mode) {
            return;
        }

        let mut content = self.content();
        if old == Some(EditorMode::Markdown) {
            content = self.converter.markdown_to_html(&content);
        } else if old.is_some_and(EditorMode::is_html) && mode == EditorMode::Markdown {
            content = self.converter.html_to_markdown(&content);
        }
        log::debug!(
            "switching editor from {} to {mode}",
            old.map_or("none", EditorMode::as_str)
        );

        self.mounted = None;
        let surface = match mode {
            EditorMode::Wysiwyg => self.backend.mount_rich(&content),
            EditorMode::Markdown | EditorMode::Html => {
                self.backend.mount_text(mode.as_str(), &content)
            }
        };
        self.mounted = Some(Mounted { mode, surface });
    }

    pub fn gather_info(&self) -> EditorInfo {
        let mode = self.mode();
        let content = self.content();
        let html = if mode == Some(EditorMode::Markdown) {
            self.converter.markdown_to_html(&content)
        } else {
            content.clone()
        };
        EditorInfo {
            mode,
            content,
            html,
        }
    }
}

fn clean_rich_html(html: &str) -> String {
    static EMPTY_PARAGRAPH: OnceLock<Regex> = OnceLock::new();
    let empty_paragraph = EMPTY_PARAGRAPH
        .get_or_init(|| Regex::new(r"<p>\s*</p>").expect("Invalid empty paragraph regex"));

    let html = html.replace(r#"<br class="ProseMirror-trailingBreak">"#, "");
    empty_paragraph.replace_all(&html, "").into_owned()
}
