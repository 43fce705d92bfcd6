use multiedit_engine::{BufferBackend, Converter, EditorMode, MultiEditor, wrap_delimited_pairs};
use pretty_assertions::assert_eq;

fn editor(mode: EditorMode, content: &str) -> MultiEditor<BufferBackend> {
    MultiEditor::new(BufferBackend, Converter::standard().unwrap(), mode, content)
}

/// A document with both kinds of math survives a tour of every mode.
#[test]
fn document_survives_tour_of_all_modes() {
    let source = "# Notes\n\nInline $a^2$ and more.\n\n$$\nx = 1\n$$";
    let mut editor = editor(EditorMode::Markdown, source);

    editor.apply_mode(EditorMode::Html);
    insta::assert_snapshot!(editor.content(), @r#"
    <h1>Notes</h1>
    <p>Inline <span class="math inline">a^2</span> and more.</p>
    <p><span class="math display">
    x = 1
    </span></p>
    "#);

    editor.apply_mode(EditorMode::Wysiwyg);
    editor.apply_mode(EditorMode::Markdown);
    assert_eq!(editor.content(), source);
}

#[test]
fn rich_editor_output_becomes_markdown() {
    let mut editor = editor(EditorMode::Wysiwyg, "");
    editor.edit(concat!(
        "<h2>Lists</h2>",
        "<ul><li><p>first</p></li><li><p>second <strong>bold</strong></p></li></ul>",
        "<p>water is H<sub>2</sub>O<br class=\"ProseMirror-trailingBreak\"></p>",
        "<p></p>",
    ));
    editor.apply_mode(EditorMode::Markdown);

    insta::assert_snapshot!(editor.content(), @r"
    ## Lists

    - first
    - second **bold**

    water is H~2~O
    ");
}

#[test]
fn gather_info_from_html_mode_is_the_source() {
    let mut editor = editor(EditorMode::Markdown, "*hi*");
    editor.apply_mode(EditorMode::Html);
    let info = editor.gather_info();
    assert_eq!(info.mode, Some(EditorMode::Html));
    assert_eq!(info.html, info.content);
    assert_eq!(info.html, "<p><em>hi</em></p>\n");
}

#[test]
fn public_pair_wrapper_examples() {
    let wrap = |text: &str| wrap_delimited_pairs(text, r"\$", "<i>", "</i>", 1).unwrap();

    assert_eq!(
        wrap_delimited_pairs("a $$b$$ c", r"\$\$", "<div>", "</div>", 2).unwrap(),
        "a <div>b</div> c"
    );
    assert_eq!(wrap(r"a \$b$ c"), r"a \$b$ c");
    assert_eq!(wrap("$x$ $y$"), "<i>x</i> <i>y</i>");
    assert_eq!(wrap(r"\$$a$"), r"\$<i>a</i>");
}
