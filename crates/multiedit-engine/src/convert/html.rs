use scraper::{ElementRef, Html, Node};

/// Converts an HTML fragment, as produced by the rich editor or typed in
/// HTML mode, back to Markdown.
///
/// Math spans (`span.math.inline`, `span.math.display`) become `$...$` and
/// `$$` blocks, `sub`/`sup` become `~x~`/`^x^`, and `script`/`style`
/// elements are kept verbatim. Elements with no Markdown form contribute
/// their children only.
pub fn html_to_markdown(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    tidy(&render_children(fragment.root_element()))
}

fn render_children(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&render_text(text)),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    out.push_str(&render_element(child));
                }
            }
            _ => {}
        }
    }
    out
}

fn render_text(text: &str) -> String {
    escape_markdown(&collapse_whitespace(text))
}

fn render_element(element: ElementRef<'_>) -> String {
    let el = element.value();
    let name = el.name();
    let has_class = |class: &str| el.classes().any(|c| c == class);

    match name {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = usize::from(name.as_bytes()[1] - b'0');
            let inner = render_children(element);
            block(&format!("{} {}", "#".repeat(level), inner.trim()))
        }
        "p" | "div" => block(render_children(element).trim()),
        "br" => "\\\n".to_string(),
        "hr" => block("---"),
        "em" | "i" => wrap_inline(&render_children(element), "*", "*"),
        "strong" | "b" => wrap_inline(&render_children(element), "**", "**"),
        "del" | "s" | "strike" => wrap_inline(&render_children(element), "~~", "~~"),
        "sub" => wrap_inline(&render_children(element), "~", "~"),
        "sup" => wrap_inline(&render_children(element), "^", "^"),
        "u" => format!("<u>{}</u>", render_children(element)),
        "span" if has_class("math") && has_class("display") => {
            let tex: String = element.text().collect();
            format!("\n$$\n{}\n$$\n", tex.trim())
        }
        "span" if has_class("math") && has_class("inline") => {
            let tex: String = element.text().collect();
            format!("${tex}$")
        }
        "code" => code_span(&element.text().collect::<String>()),
        "pre" => code_block(element),
        "a" => {
            let inner = render_children(element);
            match el.attr("href") {
                Some(href) => {
                    let href = link_destination(href);
                    match el.attr("title") {
                        Some(title) => format!("[{inner}]({href} \"{}\")", link_title(title)),
                        None => format!("[{inner}]({href})"),
                    }
                }
                None => inner,
            }
        }
        "img" => {
            let alt = el.attr("alt").unwrap_or_default();
            let src = link_destination(el.attr("src").unwrap_or_default());
            format!("![{alt}]({src})")
        }
        "ul" | "ol" => list(element, name == "ol"),
        "blockquote" => {
            let inner = tidy(&render_children(element));
            let quoted: Vec<String> = inner
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        ">".to_string()
                    } else {
                        format!("> {line}")
                    }
                })
                .collect();
            block(&quoted.join("\n"))
        }
        "script" | "style" => block(&element.html()),
        _ => render_children(element),
    }
}

fn code_block(element: ElementRef<'_>) -> String {
    let language = element
        .children()
        .filter_map(ElementRef::wrap)
        .find(|child| child.value().name() == "code")
        .and_then(|code| {
            code.value()
                .classes()
                .find_map(|class| class.strip_prefix("language-"))
                .map(str::to_string)
        })
        .unwrap_or_default();

    let code: String = element.text().collect();
    let fence = "`".repeat(longest_backtick_run(&code).max(2) + 1);

    block(&format!(
        "{fence}{language}\n{}\n{fence}",
        code.trim_end_matches('\n')
    ))
}

fn list(element: ElementRef<'_>, ordered: bool) -> String {
    let mut number: usize = element
        .value()
        .attr("start")
        .and_then(|start| start.parse().ok())
        .unwrap_or(1);

    let mut items = Vec::new();
    for item in element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
    {
        let prefix = if ordered {
            let prefix = format!("{number}. ");
            number += 1;
            prefix
        } else {
            "- ".to_string()
        };
        let content = collapse_blank_lines(&tidy(&render_children(item)), 0);
        let indent = " ".repeat(prefix.len());
        let mut lines = content.lines();
        let mut rendered = format!("{prefix}{}", lines.next().unwrap_or_default());
        for line in lines {
            rendered.push('\n');
            if !line.is_empty() {
                rendered.push_str(&indent);
                rendered.push_str(line);
            }
        }
        items.push(rendered);
    }
    block(&items.join("\n"))
}

fn block(content: &str) -> String {
    format!("\n\n{content}\n\n")
}

/// Wraps `inner` in emphasis-style delimiters, keeping surrounding
/// whitespace outside them so the delimiters stay flanking.
fn wrap_inline(inner: &str, left: &str, right: &str) -> String {
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return inner.to_string();
    }
    let leading = &inner[..inner.len() - inner.trim_start().len()];
    let trailing = &inner[inner.trim_end().len()..];
    format!("{leading}{left}{trimmed}{right}{trailing}")
}

fn code_span(code: &str) -> String {
    let ticks = "`".repeat(longest_backtick_run(code) + 1);
    if code.contains('`') {
        format!("{ticks} {code} {ticks}")
    } else {
        format!("{ticks}{code}{ticks}")
    }
}

fn longest_backtick_run(text: &str) -> usize {
    text.split(|c: char| c != '`').map(str::len).max().unwrap_or(0)
}

/// Angle-brackets a link destination that would otherwise end early.
fn link_destination(url: &str) -> String {
    if url.contains(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>')) {
        format!("<{}>", url.replace('<', "\\<").replace('>', "\\>"))
    } else {
        url.to_string()
    }
}

fn link_title(title: &str) -> String {
    title.replace('\\', "\\\\").replace('"', "\\\"")
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '`' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    escape_block_syntax(&out)
}

/// Escapes the character that would make `text` open a heading, quote,
/// list item, setext underline or tilde fence when it starts a line.
fn escape_block_syntax(text: &str) -> String {
    let body = text.trim_start();
    let indent = &text[..text.len() - body.len()];
    match block_marker(body) {
        Some(at) => format!("{indent}{}\\{}", &body[..at], &body[at..]),
        None => text.to_string(),
    }
}

/// Byte offset of the character to escape, if `text` starts with block syntax.
fn block_marker(text: &str) -> Option<usize> {
    let ends_marker = |rest: &str| rest.is_empty() || rest.starts_with(' ');
    let hashes = text.len() - text.trim_start_matches('#').len();
    let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();

    if text.starts_with(['-', '=', '>']) || text.starts_with("~~~") {
        Some(0)
    } else if text.starts_with('+') && ends_marker(&text[1..]) {
        Some(0)
    } else if (1..=6).contains(&hashes) && ends_marker(&text[hashes..]) {
        Some(0)
    } else if digits > 0
        && text[digits..].starts_with(['.', ')'])
        && ends_marker(&text[digits + 1..])
    {
        Some(digits)
    } else {
        None
    }
}

/// Strips trailing whitespace from every line, collapses runs of blank
/// lines and trims the result. Fenced code is left untouched.
fn tidy(markdown: &str) -> String {
    collapse_blank_lines(markdown, 1).trim().to_string()
}

/// Keeps at most `max_blank` consecutive blank lines outside fenced code
/// and strips trailing whitespace there. Lines inside a fence are copied
/// as they are.
fn collapse_blank_lines(markdown: &str, max_blank: usize) -> String {
    let mut lines = Vec::new();
    let mut fence = None;
    let mut blank_run = 0;
    for line in markdown.lines() {
        if let Some(ticks) = fence {
            if closes_fence(line, ticks) {
                fence = None;
            }
            lines.push(line);
            continue;
        }

        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > max_blank {
                continue;
            }
        } else {
            blank_run = 0;
            fence = opening_fence(line);
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Backtick count of the code fence `line` opens, if it opens one.
fn opening_fence(line: &str) -> Option<usize> {
    let line = strip_container_markers(line);
    let ticks = line.len() - line.trim_start_matches('`').len();
    (ticks >= 3 && !line[ticks..].contains('`')).then_some(ticks)
}

fn closes_fence(line: &str, ticks: usize) -> bool {
    let line = strip_container_markers(line).trim_end();
    line.len() >= ticks && line.bytes().all(|b| b == b'`')
}

/// Drops the indentation, `>` quote markers and list markers in front of
/// a line's content.
fn strip_container_markers(mut line: &str) -> &str {
    loop {
        let rest = line.trim_start_matches([' ', '>']);
        let rest = rest.strip_prefix("- ").unwrap_or(rest);
        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        let rest = match rest[digits..].strip_prefix(". ") {
            Some(after) if digits > 0 => after,
            _ => rest,
        };
        if rest.len() == line.len() {
            return line;
        }
        line = rest;
    }
}
