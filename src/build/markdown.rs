//! Markdown rendering with syntax highlighting and TOC extraction.

use std::collections::HashSet;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use serde::Serialize;

use super::highlight::SyntaxHighlighter;
use crate::config::MarkdownConfig;
use crate::util::html_escape;

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    /// The heading text
    pub text: String,
    /// The heading id (for anchor links)
    pub id: String,
    /// The heading level (1-6)
    pub level: u8,
}

/// Result of rendering markdown.
#[derive(Debug)]
pub struct MarkdownOutput {
    pub html: String,
    /// Headings in document order
    #[allow(dead_code)]
    pub toc: Vec<TocEntry>,
    /// Nested `<ul>` rendering of `toc`, empty when there are no headings
    pub toc_html: String,
}

/// Translate configured extension names into parser options.
pub fn markdown_options(config: &MarkdownConfig) -> Result<Options, MarkdownError> {
    let mut options = Options::empty();
    for extension in &config.extensions {
        match extension.as_str() {
            "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
            "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
            "gfm" => options.insert(Options::ENABLE_GFM),
            "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
            "smart_punctuation" => options.insert(Options::ENABLE_SMART_PUNCTUATION),
            "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
            "tables" => options.insert(Options::ENABLE_TABLES),
            "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
            other => return Err(MarkdownError::InvalidExtension(other.to_string())),
        }
    }
    Ok(options)
}

struct HeadingState<'a> {
    level: HeadingLevel,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
    text: String,
    inner: Vec<Event<'a>>,
}

struct CodeState {
    language: String,
    content: String,
}

/// Render markdown to HTML, highlighting code blocks and anchoring headings.
pub fn render_markdown(
    markdown: &str,
    options: Options,
    highlighter: &SyntaxHighlighter,
) -> MarkdownOutput {
    let parser = Parser::new_ext(markdown, options);

    let mut events: Vec<Event> = Vec::new();
    let mut heading: Option<HeadingState> = None;
    let mut code: Option<CodeState> = None;
    let mut used_ids: HashSet<String> = HashSet::new();
    let mut toc: Vec<TocEntry> = Vec::new();

    for event in parser {
        if let Some(state) = code.as_mut() {
            match &event {
                Event::Text(text) => {
                    state.content.push_str(text);
                    continue;
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted = highlighter.highlight(&state.content, &state.language);
                    code = None;
                    events.push(Event::Html(highlighted.into()));
                    continue;
                }
                _ => {}
            }
        }

        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                heading = Some(HeadingState {
                    level,
                    id: id.map(|id| id.to_string()),
                    classes: classes.iter().map(|c| c.to_string()).collect(),
                    attrs: attrs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.as_ref().map(|v| v.to_string())))
                        .collect(),
                    text: String::new(),
                    inner: Vec::new(),
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(state) = heading.take() {
                    let html = finish_heading(state, &mut used_ids, &mut toc);
                    events.push(Event::Html(html.into()));
                }
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or_default().to_string()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                code = Some(CodeState {
                    language,
                    content: String::new(),
                });
            }
            other => match heading.as_mut() {
                Some(state) => {
                    if let Event::Text(text) | Event::Code(text) = &other {
                        state.text.push_str(text);
                    }
                    state.inner.push(other);
                }
                None => events.push(other),
            },
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());

    let toc_html = toc_html(&toc);
    MarkdownOutput {
        html: html_output,
        toc,
        toc_html,
    }
}

/// Emit a heading with a unique id and record it in the TOC.
fn finish_heading(
    state: HeadingState,
    used_ids: &mut HashSet<String>,
    toc: &mut Vec<TocEntry>,
) -> String {
    let id = match state.id {
        Some(explicit) => explicit,
        None => unique_id(&slugify(&state.text), used_ids),
    };
    used_ids.insert(id.clone());

    let level = state.level as u8;
    toc.push(TocEntry {
        text: state.text.trim().to_string(),
        id: id.clone(),
        level,
    });

    let class_attr = if state.classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", html_escape(&state.classes.join(" ")))
    };
    let extra_attrs = state
        .attrs
        .iter()
        .map(|(k, v)| match v {
            Some(val) => format!(" {}=\"{}\"", k, html_escape(val)),
            None => format!(" {}", k),
        })
        .collect::<String>();

    let mut inner_html = String::new();
    html::push_html(&mut inner_html, state.inner.into_iter());

    format!(
        "<h{level} id=\"{id}\"{class_attr}{extra_attrs}>{inner_html}</h{level}>\n",
        id = html_escape(&id),
    )
}

fn unique_id(base: &str, used_ids: &HashSet<String>) -> String {
    let base = if base.is_empty() { "section" } else { base };
    let mut id = base.to_string();
    let mut suffix = 1;
    while used_ids.contains(&id) {
        id = format!("{}-{}", base, suffix);
        suffix += 1;
    }
    id
}

/// Convert heading text to a slug suitable for use as an HTML id.
fn slugify(s: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in s.trim().chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }
    slug
}

/// Render TOC entries as nested lists following heading levels.
pub fn toc_html(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut out = String::from("<div class=\"toc\">\n");
    // Levels of the currently open lists, outermost first.
    let mut open: Vec<u8> = Vec::new();

    for entry in entries {
        match open.last().copied() {
            None => {
                out.push_str("<ul>\n");
                open.push(entry.level);
            }
            Some(current) if entry.level > current => {
                out.push_str("\n<ul>\n");
                open.push(entry.level);
            }
            Some(_) => {
                out.push_str("</li>\n");
                while open.len() > 1 && entry.level <= open[open.len() - 2] {
                    open.pop();
                    out.push_str("</ul>\n</li>\n");
                }
            }
        }
        out.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            html_escape(&entry.id),
            html_escape(&entry.text)
        ));
    }

    out.push_str("</li>\n");
    while open.len() > 1 {
        open.pop();
        out.push_str("</ul>\n</li>\n");
    }
    out.push_str("</ul>\n</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> MarkdownOutput {
        let options = markdown_options(&MarkdownConfig::default()).unwrap();
        render_markdown(markdown, options, &SyntaxHighlighter::plain())
    }

    /// Strip tags and collapse whitespace, leaving the visible words.
    fn visible_words(html: &str) -> Vec<String> {
        let mut text = String::new();
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' => {
                    in_tag = false;
                    text.push(' ');
                }
                _ if !in_tag => text.push(c),
                _ => {}
            }
        }
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("API Reference"), "api-reference");
        assert_eq!(slugify("  A -- B  "), "a-b");
        assert_eq!(slugify("安装 UV"), "安装-uv");
    }

    #[test]
    fn test_render_basic_markdown() {
        let output = render("# Hello\n\nWorld");

        assert!(output.html.contains("<h1 id=\"hello\">Hello</h1>"));
        assert!(output.html.contains("<p>World</p>"));
        assert_eq!(output.toc.len(), 1);
        assert_eq!(output.toc[0].text, "Hello");
        assert_eq!(output.toc[0].level, 1);
    }

    #[test]
    fn test_plain_paragraphs_keep_all_words_in_order() {
        let markdown = "The quick brown fox\njumps over\n\nthe lazy dog again and again";
        let output = render(markdown);
        let expected: Vec<String> = markdown.split_whitespace().map(str::to_string).collect();
        assert_eq!(visible_words(&output.html), expected);
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let output = render("## Setup\n\n## Setup\n\n## Setup");
        let ids: Vec<&str> = output.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["setup", "setup-1", "setup-2"]);
    }

    #[test]
    fn test_explicit_heading_id_is_kept() {
        let output = render("## Install {#install-uv .wide}");
        assert_eq!(output.toc[0].id, "install-uv");
        assert_eq!(output.toc[0].text, "Install");
        assert!(output.html.contains("<h2 id=\"install-uv\" class=\"wide\">"));
    }

    #[test]
    fn test_heading_with_inline_code() {
        let output = render("## Using `uv add`");
        assert_eq!(output.toc[0].text, "Using uv add");
        assert_eq!(output.toc[0].id, "using-uv-add");
        assert!(output.html.contains("<code>uv add</code>"));
    }

    #[test]
    fn test_punctuation_only_heading() {
        let output = render("## ???");
        assert_eq!(output.toc[0].id, "section");
    }

    #[test]
    fn test_render_code_block() {
        let output = render("```rust\nlet x = 1 < 2;\n```");
        assert!(output.html.contains("<pre><code class=\"language-rust\">"));
        assert!(output.html.contains("let x = 1 &lt; 2;"));
        assert!(output.toc.is_empty());
        assert_eq!(output.toc_html, "");
    }

    #[test]
    fn test_render_table() {
        let output = render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(output.html.contains("<table>"));
        assert!(output.html.contains("<td>1</td>"));
    }

    #[test]
    fn test_toc_html_nesting() {
        let output = render("## One\n\n### One A\n\n### One B\n\n## Two");
        assert_eq!(
            output.toc_html,
            "<div class=\"toc\">\n<ul>\n\
             <li><a href=\"#one\">One</a>\n<ul>\n\
             <li><a href=\"#one-a\">One A</a></li>\n\
             <li><a href=\"#one-b\">One B</a></li>\n\
             </ul>\n</li>\n\
             <li><a href=\"#two\">Two</a></li>\n\
             </ul>\n</div>\n"
        );
    }

    #[test]
    fn test_toc_html_skipped_level_stays_nested() {
        let entries = vec![
            TocEntry { text: "A".into(), id: "a".into(), level: 2 },
            TocEntry { text: "B".into(), id: "b".into(), level: 4 },
            TocEntry { text: "C".into(), id: "c".into(), level: 3 },
        ];
        let html = toc_html(&entries);
        assert_eq!(html.matches("<ul>").count(), 2);
        assert_eq!(html.matches("</ul>").count(), 2);
        assert_eq!(html.matches("<li>").count(), 3);
        assert_eq!(html.matches("</li>").count(), 3);
    }

    #[test]
    fn test_invalid_extension() {
        let config = MarkdownConfig {
            extensions: vec!["not_a_real_extension".to_string()],
            ..MarkdownConfig::default()
        };

        let result = markdown_options(&config);
        assert!(matches!(result, Err(MarkdownError::InvalidExtension(_))));
    }
}
