//! Markdown rendering, excerpts and read-time estimation

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::config::SiteConfig;

/// A markdown body after rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBody {
    pub html: String,
    pub excerpt: String,
    pub time_to_read: u32,
}

/// Markdown renderer with syntax highlighted code blocks
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
    words_per_minute: usize,
    excerpt_length: usize,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::from_config(&SiteConfig::default())
    }

    /// Renderer honoring the site's highlight and reading settings
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.highlight.theme.clone(),
            line_numbers: config.highlight.line_number,
            words_per_minute: config.words_per_minute.max(1),
            excerpt_length: config.excerpt_length,
        }
    }

    /// Render a document body and derive its excerpt and read time.
    ///
    /// Excerpt and word count come from prose only; code blocks and math are
    /// left out of both.
    pub fn render_body(&self, markdown: &str) -> Result<RenderedBody> {
        let (html, text) = self.render_with_text(markdown)?;
        let excerpt = prune_excerpt(&text, self.excerpt_length);
        let time_to_read = estimate_read_time(count_words(&text), self.words_per_minute);
        Ok(RenderedBody {
            html,
            excerpt,
            time_to_read,
        })
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        self.render_with_text(markdown).map(|(html, _)| html)
    }

    /// Render markdown to HTML, collecting the prose text along the way
    fn render_with_text(&self, markdown: &str) -> Result<(String, String)> {
        // Front-matter is stripped before this point
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_MATH
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut text = String::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    text.push(' ');
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(code) if in_code_block => {
                    code_block_content.push_str(&code);
                }
                Event::InlineMath(math) => {
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<span class="math math-inline">{}</span>"#,
                        html_escape(&math)
                    ))));
                }
                Event::DisplayMath(math) => {
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<div class="math math-display">{}</div>"#,
                        html_escape(&math)
                    ))));
                }
                _ if in_code_block => {}
                Event::Text(prose) => {
                    text.push_str(&prose);
                    events.push(Event::Text(prose));
                }
                Event::Code(code) => {
                    text.push_str(&code);
                    events.push(Event::Code(code));
                }
                Event::SoftBreak | Event::HardBreak => {
                    text.push(' ');
                    events.push(event);
                }
                Event::End(end) => {
                    if ends_block(&end) {
                        text.push(' ');
                    }
                    events.push(Event::End(end));
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok((html_output, text))
    }

    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        match self.highlight_lines(code, lang) {
            Some(lines) if self.line_numbers => add_line_numbers(&lines, lang),
            Some(lines) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                lines.join("\n")
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }

    /// Highlighted HTML for each source line of `code`
    fn highlight_lines(&self, code: &str, lang: &str) -> Option<Vec<String>> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())?;

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let ranges = highlighter.highlight_line(line, &self.syntax_set).ok()?;
            let html = styled_line_to_highlighted_html(&ranges[..], IncludeBackground::No).ok()?;
            lines.push(html.replace('\n', ""));
        }
        Some(lines)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Block-level ends separate words in the collected text
fn ends_block(end: &TagEnd) -> bool {
    matches!(
        end,
        TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::Item
            | TagEnd::List(_)
            | TagEnd::TableCell
            | TagEnd::TableRow
            | TagEnd::TableHead
            | TagEnd::FootnoteDefinition
    )
}

fn add_line_numbers(lines: &[String], lang: &str) -> String {
    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang,
        gutter,
        lines.join("\n")
    )
}

/// Reading time in whole minutes, never less than one
pub fn estimate_read_time(words: usize, words_per_minute: usize) -> u32 {
    let minutes = (words as f64 / words_per_minute.max(1) as f64).round() as u32;
    minutes.max(1)
}

/// Count words in plain text; each CJK character counts as a word
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphanumeric() && !is_cjk(c) {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else if is_cjk(c) {
            count += 1;
            in_word = false;
        } else if (c == '\'' || c == '\u{2019}') && in_word {
            // contractions stay one word
        } else {
            in_word = false;
        }
    }

    count
}

fn is_cjk(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Collapse whitespace and cut at the last word boundary within `max_chars`
pub fn prune_excerpt(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let mut pruned = String::new();
    for word in collapsed.split(' ') {
        let needed = if pruned.is_empty() {
            word.chars().count()
        } else {
            pruned.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars {
            break;
        }
        if !pruned.is_empty() {
            pruned.push(' ');
        }
        pruned.push_str(word);
    }

    if pruned.is_empty() {
        pruned = collapsed.chars().take(max_chars).collect();
    }
    pruned.push('…');
    pruned
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
