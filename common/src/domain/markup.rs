use std::sync::LazyLock;

use regex::Regex;

/// Converts lightweight markup into HTML.
///
/// Runs every [`Stage`] of [`Stage::PIPELINE`] in order, each one consuming the output
/// of the previous one. Never fails: anything that is not recognized markup is kept
/// as literal text.
pub fn render(markup: &str) -> String {
    Stage::PIPELINE
        .iter()
        .fold(markup.to_owned(), |text, stage| stage.apply(&text))
}

/// One pure text rewrite of the markup pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// `### `, `## ` and `# ` at line start, longest prefix first
    Headers,
    /// `**text**`
    Bold,
    /// `*text*`, must run after bold
    Italic,
    /// `[label](url)`
    Links,
    /// newline at the very end of the text
    TrailingBreak,
    /// blank-line separated segments wrapped in `<p>` unless already a block element
    Paragraphs,
}

static H3_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^### (.*)$").expect("H3_REGEX must be a valid regex"));
static H2_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^## (.*)$").expect("H2_REGEX must be a valid regex"));
static H1_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^# (.*)$").expect("H1_REGEX must be a valid regex"));
static BOLD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("BOLD_REGEX must be a valid regex"));
static ITALIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("ITALIC_REGEX must be a valid regex"));
static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[]+)\]\(([^\)]+)\)").expect("LINK_REGEX must be a valid regex")
});
static PARAGRAPH_BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\r?\n){2,}").expect("PARAGRAPH_BREAK_REGEX must be a valid regex")
});

// Opening tags of elements that must not be wrapped into a paragraph.
static BLOCK_ELEMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^<(?:h[1-6]|p|div|ul|ol|li|dl|blockquote|pre|table|hr|section|article|aside|header|footer|nav|main|figure|details|form|fieldset|address)(?:[\s/>]|$)",
    )
    .expect("BLOCK_ELEMENT_REGEX must be a valid regex")
});

impl Stage {
    pub const PIPELINE: [Stage; 6] = [
        Stage::Headers,
        Stage::Bold,
        Stage::Italic,
        Stage::Links,
        Stage::TrailingBreak,
        Stage::Paragraphs,
    ];

    pub fn apply(self, text: &str) -> String {
        match self {
            Stage::Headers => headers(text),
            Stage::Bold => BOLD_REGEX
                .replace_all(text, "<strong>${1}</strong>")
                .into_owned(),
            Stage::Italic => ITALIC_REGEX.replace_all(text, "<em>${1}</em>").into_owned(),
            Stage::Links => LINK_REGEX
                .replace_all(text, r#"<a href="${2}">${1}</a>"#)
                .into_owned(),
            Stage::TrailingBreak => trailing_break(text),
            Stage::Paragraphs => paragraphs(text),
        }
    }
}

fn headers(text: &str) -> String {
    let text = H3_REGEX.replace_all(text, "<h3>${1}</h3>");
    let text = H2_REGEX.replace_all(&text, "<h2>${1}</h2>");
    H1_REGEX.replace_all(&text, "<h1>${1}</h1>").into_owned()
}

fn trailing_break(text: &str) -> String {
    match text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
    {
        Some(stripped) => format!("{stripped}<br>"),
        None => text.to_owned(),
    }
}

fn paragraphs(text: &str) -> String {
    PARAGRAPH_BREAK_REGEX
        .split(text)
        .map(|segment| {
            if is_block_element(segment) {
                segment.to_owned()
            } else {
                format!("<p>{segment}</p>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_block_element(segment: &str) -> bool {
    BLOCK_ELEMENT_REGEX.is_match(segment.trim())
}
