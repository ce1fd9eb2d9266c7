//! Markdown-to-HTML rendering as an ordered pipeline of text rewrites.
//!
//! There is no syntax tree: every stage scans the working buffer with a
//! pattern and splices HTML markup into it, so later stages see the markup
//! produced by earlier ones. The order of [`Stage::PIPELINE`] therefore
//! decides the output for ambiguous input:
//!
//! - fenced code blocks before inline code,
//! - bold before italic,
//! - images before links,
//! - list items before list grouping,
//! - every markup stage before paragraph wrapping.

pub mod blocks;
pub mod classify;
pub mod escape;
pub mod inline;

pub use classify::{LineClass, MARKUP_PREFIXES, classify_line};

use blocks::FenceStash;

/// One rewrite pass over the working buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Escape,
    CodeFences,
    InlineCode,
    Headers,
    Bold,
    Italic,
    Images,
    Links,
    UnorderedLists,
    Paragraphs,
}

impl Stage {
    /// Stages in the order [`render`] applies them.
    pub const PIPELINE: [Stage; 10] = [
        Stage::Escape,
        Stage::CodeFences,
        Stage::InlineCode,
        Stage::Headers,
        Stage::Bold,
        Stage::Italic,
        Stage::Images,
        Stage::Links,
        Stage::UnorderedLists,
        Stage::Paragraphs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Escape => "escape",
            Stage::CodeFences => "code-fences",
            Stage::InlineCode => "inline-code",
            Stage::Headers => "headers",
            Stage::Bold => "bold",
            Stage::Italic => "italic",
            Stage::Images => "images",
            Stage::Links => "links",
            Stage::UnorderedLists => "unordered-lists",
            Stage::Paragraphs => "paragraphs",
        }
    }

    /// Applies this stage to `buf`.
    ///
    /// Fenced code is moved into `fences` so no later stage can rewrite it.
    pub fn apply(self, buf: &str, fences: &mut FenceStash) -> String {
        match self {
            Stage::Escape => escape::escape_html(buf),
            Stage::CodeFences => fences.extract(buf),
            Stage::InlineCode => inline::code_spans(buf),
            Stage::Headers => blocks::headers(buf),
            Stage::Bold => inline::bold(buf),
            Stage::Italic => inline::italic(buf),
            Stage::Images => inline::images(buf),
            Stage::Links => inline::links(buf),
            Stage::UnorderedLists => blocks::unordered_lists(buf),
            Stage::Paragraphs => classify::wrap_paragraphs(buf),
        }
    }
}

/// Renders `markdown` into an HTML fragment.
///
/// Never fails: text that does not match any stage is left as escaped
/// literal text, and plain lines end up wrapped in `<p>` tags.
pub fn render(markdown: &str) -> String {
    let mut fences = FenceStash::default();
    let mut buf = markdown.to_string();

    for stage in Stage::PIPELINE {
        buf = stage.apply(&buf, &mut fences);
        log::trace!("stage {} -> {} bytes", stage.name(), buf.len());
    }

    fences.restore(&buf)
}
