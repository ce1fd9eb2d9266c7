/// Tag openings that mark a line as already rendered.
pub const MARKUP_PREFIXES: [&str; 9] = [
    "<h", "<ul", "<li", "<pre", "<img", "<p", "<code", "<strong", "<em",
];

/// Classification of one line of the working buffer, made from the line
/// alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Empty once whitespace is trimmed.
    Blank,
    /// Starts with one of [`MARKUP_PREFIXES`] once trimmed.
    Markup,
    /// Anything else; gets wrapped in `<p>`.
    Plain,
}

pub fn classify_line(line: &str) -> LineClass {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineClass::Blank
    } else if MARKUP_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
    {
        LineClass::Markup
    } else {
        LineClass::Plain
    }
}

/// Wraps every plain line in its own `<p>` element.
///
/// Works line by line: consecutive plain lines become consecutive
/// paragraphs, not one. Blank lines come out empty, markup lines untouched.
pub fn wrap_paragraphs(buf: &str) -> String {
    buf.split('\n')
        .map(|line| match classify_line(line) {
            LineClass::Blank => String::new(),
            LineClass::Markup => line.to_string(),
            LineClass::Plain => format!("<p>{line}</p>"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
