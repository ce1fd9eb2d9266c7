use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to read template at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed template: {0}")]
    Malformed(String),
    #[error("Failed to write page: {0}")]
    Render(#[from] std::io::Error),
}

/// Named substitution points a page template may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// `{{.Title}}`, inserted as escaped text.
    Title,
    /// `{{.Body}}`, inserted as raw HTML.
    Body,
}

impl Slot {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Title" => Some(Slot::Title),
            "Body" => Some(Slot::Body),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

/// Values substituted into a [`PageTemplate`].
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub title: &'a str,
    /// Rendered HTML fragment. Written as-is.
    pub body: &'a str,
}

/// An HTML page with `{{.Title}}` and `{{.Body}}` placeholders.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    segments: Vec<Segment>,
}

impl PageTemplate {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Splits `source` into literal text and slots.
    ///
    /// Whitespace inside the braces is allowed (`{{ .Body }}`). Any other
    /// action, or a `{{` that is never closed, makes the template malformed.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        static ACTION: OnceLock<Regex> = OnceLock::new();
        let re = ACTION
            .get_or_init(|| Regex::new(r"\{\{\s*\.(\w+)\s*\}\}").expect("Invalid action regex"));

        let mut segments = Vec::new();
        let mut last = 0;
        for caps in re.captures_iter(source) {
            let action = caps.get(0).map_or(0..0, |m| m.range());
            let name = &caps[1];
            let slot = Slot::from_name(name).ok_or_else(|| {
                TemplateError::Malformed(format!("unknown placeholder `{}`", &source[action.clone()]))
            })?;

            push_text(&mut segments, &source[last..action.start])?;
            segments.push(Segment::Slot(slot));
            last = action.end;
        }
        push_text(&mut segments, &source[last..])?;

        let template = Self { segments };
        if !template.slots().any(|slot| slot == Slot::Body) {
            log::warn!("Page template has no {{{{.Body}}}} placeholder");
        }
        Ok(template)
    }

    /// Slots in the order they appear.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(slot) => Some(*slot),
            Segment::Text(_) => None,
        })
    }

    pub fn render_to_string(&self, page: &Page) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(Slot::Title) => {
                    out.push_str(&html_escape::encode_quoted_attribute(page.title))
                }
                Segment::Slot(Slot::Body) => out.push_str(page.body),
            }
        }
        out
    }

    /// Writes the filled-in page to `out` and returns the bytes written.
    pub fn execute<W: Write>(&self, mut out: W, page: &Page) -> Result<usize, TemplateError> {
        let html = self.render_to_string(page);
        out.write_all(html.as_bytes())?;
        out.flush()?;
        Ok(html.len())
    }
}

fn push_text(segments: &mut Vec<Segment>, text: &str) -> Result<(), TemplateError> {
    if let Some(offset) = text.find("{{") {
        let snippet: String = text[offset..].chars().take(24).collect();
        return Err(TemplateError::Malformed(format!(
            "unsupported or unclosed action near `{snippet}`"
        )));
    }
    if !text.is_empty() {
        segments.push(Segment::Text(text.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const PAGE: &str = "<title>{{.Title}}</title>\n<body>{{ .Body }}</body>";

    #[test]
    fn fills_both_slots() {
        let template = PageTemplate::parse(PAGE).unwrap();
        let html = template.render_to_string(&Page {
            title: "Notes",
            body: "<h1>Hi</h1>",
        });

        assert_eq!(html, "<title>Notes</title>\n<body><h1>Hi</h1></body>");
        assert_eq!(template.slots().collect::<Vec<_>>(), vec![Slot::Title, Slot::Body]);
    }

    #[test]
    fn title_is_escaped_body_is_not() {
        let template = PageTemplate::parse(PAGE).unwrap();
        let html = template.render_to_string(&Page {
            title: "Tom & <Jerry>",
            body: "<p>raw</p>",
        });

        assert!(html.contains("<title>Tom &amp; &lt;Jerry&gt;</title>"));
        assert!(html.contains("<body><p>raw</p></body>"));
    }

    #[test]
    fn slots_may_repeat() {
        let template = PageTemplate::parse("{{.Title}}|{{.Title}}|{{.Body}}").unwrap();
        let html = template.render_to_string(&Page {
            title: "t",
            body: "b",
        });

        assert_eq!(html, "t|t|b");
    }

    #[test]
    fn unknown_placeholder_is_malformed() {
        let result = PageTemplate::parse("<p>{{.Author}}</p>");

        assert!(matches!(result, Err(TemplateError::Malformed(_))));
        assert!(result.unwrap_err().to_string().contains("{{.Author}}"));
    }

    #[test]
    fn unclosed_action_is_malformed() {
        let result = PageTemplate::parse("<title>{{.Title</title>");
        assert!(matches!(result, Err(TemplateError::Malformed(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let result = PageTemplate::load(dir.path().join("template.html"));

        assert!(matches!(result, Err(TemplateError::Read { .. })));
    }

    #[test]
    fn execute_writes_and_counts_bytes() {
        let template = PageTemplate::parse(PAGE).unwrap();
        let mut out = Vec::new();
        let written = template
            .execute(
                &mut out,
                &Page {
                    title: "T",
                    body: "B",
                },
            )
            .unwrap();

        assert_eq!(written, out.len());
        assert_eq!(String::from_utf8(out).unwrap(), "<title>T</title>\n<body>B</body>");
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_a_render_error() {
        let template = PageTemplate::parse("{{.Body}}").unwrap();
        let result = template.execute(
            FullDisk,
            &Page {
                title: "T",
                body: "<p>B</p>",
            },
        );

        assert!(matches!(result, Err(TemplateError::Render(_))));
        assert!(result.unwrap_err().to_string().contains("disk full"));
    }
}
